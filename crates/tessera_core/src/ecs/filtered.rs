//! # Fused Filtered Queries
//!
//! A join and per-position filter lists evaluated in one pass.
//!
//! Each position of an N-way query carries its own filter list. An empty list
//! matches everything; several filters in one list are ANDed. Filters run in
//! position order against the values the join already fetched, so no
//! component is looked up twice.
//!
//! The `*_where_*` entry points filter exactly one position and let the
//! others match everything.

use super::component::Component;
use super::entity::EntityId;
use super::filter::{all_match, Filter};
use super::registry::Registry;

impl Registry {
    /// Entities holding a `C` that passes every filter in `filters`.
    pub fn query_with<'w, C: Component>(
        &'w self,
        filters: &'w [Filter<C>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.store::<C>()
            .into_iter()
            .flat_map(|store| store.iter())
            .filter(move |&(_, component)| all_match(filters, component))
            .map(|(entity, _)| entity)
    }

    /// Two-way join where each position must pass its own filter list.
    pub fn query_with2<'w, A: Component, B: Component>(
        &'w self,
        first: &'w [Filter<A>],
        second: &'w [Filter<B>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.join2::<A, B>()
            .filter(move |&(_, a, b)| all_match(first, a) && all_match(second, b))
            .map(|(entity, _, _)| entity)
    }

    /// Three-way join where each position must pass its own filter list.
    pub fn query_with3<'w, A: Component, B: Component, C: Component>(
        &'w self,
        first: &'w [Filter<A>],
        second: &'w [Filter<B>],
        third: &'w [Filter<C>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.join3::<A, B, C>()
            .filter(move |&(_, a, b, c)| {
                all_match(first, a) && all_match(second, b) && all_match(third, c)
            })
            .map(|(entity, _, _, _)| entity)
    }

    /// Two-way join filtering only the `A` position.
    pub fn query2_where_first<'w, A: Component, B: Component>(
        &'w self,
        filters: &'w [Filter<A>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.query_with2::<A, B>(filters, &[])
    }

    /// Two-way join filtering only the `B` position.
    pub fn query2_where_second<'w, A: Component, B: Component>(
        &'w self,
        filters: &'w [Filter<B>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.query_with2::<A, B>(&[], filters)
    }

    /// Three-way join filtering only the `A` position.
    pub fn query3_where_first<'w, A: Component, B: Component, C: Component>(
        &'w self,
        filters: &'w [Filter<A>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.query_with3::<A, B, C>(filters, &[], &[])
    }

    /// Three-way join filtering only the `B` position.
    pub fn query3_where_second<'w, A: Component, B: Component, C: Component>(
        &'w self,
        filters: &'w [Filter<B>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.query_with3::<A, B, C>(&[], filters, &[])
    }

    /// Three-way join filtering only the `C` position.
    pub fn query3_where_third<'w, A: Component, B: Component, C: Component>(
        &'w self,
        filters: &'w [Filter<C>],
    ) -> impl Iterator<Item = EntityId> + 'w {
        self.query_with3::<A, B, C>(&[], &[], filters)
    }
}
