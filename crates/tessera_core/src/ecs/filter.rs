//! # Filter Algebra
//!
//! Pure predicates over one component type, composable with AND/OR/NOT.
//!
//! Filters are built once (typically at system setup) and shared by
//! reference on every frame. Cloning a filter clones a pointer, never the
//! predicate.
//!
//! ```rust
//! use tessera_core::{Component, Filter};
//!
//! #[derive(Default)]
//! struct Camera { zoom: f64 }
//! impl Component for Camera {}
//!
//! let high = Filter::new(|c: &Camera| c.zoom > 1.0);
//! let low = Filter::new(|c: &Camera| c.zoom < 0.5);
//! let extreme = high | low;
//! assert!(extreme.matches(&Camera { zoom: 0.2 }));
//! assert!(!extreme.matches(&Camera { zoom: 0.8 }));
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use super::component::Component;
use super::entity::EntityId;
use super::storage::ComponentStore;

/// A pure predicate over one component's value.
pub struct Filter<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C: 'static> Filter<C> {
    /// Wraps a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// A filter every value passes.
    #[must_use]
    pub fn accept_all() -> Self {
        Self::new(|_| true)
    }

    /// Evaluates the predicate.
    #[inline]
    #[must_use]
    pub fn matches(&self, component: &C) -> bool {
        (self.predicate)(component)
    }
}

impl<C> Clone for Filter<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Filter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("component", &std::any::type_name::<C>())
            .finish_non_exhaustive()
    }
}

/// True iff every filter passes. Evaluates left to right and stops at the
/// first failure. An empty list passes everything.
pub fn and<C: 'static>(filters: impl IntoIterator<Item = Filter<C>>) -> Filter<C> {
    let filters: Vec<Filter<C>> = filters.into_iter().collect();
    Filter::new(move |component| all_match(&filters, component))
}

/// True iff any filter passes. Evaluates left to right and stops at the
/// first success. An empty list passes nothing.
pub fn or<C: 'static>(filters: impl IntoIterator<Item = Filter<C>>) -> Filter<C> {
    let filters: Vec<Filter<C>> = filters.into_iter().collect();
    Filter::new(move |component| filters.iter().any(|filter| filter.matches(component)))
}

/// Logical negation.
pub fn not<C: 'static>(filter: Filter<C>) -> Filter<C> {
    Filter::new(move |component| !filter.matches(component))
}

/// Implicit AND over a filter list, as used by the fused queries.
#[inline]
pub(crate) fn all_match<C>(filters: &[Filter<C>], component: &C) -> bool {
    filters.iter().all(|filter| (filter.predicate)(component))
}

impl<C: 'static> Not for Filter<C> {
    type Output = Self;

    fn not(self) -> Self {
        not(self)
    }
}

impl<C: 'static> BitAnd for Filter<C> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        and([self, rhs])
    }
}

impl<C: 'static> BitOr for Filter<C> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        or([self, rhs])
    }
}

/// Narrows an entity sequence to those whose `C` passes a filter.
///
/// Entities lacking `C` are skipped, not reported. Input order is kept, and
/// the source is only pulled as far as the consumer pulls this iterator.
pub struct Matching<'w, C: Component, I> {
    store: Option<&'w ComponentStore<C>>,
    entities: I,
    filter: &'w Filter<C>,
}

impl<'w, C: Component, I> Matching<'w, C, I>
where
    I: Iterator<Item = EntityId>,
{
    /// Wraps `entities`, fetching each candidate's `C` from `store`.
    /// A missing store matches nothing.
    pub fn new(store: Option<&'w ComponentStore<C>>, entities: I, filter: &'w Filter<C>) -> Self {
        Self {
            store,
            entities,
            filter,
        }
    }
}

impl<C: Component, I> Iterator for Matching<'_, C, I>
where
    I: Iterator<Item = EntityId>,
{
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        let store = self.store?;
        let filter = self.filter;
        self.entities.by_ref().find(|&entity| {
            store
                .get(entity)
                .is_some_and(|component| filter.matches(component))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.store {
            Some(_) => (0, self.entities.size_hint().1),
            None => (0, Some(0)),
        }
    }
}
