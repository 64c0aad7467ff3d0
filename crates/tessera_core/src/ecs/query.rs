//! # Conjunctive Queries
//!
//! Lazy joins over two or three component stores.
//!
//! ## Driver selection
//!
//! ```text
//! Transform: 500,000 entities
//! Camera:         12 entities   <- driver: walk these 12,
//!                                  probe Transform's index for each
//! ```
//!
//! The store with the fewest entities is picked every time a join is built,
//! never cached, so the choice follows cardinalities as they drift between
//! frames. Ties go to the earlier position. The driver only changes the cost
//! of a join; the set of rows it yields is the same for any choice.
//!
//! ## Contract
//!
//! A join borrows its stores for as long as it lives, so the borrow checker
//! rules out adding or removing components of a participating type while the
//! join is being consumed. Dropping a join early holds nothing back.

use std::iter::Enumerate;
use std::slice;

use super::component::Component;
use super::entity::EntityId;
use super::storage::ComponentStore;

/// Lazily yields the entities of a single store, in dense order.
pub type StoreEntities<'w> = std::iter::Copied<slice::Iter<'w, EntityId>>;

/// Position of the store a join iterates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Driver {
    /// First type parameter.
    First,
    /// Second type parameter.
    Second,
    /// Third type parameter.
    Third,
}

impl Driver {
    /// Picks the position holding the fewest entities; ties go to the
    /// earliest position.
    fn smallest(counts: &[usize]) -> Self {
        let mut best = 0;
        for (position, &count) in counts.iter().enumerate().skip(1) {
            if count < counts[best] {
                best = position;
            }
        }
        match best {
            0 => Self::First,
            1 => Self::Second,
            _ => Self::Third,
        }
    }
}

/// Fetches a join column. The driver's value sits in the slot being walked,
/// every other column pays one index probe.
#[inline]
fn fetch<C: Component>(
    store: &ComponentStore<C>,
    is_driver: bool,
    slot: usize,
    entity: EntityId,
) -> Option<&C> {
    if is_driver {
        Some(store.at_slot(slot))
    } else {
        store.get(entity)
    }
}

fn empty_cursor<'w>() -> Enumerate<slice::Iter<'w, EntityId>> {
    let empty: &'w [EntityId] = &[];
    empty.iter().enumerate()
}

/// Two-way join yielding `(entity, &A, &B)` for every entity holding both.
pub struct Join2<'w, A: Component, B: Component> {
    stores: Option<(&'w ComponentStore<A>, &'w ComponentStore<B>)>,
    driver: Driver,
    cursor: Enumerate<slice::Iter<'w, EntityId>>,
}

impl<'w, A: Component, B: Component> Join2<'w, A, B> {
    /// Builds a join over two stores. A missing store joins as empty.
    #[must_use]
    pub fn new(a: Option<&'w ComponentStore<A>>, b: Option<&'w ComponentStore<B>>) -> Self {
        let (Some(a), Some(b)) = (a, b) else {
            return Self {
                stores: None,
                driver: Driver::First,
                cursor: empty_cursor(),
            };
        };

        let driver = Driver::smallest(&[a.len(), b.len()]);
        let dense = match driver {
            Driver::First => a.entities(),
            Driver::Second | Driver::Third => b.entities(),
        };

        Self {
            stores: Some((a, b)),
            driver,
            cursor: dense.iter().enumerate(),
        }
    }

    /// Which store this join iterates.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> Driver {
        self.driver
    }
}

impl<'w, A: Component, B: Component> Iterator for Join2<'w, A, B> {
    type Item = (EntityId, &'w A, &'w B);

    fn next(&mut self) -> Option<Self::Item> {
        let (a, b) = self.stores?;
        for (slot, &entity) in self.cursor.by_ref() {
            let Some(ca) = fetch(a, self.driver == Driver::First, slot, entity) else {
                continue;
            };
            let Some(cb) = fetch(b, self.driver == Driver::Second, slot, entity) else {
                continue;
            };
            return Some((entity, ca, cb));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor.len()))
    }
}

/// Three-way join yielding `(entity, &A, &B, &C)` for every entity holding
/// all three.
pub struct Join3<'w, A: Component, B: Component, C: Component> {
    stores: Option<(
        &'w ComponentStore<A>,
        &'w ComponentStore<B>,
        &'w ComponentStore<C>,
    )>,
    driver: Driver,
    cursor: Enumerate<slice::Iter<'w, EntityId>>,
}

impl<'w, A: Component, B: Component, C: Component> Join3<'w, A, B, C> {
    /// Builds a join over three stores. A missing store joins as empty.
    #[must_use]
    pub fn new(
        a: Option<&'w ComponentStore<A>>,
        b: Option<&'w ComponentStore<B>>,
        c: Option<&'w ComponentStore<C>>,
    ) -> Self {
        let (Some(a), Some(b), Some(c)) = (a, b, c) else {
            return Self {
                stores: None,
                driver: Driver::First,
                cursor: empty_cursor(),
            };
        };

        let driver = Driver::smallest(&[a.len(), b.len(), c.len()]);
        let dense = match driver {
            Driver::First => a.entities(),
            Driver::Second => b.entities(),
            Driver::Third => c.entities(),
        };

        Self {
            stores: Some((a, b, c)),
            driver,
            cursor: dense.iter().enumerate(),
        }
    }

    /// Which store this join iterates.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> Driver {
        self.driver
    }
}

impl<'w, A: Component, B: Component, C: Component> Iterator for Join3<'w, A, B, C> {
    type Item = (EntityId, &'w A, &'w B, &'w C);

    fn next(&mut self) -> Option<Self::Item> {
        let (a, b, c) = self.stores?;
        for (slot, &entity) in self.cursor.by_ref() {
            let Some(ca) = fetch(a, self.driver == Driver::First, slot, entity) else {
                continue;
            };
            let Some(cb) = fetch(b, self.driver == Driver::Second, slot, entity) else {
                continue;
            };
            let Some(cc) = fetch(c, self.driver == Driver::Third, slot, entity) else {
                continue;
            };
            return Some((entity, ca, cb, cc));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor.len()))
    }
}
