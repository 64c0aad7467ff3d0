//! # Component Storage
//!
//! Pooled, dense component storage with an O(1) presence index.
//!
//! ```text
//! pool:      [C0, C1, C2, C3 | F0, F1]   <- occupied slots | free pooled instances
//! entities:  [e7, e2, e9, e4]            <- slot -> entity
//! slots:     {e7:0, e2:1, e9:2, e4:3}    <- entity -> slot
//! ```
//!
//! - Add reuses the first free pooled instance, or grows the pool by one
//! - Remove resets the instance, swaps the last occupied slot into the hole
//!   and shrinks the occupied range by one
//! - Memory is never returned: the pool only grows
//!
//! Iteration walks `entities` front to back, so order is the current dense
//! order and changes whenever a non-tail slot is removed.

use std::any::{type_name, Any};
use std::collections::HashMap;

use super::component::Component;
use super::entity::EntityId;

/// Pooled storage for a single component type.
///
/// The occupied range `pool[..len]` and `entities` are kept in lockstep with
/// `slots`: every entity in `slots` owns exactly one occupied slot and every
/// occupied slot belongs to exactly one entity.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Component, ComponentStore, EntityId};
///
/// #[derive(Default)]
/// struct Speed(f32);
/// impl Component for Speed {}
///
/// let mut store: ComponentStore<Speed> = ComponentStore::new();
/// let e = EntityId::from_raw(1);
/// store.add(e).0 = 4.0;
/// assert_eq!(store.get(e).map(|s| s.0), Some(4.0));
/// ```
pub struct ComponentStore<C: Component> {
    /// Occupied slots followed by free, already-reset instances.
    pool: Vec<C>,
    /// Slot -> entity for the occupied range.
    entities: Vec<EntityId>,
    /// Entity -> slot.
    slots: HashMap<EntityId, usize>,
}

impl<C: Component> ComponentStore<C> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty store with room for `capacity` components before the
    /// pool or index needs to reallocate.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pool: Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Attaches a component to `entity` and returns it.
    ///
    /// Idempotent: if the entity already holds one, the existing instance is
    /// returned untouched and no hook runs. Otherwise a pooled instance is
    /// reused (or the pool grows by one) and [`Component::init`] runs once.
    pub fn add(&mut self, entity: EntityId) -> &mut C {
        if let Some(&slot) = self.slots.get(&entity) {
            return &mut self.pool[slot];
        }

        let slot = self.entities.len();
        if slot == self.pool.len() {
            self.pool.push(C::default());
            tracing::trace!(
                component = type_name::<C>(),
                pool_size = self.pool.len(),
                "component pool grew"
            );
        }

        self.entities.push(entity);
        self.slots.insert(entity, slot);

        let component = &mut self.pool[slot];
        component.init();
        component
    }

    /// Gets the component attached to `entity`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&C> {
        self.slots.get(&entity).map(|&slot| &self.pool[slot])
    }

    /// Gets the component attached to `entity` mutably, if any.
    #[inline]
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut C> {
        let slot = *self.slots.get(&entity)?;
        Some(&mut self.pool[slot])
    }

    /// Detaches the component from `entity`.
    ///
    /// Runs [`Component::reset`] and returns the instance to the pool. The
    /// last occupied slot moves into the freed one, so the iteration order of
    /// the remaining entities may change.
    ///
    /// # Returns
    ///
    /// `true` if a component was removed, `false` if the entity had none.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        let Some(slot) = self.slots.remove(&entity) else {
            return false;
        };

        self.pool[slot].reset();

        let last = self.entities.len() - 1;
        if slot != last {
            self.pool.swap(slot, last);
            let moved = self.entities[last];
            self.entities[slot] = moved;
            self.slots.insert(moved, slot);
        }
        self.entities.pop();

        true
    }

    /// Checks if `entity` holds this component.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Number of entities currently holding this component.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Checks if no entity holds this component.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of instances the pool owns, attached or free.
    #[inline]
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Entities holding this component, in dense order.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Lazily yields the entities holding this component, in dense order.
    #[inline]
    pub fn iter_entities(&self) -> std::iter::Copied<std::slice::Iter<'_, EntityId>> {
        self.entities.iter().copied()
    }

    /// Iterates over `(entity, component)` rows in dense order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &C)> {
        self.entities.iter().copied().zip(self.pool.iter())
    }

    /// Iterates mutably over `(entity, component)` rows in dense order.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut C)> {
        self.entities.iter().copied().zip(self.pool.iter_mut())
    }

    /// Detaches every component, running each reset hook. The pool is kept.
    pub fn clear(&mut self) {
        let occupied = self.entities.len();
        for component in &mut self.pool[..occupied] {
            component.reset();
        }
        self.entities.clear();
        self.slots.clear();
    }

    /// Component in an occupied dense slot. Used by join drivers that already
    /// know the slot and would otherwise pay a second index lookup.
    #[inline]
    pub(crate) fn at_slot(&self, slot: usize) -> &C {
        debug_assert!(slot < self.entities.len(), "slot is not occupied");
        &self.pool[slot]
    }
}

impl<C: Component> Default for ComponentStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a store so the registry can hold one per type.
pub(crate) trait AnyStore {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Detaches `entity` if present; `true` if something was removed.
    fn remove_entity(&mut self, entity: EntityId) -> bool;
}

impl<C: Component> AnyStore for ComponentStore<C> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove_entity(&mut self, entity: EntityId) -> bool {
        self.remove(entity)
    }
}
