//! # Entity Registry
//!
//! Owns one [`ComponentStore`] per component type and routes every
//! add/get/remove/destroy call to the right one. The registry itself holds no
//! component data.
//!
//! Stores are created lazily by the first mutating call that mentions their
//! type and live until the registry is dropped. Read-only calls on a type that
//! was never stored see an empty store.

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::component::Component;
use super::entity::{EntityId, IdGenerator, IdSource};
use super::filter::{Filter, Matching};
use super::query::{Join2, Join3, StoreEntities};
use super::storage::{AnyStore, ComponentStore};
use crate::config::RegistryConfig;
use crate::error::{EcsError, EcsResult};

/// The entity registry - container for every component store.
///
/// # Example
///
/// ```rust
/// use tessera_core::{Component, Registry};
///
/// #[derive(Default)]
/// struct Camera { zoom: f64 }
/// impl Component for Camera {}
///
/// let mut registry = Registry::new();
/// let entity = registry.new_entity();
/// registry.add_component::<Camera>(entity).zoom = 2.0;
///
/// assert_eq!(registry.get_component::<Camera>(entity).map(|c| c.zoom), Some(2.0));
/// assert_eq!(registry.query::<Camera>().count(), 1);
/// ```
pub struct Registry {
    /// One type-erased store per component type.
    stores: HashMap<TypeId, Box<dyn AnyStore>>,
    /// Identifier space for new entities.
    ids: Box<dyn IdSource>,
    /// Capacity reserved by each newly created store.
    store_capacity: usize,
}

impl Registry {
    /// Creates an empty registry with its own identifier space.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_source(IdGenerator::new())
    }

    /// Creates an empty registry drawing identifiers from `ids`.
    #[must_use]
    pub fn with_id_source(ids: impl IdSource + 'static) -> Self {
        Self {
            stores: HashMap::new(),
            ids: Box::new(ids),
            store_capacity: 0,
        }
    }

    /// Creates an empty registry from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if the configuration fails
    /// validation.
    pub fn with_config(config: &RegistryConfig) -> EcsResult<Self> {
        config.validate()?;
        tracing::debug!(
            initial_capacity = config.initial_capacity,
            first_entity_id = config.first_entity_id,
            "registry configured"
        );

        let mut registry = Self::with_id_source(IdGenerator::starting_at(config.first_entity_id));
        registry.store_capacity = config.initial_capacity;
        Ok(registry)
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Allocates a new entity identifier. No components are attached.
    #[inline]
    pub fn new_entity(&mut self) -> EntityId {
        self.ids.next_id()
    }

    /// Detaches every component `id` holds.
    ///
    /// Cost is proportional to the number of component types ever stored,
    /// not to the number of entities. The identifier is not recycled; using
    /// it afterwards is a caller bug that simply finds no components.
    ///
    /// # Returns
    ///
    /// The number of components that were detached.
    pub fn destroy_entity(&mut self, id: EntityId) -> usize {
        let mut removed = 0;
        for store in self.stores.values_mut() {
            if store.remove_entity(id) {
                removed += 1;
            }
        }
        tracing::debug!(entity = %id, removed, "entity destroyed");
        removed
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attaches a `C` to `id`, or returns the one already attached.
    ///
    /// The returned reference is invalidated by the next add or remove on
    /// `C`'s store; the borrow checker enforces this.
    pub fn add_component<C: Component>(&mut self, id: EntityId) -> &mut C {
        self.store_mut::<C>().add(id)
    }

    /// Gets `id`'s `C`, or `None` if it has none.
    #[inline]
    #[must_use]
    pub fn get_component<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.store::<C>()?.get(id)
    }

    /// Gets `id`'s `C` mutably, or `None` if it has none.
    #[inline]
    pub fn get_component_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.store_mut::<C>().get_mut(id)
    }

    /// Gets `id`'s `C`, reporting absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::MissingComponent`] if `id` has no `C`.
    pub fn try_component<C: Component>(&self, id: EntityId) -> EcsResult<&C> {
        self.get_component::<C>(id)
            .ok_or_else(|| EcsError::MissingComponent {
                entity: id,
                component: type_name::<C>(),
            })
    }

    /// Gets `id`'s `C` where the caller has already established presence.
    ///
    /// # Panics
    ///
    /// Panics if `id` has no `C`. That is a programming error at the call
    /// site, not a runtime condition to recover from.
    #[must_use]
    pub fn must_get_component<C: Component>(&self, id: EntityId) -> &C {
        match self.try_component::<C>(id) {
            Ok(component) => component,
            Err(err) => panic!("{err}"),
        }
    }

    /// Checks if `id` holds a `C`.
    #[inline]
    #[must_use]
    pub fn has_component<C: Component>(&self, id: EntityId) -> bool {
        self.store::<C>().is_some_and(|store| store.contains(id))
    }

    /// Detaches `id`'s `C`, running its reset hook.
    ///
    /// # Returns
    ///
    /// `true` if a component was removed, `false` if `id` had none.
    pub fn remove_component<C: Component>(&mut self, id: EntityId) -> bool {
        self.store_mut::<C>().remove(id)
    }

    /// Number of entities holding a `C`.
    #[inline]
    #[must_use]
    pub fn component_count<C: Component>(&self) -> usize {
        self.store::<C>().map_or(0, ComponentStore::len)
    }

    /// Number of component types with a store.
    #[inline]
    #[must_use]
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// Read-only handle to `C`'s store, if it has been created.
    #[must_use]
    pub fn store<C: Component>(&self) -> Option<&ComponentStore<C>> {
        self.stores
            .get(&TypeId::of::<C>())?
            .as_any()
            .downcast_ref::<ComponentStore<C>>()
    }

    /// `C`'s store, created on first use.
    pub fn store_mut<C: Component>(&mut self) -> &mut ComponentStore<C> {
        let capacity = self.store_capacity;
        self.stores
            .entry(TypeId::of::<C>())
            .or_insert_with(|| {
                tracing::debug!(component = type_name::<C>(), capacity, "component store created");
                Box::new(ComponentStore::<C>::with_capacity(capacity))
            })
            .as_any_mut()
            .downcast_mut::<ComponentStore<C>>()
            .expect("store registered under a foreign TypeId")
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Entities holding a `C`, in dense order.
    #[must_use]
    pub fn query<C: Component>(&self) -> StoreEntities<'_> {
        match self.store::<C>() {
            Some(store) => store.iter_entities(),
            None => <&[EntityId]>::default().iter().copied(),
        }
    }

    /// Entities holding both an `A` and a `B`.
    pub fn query2<A: Component, B: Component>(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.join2::<A, B>().map(|(entity, _, _)| entity)
    }

    /// Entities holding an `A`, a `B` and a `C`.
    pub fn query3<A: Component, B: Component, C: Component>(
        &self,
    ) -> impl Iterator<Item = EntityId> + '_ {
        self.join3::<A, B, C>().map(|(entity, _, _, _)| entity)
    }

    /// Rows `(entity, &A, &B)` for entities holding both types.
    #[must_use]
    pub fn join2<A: Component, B: Component>(&self) -> Join2<'_, A, B> {
        Join2::new(self.store::<A>(), self.store::<B>())
    }

    /// Rows `(entity, &A, &B, &C)` for entities holding all three types.
    #[must_use]
    pub fn join3<A: Component, B: Component, C: Component>(&self) -> Join3<'_, A, B, C> {
        Join3::new(self.store::<A>(), self.store::<B>(), self.store::<C>())
    }

    /// Narrows `entities` to those whose `C` passes `filter`. Entities
    /// without a `C` are skipped.
    pub fn filter_entities<'w, C, I>(
        &'w self,
        entities: I,
        filter: &'w Filter<C>,
    ) -> Matching<'w, C, I::IntoIter>
    where
        C: Component,
        I: IntoIterator<Item = EntityId>,
    {
        Matching::new(self.store::<C>(), entities.into_iter(), filter)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
