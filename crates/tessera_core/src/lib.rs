//! # TESSERA Core
//!
//! Allocation-averse entity/component store with typed queries and a
//! composable filter algebra, built for simulations that ask "which entities
//! hold {A, B, ...}, and which of those satisfy P" every frame.
//!
//! ## Architecture Rules
//!
//! 1. **Pooled storage** - Component instances are recycled, never freed
//! 2. **Dense iteration** - Each store is a contiguous array kept packed by swap-removal
//! 3. **Lazy queries** - Joins and filters are iterators; nothing is materialized
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::{Component, Filter, Registry};
//!
//! #[derive(Default)]
//! struct Camera { zoom: f64 }
//! impl Component for Camera {}
//!
//! let mut registry = Registry::new();
//! for zoom in [2.0, 0.5, 1.5] {
//!     let e = registry.new_entity();
//!     registry.add_component::<Camera>(e).zoom = zoom;
//! }
//!
//! let high_zoom = [Filter::new(|c: &Camera| c.zoom > 1.0)];
//! assert_eq!(registry.query_with::<Camera>(&high_zoom).count(), 2);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod spatial;

pub use config::RegistryConfig;
pub use ecs::{
    filter, Component, ComponentStore, Driver, EntityId, Filter, IdGenerator, IdSource, Join2,
    Join3, Matching, Registry, SharedIdGenerator, StoreEntities,
};
pub use error::{EcsError, EcsResult};
pub use spatial::{bounds_filter, radius_filter, within_bounds, within_radius, Vec2};
