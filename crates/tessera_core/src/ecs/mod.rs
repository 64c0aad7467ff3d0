//! # Entity Component System
//!
//! Per-type pooled stores, a registry routing calls to them, and lazy
//! queries over one to three stores.
//!
//! ## Design Philosophy
//!
//! - One dense, pooled store per component type, created on first use
//! - Swap-removal keeps every store contiguous; no tombstones
//! - Joins walk the smallest participating store and probe the rest
//! - Every query is a pull-based iterator: stop pulling and nothing is left
//!   behind

mod component;
mod entity;
pub mod filter;
mod filtered;
pub mod query;
mod registry;
mod storage;

pub use component::Component;
pub use entity::{EntityId, IdGenerator, IdSource, SharedIdGenerator};
pub use filter::{Filter, Matching};
pub use query::{Driver, Join2, Join3, StoreEntities};
pub use registry::Registry;
pub use storage::ComponentStore;
