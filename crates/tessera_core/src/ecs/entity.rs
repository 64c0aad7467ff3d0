//! # Entity Identifiers
//!
//! Entities are bare identifiers. They carry no data and no generation
//! counter: an identifier is unique for the lifetime of the source that issued
//! it and is never handed out again, even after the entity is destroyed.
//!
//! Holding on to a destroyed identifier is a caller bug. Nothing here detects
//! it; lookups with a stale id simply find no components.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Unique identifier for an entity.
///
/// `0` is permanently reserved as [`EntityId::UNDEFINED`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The reserved "no entity" identifier.
    pub const UNDEFINED: Self = Self(0);

    /// Wraps a raw identifier value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Checks if this is the reserved undefined identifier.
    #[inline]
    #[must_use]
    pub const fn is_undefined(self) -> bool {
        self.0 == 0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that hands out fresh entity identifiers.
///
/// Implementations must never return [`EntityId::UNDEFINED`] and must never
/// return the same identifier twice.
pub trait IdSource: Send {
    /// Produces the next unique identifier.
    fn next_id(&mut self) -> EntityId;
}

/// Monotonic identifier generator.
///
/// Each generator is an independent identifier space, so tests can build as
/// many as they like without interfering with each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Creates a generator whose first identifier is `1`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates a generator whose first identifier is `first`.
    ///
    /// # Panics
    ///
    /// Panics if `first` is zero.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        assert!(first != 0, "identifier 0 is reserved for undefined");
        Self { next: first }
    }

    /// Returns the identifier the next call to [`IdSource::next_id`] yields.
    #[inline]
    #[must_use]
    pub const fn peek(&self) -> EntityId {
        EntityId(self.next)
    }

    /// Rewinds the generator to its initial state.
    ///
    /// Only sound when no identifier issued before the reset is still in use.
    #[inline]
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for IdGenerator {
    #[inline]
    fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self
            .next
            .checked_add(1)
            .expect("entity identifier space exhausted");
        id
    }
}

/// Cloneable handle to one identifier space shared by several owners.
///
/// Registries that must never hand out colliding ids (for example several
/// scenes of one game) draw from the same `SharedIdGenerator`.
#[derive(Clone, Debug, Default)]
pub struct SharedIdGenerator {
    inner: Arc<Mutex<IdGenerator>>,
}

impl SharedIdGenerator {
    /// Creates a fresh shared identifier space starting at `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewinds the shared space for every handle.
    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Returns the identifier the next allocation yields.
    #[must_use]
    pub fn peek(&self) -> EntityId {
        self.inner.lock().peek()
    }
}

impl IdSource for SharedIdGenerator {
    fn next_id(&mut self) -> EntityId {
        self.inner.lock().next_id()
    }
}
