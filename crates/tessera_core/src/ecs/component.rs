//! # Component System
//!
//! Components are plain attribute records owned and pooled by their store.
//! A pooled instance is recycled across entities, so the two lifecycle hooks
//! are the only place a component gets to establish or clear its state.

/// Marker trait for ECS components, with optional lifecycle hooks.
///
/// Instances grown by a store start as [`Default::default`]. Recycled
/// instances went through [`Component::reset`] when they were detached, so
/// with the provided hooks an attached component is always default-valued.
///
/// # Example
///
/// ```rust
/// use tessera_core::Component;
///
/// #[derive(Default)]
/// struct Camera {
///     zoom: f64,
/// }
///
/// impl Component for Camera {
///     fn init(&mut self) {
///         self.zoom = 1.0;
///     }
///
///     fn reset(&mut self) {
///         self.zoom = 1.0;
///     }
/// }
/// ```
pub trait Component: Default + 'static {
    /// Called exactly once each time a pooled instance is attached to an entity.
    #[inline]
    fn init(&mut self) {}

    /// Called exactly once each time an instance is detached and returned to
    /// the pool.
    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }
}
