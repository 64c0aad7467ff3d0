//! # Spatial Predicates
//!
//! Allocation-free geometric tests meant to be used inside filter bodies over
//! positional components. Both tests are inclusive on the boundary.

use bytemuck::{Pod, Zeroable};

use crate::ecs::Filter;

/// A 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Vec2 {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// `min_x <= x <= max_x && min_y <= y <= max_y`.
#[inline]
#[must_use]
pub fn within_bounds(position: Vec2, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> bool {
    position.x >= min_x && position.x <= max_x && position.y >= min_y && position.y <= max_y
}

/// `dx² + dy² <= radius²`. Compares squared distances, no square root.
#[inline]
#[must_use]
pub fn within_radius(position: Vec2, center_x: f64, center_y: f64, radius: f64) -> bool {
    let dx = position.x - center_x;
    let dy = position.y - center_y;
    dx * dx + dy * dy <= radius * radius
}

/// Builds a filter passing components whose projected position lies inside
/// the inclusive box.
pub fn bounds_filter<C, P>(project: P, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Filter<C>
where
    C: 'static,
    P: Fn(&C) -> Vec2 + Send + Sync + 'static,
{
    Filter::new(move |component| within_bounds(project(component), min_x, min_y, max_x, max_y))
}

/// Builds a filter passing components whose projected position lies inside
/// the inclusive circle.
pub fn radius_filter<C, P>(project: P, center_x: f64, center_y: f64, radius: f64) -> Filter<C>
where
    C: 'static,
    P: Fn(&C) -> Vec2 + Send + Sync + 'static,
{
    Filter::new(move |component| within_radius(project(component), center_x, center_y, radius))
}
