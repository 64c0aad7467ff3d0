//! # Registry Scenario Tests
//!
//! End-to-end behaviour of stores, joins and filtered queries through the
//! public API only.

use std::collections::BTreeSet;

use tessera_core::{
    bounds_filter, filter, radius_filter, Component, EntityId, Filter, Registry, RegistryConfig,
    Vec2,
};

#[derive(Debug, Default, PartialEq)]
struct Transform {
    position: Vec2,
    rotation: f64,
}

impl Component for Transform {
    fn init(&mut self) {
        self.position = Vec2::default();
        self.rotation = 0.0;
    }

    fn reset(&mut self) {
        self.position = Vec2::default();
        self.rotation = 0.0;
    }
}

#[derive(Debug, PartialEq)]
struct Camera {
    zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl Component for Camera {
    fn init(&mut self) {
        self.zoom = 1.0;
    }

    fn reset(&mut self) {
        self.zoom = 1.0;
    }
}

#[derive(Debug, Default)]
struct Velocity {
    x: f64,
    y: f64,
}

impl Component for Velocity {}

fn ids(iter: impl Iterator<Item = EntityId>) -> BTreeSet<EntityId> {
    iter.collect()
}

fn spawn_player(registry: &mut Registry) -> EntityId {
    let e = registry.new_entity();
    registry.add_component::<Transform>(e);
    e
}

fn spawn_camera(registry: &mut Registry) -> EntityId {
    let e = registry.new_entity();
    registry.add_component::<Transform>(e);
    registry.add_component::<Camera>(e);
    e
}

/// Test: Fresh entities are never the undefined id.
#[test]
fn test_entity_creation() {
    let mut registry = Registry::new();
    let player = spawn_player(&mut registry);
    let camera = spawn_camera(&mut registry);
    let empty = registry.new_entity();

    for e in [player, camera, empty] {
        assert_ne!(e, EntityId::UNDEFINED);
    }
}

/// Test: Filtering on a numeric attribute over three cameras.
#[test]
fn test_filtered_query_scenario() {
    let mut registry = Registry::new();
    let mut spawn = |zoom: f64| {
        let e = registry.new_entity();
        registry.add_component::<Camera>(e).zoom = zoom;
        e
    };
    let e1 = spawn(2.0);
    let e2 = spawn(0.5);
    let e3 = spawn(1.5);

    let high_zoom = Filter::new(|c: &Camera| c.zoom > 1.0);
    let hits = ids(registry.query_with::<Camera>(std::slice::from_ref(&high_zoom)));
    assert_eq!(hits, ids([e1, e3].into_iter()));
    assert!(!hits.contains(&e2));

    // Same answer through the standalone Where stage.
    let hits = ids(registry.filter_entities(registry.query::<Camera>(), &high_zoom));
    assert_eq!(hits, ids([e1, e3].into_iter()));

    let low_zoom = Filter::new(|c: &Camera| c.zoom < 0.8);
    let extreme = [filter::or([high_zoom, low_zoom])];
    assert_eq!(registry.query_with::<Camera>(&extreme).count(), 3);
}

/// Test: Spatial filters over a positional component.
#[test]
fn test_spatial_filter_integration() {
    let mut registry = Registry::new();
    let positions = [
        Vec2::new(2.0, 3.0),
        Vec2::new(8.0, 2.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(10.0, 10.0),
    ];

    let entities: Vec<EntityId> = positions
        .iter()
        .map(|&position| {
            let e = registry.new_entity();
            registry.add_component::<Transform>(e).position = position;
            e
        })
        .collect();

    let in_box = [bounds_filter(|t: &Transform| t.position, 0.0, 0.0, 5.0, 5.0)];
    assert_eq!(
        ids(registry.query_with::<Transform>(&in_box)),
        ids([entities[0], entities[2]].into_iter())
    );

    let near_origin = [radius_filter(|t: &Transform| t.position, 0.0, 0.0, 4.0)];
    let hits: Vec<_> = registry.query_with::<Transform>(&near_origin).collect();
    assert_eq!(hits, vec![entities[0], entities[2]]);
}

/// Test: Presence in a store and presence in its query agree, before and
/// after swap-removals.
#[test]
fn test_presence_matches_query_after_churn() {
    let mut registry = Registry::new();
    let all: Vec<EntityId> = (0..50).map(|_| spawn_player(&mut registry)).collect();

    for e in all.iter().step_by(3) {
        registry.remove_component::<Transform>(*e);
    }
    registry.destroy_entity(all[1]);

    let queried = ids(registry.query::<Transform>());
    for &e in &all {
        assert_eq!(
            registry.get_component::<Transform>(e).is_some(),
            queried.contains(&e),
            "entity {e}"
        );
    }
    assert_eq!(queried.len(), registry.component_count::<Transform>());
}

/// Test: Swap-removal from a non-tail slot leaves every other value intact.
#[test]
fn test_swap_removal_preserves_values() {
    let mut registry = Registry::new();
    let entities: Vec<EntityId> = (0_i32..6)
        .map(|i| {
            let e = registry.new_entity();
            registry.add_component::<Transform>(e).rotation = f64::from(i);
            e
        })
        .collect();

    registry.remove_component::<Transform>(entities[1]);
    registry.remove_component::<Transform>(entities[3]);

    for (i, &e) in (0_i32..).zip(&entities) {
        let expected = if i == 1 || i == 3 { None } else { Some(f64::from(i)) };
        assert_eq!(
            registry.get_component::<Transform>(e).map(|t| t.rotation),
            expected
        );
    }
}

/// Test: Join results do not depend on which store drives the join.
#[test]
fn test_join_result_independent_of_driver() {
    let mut registry = Registry::new();
    let mut cameras = BTreeSet::new();
    for i in 0..40 {
        let e = spawn_player(&mut registry);
        if i % 7 == 0 {
            registry.add_component::<Camera>(e);
            cameras.insert(e);
        }
    }

    // Cameras are the small side.
    assert_eq!(ids(registry.query2::<Transform, Camera>()), cameras);

    // Flip the cardinalities: more cameras than transforms.
    let mut all_cameras = cameras.clone();
    for _ in 0..100 {
        let e = registry.new_entity();
        registry.add_component::<Camera>(e);
        all_cameras.insert(e);
    }
    assert!(registry.component_count::<Camera>() > registry.component_count::<Transform>());
    assert_eq!(ids(registry.query2::<Transform, Camera>()), cameras);
    assert_eq!(ids(registry.query2::<Camera, Transform>()), cameras);
    assert_eq!(ids(registry.query::<Camera>()), all_cameras);
}

/// Test: Three-way join and filters on every position.
#[test]
fn test_query3_with_filters() {
    let mut registry = Registry::new();

    let fast = spawn_camera(&mut registry);
    registry.add_component::<Velocity>(fast).x = 10.0;
    registry.get_component_mut::<Camera>(fast).unwrap().zoom = 2.0;

    let slow = spawn_camera(&mut registry);
    registry.add_component::<Velocity>(slow).y = 0.1;

    let no_velocity = spawn_camera(&mut registry);

    let moving = [Filter::new(|v: &Velocity| v.x.hypot(v.y) > 1.0)];
    let zoomed = [Filter::new(|c: &Camera| c.zoom > 1.0)];

    let all3 = ids(registry.query3::<Transform, Camera, Velocity>());
    assert_eq!(all3, ids([fast, slow].into_iter()));
    assert!(!all3.contains(&no_velocity));

    let hits: Vec<_> = registry
        .query_with3::<Transform, Camera, Velocity>(&[], &zoomed, &moving)
        .collect();
    assert_eq!(hits, vec![fast]);

    let hits: Vec<_> = registry
        .query3_where_third::<Transform, Camera, Velocity>(&moving)
        .collect();
    assert_eq!(hits, vec![fast]);
}

/// Test: Abandoning a filtered query mid-way leaves the registry usable.
#[test]
fn test_early_termination() {
    let mut registry = Registry::new();
    for _ in 0..1_000 {
        spawn_camera(&mut registry);
    }

    let any = [Filter::<Camera>::accept_all()];
    let first = registry.query2_where_second::<Transform, Camera>(&any).next();
    assert!(first.is_some());

    let first = first.unwrap();
    registry.destroy_entity(first);
    assert_eq!(registry.component_count::<Camera>(), 999);
}

/// Test: Lifecycle hooks run on attach and detach.
#[test]
fn test_hooks_restore_defaults() {
    let mut registry = Registry::new();
    let e = registry.new_entity();
    {
        let transform = registry.add_component::<Transform>(e);
        transform.position = Vec2::new(4.0, 4.0);
        transform.rotation = 1.5;
    }
    registry.remove_component::<Transform>(e);

    let reused = registry.new_entity();
    assert_eq!(
        registry.add_component::<Transform>(reused),
        &mut Transform::default()
    );
}

/// Test: Registry built from TOML configuration.
#[test]
fn test_registry_from_config() {
    let config = RegistryConfig::from_toml_str(
        r"
        initial_capacity = 64
        first_entity_id = 1000
        ",
    )
    .unwrap();

    let mut registry = Registry::with_config(&config).unwrap();
    let e = spawn_camera(&mut registry);
    assert_eq!(e.raw(), 1000);
    assert_eq!(registry.store_count(), 2);
}
