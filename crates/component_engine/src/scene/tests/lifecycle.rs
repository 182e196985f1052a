//! Actors, attachment, destruction, duplication and JSON spawning

use super::{overlap_world, unit_box, watch, Seen};
use crate::components::{PrimitiveComponent, SceneComponent, ShapeComponent};
use crate::core::config::CollisionConfig;
use crate::events::CollisionEventKind;
use crate::foundation::math::{utils::quat_from_euler_degrees, Vec3};
use crate::object::{Object, ObjectId};
use crate::scene::{SerializationError, World};
use approx::assert_relative_eq;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_first_scene_component_becomes_root() {
    let mut world = overlap_world();
    let actor = world.spawn_actor("ship");
    let hull = unit_box(&mut world, Some(actor), "hull", 0.0);
    let wing = unit_box(&mut world, Some(actor), "wing", 1.0);

    let ship = world.actor(actor).unwrap();
    assert_eq!(ship.root_component(), Some(hull));
    assert_eq!(ship.components(), &[hull, wing]);
    assert_eq!(world.owner_of(wing), Some(actor));
    // No implicit attachment
    assert_eq!(world.scene_component(wing).unwrap().attach_parent(), None);
}

#[test]
fn test_non_actor_owner_is_ignored() {
    let mut world = overlap_world();
    let loose = unit_box(&mut world, None, "loose", 0.0);
    let child = unit_box(&mut world, Some(loose), "child", 0.0);
    assert_eq!(world.owner_of(child), None);
}

#[test]
fn test_shape_components_follow_config_default() {
    let mut world = World::new(CollisionConfig::default());
    let id = world.add_shape_component(None, "box", ShapeComponent::default_box());
    assert!(world.primitive(id).unwrap().generate_hit_events());

    let mut world = overlap_world();
    let id = world.add_shape_component(None, "box", ShapeComponent::default_box());
    assert!(!world.primitive(id).unwrap().generate_hit_events());
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let world = World::new(CollisionConfig::new().with_capsule_box_iterations(0));
    assert_eq!(world.config().capsule_box_iterations, 8);
}

#[test]
fn test_attachment_propagates_transforms() {
    let mut world = overlap_world();
    let parent = unit_box(&mut world, None, "parent", 1.0);
    let child = unit_box(&mut world, None, "child", 2.0);

    assert!(world.attach_to_component(child, parent));
    // Relative transform is kept, so the child now sits at parent + 2
    assert_relative_eq!(world.world_location(child).unwrap(), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);

    world.set_relative_location(parent, Vec3::new(0.0, 5.0, 0.0));
    assert_relative_eq!(world.world_location(child).unwrap(), Vec3::new(2.0, 5.0, 0.0), epsilon = 1e-5);
    assert!(world.primitive(child).unwrap().is_bounds_dirty());

    world.set_relative_rotation(parent, quat_from_euler_degrees(Vec3::new(0.0, 0.0, 90.0)));
    assert_relative_eq!(world.world_location(child).unwrap(), Vec3::new(0.0, 7.0, 0.0), epsilon = 1e-5);

    world.set_relative_scale(parent, Vec3::repeat(2.0));
    assert_relative_eq!(world.world_scale(child).unwrap(), Vec3::repeat(2.0), epsilon = 1e-5);
    assert_relative_eq!(
        world.primitive_mut(child).unwrap().calc_bounds().extents(),
        Vec3::repeat(1.0),
        epsilon = 1e-5
    );
}

#[test]
fn test_attachment_rejects_cycles() {
    let mut world = overlap_world();
    let a = world.add_component(None, Box::new(SceneComponent::new("a")));
    let b = world.add_component(None, Box::new(SceneComponent::new("b")));
    let c = world.add_component(None, Box::new(SceneComponent::new("c")));

    assert!(!world.attach_to_component(a, a));
    assert!(world.attach_to_component(b, a));
    assert!(world.attach_to_component(c, b));
    assert!(!world.attach_to_component(a, c));
    assert!(!world.attach_to_component(a, b));

    // Re-parenting moves the child out of the old parent's list
    assert!(world.attach_to_component(c, a));
    assert!(world.scene_component(b).unwrap().attach_children().is_empty());
    assert_eq!(world.scene_component(a).unwrap().attach_children(), &[b, c]);
}

#[test]
fn test_detach_keeps_world_transform() {
    let mut world = overlap_world();
    let parent = unit_box(&mut world, None, "parent", 1.0);
    let child = unit_box(&mut world, None, "child", 2.0);
    world.attach_to_component(child, parent);

    assert!(world.detach_from_parent(child));
    assert!(!world.detach_from_parent(child));
    assert_relative_eq!(world.world_location(child).unwrap(), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);

    world.set_relative_location(parent, Vec3::zeros());
    assert_relative_eq!(world.world_location(child).unwrap(), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_moving_parent_updates_child_overlaps() {
    let mut world = overlap_world();
    let parent = world.add_component(None, Box::new(SceneComponent::new("pivot")));
    let child = unit_box(&mut world, None, "child", 0.0);
    let target = unit_box(&mut world, None, "target", 5.0);
    world.attach_to_component(child, parent);
    world.tick(0.016);
    let log = watch(&world, target);

    world.set_relative_location(parent, Vec3::new(4.5, 0.0, 0.0));
    world.tick(0.016);

    assert_eq!(*log.borrow(), vec![Seen::Begin(child)]);
}

#[test]
fn test_destroying_parent_orphans_children_in_place() {
    let mut world = overlap_world();
    let actor = world.spawn_actor("actor");
    let parent = unit_box(&mut world, Some(actor), "parent", 1.0);
    let child = unit_box(&mut world, Some(actor), "child", 2.0);
    world.attach_to_component(child, parent);

    assert!(world.destroy_component(parent));
    assert!(!world.is_valid(parent));
    assert_eq!(world.scene_component(child).unwrap().attach_parent(), None);
    assert_relative_eq!(world.world_location(child).unwrap(), Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);

    let owner = world.actor(actor).unwrap();
    assert_eq!(owner.components(), &[child]);
    assert_eq!(owner.root_component(), None);
    assert!(world.spatial_query().bounds_of(parent).is_none());
}

#[test]
fn test_destroy_actor_takes_components() {
    let mut world = overlap_world();
    let actor = world.spawn_actor("actor");
    let a = unit_box(&mut world, Some(actor), "a", 0.0);
    let b = unit_box(&mut world, Some(actor), "b", 3.0);

    assert!(world.destroy(actor));
    assert!(!world.is_valid(actor));
    assert!(!world.is_valid(a));
    assert!(!world.is_valid(b));
    assert_eq!(world.spatial_query().entry_count(), 0);
    assert!(!world.destroy(actor));
}

#[test]
fn test_actor_events_forwarded() {
    let mut world = overlap_world();
    let red = world.spawn_actor("red");
    let blue = world.spawn_actor("blue");
    let r = unit_box(&mut world, Some(red), "r", 0.0);
    let b = unit_box(&mut world, Some(blue), "b", 0.5);

    let seen: Rc<RefCell<Vec<(CollisionEventKind, ObjectId, Option<ObjectId>)>>> = Rc::default();
    let sink = Rc::clone(&seen);
    world
        .actor(red)
        .unwrap()
        .on_actor_begin_overlap
        .add(move |e| sink.borrow_mut().push((CollisionEventKind::BeginOverlap, e.overlapped_component, e.other_actor)));
    let sink = Rc::clone(&seen);
    world
        .actor(red)
        .unwrap()
        .on_actor_end_overlap
        .add(move |e| sink.borrow_mut().push((CollisionEventKind::EndOverlap, e.overlapped_component, e.other_actor)));

    world.update_overlaps(b);
    assert!(world.is_overlapping_actor(red, blue));
    assert!(world.is_overlapping_actor(blue, red));

    world.set_relative_location(b, Vec3::new(9.0, 0.0, 0.0));
    world.update_overlaps(b);
    assert!(!world.is_overlapping_actor(red, blue));

    assert_eq!(
        *seen.borrow(),
        vec![
            (CollisionEventKind::BeginOverlap, r, Some(blue)),
            (CollisionEventKind::EndOverlap, r, Some(blue)),
        ]
    );
}

#[test]
fn test_same_owner_overlaps_stay_on_components() {
    let mut world = overlap_world();
    let actor = world.spawn_actor("actor");
    let a = unit_box(&mut world, Some(actor), "a", 0.0);
    let b = unit_box(&mut world, Some(actor), "b", 0.5);
    let log = watch(&world, a);

    let forwarded = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&forwarded);
    world
        .actor(actor)
        .unwrap()
        .on_actor_begin_overlap
        .add(move |_| *sink.borrow_mut() += 1);

    world.update_overlaps(b);
    assert_eq!(*log.borrow(), vec![Seen::Begin(b)]);
    assert_eq!(*forwarded.borrow(), 0);
}

#[test]
fn test_destroyed_actor_binding_is_pruned() {
    let mut world = overlap_world();
    let listener = world.spawn_actor("listener");
    let a = unit_box(&mut world, None, "a", 0.0);
    let b = unit_box(&mut world, None, "b", 0.5);

    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    world
        .primitive(a)
        .unwrap()
        .on_component_begin_overlap
        .add_object(Some(listener), move |_, _| *sink.borrow_mut() += 1);
    world.destroy(listener);

    world.update_overlaps(b);
    assert_eq!(*calls.borrow(), 0);
    assert!(world.primitive(a).unwrap().on_component_begin_overlap.is_empty());
}

#[test]
fn test_duplicate_actor_reproduces_hierarchy() {
    let mut world = overlap_world();
    let actor = world.spawn_actor("ship");
    let hull = unit_box(&mut world, Some(actor), "hull", 0.0);
    let turret = world.add_shape_component(Some(actor), "turret", ShapeComponent::new_sphere(0.25));
    world.set_relative_location(turret, Vec3::new(0.0, 0.0, 1.0));
    world.attach_to_component(turret, hull);
    world.set_relative_location(hull, Vec3::new(10.0, 0.0, 0.0));
    world.update_overlaps(hull);

    let copy = world.duplicate_actor(actor).unwrap();
    let copied = world.actor(copy).unwrap();
    assert_eq!(copied.components().len(), 2);
    let new_hull = copied.root_component().unwrap();
    let new_turret = copied.components()[1];
    assert_ne!(new_hull, hull);

    assert_eq!(world.scene_component(new_turret).unwrap().attach_parent(), Some(new_hull));
    assert_eq!(world.owner_of(new_turret), Some(copy));
    assert_eq!(world.primitive(new_turret).unwrap().sphere_radius(), Some(0.25));
    assert_relative_eq!(world.world_location(new_turret).unwrap(), Vec3::new(10.0, 0.0, 1.0), epsilon = 1e-5);
    assert!(world.primitive(new_hull).unwrap().overlap_infos().is_empty());
    assert!(world.primitive(new_hull).unwrap().on_component_hit.is_empty());
}

#[test]
fn test_duplicate_component_gets_fresh_identity() {
    let mut world = overlap_world();
    let a = unit_box(&mut world, None, "a", 0.0);
    let copy = world.duplicate_component(a, None).unwrap();

    let original = world.primitive(a).unwrap();
    let duplicate = world.primitive(copy).unwrap();
    assert_ne!(original.header().uuid, duplicate.header().uuid);
    assert_eq!(duplicate.name(), "a");
    assert_eq!(duplicate.box_extent(), original.box_extent());
    assert_eq!(world.component::<PrimitiveComponent>(copy).map(|p| p.is_visible()), Some(true));
}

#[test]
fn test_spawn_component_from_json() {
    let mut world = overlap_world();
    let actor = world.spawn_actor("actor");
    let data = json!({
        "Class": "SphereComponent",
        "Location": [0.0, 2.0, 0.0],
        "SphereRadius": "1.250000",
        "GenerateHitEvents": false
    });

    let id = world.spawn_component_from_json(Some(actor), &data).unwrap();
    let sphere = world.primitive(id).unwrap();
    assert_eq!(sphere.sphere_radius(), Some(1.25));
    assert!(!sphere.generate_hit_events());
    assert_eq!(world.owner_of(id), Some(actor));
    assert_relative_eq!(world.world_location(id).unwrap(), Vec3::new(0.0, 2.0, 0.0));

    let saved = world.serialize_component(id).unwrap();
    assert_eq!(saved["Class"], json!("SphereComponent"));
    assert_eq!(saved["SphereRadius"], json!("1.250000"));

    assert_eq!(
        world.spawn_component_from_json(None, &json!({ "Class": "Widget" })),
        Err(SerializationError::UnknownClass("Widget".into()))
    );
}
