//! World-level tests: overlap lifecycle, scene graph, scripts

mod lifecycle;
mod scripts;

use super::World;
use crate::components::ShapeComponent;
use crate::core::config::CollisionConfig;
use crate::foundation::math::Vec3;
use crate::object::ObjectId;
use std::cell::RefCell;
use std::rc::Rc;

/// Delegate traffic seen by a component, in delivery order
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Seen {
    Begin(ObjectId),
    End(ObjectId),
    Hit(ObjectId, Vec3),
}

pub(super) type EventLog = Rc<RefCell<Vec<Seen>>>;

pub(super) fn overlap_world() -> World {
    World::new(CollisionConfig::new().with_shapes_generate_hit_events(false))
}

/// Unit cube (half extent 0.5) centered on the X axis
pub(super) fn unit_box(world: &mut World, owner: Option<ObjectId>, name: &str, x: f32) -> ObjectId {
    let id = world.add_shape_component(owner, name, ShapeComponent::default_box());
    world.set_relative_location(id, Vec3::new(x, 0.0, 0.0));
    id
}

pub(super) fn set_hit_events(world: &mut World, id: ObjectId, enabled: bool) {
    world
        .primitive_mut(id)
        .expect("primitive")
        .set_generate_hit_events(enabled);
}

/// Record every component delegate broadcast on `id`
pub(super) fn watch(world: &World, id: ObjectId) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let primitive = world.primitive(id).expect("primitive");

    let sink = Rc::clone(&log);
    primitive
        .on_component_begin_overlap
        .add(move |e| sink.borrow_mut().push(Seen::Begin(e.other_component)));
    let sink = Rc::clone(&log);
    primitive
        .on_component_end_overlap
        .add(move |e| sink.borrow_mut().push(Seen::End(e.other_component)));
    let sink = Rc::clone(&log);
    primitive
        .on_component_hit
        .add(move |e| sink.borrow_mut().push(Seen::Hit(e.other_component, e.hit.impact_normal())));
    log
}
