//! Script component delegate subscriptions

use super::{overlap_world, unit_box};
use crate::components::{ScriptComponent, ScriptHooks};
use crate::events::{ActorBeginOverlap, ActorEndOverlap, CollisionEventKind};
use crate::foundation::math::Vec3;
use crate::object::ObjectId;
use crate::scene::World;
use std::cell::RefCell;
use std::rc::Rc;

type Journal = Rc<RefCell<Vec<String>>>;

struct Recorder {
    tag: &'static str,
    journal: Journal,
}

impl Recorder {
    fn shared(tag: &'static str, journal: &Journal) -> Rc<RefCell<dyn ScriptHooks>> {
        Rc::new(RefCell::new(Self {
            tag,
            journal: Rc::clone(journal),
        }))
    }

    fn note(&self, what: &str) {
        self.journal.borrow_mut().push(format!("{}:{}", self.tag, what));
    }
}

impl ScriptHooks for Recorder {
    fn begin_play(&mut self) {
        self.note("begin_play");
    }

    fn end_play(&mut self) {
        self.note("end_play");
    }

    fn tick(&mut self, _delta: f32) {
        self.note("tick");
    }

    fn on_begin_overlap(&mut self, _event: &ActorBeginOverlap) {
        self.note("begin_overlap");
    }

    fn on_end_overlap(&mut self, _event: &ActorEndOverlap) {
        self.note("end_overlap");
    }
}

/// Actor with a box at the origin and a script component, plus a second
/// box far away on its own actor
fn scripted_scene() -> (World, ObjectId, ObjectId, ObjectId) {
    let mut world = overlap_world();
    let actor = world.spawn_actor("door");
    unit_box(&mut world, Some(actor), "trigger", 0.0);
    let script = world.add_component(Some(actor), Box::new(ScriptComponent::new("logic")));
    let visitor = world.spawn_actor("visitor");
    let body = unit_box(&mut world, Some(visitor), "body", 5.0);
    (world, actor, script, body)
}

fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_assign_binds_actor_delegates() {
    let (mut world, actor, script, body) = scripted_scene();
    let log = journal();

    assert!(world.assign_script(script, "door.lua", Recorder::shared("v1", &log)));

    let component = world.component::<ScriptComponent>(script).unwrap();
    assert_eq!(component.script_name(), Some("door.lua"));
    let kinds: Vec<CollisionEventKind> = component.subscriptions().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![CollisionEventKind::BeginOverlap, CollisionEventKind::EndOverlap, CollisionEventKind::Hit]
    );
    assert!(component.subscriptions().iter().all(|s| s.actor == actor));
    assert_eq!(world.actor(actor).unwrap().on_actor_hit.len(), 1);

    world.set_relative_location(body, Vec3::new(0.5, 0.0, 0.0));
    world.update_overlaps(body);
    world.set_relative_location(body, Vec3::new(5.0, 0.0, 0.0));
    world.update_overlaps(body);

    assert_eq!(*log.borrow(), vec!["v1:begin_play", "v1:begin_overlap", "v1:end_overlap"]);
}

#[test]
fn test_clear_script_removes_bindings() {
    let (mut world, actor, script, body) = scripted_scene();
    let log = journal();
    world.assign_script(script, "door.lua", Recorder::shared("v1", &log));

    assert!(world.clear_script(script));

    let door = world.actor(actor).unwrap();
    assert!(door.on_actor_begin_overlap.is_empty());
    assert!(door.on_actor_end_overlap.is_empty());
    assert!(door.on_actor_hit.is_empty());
    let component = world.component::<ScriptComponent>(script).unwrap();
    assert_eq!(component.script_name(), None);
    assert!(component.subscriptions().is_empty());

    world.set_relative_location(body, Vec3::new(0.5, 0.0, 0.0));
    world.update_overlaps(body);
    assert_eq!(*log.borrow(), vec!["v1:begin_play", "v1:end_play"]);

    assert!(!world.clear_script(body));
}

#[test]
fn test_reassign_replaces_previous_script() {
    let (mut world, actor, script, _) = scripted_scene();
    let log = journal();
    world.assign_script(script, "a.lua", Recorder::shared("a", &log));
    world.assign_script(script, "b.lua", Recorder::shared("b", &log));

    assert_eq!(*log.borrow(), vec!["a:begin_play", "a:end_play", "b:begin_play"]);
    assert_eq!(world.actor(actor).unwrap().on_actor_begin_overlap.len(), 1);
}

#[test]
fn test_hot_reload_rebinds() {
    let (mut world, actor, script, body) = scripted_scene();
    let log = journal();
    assert!(!world.hot_reload_script(script, Recorder::shared("v2", &log)));

    world.assign_script(script, "door.lua", Recorder::shared("v1", &log));
    assert!(world.hot_reload_script(script, Recorder::shared("v2", &log)));

    assert_eq!(world.actor(actor).unwrap().on_actor_begin_overlap.len(), 1);
    assert_eq!(world.component::<ScriptComponent>(script).unwrap().script_name(), Some("door.lua"));

    world.set_relative_location(body, Vec3::new(0.5, 0.0, 0.0));
    world.update_overlaps(body);

    assert_eq!(
        *log.borrow(),
        vec!["v1:begin_play", "v1:end_play", "v2:begin_play", "v2:begin_overlap"]
    );
}

#[test]
fn test_tick_and_destroy_drive_play_hooks() {
    let (mut world, actor, script, _) = scripted_scene();
    let log = journal();
    world.assign_script(script, "door.lua", Recorder::shared("v1", &log));

    world.tick(0.016);
    world.destroy(actor);
    world.tick(0.016);

    assert_eq!(*log.borrow(), vec!["v1:begin_play", "v1:tick", "v1:end_play"]);
    assert!(!world.is_valid(script));
}

#[test]
fn test_unowned_script_has_no_subscriptions() {
    let mut world = overlap_world();
    let script = world.add_component(None, Box::new(ScriptComponent::new("loose")));
    let log = journal();

    assert!(world.assign_script(script, "loose.lua", Recorder::shared("v1", &log)));
    assert!(world.component::<ScriptComponent>(script).unwrap().subscriptions().is_empty());
    assert_eq!(*log.borrow(), vec!["v1:begin_play"]);
}
