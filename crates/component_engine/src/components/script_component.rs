//! Script component
//!
//! Hosts a set of [`ScriptHooks`] and the actor delegate bindings made on
//! their behalf. The bindings are recorded as explicit subscriptions so
//! they can be torn down when the script is cleared or reloaded; see
//! [`crate::scene::World::assign_script`].

use crate::events::{ActorBeginOverlap, ActorEndOverlap, ActorHit, BindingId, CollisionEventKind};
use crate::foundation::json::{read_string, JsonObject};
use crate::object::class::SCRIPT_COMPONENT_CLASS;
use crate::object::{Class, Object, ObjectHeader, ObjectId};
use serde_json::Value;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Callbacks a script implements; all default to no-ops
pub trait ScriptHooks {
    /// Script attached and ready
    fn begin_play(&mut self) {}

    /// Script about to be detached
    fn end_play(&mut self) {}

    /// Per-frame update
    fn tick(&mut self, _delta: f32) {}

    /// Owner actor started overlapping something
    fn on_begin_overlap(&mut self, _event: &ActorBeginOverlap) {}

    /// Owner actor stopped overlapping something
    fn on_end_overlap(&mut self, _event: &ActorEndOverlap) {}

    /// Owner actor was hit
    fn on_hit(&mut self, _event: &ActorHit) {}
}

/// One binding made on an actor delegate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSubscription {
    /// Actor whose delegate holds the binding
    pub actor: ObjectId,
    /// Which delegate
    pub kind: CollisionEventKind,
    /// Binding to remove on teardown
    pub binding: BindingId,
}

/// Actor component running a script
#[derive(Default)]
pub struct ScriptComponent {
    header: ObjectHeader,
    owner: Option<ObjectId>,
    script_name: Option<String>,
    hooks: Option<Rc<RefCell<dyn ScriptHooks>>>,
    subscriptions: Vec<ScriptSubscription>,
}

impl ScriptComponent {
    /// Component with no script assigned
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: ObjectHeader::named(name),
            ..Default::default()
        }
    }

    /// Name of the assigned script
    pub fn script_name(&self) -> Option<&str> {
        self.script_name.as_deref()
    }

    /// True if hooks are attached
    pub fn has_script(&self) -> bool {
        self.hooks.is_some()
    }

    /// Attached hooks
    pub fn hooks(&self) -> Option<&Rc<RefCell<dyn ScriptHooks>>> {
        self.hooks.as_ref()
    }

    /// Live delegate subscriptions
    pub fn subscriptions(&self) -> &[ScriptSubscription] {
        &self.subscriptions
    }

    pub(crate) fn set_script(&mut self, name: String, hooks: Rc<RefCell<dyn ScriptHooks>>) {
        self.script_name = Some(name);
        self.hooks = Some(hooks);
    }

    pub(crate) fn replace_hooks(&mut self, hooks: Rc<RefCell<dyn ScriptHooks>>) -> Option<Rc<RefCell<dyn ScriptHooks>>> {
        self.hooks.replace(hooks)
    }

    pub(crate) fn take_script(&mut self) -> Option<Rc<RefCell<dyn ScriptHooks>>> {
        self.script_name = None;
        self.hooks.take()
    }

    pub(crate) fn push_subscription(&mut self, subscription: ScriptSubscription) {
        self.subscriptions.push(subscription);
    }

    pub(crate) fn take_subscriptions(&mut self) -> Vec<ScriptSubscription> {
        std::mem::take(&mut self.subscriptions)
    }
}

impl fmt::Debug for ScriptComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptComponent")
            .field("name", &self.header.name)
            .field("owner", &self.owner)
            .field("script_name", &self.script_name)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl Object for ScriptComponent {
    fn class(&self) -> &'static Class {
        &SCRIPT_COMPONENT_CLASS
    }

    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn duplicate(&self) -> Box<dyn Object> {
        Box::new(Self {
            header: self.header.duplicate(),
            script_name: self.script_name.clone(),
            ..Default::default()
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    fn set_owner(&mut self, owner: Option<ObjectId>) {
        self.owner = owner;
    }

    fn serialize(&self, handle: &mut JsonObject) {
        if let Some(name) = &self.script_name {
            handle.insert("ScriptName".into(), Value::from(name.as_str()));
        }
    }

    fn deserialize(&mut self, handle: &JsonObject) {
        let name = read_string(handle, "ScriptName", "");
        self.script_name = if name.is_empty() { None } else { Some(name) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;
    impl ScriptHooks for Nothing {}

    #[test]
    fn test_script_name_persistence() {
        let mut script = ScriptComponent::new("script");
        let mut handle = JsonObject::new();
        script.serialize(&mut handle);
        assert!(!handle.contains_key("ScriptName"));

        script.set_script("door.lua".into(), Rc::new(RefCell::new(Nothing)));
        script.serialize(&mut handle);
        assert_eq!(handle["ScriptName"], Value::from("door.lua"));

        let mut loaded = ScriptComponent::new("loaded");
        loaded.deserialize(&handle);
        assert_eq!(loaded.script_name(), Some("door.lua"));
        // Loading only restores the name; hooks come from the script host
        assert!(!loaded.has_script());
    }

    #[test]
    fn test_duplicate_copies_name_only() {
        let mut script = ScriptComponent::new("script");
        script.set_script("door.lua".into(), Rc::new(RefCell::new(Nothing)));
        script.set_owner(Some(ObjectId::new(1, 0)));

        let copy = script.duplicate();
        let copy = copy.downcast_ref::<ScriptComponent>().unwrap();
        assert_eq!(copy.script_name(), Some("door.lua"));
        assert!(!copy.has_script());
        assert!(copy.owner().is_none());
        assert!(copy.subscriptions().is_empty());
    }
}
