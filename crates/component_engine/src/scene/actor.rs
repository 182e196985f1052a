//! Actors: named owners of components

use crate::events::{ActorBeginOverlapDelegate, ActorEndOverlapDelegate, ActorHitDelegate};
use crate::object::class::ACTOR_CLASS;
use crate::object::{Class, Object, ObjectHeader, ObjectId};
use std::any::Any;

/// Owner of a list of components and a root scene component
#[derive(Debug, Default)]
pub struct Actor {
    header: ObjectHeader,
    components: Vec<ObjectId>,
    root_component: Option<ObjectId>,
    /// Fired when one of this actor's components begins overlapping another actor's
    pub on_actor_begin_overlap: ActorBeginOverlapDelegate,
    /// Fired when such an overlap ends
    pub on_actor_end_overlap: ActorEndOverlapDelegate,
    /// Fired on blocking contact with another actor's component
    pub on_actor_hit: ActorHitDelegate,
}

impl Actor {
    /// Actor with no components
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: ObjectHeader::named(name),
            ..Default::default()
        }
    }

    /// Owned components in insertion order
    pub fn components(&self) -> &[ObjectId] {
        &self.components
    }

    /// Root of the actor's scene tree
    pub fn root_component(&self) -> Option<ObjectId> {
        self.root_component
    }

    pub(crate) fn set_root_component(&mut self, root: Option<ObjectId>) {
        self.root_component = root;
    }

    pub(crate) fn push_component(&mut self, component: ObjectId) {
        if !self.components.contains(&component) {
            self.components.push(component);
        }
    }

    pub(crate) fn remove_component(&mut self, component: ObjectId) {
        self.components.retain(|c| *c != component);
        if self.root_component == Some(component) {
            self.root_component = None;
        }
    }
}

impl Object for Actor {
    fn class(&self) -> &'static Class {
        &ACTOR_CLASS
    }

    fn header(&self) -> &ObjectHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut ObjectHeader {
        &mut self.header
    }

    fn duplicate(&self) -> Box<dyn Object> {
        Box::new(Self::new(self.header.name.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
