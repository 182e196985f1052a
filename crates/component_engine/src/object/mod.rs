//! Object model: class descriptors, identity registry and weak handles
//!
//! Every engine object lives in an [`ObjectRegistry`] slot. Other objects
//! never hold references to each other; they hold [`ObjectId`] /
//! [`WeakObjectPtr`] handles (slot index + serial number) that resolve to
//! `None` once the target has been destroyed.

pub mod class;
pub mod registry;
pub mod weak;

use std::any::Any;

pub use class::Class;
pub use registry::{ObjectLookup, ObjectRegistry};
pub use weak::{ObjectId, WeakObjectPtr};

use crate::components::{PrimitiveComponent, SceneComponent};
use crate::foundation::json::JsonObject;

/// Per-object bookkeeping shared by every object type
#[derive(Debug, Clone, Default)]
pub struct ObjectHeader {
    /// Display name
    pub name: String,
    /// Unique id handed out by the registry on registration
    pub uuid: u32,
    /// Registry handle, `None` until registered
    pub id: Option<ObjectId>,
    /// Outer (owning) object for memory accounting
    pub outer: Option<ObjectId>,
    /// Bytes attributed to this object and everything it outers
    pub allocated_bytes: u64,
    /// Allocation count attributed to this object and everything it outers
    pub allocated_count: u32,
}

impl ObjectHeader {
    /// Create a header with a display name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fresh header for a duplicate: same name, no identity, no memory
    pub fn duplicate(&self) -> Self {
        Self::named(self.name.clone())
    }
}

/// Base trait for every registry-owned object
pub trait Object: Any {
    /// Static class descriptor
    fn class(&self) -> &'static Class;

    /// Shared bookkeeping
    fn header(&self) -> &ObjectHeader;

    /// Shared bookkeeping (mutable)
    fn header_mut(&mut self) -> &mut ObjectHeader;

    /// Create an unregistered copy of this object
    ///
    /// Runtime state (overlap records, delegate bindings, registry identity)
    /// is never copied.
    fn duplicate(&self) -> Box<dyn Object>;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Downcast support (mutable)
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Transform node, if this object has one
    fn as_scene_component(&self) -> Option<&SceneComponent> {
        None
    }

    /// Transform node, if this object has one (mutable)
    fn as_scene_component_mut(&mut self) -> Option<&mut SceneComponent> {
        None
    }

    /// Collision-capable view, if this object is a primitive component
    fn as_primitive(&self) -> Option<&PrimitiveComponent> {
        None
    }

    /// Collision-capable view (mutable)
    fn as_primitive_mut(&mut self) -> Option<&mut PrimitiveComponent> {
        None
    }

    /// Called once the registry has assigned an identity
    fn on_registered(&mut self, _id: ObjectId) {}

    /// Owning actor, for actor components
    fn owner(&self) -> Option<ObjectId> {
        None
    }

    /// Set the owning actor; ignored by objects that cannot be owned
    fn set_owner(&mut self, _owner: Option<ObjectId>) {}

    /// Write persisted state into `handle`
    fn serialize(&self, _handle: &mut JsonObject) {}

    /// Read persisted state from `handle`, defaulting missing fields
    fn deserialize(&mut self, _handle: &JsonObject) {}

    /// Display name
    fn name(&self) -> &str {
        &self.header().name
    }

    /// Class check including ancestors
    fn is_a(&self, class: &Class) -> bool {
        self.class().is_child_of(class)
    }

    /// Exact class check
    fn is_exactly(&self, class: &Class) -> bool {
        std::ptr::eq(self.class(), class)
    }
}

impl dyn Object + '_ {
    /// Downcast to a concrete object type
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete object type (mutable)
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for dyn Object + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(self.class().name())
            .field("name", &self.header().name)
            .field("id", &self.header().id)
            .finish_non_exhaustive()
    }
}
