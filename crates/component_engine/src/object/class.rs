//! Reflection-lite class descriptors
//!
//! Every object type exposes a `'static` [`Class`] with an optional parent,
//! which is enough for `is_a` style checks without a full reflection system.

use std::fmt;

/// Static class descriptor
pub struct Class {
    name: &'static str,
    parent: Option<&'static Class>,
}

impl Class {
    /// Create a class descriptor
    pub const fn new(name: &'static str, parent: Option<&'static Class>) -> Self {
        Self { name, parent }
    }

    /// Class name as it appears in persisted data
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Direct parent class
    pub const fn super_class(&self) -> Option<&'static Class> {
        self.parent
    }

    /// True if `self` is `other` or derives from it
    pub fn is_child_of(&self, other: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, other) {
                return true;
            }
            current = class.parent;
        }
        false
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("parent", &self.parent.map(Class::name))
            .finish()
    }
}

/// Root of the hierarchy
pub static OBJECT_CLASS: Class = Class::new("Object", None);
/// Anything owned by an actor
pub static ACTOR_COMPONENT_CLASS: Class = Class::new("ActorComponent", Some(&OBJECT_CLASS));
/// Component with a transform
pub static SCENE_COMPONENT_CLASS: Class = Class::new("SceneComponent", Some(&ACTOR_COMPONENT_CLASS));
/// Scene component with collision
pub static PRIMITIVE_COMPONENT_CLASS: Class = Class::new("PrimitiveComponent", Some(&SCENE_COMPONENT_CLASS));
/// Abstract simple collision shape
pub static SHAPE_COMPONENT_CLASS: Class = Class::new("ShapeComponent", Some(&PRIMITIVE_COMPONENT_CLASS));
/// Oriented box shape
pub static BOX_COMPONENT_CLASS: Class = Class::new("BoxComponent", Some(&SHAPE_COMPONENT_CLASS));
/// Sphere shape
pub static SPHERE_COMPONENT_CLASS: Class = Class::new("SphereComponent", Some(&SHAPE_COMPONENT_CLASS));
/// Capsule shape
pub static CAPSULE_COMPONENT_CLASS: Class = Class::new("CapsuleComponent", Some(&SHAPE_COMPONENT_CLASS));
/// Component hosting script hooks
pub static SCRIPT_COMPONENT_CLASS: Class = Class::new("ScriptComponent", Some(&ACTOR_COMPONENT_CLASS));
/// Actor owning components
pub static ACTOR_CLASS: Class = Class::new("Actor", Some(&OBJECT_CLASS));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy() {
        assert!(BOX_COMPONENT_CLASS.is_child_of(&PRIMITIVE_COMPONENT_CLASS));
        assert!(BOX_COMPONENT_CLASS.is_child_of(&OBJECT_CLASS));
        assert!(BOX_COMPONENT_CLASS.is_child_of(&BOX_COMPONENT_CLASS));
        assert!(!BOX_COMPONENT_CLASS.is_child_of(&SPHERE_COMPONENT_CLASS));
        assert!(!ACTOR_CLASS.is_child_of(&ACTOR_COMPONENT_CLASS));
        assert!(!OBJECT_CLASS.is_child_of(&ACTOR_CLASS));
    }

    #[test]
    fn test_super_class_chain() {
        let names: Vec<_> = std::iter::successors(Some(&CAPSULE_COMPONENT_CLASS), |c| c.super_class())
            .map(Class::name)
            .collect();
        assert_eq!(
            names,
            ["CapsuleComponent", "ShapeComponent", "PrimitiveComponent", "SceneComponent", "ActorComponent", "Object"]
        );
    }
}
