//! Collision shape parameters for box, sphere and capsule components
//!
//! Parameters are always stored clamped: extents and radii are never
//! negative and a capsule's half height is never below its radius.

use crate::foundation::json::{float_to_decimal_string, read_decimal, read_vector, vector_to_json, JsonObject};
use crate::foundation::math::Vec3;
use crate::object::class::{BOX_COMPONENT_CLASS, CAPSULE_COMPONENT_CLASS, SPHERE_COMPONENT_CLASS};
use crate::object::Class;
use crate::physics::{BoundingVolume, ShapeKind};
use serde_json::Value;

/// Default box half extent
pub const DEFAULT_BOX_EXTENT: f32 = 0.5;
/// Default sphere radius
pub const DEFAULT_SPHERE_RADIUS: &str = "0.5";
/// Default capsule radius
pub const DEFAULT_CAPSULE_RADIUS: &str = "0.5";
/// Default capsule half height
pub const DEFAULT_CAPSULE_HALF_HEIGHT: &str = "1.0";

/// Shape parameters of a shape component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeComponent {
    /// Box with half extents
    Box {
        /// Half size along each local axis
        extent: Vec3,
    },
    /// Sphere
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Capsule along local Z
    Capsule {
        /// Sweep radius
        radius: f32,
        /// Center-to-tip distance, >= radius
        half_height: f32,
    },
}

impl ShapeComponent {
    /// Box shape (extent clamped)
    pub fn new_box(extent: Vec3) -> Self {
        Self::Box {
            extent: extent.sup(&Vec3::zeros()),
        }
    }

    /// Sphere shape (radius clamped)
    pub fn new_sphere(radius: f32) -> Self {
        Self::Sphere {
            radius: radius.max(0.0),
        }
    }

    /// Capsule shape (radius and half height clamped)
    pub fn new_capsule(radius: f32, half_height: f32) -> Self {
        let radius = radius.max(0.0);
        Self::Capsule {
            radius,
            half_height: half_height.max(radius),
        }
    }

    /// Default box (half extent 0.5)
    pub fn default_box() -> Self {
        Self::new_box(Vec3::repeat(DEFAULT_BOX_EXTENT))
    }

    /// Default sphere (radius 0.5)
    pub fn default_sphere() -> Self {
        Self::new_sphere(0.5)
    }

    /// Default capsule (radius 0.5, half height 1.0)
    pub fn default_capsule() -> Self {
        Self::new_capsule(0.5, 1.0)
    }

    /// Shape discriminant
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Box { .. } => ShapeKind::Box,
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Capsule { .. } => ShapeKind::Capsule,
        }
    }

    /// Class descriptor of the component carrying this shape
    pub fn class(&self) -> &'static Class {
        match self {
            Self::Box { .. } => &BOX_COMPONENT_CLASS,
            Self::Sphere { .. } => &SPHERE_COMPONENT_CLASS,
            Self::Capsule { .. } => &CAPSULE_COMPONENT_CLASS,
        }
    }

    /// Default shape for a class name
    pub fn for_class_name(name: &str) -> Option<Self> {
        match name {
            n if n == BOX_COMPONENT_CLASS.name() => Some(Self::default_box()),
            n if n == SPHERE_COMPONENT_CLASS.name() => Some(Self::default_sphere()),
            n if n == CAPSULE_COMPONENT_CLASS.name() => Some(Self::default_capsule()),
            _ => None,
        }
    }

    /// Fresh local-space bounding volume for these parameters
    pub fn bounding_volume(&self) -> BoundingVolume {
        match *self {
            Self::Box { extent } => BoundingVolume::new_box(extent),
            Self::Sphere { radius } => BoundingVolume::new_sphere(radius),
            Self::Capsule { radius, half_height } => BoundingVolume::new_capsule(radius, half_height),
        }
    }

    /// Write shape keys
    pub fn serialize(&self, handle: &mut JsonObject) {
        match *self {
            Self::Box { extent } => {
                handle.insert("BoxExtent".into(), vector_to_json(extent));
            }
            Self::Sphere { radius } => {
                handle.insert("SphereRadius".into(), Value::from(float_to_decimal_string(radius)));
            }
            Self::Capsule { radius, half_height } => {
                handle.insert("CapsuleRadius".into(), Value::from(float_to_decimal_string(radius)));
                handle.insert("CapsuleHalfHeight".into(), Value::from(float_to_decimal_string(half_height)));
            }
        }
    }

    /// Read shape keys of the same variant, defaulting missing fields
    pub fn deserialize(&self, handle: &JsonObject) -> Self {
        match self {
            Self::Box { .. } => Self::new_box(read_vector(handle, "BoxExtent", Vec3::repeat(DEFAULT_BOX_EXTENT))),
            Self::Sphere { .. } => Self::new_sphere(read_decimal(handle, "SphereRadius", DEFAULT_SPHERE_RADIUS)),
            Self::Capsule { .. } => Self::new_capsule(
                read_decimal(handle, "CapsuleRadius", DEFAULT_CAPSULE_RADIUS),
                read_decimal(handle, "CapsuleHalfHeight", DEFAULT_CAPSULE_HALF_HEIGHT),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_clamp() {
        assert_eq!(
            ShapeComponent::new_box(Vec3::new(-1.0, 1.0, 2.0)),
            ShapeComponent::Box { extent: Vec3::new(0.0, 1.0, 2.0) }
        );
        assert_eq!(ShapeComponent::new_sphere(-1.0), ShapeComponent::Sphere { radius: 0.0 });
        assert_eq!(
            ShapeComponent::new_capsule(1.0, 0.25),
            ShapeComponent::Capsule { radius: 1.0, half_height: 1.0 }
        );
    }

    #[test]
    fn test_class_lookup() {
        assert_eq!(ShapeComponent::for_class_name("SphereComponent"), Some(ShapeComponent::default_sphere()));
        assert_eq!(ShapeComponent::for_class_name("Nope"), None);
        assert_eq!(ShapeComponent::default_capsule().class().name(), "CapsuleComponent");
    }

    #[test]
    fn test_capsule_keys_default_independently() {
        let mut handle = JsonObject::new();
        handle.insert("CapsuleRadius".into(), Value::from("0.250000"));

        let loaded = ShapeComponent::default_capsule().deserialize(&handle);
        assert_eq!(loaded, ShapeComponent::Capsule { radius: 0.25, half_height: 1.0 });
    }
}
