//! Component persistence through JSON objects
//!
//! Each component writes its own keys next to a `Class` key naming its
//! type. Loading picks the type from `Class` and lets the component read
//! the rest, defaulting whatever is missing.

use crate::components::{PrimitiveComponent, SceneComponent, ScriptComponent, ShapeComponent};
use crate::foundation::json::JsonObject;
use crate::object::class::{PRIMITIVE_COMPONENT_CLASS, SCENE_COMPONENT_CLASS, SCRIPT_COMPONENT_CLASS};
use crate::object::Object;
use serde_json::Value;

/// Key holding the class name
pub const CLASS_KEY: &str = "Class";

/// Errors from loading a component out of JSON
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// The value was not a JSON object
    #[error("Component data is not a JSON object")]
    NotAnObject,

    /// No `Class` key
    #[error("Component data has no 'Class' key")]
    MissingClass,

    /// `Class` names a type this engine cannot create
    #[error("Unknown component class: {0}")]
    UnknownClass(String),
}

/// Default-constructed component for a persisted class name
pub fn new_component_for_class(class_name: &str) -> Option<Box<dyn Object>> {
    if let Some(shape) = ShapeComponent::for_class_name(class_name) {
        return Some(Box::new(PrimitiveComponent::with_shape(class_name, shape)));
    }
    match class_name {
        n if n == SCENE_COMPONENT_CLASS.name() => Some(Box::new(SceneComponent::new(n))),
        n if n == PRIMITIVE_COMPONENT_CLASS.name() => Some(Box::new(PrimitiveComponent::new(n))),
        n if n == SCRIPT_COMPONENT_CLASS.name() => Some(Box::new(ScriptComponent::new(n))),
        _ => None,
    }
}

/// Write an object's class name and persisted keys
pub fn component_to_json(object: &dyn Object) -> JsonObject {
    let mut handle = JsonObject::new();
    handle.insert(CLASS_KEY.into(), Value::from(object.class().name()));
    object.serialize(&mut handle);
    handle
}

/// Create and load an unregistered component from JSON
pub fn component_from_json(value: &Value) -> Result<Box<dyn Object>, SerializationError> {
    let handle = value.as_object().ok_or(SerializationError::NotAnObject)?;
    let class_name = handle
        .get(CLASS_KEY)
        .and_then(Value::as_str)
        .ok_or(SerializationError::MissingClass)?;

    let mut object = new_component_for_class(class_name).ok_or_else(|| {
        log::warn!("Cannot load component of unknown class '{}'", class_name);
        SerializationError::UnknownClass(class_name.to_string())
    })?;
    object.deserialize(handle);
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use serde_json::json;

    #[test]
    fn test_box_round_trip() {
        let mut cube = PrimitiveComponent::new_box("crate");
        cube.set_box_extent(Vec3::new(1.0, 2.0, 3.0));
        cube.set_relative_location(Vec3::new(0.0, 0.0, 4.0));
        cube.set_visibility(false);

        let handle = component_to_json(&cube);
        assert_eq!(handle[CLASS_KEY], Value::from("BoxComponent"));

        let loaded = component_from_json(&Value::Object(handle)).unwrap();
        let loaded = loaded.downcast_ref::<PrimitiveComponent>().unwrap();
        assert_eq!(loaded.box_extent(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(loaded.scene().relative_location(), Vec3::new(0.0, 0.0, 4.0));
        assert!(!loaded.is_visible());
        assert!(loaded.generate_hit_events());
    }

    #[test]
    fn test_missing_fields_default() {
        let loaded = component_from_json(&json!({ "Class": "CapsuleComponent" })).unwrap();
        let capsule = loaded.downcast_ref::<PrimitiveComponent>().unwrap();
        assert_eq!(capsule.capsule_radius(), Some(0.5));
        assert_eq!(capsule.capsule_half_height(), Some(1.0));
        assert_eq!(capsule.scene().relative_scale(), Vec3::repeat(1.0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(component_from_json(&json!([1, 2])).unwrap_err(), SerializationError::NotAnObject);
        assert_eq!(
            component_from_json(&json!({ "SphereRadius": "1.0" })).unwrap_err(),
            SerializationError::MissingClass
        );
        assert_eq!(
            component_from_json(&json!({ "Class": "TeapotComponent" })).unwrap_err(),
            SerializationError::UnknownClass("TeapotComponent".into())
        );
    }
}
