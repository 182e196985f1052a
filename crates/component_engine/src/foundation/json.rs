//! JSON persistence helpers
//!
//! Components persist themselves into an opaque key-value JSON object.
//! Readers always take a default: a missing or malformed field is never an
//! error, it silently falls back.

use super::math::Vec3;
use serde_json::{Map, Value};

/// JSON object handle a component reads from / writes into
pub type JsonObject = Map<String, Value>;

/// Write a vector as a three-float array
pub fn vector_to_json(v: Vec3) -> Value {
    Value::from(vec![f64::from(v.x), f64::from(v.y), f64::from(v.z)])
}

/// Read a three-float array, falling back to `default` if the key is absent
/// or not a numeric array of length three.
pub fn read_vector(handle: &JsonObject, key: &str, default: Vec3) -> Vec3 {
    let parsed = handle.get(key).and_then(Value::as_array).and_then(|items| {
        if items.len() != 3 {
            return None;
        }
        let mut out = [0.0f32; 3];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = value_as_f32(item)?;
        }
        Some(Vec3::new(out[0], out[1], out[2]))
    });

    parsed.unwrap_or_else(|| {
        log::trace!("JSON field '{}' missing or malformed, using default {:?}", key, default);
        default
    })
}

/// Read a string field, falling back to `default`
pub fn read_string(handle: &JsonObject, key: &str, default: &str) -> String {
    match handle.get(key).and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => {
            log::trace!("JSON field '{}' missing, using default '{}'", key, default);
            default.to_string()
        }
    }
}

/// Read a boolean field, falling back to `default`
pub fn read_bool(handle: &JsonObject, key: &str, default: bool) -> bool {
    handle.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Format a float as a fixed six-digit decimal string
pub fn float_to_decimal_string(value: f32) -> String {
    format!("{value:.6}")
}

/// Read a float stored either as a decimal string or as a JSON number.
///
/// `default` is itself a decimal string to mirror how the field is written.
pub fn read_decimal(handle: &JsonObject, key: &str, default: &str) -> f32 {
    let fallback = default.trim().parse::<f32>().unwrap_or(0.0);
    match handle.get(key) {
        Some(Value::String(s)) => s.trim().parse::<f32>().unwrap_or_else(|_| {
            log::trace!("JSON field '{}' = '{}' is not a number, using default {}", key, s, default);
            fallback
        }),
        Some(value) => value_as_f32(value).unwrap_or(fallback),
        None => {
            log::trace!("JSON field '{}' missing, using default {}", key, default);
            fallback
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn value_as_f32(value: &Value) -> Option<f32> {
    value.as_f64().map(|v| v as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_decimal_string_round_trip() {
        let mut handle = JsonObject::new();
        handle.insert("Radius".into(), Value::from(float_to_decimal_string(2.5)));

        assert_eq!(handle["Radius"], json!("2.500000"));
        assert_eq!(read_decimal(&handle, "Radius", "0.5"), 2.5);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let handle = JsonObject::new();
        assert_eq!(read_decimal(&handle, "Radius", "0.5"), 0.5);
        assert_eq!(read_vector(&handle, "Extent", Vec3::new(0.5, 0.5, 0.5)), Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(read_string(&handle, "Name", "none"), "none");
        assert!(read_bool(&handle, "Flag", true));
    }

    #[test]
    fn test_numeric_and_malformed_values() {
        let handle = object(json!({
            "Number": 1.25,
            "Garbage": "abc",
            "ShortVector": [1.0, 2.0],
            "Vector": [1.0, 2.0, 3.0],
        }));

        assert_eq!(read_decimal(&handle, "Number", "0.5"), 1.25);
        assert_eq!(read_decimal(&handle, "Garbage", "0.5"), 0.5);
        assert_eq!(read_vector(&handle, "ShortVector", Vec3::zeros()), Vec3::zeros());
        assert_eq!(read_vector(&handle, "Vector", Vec3::zeros()), Vec3::new(1.0, 2.0, 3.0));
    }
}
