//! Generic JSON to configuration value conversion.
//!
//! Used for payloads whose shape is not modeled, such as the per-query
//! `model` object. The conversion has no knowledge of the alerting schema.
//!
//! Empty objects and arrays become typed empty sentinels
//! ([`Value::EmptyMap`] / [`Value::EmptyList`] of strings) so consumers that
//! expect a homogeneous container still get one. `null` has no type to
//! infer and aborts the conversion.

use serde_json::{Map, Value as Json};

use crate::error::ConversionError;
use crate::hcl::{Value, ValueType};

/// Convert an arbitrary JSON value into a configuration value.
///
/// # Errors
///
/// Returns `ConversionError::Unsupported` for the first value without an
/// implied type. No partial result is returned.
pub fn to_config_value(json: &Json) -> Result<Value, ConversionError> {
    convert(json, &mut String::from("$"))
}

/// Convert a JSON object, naming its location `root` in error paths.
pub fn object_to_config_value(
    object: &Map<String, Json>,
    root: &str,
) -> Result<Value, ConversionError> {
    convert_object(object, &mut root.to_string())
}

fn convert(json: &Json, path: &mut String) -> Result<Value, ConversionError> {
    match json {
        Json::Object(object) => convert_object(object, path),
        Json::Array(items) => {
            if items.is_empty() {
                return Ok(Value::EmptyList(ValueType::String));
            }
            let mut list = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{index}]"));
                list.push(convert(item, path)?);
                path.truncate(len);
            }
            Ok(Value::List(list))
        }
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Number(n) => Ok(Value::Number(n.clone())),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Null => Err(ConversionError::Unsupported {
            path: path.clone(),
            kind: "null",
        }),
    }
}

fn convert_object(
    object: &Map<String, Json>,
    path: &mut String,
) -> Result<Value, ConversionError> {
    if object.is_empty() {
        return Ok(Value::EmptyMap(ValueType::String));
    }
    let mut entries = std::collections::BTreeMap::new();
    for (key, item) in object {
        let len = path.len();
        path.push('.');
        path.push_str(key);
        let converted = convert(item, path)?;
        path.truncate(len);
        entries.insert(key.clone(), converted);
    }
    Ok(Value::Object(entries))
}
