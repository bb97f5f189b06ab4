//! Conversion between values and JSON text

use crate::core::{FeilongError, Result};
use crate::json::config::JsonFormatConfig;
use crate::lang::validate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

/// Pretty JSON with 4-space indentation
///
/// ```rust
/// use feilong_core::json;
///
/// let text = json::format(&vec![1, 2]).unwrap();
/// assert_eq!(text, "[\n    1,\n    2\n]");
/// ```
pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    format_with_config(value, &JsonFormatConfig::default())
}

/// Single-line JSON
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn filter_object(object: &mut Map<String, Value>, config: &JsonFormatConfig) {
    let include = &config.include_property_names;
    let exclude = &config.exclude_property_names;
    object.retain(|key, _| {
        (include.is_empty() || include.contains(key)) && !exclude.contains(key)
    });
}

/// JSON laid out and filtered by `config`
///
/// # Errors
///
/// `InvalidConfig` when `config` does not validate, `Json` when `value`
/// can't be serialized.
pub fn format_with_config<T: Serialize + ?Sized>(
    value: &T,
    config: &JsonFormatConfig,
) -> Result<String> {
    config.validate()?;

    let mut tree = serde_json::to_value(value)?;
    match &mut tree {
        Value::Object(object) => filter_object(object, config),
        Value::Array(items) => items
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .for_each(|object| filter_object(object, config)),
        _ => {}
    }

    if !config.pretty {
        return Ok(serde_json::to_string(&tree)?);
    }

    let indent = " ".repeat(config.indent);
    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    tree.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| FeilongError::other(e.to_string()))
}

/// Deserialize one value
pub fn to_bean<T: DeserializeOwned>(json: &str) -> Result<T> {
    validate::not_blank("json", json)?;
    Ok(serde_json::from_str(json)?)
}

/// Deserialize a JSON array
pub fn to_vec<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    to_bean(json)
}
