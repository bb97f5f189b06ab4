//! Read-only property access through `serde`.
//!
//! A value is serialized to a [`serde_json::Value`] and the property is looked up
//! by a dotted path: `"name"`, `"address.city"`, `"tags.0"`.

use crate::core::{FeilongError, Result};
use crate::lang::validate;
use serde::Serialize;
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Serialize `bean` and read the property at `path`
pub fn property_value<T: Serialize + ?Sized>(bean: &T, path: &str) -> Result<Value> {
    validate::not_blank("path", path)?;
    let value = serde_json::to_value(bean)?;
    lookup(&value, path).cloned()
}

/// Read the property at `path` from an already serialized value
pub fn lookup<'a>(value: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| {
            FeilongError::property(path, format!("no property '{}' on {}", segment, kind(current)))
        })?;
    }
    Ok(current)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over property values.
///
/// `null < bool < number < string < array < object`. Numbers compare by value,
/// strings lexicographically, arrays element-wise then by length, objects by
/// number of entries.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y)
            .map(|(l, r)| compare_values(l, r))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => rank(a).cmp(&rank(b)),
    }
}

// Exact across integers and floats
fn compare_numbers(x: &Number, y: &Number) -> Ordering {
    match (integer(x), integer(y)) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(l), None) => compare_integer_float(l, y.as_f64().unwrap_or(f64::NAN)),
        (None, Some(r)) => compare_integer_float(r, x.as_f64().unwrap_or(f64::NAN)).reverse(),
        (None, None) => {
            let l = x.as_f64().unwrap_or(f64::NAN);
            let r = y.as_f64().unwrap_or(f64::NAN);
            l.partial_cmp(&r).unwrap_or_else(|| l.total_cmp(&r))
        }
    }
}

fn integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn compare_integer_float(int: i128, float: f64) -> Ordering {
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

    if float.is_nan() {
        return Ordering::Less;
    }
    let floor = float.floor();
    if floor >= TWO_POW_64 {
        return Ordering::Less;
    }
    if floor < -TWO_POW_64 {
        return Ordering::Greater;
    }
    // floor is integral and within i128, so the cast is exact
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Ordering::Less,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Address {
        city: String,
    }

    #[derive(Serialize)]
    struct User {
        name: String,
        age: u32,
        address: Address,
        tags: Vec<String>,
        nickname: Option<String>,
    }

    fn user() -> User {
        User {
            name: "feilong".to_string(),
            age: 18,
            address: Address {
                city: "Shanghai".to_string(),
            },
            tags: vec!["a".to_string(), "b".to_string()],
            nickname: None,
        }
    }

    #[test]
    fn test_property_value_paths() {
        let user = user();
        assert_eq!(property_value(&user, "name").unwrap(), json!("feilong"));
        assert_eq!(property_value(&user, "age").unwrap(), json!(18));
        assert_eq!(property_value(&user, "address.city").unwrap(), json!("Shanghai"));
        assert_eq!(property_value(&user, "tags.1").unwrap(), json!("b"));
        assert_eq!(property_value(&user, "nickname").unwrap(), Value::Null);
    }

    #[test]
    fn test_property_value_missing() {
        let user = user();
        let err = property_value(&user, "address.zip").unwrap_err();
        assert!(matches!(err, FeilongError::Property { .. }));
        assert!(err.to_string().contains("no property 'zip' on object"));

        assert!(property_value(&user, "tags.9").is_err());
        assert!(property_value(&user, "name.first").is_err());
        assert!(matches!(
            property_value(&user, " "),
            Err(FeilongError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!(-1), &json!(1.5)), Ordering::Less);
        assert_eq!(compare_values(&json!(u64::MAX), &json!(1)), Ordering::Greater);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!([1, 2]), &json!([1, 2, 0])), Ordering::Less);
        assert_eq!(compare_values(&json!("1"), &json!(1)), Ordering::Greater);
        assert_eq!(compare_values(&json!(true), &json!(true)), Ordering::Equal);
    }

    #[test]
    fn test_compare_mixed_numbers_exactly() {
        let a = json!(9_007_199_254_740_993_i64);
        let b = json!(9_007_199_254_740_992.0_f64);
        let c = json!(9_007_199_254_740_992_i64);

        assert_eq!(compare_values(&a, &b), Ordering::Greater);
        assert_eq!(compare_values(&b, &c), Ordering::Equal);
        assert_eq!(compare_values(&a, &c), Ordering::Greater);
        assert_eq!(compare_values(&b, &a), Ordering::Less);

        assert_eq!(compare_values(&json!(1), &json!(1.5)), Ordering::Less);
        assert_eq!(compare_values(&json!(-1), &json!(-1.5)), Ordering::Greater);
        assert_eq!(compare_values(&json!(-2), &json!(-1.5)), Ordering::Less);
        assert_eq!(compare_values(&json!(0), &json!(-0.0)), Ordering::Equal);
        assert_eq!(compare_values(&json!(0.0), &json!(-0.0)), Ordering::Equal);
        assert_eq!(compare_values(&json!(u64::MAX), &json!(1e20)), Ordering::Less);
        assert_eq!(compare_values(&json!(i64::MIN), &json!(-1e19)), Ordering::Greater);
    }
}
