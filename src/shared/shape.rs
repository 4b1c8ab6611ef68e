//! Helpers for the loosely-typed upstream JSON.
//!
//! Repeated fields arrive either as a list or, when there is exactly one
//! entry, as a bare object. Every parse site goes through [`as_list`].

use serde_json::Value;

/// Coerces a list-or-single-object field into a list.
pub fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(values) => values.iter().collect(),
        other => vec![other],
    }
}

/// Looks up `path` under `value`, `None` as soon as a key is missing.
pub fn field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |value, key| value.get(key))
}

/// [`as_list`] over a nested field; a missing field is an empty list.
pub fn list_at<'a>(value: &'a Value, path: &[&str]) -> Vec<&'a Value> {
    field(value, path).map(as_list).unwrap_or_default()
}

/// Non-empty string at `key`.
pub fn as_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Number at `key`, accepting quoted numbers.
pub fn as_f64(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(number)
}

/// Boolean at `key`, accepting `"true"`/`"false"`. Missing is `false`.
pub fn as_bool(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(number) => number.trim().parse().ok(),
        _ => None,
    }
}

#[test]
fn single_object_becomes_list() {
    let value = serde_json::json!({ "name": "Kildedal St." });
    assert_eq!(as_list(&value).len(), 1);
}

#[test]
fn null_becomes_empty() {
    assert!(as_list(&Value::Null).is_empty());
}

#[test]
fn quoted_numbers() {
    let value = serde_json::json!({ "lat": "55.7", "lon": 12.5 });
    assert_eq!(as_f64(&value, "lat"), Some(55.7));
    assert_eq!(as_f64(&value, "lon"), Some(12.5));
}
