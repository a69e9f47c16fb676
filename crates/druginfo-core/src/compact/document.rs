//! Total accessors over untyped upstream JSON
//!
//! Upstream endpoints disagree on envelopes and key casing. None of these
//! helpers fail: a shape they do not recognize yields `None` or an empty
//! list.

use serde_json::{Map, Value};

/// Keys probed, in order, for the item array of a list response
pub const ITEM_LIST_KEYS: [&str; 5] = ["items", "list", "results", "rows", "data"];

/// The part of a response that holds the payload: a nested `data` object if
/// present, otherwise the response itself.
pub fn primary_section(result: &Value) -> &Value {
    match result.get("data") {
        Some(data @ Value::Object(_)) => data,
        _ => result,
    }
}

/// Object entries of the item list, in upstream order.
///
/// An array section is the item list itself; an object section is probed for
/// [`ITEM_LIST_KEYS`]. Non-object entries are dropped.
pub fn extract_items(section: &Value) -> Vec<&Map<String, Value>> {
    let list = match section {
        Value::Array(list) => Some(list),
        Value::Object(map) => ITEM_LIST_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    };

    list.map(|entries| entries.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

/// Null, empty string, or empty array. Such a value never wins a [`pick`].
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// [`is_blank`] plus the empty object. Such a value is stripped from output records.
pub fn is_empty_field(value: &Value) -> bool {
    match value {
        Value::Object(o) => o.is_empty(),
        other => is_blank(other),
    }
}

/// JSON truthiness: null, false, zero, and empty containers are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// First candidate key whose value is present and not blank
pub fn pick(item: &Map<String, Value>, candidates: &[&str]) -> Option<Value> {
    candidates
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|value| !is_blank(value))
        .cloned()
}

/// [`pick`] over a section that may not be an object
pub fn pick_in(section: &Value, candidates: &[&str]) -> Option<Value> {
    section.as_object().and_then(|map| pick(map, candidates))
}

/// Numeric value truncated to an integer; anything else is `None`
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    }
}
