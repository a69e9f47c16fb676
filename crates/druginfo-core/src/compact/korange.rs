//! korange (bioequivalence flags) normalization

use serde_json::{Map, Value};

/// The only korange keys worth forwarding
pub const KORANGE_FIELDS: [&str; 6] = ["생동PK", "제네릭", "공공대조약", "특허", "함량", "취하일"];

/// Flags arrive as "True"/"False" strings, so "false" and "0" count as unset
fn is_falsy_flag(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => {
            let lowered = s.trim().to_lowercase();
            lowered.is_empty() || lowered == "false" || lowered == "0"
        }
        _ => false,
    }
}

/// Keep the allow-listed, truthy korange fields.
///
/// Returns `None` when the payload is not an object or nothing survives, so
/// the parent record can omit the key entirely.
pub fn compact_korange(payload: Option<&Value>) -> Option<Map<String, Value>> {
    let data = payload?.as_object()?;

    let keep: Map<String, Value> = KORANGE_FIELDS
        .iter()
        .filter_map(|key| {
            data.get(*key)
                .filter(|value| !is_falsy_flag(value))
                .map(|value| (key.to_string(), value.clone()))
        })
        .collect();

    if keep.is_empty() {
        None
    } else {
        Some(keep)
    }
}
