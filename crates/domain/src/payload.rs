//! Trigger payload helpers — dot-path lookup and value coercion.
//!
//! A trigger payload is the JSON snapshot of the entity that caused an
//! automation to be evaluated. Conditions address into it with dot-notated
//! paths such as `deal.value`.

use serde_json::Value;

/// Resolve a dot-notated path inside a payload.
///
/// Missing intermediate segments yield `None`, never an error.
#[must_use]
pub fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(payload, |value, segment| value.get(segment))
}

/// Coerce a JSON value to a number for ordered comparisons.
///
/// Numbers pass through; numeric strings parse; everything else is `None`.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Truthiness/empty check used by the `is_empty` / `is_not_empty` operators.
///
/// Absent values, `null`, the empty string, `false`, and zero all count as
/// empty, matching loose-typed trigger payloads from upstream CRM forms.
#[must_use]
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64().is_none_or(|f| f == 0.0),
        Some(_) => false,
    }
}
