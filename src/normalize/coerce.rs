//! Total conversions from loosely typed payload values.
//!
//! None of these functions fail: anything that cannot be read as the target
//! type becomes the type's default (`0`, `0.0`, or `None`).

use serde_json::Value;

/// Read a non-negative headcount.
///
/// Strings are trimmed and must be plain integers (`"12000"`, `"+3"`);
/// `"12,000"`, `"12.5"`, and negatives all become `0`. JSON numbers are
/// truncated toward zero; values beyond `u64` become `0` like overlong strings.
pub fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(raw)) => raw.trim().parse::<u64>().unwrap_or(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0 && *v < u64::MAX as f64)
                    .map(|v| v.trunc() as u64)
            })
            .unwrap_or(0),
        _ => 0,
    }
}

/// Read a percentage-style ratio. Non-finite results (`"NaN"`, `"inf"`) become `0.0`.
pub fn coerce_ratio(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Render a scalar as text. Containers and `null` have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
