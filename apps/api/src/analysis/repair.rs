//! Helpers for salvaging loosely-shaped LLM JSON.
//!
//! Models drift from the requested schema: numbers arrive as strings, lists contain
//! nulls, fields go missing. These accessors read what is usable and default the rest.

use serde_json::Value;

/// String entries of an array field; non-strings and blanks are dropped. Missing → empty.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub fn string_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Reads a number given either as a JSON number or a numeric string ("75", "75%").
pub fn lenient_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

/// Rounds into 0 – 100.
pub fn clamp_percentage(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
