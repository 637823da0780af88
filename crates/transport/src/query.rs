//! Query string flattening.

use resolver::WireParams;
use serde_json::Value;

/// Flattens wire parameters into `(name, value)` pairs for the query string.
///
/// Strings are sent verbatim, numbers and booleans as their JSON text, arrays
/// as one pair per element under the same name, and objects as JSON text.
pub fn query_pairs(params: &WireParams) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (name, value) in params {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().map(|item| (name.clone(), scalar(item))));
            }
            other => pairs.push((name.clone(), scalar(other))),
        }
    }
    pairs
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
