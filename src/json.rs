use crate::value::*;
use serde_json::Number;
use std::collections::BTreeMap;

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Serialize a value to a compact JSON string (no whitespace).
pub fn to_json(value: &Value) -> String {
    serde_json::Value::from(value).to_string()
}

/// Serialize a value to a pretty-printed JSON string (2-space indent).
pub fn to_json_pretty(value: &Value) -> String {
    format!("{:#}", serde_json::Value::from(value))
}

/// Parse JSON text into a value tree with fresh container storage.
pub fn from_json(input: &str) -> serde_json::Result<Value> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    Ok(Value::from(json))
}

/// Integral numbers within the safe range encode as JSON integers so that
/// `1` round-trips as `1` rather than `1.0`. Negative zero keeps its sign as
/// `-0.0`. Non-finite numbers have no JSON form and encode as `null`.
fn number_to_json(n: f64) -> serde_json::Value {
    let negative_zero = n == 0.0 && n.is_sign_negative();
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER && !negative_zero {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(seq) => {
                serde_json::Value::Array(seq.items().iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.entries()
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Every JSON number has an f64 reading; only arbitrary-precision
            // builds can fail here, and those fall back to null.
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>())
            }
            serde_json::Value::Object(obj) => Value::from(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }
}
