use serde_json::Value as JsonValue;
use serde_json_path::JsonPath;
use volley_core::{ActionError, HttpResponseParts};

#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),
    #[error("invalid JSONPath {expr}: {message}")]
    InvalidPath { expr: String, message: String },
    #[error("no value at {expr}")]
    NoValue { expr: String },
}

impl From<JsonError> for ActionError {
    fn from(e: JsonError) -> Self {
        ActionError::other(e)
    }
}

pub(crate) fn body_json(resp: &HttpResponseParts) -> Result<JsonValue, JsonError> {
    serde_json::from_slice(&resp.body).map_err(JsonError::InvalidBody)
}

pub(crate) fn body_string(resp: &HttpResponseParts) -> String {
    String::from_utf8_lossy(&resp.body).to_string()
}

/// Every node selected by the JSONPath `expr`.
pub(crate) fn query(value: &JsonValue, expr: &str) -> Result<Vec<JsonValue>, JsonError> {
    let path = JsonPath::parse(expr).map_err(|e| JsonError::InvalidPath {
        expr: expr.to_string(),
        message: e.to_string(),
    })?;
    Ok(path.query(value).all().into_iter().cloned().collect())
}

/// The first node selected by `expr`.
pub(crate) fn query_first(value: &JsonValue, expr: &str) -> Result<JsonValue, JsonError> {
    query(value, expr)?
        .into_iter()
        .next()
        .ok_or_else(|| JsonError::NoValue {
            expr: expr.to_string(),
        })
}

/// Structural equality that treats `1` and `1.0` as equal.
pub(crate) fn json_eq(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Null, JsonValue::Null) => true,
        (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64() == b.as_f64(),
        (JsonValue::String(a), JsonValue::String(b)) => a == b,
        (JsonValue::Array(a), JsonValue::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| json_eq(x, y))
        }
        (JsonValue::Object(a), JsonValue::Object(b)) => {
            a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).map(|bv| json_eq(v, bv)).unwrap_or(false))
        }
        _ => false,
    }
}
