//! FILENAME: persistence/src/payload.rs
//! Decoding of the execution service's `{columns, rows}` payload.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use engine::{CellValue, ResultSet};
use crate::PersistenceError;

#[derive(Deserialize)]
struct RawPayload {
    columns: Option<Vec<String>>,
    #[serde(default)]
    rows: Option<Vec<Vec<JsonValue>>>,
}

/// Narrows one JSON cell to a `CellValue`.
/// Nested arrays and objects are kept as their JSON text.
pub fn cell_from_json(value: &JsonValue) -> CellValue {
    match value {
        JsonValue::Null => CellValue::Empty,
        JsonValue::Bool(b) => CellValue::Boolean(*b),
        JsonValue::Number(n) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        JsonValue::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Decodes a result payload. A missing `rows` key (or `null`) means no rows;
/// a missing `columns` key is a format error. Sentinel results decode like
/// any other result; callers check for them.
pub fn decode_result_payload(json: &str) -> Result<ResultSet, PersistenceError> {
    let raw: RawPayload = serde_json::from_str(json)?;
    let columns = raw
        .columns
        .ok_or_else(|| PersistenceError::InvalidFormat("payload has no 'columns'".to_string()))?;

    let rows = raw
        .rows
        .unwrap_or_default()
        .iter()
        .map(|row| row.iter().map(cell_from_json).collect())
        .collect();

    Ok(ResultSet::new(columns, rows)?)
}

/// Encodes a result set into the same payload shape.
pub fn encode_result_payload(result: &ResultSet) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(result)?)
}
