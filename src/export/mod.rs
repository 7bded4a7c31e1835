//! Export functionality for MonkeyDB
//!
//! Result sets export to a JSON array with one object per row. Keys are
//! the column names in result order; values are the cells' text form, or
//! `null` for SQL NULL.

use std::path::Path;
use serde::Serialize;
use serde_json::{Map, Value};
use serde_json::ser::PrettyFormatter;
use tracing::info;
use crate::database::QueryResult;
use crate::error::{ManagerError, Result};

/// Indentation used for pretty output
const PRETTY_INDENT: &[u8] = b"    ";

/// Convert a result set into a JSON array of row objects
pub fn rows_to_json(result: &QueryResult) -> Value {
    let columns = result.columns();
    let rows = result
        .rows()
        .iter()
        .map(|row| {
            let object: Map<String, Value> = columns
                .iter()
                .zip(row)
                .map(|(column, cell)| {
                    let value = cell.to_export_text().map_or(Value::Null, Value::String);
                    (column.clone(), value)
                })
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}

/// Serialize a result set to a JSON string
pub fn to_json_string(result: &QueryResult, pretty: bool) -> Result<String> {
    let value = rows_to_json(result);
    if !pretty {
        return serde_json::to_string(&value).map_err(|e| ManagerError::Storage(e.to_string()));
    }

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(PRETTY_INDENT));
    value
        .serialize(&mut ser)
        .map_err(|e| ManagerError::Storage(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| ManagerError::Storage(e.to_string()))
}

/// Write a result set as JSON to `path`
pub fn write_json(result: &QueryResult, path: &Path, pretty: bool) -> Result<()> {
    let json = to_json_string(result, pretty)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), rows = result.row_count(), "result exported");
    Ok(())
}
