//! Row batch parsing.
//!
//! Rows arrive as flat JSON objects, either as a single array or one object
//! per line (JSON Lines). Values must be scalars; nested objects and arrays
//! are rejected.

use crate::{ParserError, Result};
use contracts_validator::{DataRow, DataSet, DataValue};
use serde_json::{Map, Value};
use std::path::Path;

/// Supported row file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsFormat {
    /// A JSON array of objects (.json)
    JsonArray,
    /// One JSON object per line (.jsonl, .ndjson)
    JsonLines,
}

/// Detects the row file layout from its extension.
pub fn detect_rows_format(path: &Path) -> Result<RowsFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(RowsFormat::JsonArray),
        "jsonl" | "ndjson" => Ok(RowsFormat::JsonLines),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parses rows from a JSON array of flat objects.
///
/// # Example
///
/// ```rust
/// use contracts_parser::parse_rows_json;
///
/// let rows = parse_rows_json(r#"[{"amount": "10.5"}, {"amount": null}]"#).unwrap();
/// assert_eq!(rows.len(), 2);
/// ```
pub fn parse_rows_json(content: &str) -> Result<DataSet> {
    let value: Value = serde_json::from_str(content)?;
    rows_from_value(value)
}

/// Parses rows from JSON Lines. Blank lines are skipped.
pub fn parse_rows_jsonl(content: &str) -> Result<DataSet> {
    let mut dataset = DataSet::empty();
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        let value: Value = serde_json::from_str(line)?;
        let index = dataset.len();
        dataset.add_row(row_from_value(index, value)?);
    }
    Ok(dataset)
}

/// Parses rows from a file with automatic layout detection.
pub fn parse_rows_file(path: &Path) -> Result<DataSet> {
    let format = detect_rows_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        RowsFormat::JsonArray => parse_rows_json(&content),
        RowsFormat::JsonLines => parse_rows_jsonl(&content),
    }
}

/// Converts an already parsed JSON array into a dataset.
pub fn rows_from_value(value: Value) -> Result<DataSet> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        _ => return Err(ParserError::InvalidRow { index: 0 }),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| row_from_value(index, item))
        .collect::<Result<Vec<_>>>()
        .map(DataSet::from_rows)
}

fn row_from_value(index: usize, value: Value) -> Result<DataRow> {
    match value {
        Value::Object(map) => row_from_map(index, map),
        _ => Err(ParserError::InvalidRow { index }),
    }
}

fn row_from_map(index: usize, map: Map<String, Value>) -> Result<DataRow> {
    map.into_iter()
        .map(|(column, value)| {
            let value = scalar(value).map_err(|kind| ParserError::UnsupportedValue {
                index,
                column: column.clone(),
                kind,
            })?;
            Ok((column, value))
        })
        .collect()
}

/// Maps a JSON scalar onto a raw data value.
fn scalar(value: Value) -> std::result::Result<DataValue, &'static str> {
    match value {
        Value::Null => Ok(DataValue::Null),
        Value::Bool(b) => Ok(DataValue::Bool(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(DataValue::Int(i)),
            None => n.as_f64().map(DataValue::Float).ok_or("number"),
        },
        Value::String(s) => Ok(DataValue::String(s)),
        Value::Array(_) => Err("array"),
        Value::Object(_) => Err("object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_rows_json() {
        let rows = parse_rows_json(
            r#"[{"id": 1, "amount": 10.5, "name": "a", "ok": true, "note": null}]"#,
        )
        .unwrap();

        let row = rows.get_row(0).unwrap();
        assert_eq!(row.get("id"), Some(&DataValue::Int(1)));
        assert_eq!(row.get("amount"), Some(&DataValue::Float(10.5)));
        assert_eq!(row.get("name"), Some(&DataValue::String("a".into())));
        assert_eq!(row.get("ok"), Some(&DataValue::Bool(true)));
        assert_eq!(row.get("note"), Some(&DataValue::Null));
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let rows = parse_rows_json(r#"[{"n": 18446744073709551615}]"#).unwrap();
        assert!(matches!(
            rows.get_row(0).unwrap().get("n"),
            Some(DataValue::Float(_))
        ));
    }

    #[test]
    fn test_non_uniform_rows() {
        let rows = parse_rows_json(r#"[{"a": 1}, {"b": 2}, {}]"#).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.columns(), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_values_rejected() {
        let err = parse_rows_json(r#"[{"a": 1}, {"tags": ["x"]}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Row 1: column 'tags' holds an unsupported array value"
        );

        let err = parse_rows_json(r#"[{"meta": {"k": 1}}]"#).unwrap_err();
        assert!(matches!(
            err,
            ParserError::UnsupportedValue { kind: "object", .. }
        ));
    }

    #[test]
    fn test_non_object_rows_rejected() {
        let err = parse_rows_json(r#"[{"a": 1}, 42]"#).unwrap_err();
        assert!(matches!(err, ParserError::InvalidRow { index: 1 }));

        let err = parse_rows_json(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, ParserError::InvalidRow { index: 0 }));
    }

    #[test]
    fn test_parse_rows_jsonl() {
        let rows = parse_rows_jsonl("{\"a\": 1}\n\n{\"a\": \"x\"}\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows.get_row(1).unwrap().get("a"),
            Some(&DataValue::String("x".into()))
        );
    }

    #[test]
    fn test_parse_rows_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".ndjson")
            .tempfile()
            .unwrap();
        writeln!(file, "{{\"ts\": \"2024-01-15T10:30:00Z\"}}").unwrap();

        let rows = parse_rows_file(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_detect_rows_format() {
        assert_eq!(
            detect_rows_format(Path::new("rows.json")).unwrap(),
            RowsFormat::JsonArray
        );
        assert_eq!(
            detect_rows_format(Path::new("rows.jsonl")).unwrap(),
            RowsFormat::JsonLines
        );
        assert!(matches!(
            detect_rows_format(Path::new("rows.csv")),
            Err(ParserError::UnsupportedFormat(_))
        ));
    }
}
