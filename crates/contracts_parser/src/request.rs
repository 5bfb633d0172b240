//! Validation request documents.
//!
//! A request bundles a contract with the rows to check against it, in the
//! shape `{"contract": {...}, "rows": [...]}`.

use crate::{Result, rows_from_value};
use contracts_core::Contract;
use contracts_validator::DataSet;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// A contract together with the rows to validate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRequest {
    pub contract: Contract,
    pub rows: DataSet,
}

#[derive(Deserialize)]
struct RawRequest {
    #[serde(default)]
    contract: Contract,
    #[serde(default)]
    rows: Value,
}

/// Parses a request document from a JSON string.
///
/// Missing `contract` or `rows` keys default to empty; an empty contract then
/// fails validation rather than parsing.
///
/// # Example
///
/// ```rust
/// use contracts_parser::parse_request;
///
/// let request = parse_request(r#"{
///     "contract": {"schema": {"amount": "float"}},
///     "rows": [{"amount": "10.5"}]
/// }"#).unwrap();
///
/// assert_eq!(request.rows.len(), 1);
/// ```
pub fn parse_request(content: &str) -> Result<ValidationRequest> {
    let raw: RawRequest = serde_json::from_str(content)?;
    Ok(ValidationRequest {
        contract: raw.contract,
        rows: rows_from_value(raw.rows)?,
    })
}

/// Parses a request document from a JSON file.
pub fn parse_request_file(path: &Path) -> Result<ValidationRequest> {
    let content = std::fs::read_to_string(path)?;
    parse_request(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_request() {
        let request = parse_request(
            r#"{
                "contract": {
                    "contract_id": "orders",
                    "owner": "sales",
                    "schema": {"amount": "float", "ts": "datetime"},
                    "sla": {"completeness": ">= 99%"}
                },
                "rows": [{"amount": "10.5", "ts": "2024-01-15T10:30:00Z"}]
            }"#,
        )
        .unwrap();

        assert_eq!(request.contract.contract_id, "orders");
        assert_eq!(request.contract.owner.as_deref(), Some("sales"));
        assert_eq!(request.contract.schema.len(), 2);
        assert_eq!(request.rows.len(), 1);
    }

    #[test]
    fn test_missing_parts_default_to_empty() {
        let request = parse_request("{}").unwrap();
        assert_eq!(request, ValidationRequest::default());

        let request = parse_request(r#"{"contract": {"schema": null}, "rows": null}"#).unwrap();
        assert!(request.contract.schema.is_empty());
        assert!(request.rows.is_empty());
    }

    #[test]
    fn test_invalid_rows_rejected() {
        let err = parse_request(r#"{"contract": {}, "rows": [{"a": [1]}]}"#).unwrap_err();
        assert!(matches!(err, ParserError::UnsupportedValue { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_request("{not json").unwrap_err();
        assert!(matches!(err, ParserError::JsonError(_)));
    }
}
