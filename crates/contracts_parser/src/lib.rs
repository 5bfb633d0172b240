//! Parser for Data Contracts (YAML/TOML/JSON formats) and row batches.
//!
//! This module provides functionality to parse data contracts from YAML, TOML
//! and JSON files into the strongly-typed `Contract` structure, and to load the
//! rows a contract is validated against.
//!
//! # Example
//!
//! ```rust
//! use contracts_parser::parse_yaml;
//!
//! let yaml = r#"
//! contract_id: sales_orders_v1
//! owner: sales-data
//! schema:
//!   order_id: string
//!   amount: float
//!   created_at: datetime
//! sla:
//!   completeness: ">= 99%"
//!   freshness: 24h
//!   freshness_field: created_at
//! "#;
//!
//! let contract = parse_yaml(yaml).expect("Failed to parse contract");
//! assert_eq!(contract.contract_id, "sales_orders_v1");
//! ```

mod request;
mod rows;

pub use request::*;
pub use rows::*;

use contracts_core::Contract;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while parsing contracts and rows.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// A row is not a flat JSON object
    #[error("Row {index} is not an object")]
    InvalidRow { index: usize },

    /// A row value is not a scalar
    #[error("Row {index}: column '{column}' holds an unsupported {kind} value")]
    UnsupportedValue {
        index: usize,
        column: String,
        kind: &'static str,
    },
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported contract file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a contract from a YAML string.
///
/// # Example
///
/// ```rust
/// use contracts_parser::parse_yaml;
///
/// let yaml = r#"
/// schema:
///   id: integer
/// "#;
///
/// let contract = parse_yaml(yaml).unwrap();
/// assert_eq!(contract.schema.len(), 1);
/// ```
pub fn parse_yaml(content: &str) -> Result<Contract> {
    let contract: Contract = serde_yaml_ng::from_str(content)?;
    Ok(contract)
}

/// Parse a contract from a TOML string.
///
/// # Example
///
/// ```rust
/// use contracts_parser::parse_toml;
///
/// let toml = r#"
/// contract_id = "orders"
///
/// [schema]
/// id = "integer"
/// "#;
///
/// let contract = parse_toml(toml).unwrap();
/// assert_eq!(contract.contract_id, "orders");
/// ```
pub fn parse_toml(content: &str) -> Result<Contract> {
    let contract: Contract =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(contract)
}

/// Parse a contract from a JSON string.
pub fn parse_json(content: &str) -> Result<Contract> {
    let contract: Contract = serde_json::from_str(content)?;
    Ok(contract)
}

/// Detect the contract format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `ContractFormat::Yaml`
/// * `.toml` → `ContractFormat::Toml`
/// * `.json` → `ContractFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ContractFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ContractFormat::Yaml),
        "toml" => Ok(ContractFormat::Toml),
        "json" => Ok(ContractFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a contract from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use contracts_parser::parse_file;
/// use std::path::Path;
///
/// let contract = parse_file(Path::new("contracts/sales_orders.yml")).unwrap();
/// println!("Loaded contract: {}", contract.contract_id);
/// ```
pub fn parse_file(path: &Path) -> Result<Contract> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ContractFormat::Yaml => parse_yaml(&content),
        ContractFormat::Toml => parse_toml(&content),
        ContractFormat::Json => parse_json(&content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts_core::LogicalType;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_valid_yaml_minimal() {
        let yaml = r#"
schema:
  id: string
"#;

        let contract = parse_yaml(yaml).expect("Failed to parse valid YAML");

        assert_eq!(contract.contract_id, "");
        assert_eq!(contract.owner, None);
        assert_eq!(contract.schema.len(), 1);
        assert!(contract.sla.is_none());
    }

    #[test]
    fn test_parse_yaml_keeps_column_order() {
        let yaml = r#"
contract_id: sales_orders_v1
owner: sales-data
schema:
  zeta: string
  amount: double
  alpha: timestamp
"#;

        let contract = parse_yaml(yaml).expect("Failed to parse YAML with columns");

        assert_eq!(
            contract.columns().collect::<Vec<_>>(),
            vec!["zeta", "amount", "alpha"]
        );
        assert_eq!(contract.column_type("amount"), Some(LogicalType::Float));
        assert_eq!(contract.column_type("alpha"), Some(LogicalType::Datetime));
    }

    #[test]
    fn test_parse_yaml_with_sla() {
        let yaml = r#"
schema:
  created_at: datetime
sla:
  completeness: ">= 99.5%"
  freshness: 24h
  freshness_field: created_at
"#;

        let contract = parse_yaml(yaml).expect("Failed to parse YAML with SLA");

        let sla = contract.sla.expect("SLA should be present");
        assert_eq!(sla.completeness, Some(">= 99.5%".to_string()));
        assert_eq!(sla.freshness, Some("24h".to_string()));
        assert_eq!(sla.freshness_field, Some("created_at".to_string()));
    }

    #[test]
    fn test_parse_yaml_without_schema_is_empty() {
        // Missing schema is a validation failure, not a parse failure
        let contract = parse_yaml("contract_id: orphan\n").expect("Failed to parse YAML");
        assert!(contract.schema.is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let invalid_yaml = r#"
schema:
  - not
  - a mapping
"#;

        let result = parse_yaml(invalid_yaml);
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_valid_toml() {
        let toml = r#"
contract_id = "orders"
owner = "sales-data"

[schema]
order_id = "string"
amount = "float"

[sla]
completeness = ">= 99%"
"#;

        let contract = parse_toml(toml).expect("Failed to parse valid TOML");

        assert_eq!(contract.contract_id, "orders");
        assert_eq!(contract.owner, Some("sales-data".to_string()));
        assert_eq!(
            contract.columns().collect::<Vec<_>>(),
            vec!["order_id", "amount"]
        );
        assert_eq!(
            contract.sla.and_then(|sla| sla.completeness),
            Some(">= 99%".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let invalid_toml = r#"
contract_id = "test"
[[[invalid syntax
"#;

        let result = parse_toml(invalid_toml);
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_parse_json_contract() {
        let json = r#"{"contract_id": "c1", "schema": {"ts": "datetime"}, "sla": null}"#;

        let contract = parse_json(json).expect("Failed to parse JSON");
        assert_eq!(contract.contract_id, "c1");
        assert!(contract.sla.is_none());
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("contract.yaml")).unwrap(),
            ContractFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("contract.YML")).unwrap(),
            ContractFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("contract.toml")).unwrap(),
            ContractFormat::Toml
        );
        assert_eq!(
            detect_format(Path::new("contract.json")).unwrap(),
            ContractFormat::Json
        );
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("contract.csv"));
        assert!(matches!(
            result.unwrap_err(),
            ParserError::UnsupportedFormat(ext) if ext == "csv"
        ));
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("contract"));
        assert!(matches!(result.unwrap_err(), ParserError::InvalidExtension));
    }

    #[test]
    fn test_parse_file_yaml() {
        let mut file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(file, "contract_id: from_file\nschema:\n  id: integer").unwrap();

        let contract = parse_file(file.path()).expect("Failed to parse YAML file");
        assert_eq!(contract.contract_id, "from_file");
        assert_eq!(contract.column_type("id"), Some(LogicalType::Integer));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file(Path::new("/nonexistent/contract.yml"));
        assert!(matches!(result.unwrap_err(), ParserError::IoError(_)));
    }

    #[test]
    fn test_round_trip_yaml() {
        let original = contracts_core::ContractBuilder::new("test")
            .owner("team")
            .column("id", "string")
            .column("ts", "datetime")
            .freshness("1h", "ts")
            .build();

        let yaml = serde_yaml_ng::to_string(&original).expect("Failed to serialize");
        let parsed = parse_yaml(&yaml).expect("Failed to parse");

        assert_eq!(parsed, original);
    }
}
