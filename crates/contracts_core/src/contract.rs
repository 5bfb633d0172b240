//! Data contract types and structures.
//!
//! This module contains the core types for defining data contracts: the
//! column schema, the logical column types and the service level agreement
//! block with its completeness and freshness expectations.

use crate::ContractError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Ordered mapping from column name to its declared type tag.
///
/// Declaration order is preserved so that findings are reported in the
/// order the producer wrote the columns.
pub type Schema = IndexMap<String, String>;

/// A data contract declaring the expected columns and SLA of a dataset.
///
/// # Example
///
/// ```rust
/// use contracts_core::{Contract, Sla};
///
/// let mut contract = Contract::new("sales_orders_v1");
/// contract.owner = Some("sales-data".to_string());
/// contract.schema.insert("order_id".to_string(), "string".to_string());
/// contract.schema.insert("amount".to_string(), "float".to_string());
/// contract.sla = Some(Sla {
///     completeness: Some(">= 99%".to_string()),
///     ..Default::default()
/// });
///
/// assert_eq!(contract.columns().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Identifier of the contract, also used as the dataset name in events
    #[serde(default)]
    pub contract_id: String,

    /// Team or individual responsible for the dataset
    #[serde(default)]
    pub owner: Option<String>,

    /// Declared columns and their logical type tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub schema: Schema,

    /// Optional service level agreement
    #[serde(default)]
    pub sla: Option<Sla>,
}

impl Contract {
    /// Creates an empty contract with the given identifier.
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            ..Default::default()
        }
    }

    /// Returns the declared column names in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.schema.keys().map(String::as_str)
    }

    /// Returns the logical type declared for `column`, if any.
    pub fn column_type(&self, column: &str) -> Option<LogicalType> {
        self.schema.get(column).map(|tag| LogicalType::from_tag(tag))
    }

    /// Checks the structural precondition for validation: a non-empty schema.
    pub fn ensure_schema(&self) -> Result<(), ContractError> {
        if self.schema.is_empty() {
            return Err(ContractError::MissingSchema);
        }
        Ok(())
    }
}

/// Service Level Agreement for a dataset.
///
/// Every expression is kept as the raw string the producer wrote; parsing
/// happens during evaluation so that a malformed expression degrades into a
/// warning instead of rejecting the whole contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sla {
    /// Minimum share of fully populated rows, e.g. `">= 99.5%"`
    #[serde(default)]
    pub completeness: Option<String>,

    /// Maximum allowed age of the newest row, e.g. `"24h"`
    #[serde(default)]
    pub freshness: Option<String>,

    /// Column holding the timestamp checked by `freshness`
    #[serde(default)]
    pub freshness_field: Option<String>,
}

impl Sla {
    /// Completeness expression, if present and not blank.
    pub fn completeness_expr(&self) -> Option<&str> {
        non_blank(self.completeness.as_deref())
    }

    /// Freshness expression, if present and not blank.
    pub fn freshness_expr(&self) -> Option<&str> {
        non_blank(self.freshness.as_deref())
    }

    /// Freshness field name, if present and not blank.
    pub fn freshness_field_name(&self) -> Option<&str> {
        non_blank(self.freshness_field.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Logical column types understood by the coercion phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    /// Free text, never fails
    String,
    /// Real number
    Float,
    /// Whole number
    Integer,
    /// Truthy/falsy token
    Boolean,
    /// Point in time
    Datetime,
}

impl LogicalType {
    /// Maps a type tag (case-insensitive, aliases included) to a logical type.
    ///
    /// Unrecognized tags fall back to [`LogicalType::String`]; use
    /// [`LogicalType::parse_tag`] to tell the two apart.
    pub fn from_tag(tag: &str) -> Self {
        Self::parse_tag(tag).unwrap_or(LogicalType::String)
    }

    /// Maps a type tag to a logical type, returning `None` for unknown tags.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "string" | "str" | "text" => Some(LogicalType::String),
            "float" | "double" | "number" => Some(LogicalType::Float),
            "integer" | "int" => Some(LogicalType::Integer),
            "boolean" | "bool" => Some(LogicalType::Boolean),
            "datetime" | "timestamp" | "date" => Some(LogicalType::Datetime),
            _ => None,
        }
    }

    /// Canonical lowercase name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::String => "string",
            LogicalType::Float => "float",
            LogicalType::Integer => "integer",
            LogicalType::Boolean => "boolean",
            LogicalType::Datetime => "datetime",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treats an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
