//! Error types for data contracts.
//!
//! These describe problems with a contract definition itself, independent of
//! any data it is validated against.

use thiserror::Error;

/// Main error type for data contract operations.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The contract declares no columns
    #[error("Missing 'schema' in contract")]
    MissingSchema,

    /// A declared column has an empty name
    #[error("Schema contains a column with an empty name")]
    EmptyColumnName,

    /// A declared column uses a type tag the engine does not recognize
    #[error("Column '{column}' has unknown type '{tag}', values will be treated as string")]
    UnknownType {
        /// Column name
        column: String,
        /// Declared type tag
        tag: String,
    },

    /// The freshness field is not one of the declared columns
    #[error("Freshness field '{0}' is not a declared column")]
    UndeclaredFreshnessField(String),

    /// Freshness expression without a field to check, or the reverse
    #[error("SLA declares '{present}' without '{missing}'")]
    IncompleteFreshness {
        /// Key that is set
        present: &'static str,
        /// Key that is missing
        missing: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_schema_message() {
        assert_eq!(
            ContractError::MissingSchema.to_string(),
            "Missing 'schema' in contract"
        );
    }

    #[test]
    fn test_incomplete_freshness_message() {
        let err = ContractError::IncompleteFreshness {
            present: "freshness",
            missing: "freshness_field",
        };
        assert_eq!(
            err.to_string(),
            "SLA declares 'freshness' without 'freshness_field'"
        );
    }
}
