//! Error types for validation operations.
//!
//! Every finding the engine produces is a [`ValidationError`]; its `Display`
//! output is the exact text that lands in a verdict's `errors` or `warnings`.

use thiserror::Error;

/// Findings that can occur during validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Declared column is absent from every row
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// Column could not be converted to its declared numeric type
    #[error("Column '{column}' failed coercion to {target}: {reason}")]
    CoercionFailed {
        column: String,
        target: String,
        reason: String,
    },

    /// Some non-empty values of a datetime column did not parse
    #[error("Column '{0}' has invalid datetime values")]
    InvalidDatetime(String),

    /// Some non-empty values of a boolean column did not parse
    #[error("Column '{0}' has invalid boolean values")]
    InvalidBoolean(String),

    /// Completeness SLA expression could not be parsed
    #[error("Could not parse completeness SLA '{0}'")]
    UnparsableCompleteness(String),

    /// Freshness SLA expression could not be parsed
    #[error("Could not parse freshness SLA '{0}'")]
    UnparsableFreshness(String),

    /// Share of fully populated rows is below the target
    #[error("Completeness {actual:.2}% below target {target:.2}%")]
    CompletenessBelowTarget { actual: f64, target: f64 },

    /// Freshness field holds no parseable timestamp
    #[error("No valid timestamps in '{0}' to assess freshness")]
    NoValidTimestamps(String),

    /// Newest timestamp is older than the allowed window
    #[error("Freshness violated: latest '{field}' is older than {expected}")]
    StaleData { field: String, expected: String },
}

impl ValidationError {
    /// Creates a new missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn(column.into())
    }

    /// Creates a new coercion failure.
    pub fn coercion(
        column: impl Into<String>,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::CoercionFailed {
            column: column.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new stale data error.
    pub fn stale(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::StaleData {
            field: field.into(),
            expected: expected.into(),
        }
    }
}
