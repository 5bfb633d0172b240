//! Validation traits and result types for data contracts.
//!
//! This module defines the [`ContractValidator`] trait implemented by
//! validation engines, the [`ValidationContext`] carrying per-call inputs such
//! as the evaluation clock, and the [`Verdict`] every validation produces.

use crate::Contract;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Core trait for validating data against contracts.
///
/// Implementations never fail: every problem, including a malformed
/// contract, is reported through the returned [`Verdict`].
///
/// # Example
///
/// ```rust
/// use contracts_core::{Contract, ContractValidator, ValidationContext, Verdict};
///
/// struct RowCountValidator;
///
/// impl ContractValidator for RowCountValidator {
///     type Data = [u8];
///
///     fn validate(&self, contract: &Contract, data: &[u8], _context: &ValidationContext) -> Verdict {
///         if data.is_empty() {
///             Verdict::failure(format!("No rows for '{}'", contract.contract_id))
///         } else {
///             Verdict::pass()
///         }
///     }
/// }
/// ```
pub trait ContractValidator: Send + Sync {
    /// The data representation this validator understands.
    type Data: ?Sized;

    /// Validates `data` against `contract`.
    fn validate(&self, contract: &Contract, data: &Self::Data, context: &ValidationContext)
    -> Verdict;

    /// Validates only the contract definition itself (no data).
    ///
    /// Default implementation checks that the schema is not empty.
    fn validate_definition(&self, contract: &Contract) -> Verdict {
        match contract.ensure_schema() {
            Ok(()) => Verdict::pass(),
            Err(err) => Verdict::failure(err.to_string()),
        }
    }
}

/// Context for validation operations.
///
/// Carries the evaluation wall-clock time explicitly so that freshness
/// results are reproducible for a fixed `now`.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Instant against which freshness is measured
    pub now: DateTime<Utc>,
}

impl ValidationContext {
    /// Creates a new validation context evaluated at the current time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Creates a validation context evaluated at a fixed instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Overall outcome of a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No errors were recorded
    Pass,
    /// At least one error was recorded
    Fail,
}

impl Status {
    /// Lowercase name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured record of one SLA breach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dimension", rename_all = "lowercase")]
pub enum Violation {
    /// Share of fully populated rows fell below the target
    Completeness {
        /// Measured ratio, formatted as `"<ratio>%"` with two decimals
        actual: String,
        /// The SLA expression as written in the contract
        expected: String,
    },

    /// Newest timestamp is older than the allowed window
    Freshness {
        /// Age of the newest row in whole seconds
        actual_seconds: i64,
        /// The SLA expression as written in the contract
        expected: String,
    },
}

impl Violation {
    /// Name of the SLA dimension this violation belongs to.
    pub fn dimension(&self) -> &'static str {
        match self {
            Violation::Completeness { .. } => "completeness",
            Violation::Freshness { .. } => "freshness",
        }
    }

    /// The SLA expression as written in the contract.
    pub fn expected(&self) -> &str {
        match self {
            Violation::Completeness { expected, .. } | Violation::Freshness { expected, .. } => {
                expected
            }
        }
    }

    /// Measured value rendered for display.
    pub fn actual_display(&self) -> String {
        match self {
            Violation::Completeness { actual, .. } => actual.clone(),
            Violation::Freshness { actual_seconds, .. } => format!("{actual_seconds}s"),
        }
    }
}

/// Result of validating a row set against a contract.
///
/// `status` is kept in step with `errors`: it is [`Status::Fail`] exactly
/// when at least one error has been recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Overall outcome
    pub status: Status,

    /// Non-fatal findings
    pub warnings: Vec<String>,

    /// Findings that fail the validation
    pub errors: Vec<String>,

    /// Structured SLA breaches, each also present in `errors`
    pub violations: Vec<Violation>,
}

impl Verdict {
    /// Creates a new passing verdict.
    pub fn pass() -> Self {
        Self {
            status: Status::Pass,
            warnings: Vec::new(),
            errors: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Creates a new failed verdict with an error.
    pub fn failure(error: impl Into<String>) -> Self {
        let mut verdict = Self::pass();
        verdict.add_error(error);
        verdict
    }

    /// Assembles a verdict from collected findings.
    pub fn from_parts(
        errors: Vec<String>,
        warnings: Vec<String>,
        violations: Vec<Violation>,
    ) -> Self {
        let status = if errors.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        };
        Self {
            status,
            warnings,
            errors,
            violations,
        }
    }

    /// Returns true if no error was recorded.
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    /// Adds an error to the verdict.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.status = Status::Fail;
    }

    /// Adds a warning to the verdict.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Records an SLA breach together with its error message.
    pub fn add_violation(&mut self, violation: Violation, error: impl Into<String>) {
        self.add_error(error);
        self.violations.push(violation);
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_follows_errors() {
        let mut verdict = Verdict::pass();
        verdict.add_warning("just a warning");
        assert!(verdict.passed());

        verdict.add_error("broken");
        assert_eq!(verdict.status, Status::Fail);

        let rebuilt = Verdict::from_parts(vec![], verdict.warnings.clone(), vec![]);
        assert!(rebuilt.passed());
    }

    #[test]
    fn test_violation_wire_format() {
        let completeness = Violation::Completeness {
            actual: "0.00%".to_string(),
            expected: ">=100%".to_string(),
        };
        let freshness = Violation::Freshness {
            actual_seconds: 10800,
            expected: "1h".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&completeness).unwrap(),
            json!({"dimension": "completeness", "actual": "0.00%", "expected": ">=100%"})
        );
        assert_eq!(
            serde_json::to_value(&freshness).unwrap(),
            json!({"dimension": "freshness", "actual_seconds": 10800, "expected": "1h"})
        );
        assert_eq!(freshness.actual_display(), "10800s");
    }

    #[test]
    fn test_verdict_wire_format() {
        let mut verdict = Verdict::pass();
        verdict.add_violation(
            Violation::Freshness {
                actual_seconds: 7200,
                expected: "1h".to_string(),
            },
            "Freshness violated: latest 'ts' is older than 1h",
        );

        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["status"], "fail");
        assert_eq!(value["errors"][0], "Freshness violated: latest 'ts' is older than 1h");
        assert_eq!(value["violations"][0]["dimension"], "freshness");
        assert_eq!(value["warnings"], json!([]));
    }

    #[test]
    fn test_context_pins_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(ValidationContext::at(now).now, now);
    }
}
