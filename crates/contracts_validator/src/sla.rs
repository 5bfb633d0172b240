//! SLA evaluation logic.
//!
//! This module handles the two service level dimensions a contract can declare:
//! - Completeness: share of rows where every declared column is populated
//! - Freshness: age of the newest timestamp in a designated column
//!
//! Each check yields an [`SlaCheck`] that knows how to record itself on a
//! [`Verdict`].

use crate::timestamp::timestamp_from_value;
use crate::{DataSet, ValidationError};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use contracts_core::{Contract, Verdict, Violation};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Tolerance applied when comparing a ratio against its target.
const COMPLETENESS_EPSILON: f64 = 1e-9;

static FRESHNESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([smhd])").expect("valid regex"));

/// Outcome of a single SLA check.
#[derive(Debug, Clone, PartialEq)]
pub enum SlaCheck {
    /// The SLA dimension is not declared or does not apply
    Skipped,
    /// The SLA is met
    Met,
    /// The expression could not be parsed; reported as a warning
    Unparsable(ValidationError),
    /// The data cannot be assessed; reported as an error
    Failed(ValidationError),
    /// The SLA is breached
    Violated {
        error: ValidationError,
        violation: Violation,
    },
}

impl SlaCheck {
    /// Records this outcome on `verdict`.
    pub fn apply_to(self, verdict: &mut Verdict) {
        match self {
            SlaCheck::Skipped | SlaCheck::Met => {}
            SlaCheck::Unparsable(err) => verdict.add_warning(err.to_string()),
            SlaCheck::Failed(err) => verdict.add_error(err.to_string()),
            SlaCheck::Violated { error, violation } => {
                verdict.add_violation(violation, error.to_string())
            }
        }
    }
}

/// Evaluates the completeness and freshness SLAs of a contract.
pub struct SlaEvaluator;

impl SlaEvaluator {
    /// Creates a new SLA evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Checks the completeness SLA against an already coerced dataset.
    pub fn check_completeness(&self, contract: &Contract, dataset: &DataSet) -> SlaCheck {
        let Some(raw) = contract.sla.as_ref().and_then(|sla| sla.completeness_expr()) else {
            return SlaCheck::Skipped;
        };

        let target = match parse_completeness_target(raw) {
            Ok(target) => target,
            Err(err) => {
                warn!(expression = raw, "unparsable completeness SLA");
                return SlaCheck::Unparsable(err);
            }
        };

        let ratio = completeness_ratio(contract, dataset);
        debug!(ratio, target, "completeness measured");

        if ratio + COMPLETENESS_EPSILON < target {
            SlaCheck::Violated {
                error: ValidationError::CompletenessBelowTarget {
                    actual: ratio,
                    target,
                },
                violation: Violation::Completeness {
                    actual: format!("{ratio:.2}%"),
                    expected: raw.to_string(),
                },
            }
        } else {
            SlaCheck::Met
        }
    }

    /// Checks the freshness SLA, measuring age against `now`.
    pub fn check_freshness(
        &self,
        contract: &Contract,
        dataset: &DataSet,
        now: DateTime<Utc>,
    ) -> SlaCheck {
        let Some(sla) = contract.sla.as_ref() else {
            return SlaCheck::Skipped;
        };
        let (Some(raw), Some(field)) = (sla.freshness_expr(), sla.freshness_field_name()) else {
            return SlaCheck::Skipped;
        };
        if !dataset.has_column(field) {
            debug!(field, "freshness field absent from rows, skipping");
            return SlaCheck::Skipped;
        }

        let window = match parse_freshness_window(raw) {
            Ok(window) => window,
            Err(err) => {
                warn!(expression = raw, "unparsable freshness SLA");
                return SlaCheck::Unparsable(err);
            }
        };

        let Some(latest) = latest_timestamp(field, dataset) else {
            return SlaCheck::Failed(ValidationError::NoValidTimestamps(field.to_string()));
        };

        let age = now.naive_utc() - latest;
        debug!(field, age_seconds = age.num_seconds(), "freshness measured");

        if age > window {
            SlaCheck::Violated {
                error: ValidationError::stale(field, raw),
                violation: Violation::Freshness {
                    actual_seconds: age.num_seconds(),
                    expected: raw.to_string(),
                },
            }
        } else {
            SlaCheck::Met
        }
    }
}

impl Default for SlaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a completeness expression such as `">= 99.5%"` into its target
/// percentage.
pub fn parse_completeness_target(raw: &str) -> Result<f64, ValidationError> {
    let cleaned = raw.trim().replace(">=", "").replace('%', "");
    match cleaned.trim().parse::<f64>() {
        Ok(target) if target.is_finite() => Ok(target),
        _ => Err(ValidationError::UnparsableCompleteness(raw.to_string())),
    }
}

/// Percentage of rows in which every declared column is populated.
///
/// A contract without columns or a dataset without rows is fully complete.
pub fn completeness_ratio(contract: &Contract, dataset: &DataSet) -> f64 {
    if contract.schema.is_empty() || dataset.is_empty() {
        return 100.0;
    }

    let complete = dataset
        .rows()
        .filter(|row| {
            contract
                .columns()
                .all(|column| row.get(column).is_some_and(|value| !value.is_null()))
        })
        .count();

    100.0 * complete as f64 / dataset.len() as f64
}

/// Parses a freshness expression such as `"24h"` or `"30 m"`.
///
/// Only the leading amount and unit letter are read, so `"30min"` is 30
/// minutes and `"2days"` is 2 days.
pub fn parse_freshness_window(raw: &str) -> Result<Duration, ValidationError> {
    let unparsable = || ValidationError::UnparsableFreshness(raw.to_string());

    let caps = FRESHNESS_PATTERN.captures(raw.trim()).ok_or_else(unparsable)?;
    let amount: i64 = caps[1].parse().map_err(|_| unparsable())?;
    let unit_seconds = match &caps[2] {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        _ => return Err(unparsable()),
    };

    amount
        .checked_mul(unit_seconds)
        .and_then(Duration::try_seconds)
        .ok_or_else(unparsable)
}

/// Newest valid timestamp in `field`, if any.
pub fn latest_timestamp(field: &str, dataset: &DataSet) -> Option<NaiveDateTime> {
    dataset
        .column_values(field)
        .filter_map(timestamp_from_value)
        .max()
}
