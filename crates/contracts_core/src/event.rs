//! Validation events forwarded to the event store.
//!
//! A [`ValidationEvent`] is the envelope downstream collaborators ingest: the
//! verdict labelled with the dataset and its owner. Delivery is best effort;
//! its outcome is recorded on the event as a [`ForwardStatus`].

use crate::{Contract, Status, Verdict, Violation};
use serde::{Serialize, Serializer};

/// Event emitted after a validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationEvent {
    /// Dataset name (the contract identifier)
    pub dataset: String,
    /// Contract identifier
    pub contract_id: String,
    /// Dataset owner, if declared
    pub owner: Option<String>,
    /// Validation outcome
    pub status: Status,
    /// Errors copied from the verdict
    pub errors: Vec<String>,
    /// Warnings copied from the verdict
    pub warnings: Vec<String>,
    /// Violations copied from the verdict
    pub violations: Vec<Violation>,
    /// Result of forwarding the event, once attempted
    #[serde(
        rename = "forwarded_to_governiq",
        skip_serializing_if = "Option::is_none"
    )]
    pub forwarded: Option<ForwardStatus>,
}

impl ValidationEvent {
    /// Builds the event for a verdict produced against `contract`.
    pub fn from_verdict(contract: &Contract, verdict: &Verdict) -> Self {
        Self {
            dataset: contract.contract_id.clone(),
            contract_id: contract.contract_id.clone(),
            owner: contract.owner.clone(),
            status: verdict.status,
            errors: verdict.errors.clone(),
            warnings: verdict.warnings.clone(),
            violations: verdict.violations.clone(),
            forwarded: None,
        }
    }

    /// Records the outcome of a forwarding attempt.
    pub fn record_forwarding(&mut self, status: ForwardStatus) {
        self.forwarded = Some(status);
    }
}

/// Outcome of posting an event to the event store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardStatus {
    /// The endpoint answered with this HTTP status code
    Delivered(u16),
    /// The request could not be completed
    Failed(String),
}

impl Serialize for ForwardStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ForwardStatus::Delivered(code) => serializer.serialize_u16(*code),
            ForwardStatus::Failed(reason) => serializer.serialize_str(&format!("failed: {reason}")),
        }
    }
}

/// Response body pairing a verdict with the event derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResponse {
    /// The engine's verdict
    pub validation: Verdict,
    /// The event built from it
    pub event: ValidationEvent,
}

impl ValidationResponse {
    /// Pairs a verdict with a freshly built event.
    pub fn new(contract: &Contract, validation: Verdict) -> Self {
        let event = ValidationEvent::from_verdict(contract, &validation);
        Self { validation, event }
    }
}
