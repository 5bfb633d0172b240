//! Main validation engine.
//!
//! This module provides the main `DataValidator` that runs schema coercion
//! followed by the SLA checks and assembles the resulting verdict.

use crate::sla::{parse_completeness_target, parse_freshness_window};
use crate::{DataSet, SchemaCoercer, SlaEvaluator};
use chrono::{DateTime, Utc};
use contracts_core::{
    Contract, ContractError, ContractValidator, LogicalType, ValidationContext, Verdict,
};
use tracing::{debug, info};

/// Main validation engine for data contracts.
///
/// The engine holds no state between calls: the caller's dataset is never
/// mutated, coercion works on a private copy.
///
/// # Example
///
/// ```rust
/// use contracts_validator::{DataRow, DataSet, DataValidator};
/// use contracts_core::{ContractBuilder, ValidationContext};
///
/// let contract = ContractBuilder::new("orders")
///     .column("amount", "float")
///     .build();
///
/// let mut row = DataRow::new();
/// row.insert("amount".to_string(), "bad".into());
/// let dataset = DataSet::from_rows(vec![row]);
///
/// let verdict = DataValidator::new().validate_with_data(&contract, &dataset, &ValidationContext::new());
///
/// assert!(!verdict.passed());
/// for error in &verdict.errors {
///     println!("Error: {}", error);
/// }
/// ```
pub struct DataValidator {
    coercer: SchemaCoercer,
    sla: SlaEvaluator,
}

impl DataValidator {
    /// Creates a new data validator.
    pub fn new() -> Self {
        Self {
            coercer: SchemaCoercer::new(),
            sla: SlaEvaluator::new(),
        }
    }

    /// Validates a contract against a dataset.
    ///
    /// This is the main validation entry point. A contract without a schema
    /// fails immediately; otherwise coercion findings and SLA findings are
    /// collected in that order.
    ///
    /// # Arguments
    ///
    /// * `contract` - The contract to validate against
    /// * `dataset` - The data to validate
    /// * `context` - Validation context carrying the evaluation instant
    pub fn validate_with_data(
        &self,
        contract: &Contract,
        dataset: &DataSet,
        context: &ValidationContext,
    ) -> Verdict {
        if let Err(err) = contract.ensure_schema() {
            info!(contract_id = %contract.contract_id, "contract has no schema");
            return Verdict::failure(err.to_string());
        }

        let mut working = dataset.clone();
        let coercion_errors = self.coercer.coerce(contract, &mut working);
        debug!(
            rows = working.len(),
            findings = coercion_errors.len(),
            "schema coercion finished"
        );

        let mut verdict = Verdict::from_parts(
            coercion_errors.iter().map(ToString::to_string).collect(),
            Vec::new(),
            Vec::new(),
        );

        self.sla
            .check_completeness(contract, &working)
            .apply_to(&mut verdict);
        self.sla
            .check_freshness(contract, &working, context.now)
            .apply_to(&mut verdict);

        info!(
            contract_id = %contract.contract_id,
            status = %verdict.status,
            errors = verdict.errors.len(),
            warnings = verdict.warnings.len(),
            "validation finished"
        );
        verdict
    }
}

impl Default for DataValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractValidator for DataValidator {
    type Data = DataSet;

    fn validate(&self, contract: &Contract, data: &DataSet, context: &ValidationContext) -> Verdict {
        self.validate_with_data(contract, data, context)
    }

    /// Checks the contract on its own, without rows.
    ///
    /// A missing schema or a blank column name is an error. Unknown type
    /// tags, unparsable SLA expressions and inconsistent freshness settings
    /// are warnings.
    fn validate_definition(&self, contract: &Contract) -> Verdict {
        if let Err(err) = contract.ensure_schema() {
            return Verdict::failure(err.to_string());
        }

        let mut verdict = Verdict::pass();

        for (column, tag) in &contract.schema {
            if column.trim().is_empty() {
                verdict.add_error(ContractError::EmptyColumnName.to_string());
            } else if LogicalType::parse_tag(tag).is_none() {
                verdict.add_warning(
                    ContractError::UnknownType {
                        column: column.clone(),
                        tag: tag.clone(),
                    }
                    .to_string(),
                );
            }
        }

        let Some(sla) = &contract.sla else {
            return verdict;
        };

        if let Some(raw) = sla.completeness_expr() {
            if let Err(err) = parse_completeness_target(raw) {
                verdict.add_warning(err.to_string());
            }
        }

        match (sla.freshness_expr(), sla.freshness_field_name()) {
            (Some(raw), Some(field)) => {
                if let Err(err) = parse_freshness_window(raw) {
                    verdict.add_warning(err.to_string());
                }
                if !contract.schema.contains_key(field) {
                    verdict.add_warning(
                        ContractError::UndeclaredFreshnessField(field.to_string()).to_string(),
                    );
                }
            }
            (Some(_), None) => verdict.add_warning(
                ContractError::IncompleteFreshness {
                    present: "freshness",
                    missing: "freshness_field",
                }
                .to_string(),
            ),
            (None, Some(_)) => verdict.add_warning(
                ContractError::IncompleteFreshness {
                    present: "freshness_field",
                    missing: "freshness",
                }
                .to_string(),
            ),
            (None, None) => {}
        }

        verdict
    }
}

/// Validates `dataset` against `contract` with freshness measured at `now`.
pub fn validate_rows(contract: &Contract, dataset: &DataSet, now: DateTime<Utc>) -> Verdict {
    DataValidator::new().validate_with_data(contract, dataset, &ValidationContext::at(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataRow, DataValue};
    use contracts_core::{ContractBuilder, Status, Violation};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn row(pairs: &[(&str, DataValue)]) -> DataRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_schema_short_circuits() {
        let contract = ContractBuilder::new("test")
            .completeness(">= 99%")
            .freshness("nonsense", "ts")
            .build();
        let data = DataSet::from_rows(vec![row(&[("ts", "garbage".into())])]);

        let verdict = validate_rows(&contract, &data, now());
        assert_eq!(verdict, Verdict::failure("Missing 'schema' in contract"));
    }

    #[test]
    fn test_clean_rows_pass() {
        let contract = ContractBuilder::new("orders")
            .column("id", "integer")
            .column("amount", "float")
            .column("paid", "boolean")
            .build();
        let data = DataSet::from_rows(vec![
            row(&[
                ("id", "1".into()),
                ("amount", "10.5".into()),
                ("paid", "yes".into()),
            ]),
            row(&[
                ("id", DataValue::Int(2)),
                ("amount", DataValue::Float(3.0)),
                ("paid", DataValue::Bool(false)),
            ]),
        ]);

        let verdict = validate_rows(&contract, &data, now());
        assert_eq!(verdict, Verdict::pass());
    }

    #[test]
    fn test_input_dataset_is_not_mutated() {
        let contract = ContractBuilder::new("test").column("amount", "float").build();
        let data = DataSet::from_rows(vec![row(&[("amount", "10.5".into())])]);
        let before = data.clone();

        validate_rows(&contract, &data, now());
        assert_eq!(data, before);
    }

    #[test]
    fn test_coercion_and_sla_findings_are_collected() {
        let contract = ContractBuilder::new("test")
            .column("amount", "float")
            .column("ts", "datetime")
            .completeness(">= 100%")
            .freshness("1h", "ts")
            .build();
        let data = DataSet::from_rows(vec![
            row(&[("amount", "bad".into()), ("ts", "2024-01-15T09:00:00Z".into())]),
            row(&[("amount", "1.0".into()), ("ts", DataValue::Null)]),
        ]);

        let verdict = validate_rows(&contract, &data, now());
        assert_eq!(verdict.status, Status::Fail);
        assert_eq!(
            verdict.errors,
            vec![
                "Column 'amount' failed coercion to float: row 0: invalid number 'bad'",
                "Completeness 50.00% below target 100.00%",
                "Freshness violated: latest 'ts' is older than 1h",
            ]
        );
        assert_eq!(
            verdict.violations,
            vec![
                Violation::Completeness {
                    actual: "50.00%".into(),
                    expected: ">= 100%".into()
                },
                Violation::Freshness {
                    actual_seconds: 10_800,
                    expected: "1h".into()
                },
            ]
        );
    }

    #[test]
    fn test_unparsable_sla_only_warns() {
        let contract = ContractBuilder::new("test")
            .column("ts", "datetime")
            .completeness("most%")
            .freshness("soon", "ts")
            .build();
        let data = DataSet::from_rows(vec![row(&[("ts", "2024-01-15T11:00:00Z".into())])]);

        let verdict = validate_rows(&contract, &data, now());
        assert!(verdict.passed());
        assert_eq!(
            verdict.warnings,
            vec![
                "Could not parse completeness SLA 'most%'",
                "Could not parse freshness SLA 'soon'",
            ]
        );
    }

    #[test]
    fn test_validate_definition() {
        let validator = DataValidator::new();

        let empty = ContractBuilder::new("empty").build();
        assert_eq!(
            validator.validate_definition(&empty).errors,
            vec!["Missing 'schema' in contract"]
        );

        let contract = ContractBuilder::new("test")
            .column("id", "uuid")
            .column(" ", "string")
            .completeness("lots")
            .freshness("1h", "updated_at")
            .build();
        let verdict = validator.validate_definition(&contract);
        assert_eq!(
            verdict.errors,
            vec!["Schema contains a column with an empty name"]
        );
        assert_eq!(
            verdict.warnings,
            vec![
                "Column 'id' has unknown type 'uuid', values will be treated as string",
                "Could not parse completeness SLA 'lots'",
                "Freshness field 'updated_at' is not a declared column",
            ]
        );
    }

    #[test]
    fn test_validate_definition_incomplete_freshness() {
        let mut contract = ContractBuilder::new("test")
            .column("ts", "datetime")
            .freshness("1h", "ts")
            .build();
        if let Some(sla) = contract.sla.as_mut() {
            sla.freshness_field = None;
        }

        let verdict = DataValidator::new().validate_definition(&contract);
        assert!(verdict.passed());
        assert_eq!(
            verdict.warnings,
            vec!["SLA declares 'freshness' without 'freshness_field'"]
        );
    }
}
