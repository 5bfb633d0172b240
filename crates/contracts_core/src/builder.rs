//! Builder pattern for creating data contracts.
//!
//! This module provides an ergonomic builder for constructing contracts
//! with a fluent API.

use crate::{Contract, Schema, Sla};

/// Builder for creating a `Contract`.
///
/// # Example
///
/// ```rust
/// use contracts_core::ContractBuilder;
///
/// let contract = ContractBuilder::new("user_events")
///     .owner("analytics-team")
///     .column("event_id", "string")
///     .column("event_ts", "datetime")
///     .completeness(">= 99%")
///     .freshness("24h", "event_ts")
///     .build();
///
/// assert_eq!(contract.schema.len(), 2);
/// assert!(contract.sla.is_some());
/// ```
#[derive(Debug, Default)]
pub struct ContractBuilder {
    contract_id: String,
    owner: Option<String>,
    schema: Schema,
    sla: Option<Sla>,
}

impl ContractBuilder {
    /// Creates a new contract builder.
    ///
    /// # Arguments
    ///
    /// * `contract_id` - Contract identifier, also used as the dataset name
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            ..Default::default()
        }
    }

    /// Sets the contract owner.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Declares a column. Re-declaring a column replaces its type in place.
    pub fn column(mut self, name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        self.schema.insert(name.into(), type_tag.into());
        self
    }

    /// Declares multiple columns.
    pub fn columns<N, T>(mut self, columns: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        for (name, type_tag) in columns {
            self.schema.insert(name.into(), type_tag.into());
        }
        self
    }

    /// Sets the completeness expectation, e.g. `">= 99%"`.
    pub fn completeness(mut self, expression: impl Into<String>) -> Self {
        self.sla.get_or_insert_with(Sla::default).completeness = Some(expression.into());
        self
    }

    /// Sets the freshness expectation and the column it applies to.
    pub fn freshness(mut self, expression: impl Into<String>, field: impl Into<String>) -> Self {
        let sla = self.sla.get_or_insert_with(Sla::default);
        sla.freshness = Some(expression.into());
        sla.freshness_field = Some(field.into());
        self
    }

    /// Sets the whole SLA block.
    pub fn sla(mut self, sla: Sla) -> Self {
        self.sla = Some(sla);
        self
    }

    /// Builds the contract.
    pub fn build(self) -> Contract {
        Contract {
            contract_id: self.contract_id,
            owner: self.owner,
            schema: self.schema,
            sla: self.sla,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogicalType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contract_builder() {
        let contract = ContractBuilder::new("test")
            .owner("owner")
            .column("id", "string")
            .column("amount", "double")
            .build();

        assert_eq!(contract.contract_id, "test");
        assert_eq!(contract.owner.as_deref(), Some("owner"));
        assert_eq!(contract.columns().collect::<Vec<_>>(), vec!["id", "amount"]);
        assert_eq!(contract.column_type("amount"), Some(LogicalType::Float));
        assert!(contract.sla.is_none());
    }

    #[test]
    fn test_builder_sla_accumulates() {
        let contract = ContractBuilder::new("test")
            .columns([("ts", "datetime"), ("n", "int")])
            .completeness(">=95%")
            .freshness("2d", "ts")
            .build();

        let sla = contract.sla.expect("SLA should be set");
        assert_eq!(sla.completeness.as_deref(), Some(">=95%"));
        assert_eq!(sla.freshness.as_deref(), Some("2d"));
        assert_eq!(sla.freshness_field.as_deref(), Some("ts"));
    }

    #[test]
    fn test_redeclared_column_keeps_position() {
        let contract = ContractBuilder::new("test")
            .column("a", "string")
            .column("b", "string")
            .column("a", "int")
            .build();

        assert_eq!(contract.columns().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(contract.column_type("a"), Some(LogicalType::Integer));
    }
}
