//! Schema coercion logic.
//!
//! This module casts every declared column of a dataset to the logical type
//! the contract declares for it. Failures are collected as findings; the
//! coercion of one column never stops the others.

use crate::timestamp::timestamp_from_value;
use crate::{DataSet, DataValue, ValidationError};
use contracts_core::{Contract, LogicalType};
use tracing::debug;

/// Casts dataset columns to their declared logical types.
///
/// Coerced values replace the raw ones in place, so later phases see typed
/// values wherever coercion succeeded.
pub struct SchemaCoercer;

impl SchemaCoercer {
    /// Creates a new schema coercer.
    pub fn new() -> Self {
        Self
    }

    /// Coerces every declared column of `dataset`.
    ///
    /// Returns a list of coercion findings. An empty list indicates success.
    pub fn coerce(&self, contract: &Contract, dataset: &mut DataSet) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (column, tag) in &contract.schema {
            if !dataset.has_column(column) {
                debug!(column = %column, "declared column absent from rows");
                errors.push(ValidationError::missing_column(column));
                continue;
            }

            let logical = LogicalType::from_tag(tag);
            if let Some(err) = self.coerce_column(column, logical, dataset) {
                debug!(column = %column, target = %logical, error = %err, "column coercion failed");
                errors.push(err);
            } else {
                debug!(column = %column, target = %logical, "column coerced");
            }
        }

        errors
    }

    /// Coerces a single column, returning the finding if any.
    fn coerce_column(
        &self,
        column: &str,
        logical: LogicalType,
        dataset: &mut DataSet,
    ) -> Option<ValidationError> {
        match logical {
            LogicalType::String => {
                let values: Vec<DataValue> = dataset.column_values(column).map(to_text).collect();
                dataset.set_column(column, values);
                None
            }
            LogicalType::Integer | LogicalType::Float => {
                let mut values = Vec::with_capacity(dataset.len());
                for (row_idx, value) in dataset.column_values(column).enumerate() {
                    match coerce_number(value, logical) {
                        Ok(coerced) => values.push(coerced),
                        // The whole column keeps its raw values
                        Err(reason) => {
                            return Some(ValidationError::coercion(
                                column,
                                logical.as_str(),
                                format!("row {row_idx}: {reason}"),
                            ));
                        }
                    }
                }
                dataset.set_column(column, values);
                None
            }
            LogicalType::Boolean | LogicalType::Datetime => {
                let mut has_invalid = false;
                let values: Vec<DataValue> = dataset
                    .column_values(column)
                    .map(|value| {
                        let coerced = if logical == LogicalType::Boolean {
                            coerce_boolean(value)
                        } else {
                            coerce_datetime(value)
                        };
                        if coerced.is_null() && !value.is_blank() {
                            has_invalid = true;
                        }
                        coerced
                    })
                    .collect();
                dataset.set_column(column, values);

                has_invalid.then(|| match logical {
                    LogicalType::Boolean => ValidationError::InvalidBoolean(column.to_string()),
                    _ => ValidationError::InvalidDatetime(column.to_string()),
                })
            }
        }
    }
}

impl Default for SchemaCoercer {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a value to an integer or float, or explains why it cannot.
fn coerce_number(value: &DataValue, target: LogicalType) -> Result<DataValue, String> {
    let integer = target == LogicalType::Integer;

    match value {
        DataValue::Null => Ok(DataValue::Null),
        DataValue::Bool(b) => Ok(number_value(i64::from(*b), integer)),
        DataValue::Int(i) => Ok(number_value(*i, integer)),
        DataValue::Float(f) => {
            if integer {
                float_to_int(*f)
            } else if f.is_finite() {
                Ok(DataValue::Float(*f))
            } else {
                Err(format!("non-finite value {f}"))
            }
        }
        DataValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(DataValue::Null);
            }
            if integer {
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Ok(DataValue::Int(i));
                }
            }
            match trimmed.parse::<f64>() {
                Ok(f) if integer => float_to_int(f),
                Ok(f) if f.is_finite() => Ok(DataValue::Float(f)),
                _ => Err(format!("invalid number '{s}'")),
            }
        }
        DataValue::Timestamp(_) => Err(format!("cannot convert datetime to {target}")),
    }
}

fn number_value(i: i64, integer: bool) -> DataValue {
    if integer {
        DataValue::Int(i)
    } else {
        DataValue::Float(i as f64)
    }
}

fn float_to_int(f: f64) -> Result<DataValue, String> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(DataValue::Int(f as i64))
    } else {
        Err(format!("cannot safely cast non-integral value {f} to integer"))
    }
}

/// Parses common truthy/falsy tokens; anything else becomes null.
fn coerce_boolean(value: &DataValue) -> DataValue {
    match value {
        DataValue::Bool(b) => DataValue::Bool(*b),
        DataValue::Int(1) => DataValue::Bool(true),
        DataValue::Int(0) => DataValue::Bool(false),
        DataValue::Float(f) if *f == 1.0 => DataValue::Bool(true),
        DataValue::Float(f) if *f == 0.0 => DataValue::Bool(false),
        DataValue::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" | "on" => DataValue::Bool(true),
            "false" | "f" | "no" | "n" | "0" | "off" => DataValue::Bool(false),
            _ => DataValue::Null,
        },
        _ => DataValue::Null,
    }
}

fn coerce_datetime(value: &DataValue) -> DataValue {
    timestamp_from_value(value).map_or(DataValue::Null, DataValue::Timestamp)
}

/// Renders a scalar as text; nulls stay null.
fn to_text(value: &DataValue) -> DataValue {
    match value {
        DataValue::Null => DataValue::Null,
        DataValue::String(s) => DataValue::String(s.clone()),
        DataValue::Bool(b) => DataValue::String(b.to_string()),
        DataValue::Int(i) => DataValue::String(i.to_string()),
        DataValue::Float(f) => DataValue::String(f.to_string()),
        DataValue::Timestamp(ts) => DataValue::String(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}
