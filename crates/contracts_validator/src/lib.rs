//! # Data Contracts Validator
//!
//! Validation engine for data contracts. This crate checks a batch of rows
//! against a contract definition:
//!
//! - Schema coercion (column presence, casting to the declared logical types)
//! - Completeness SLA (share of rows with every declared column populated)
//! - Freshness SLA (age of the newest timestamp in a designated column)
//!
//! The engine is a pure function of contract, rows and the evaluation
//! instant. Every finding ends up in the returned [`Verdict`](contracts_core::Verdict).
//!
//! ## Example
//!
//! ```rust
//! use contracts_validator::{DataRow, DataSet, DataValidator};
//! use contracts_core::{ContractBuilder, ValidationContext};
//!
//! let contract = ContractBuilder::new("events")
//!     .column("ts", "datetime")
//!     .completeness(">=100%")
//!     .build();
//!
//! let mut row = DataRow::new();
//! row.insert("ts".to_string(), None::<String>.into());
//! let dataset = DataSet::from_rows(vec![row]);
//!
//! let validator = DataValidator::new();
//! let verdict = validator.validate_with_data(&contract, &dataset, &ValidationContext::new());
//!
//! if verdict.passed() {
//!     println!("Validation passed!");
//! } else {
//!     println!("Validation failed: {:?}", verdict.errors);
//! }
//! ```

mod coercion;
mod dataset;
mod engine;
mod error;
mod sla;
mod timestamp;

pub use coercion::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use sla::*;
pub use timestamp::*;
