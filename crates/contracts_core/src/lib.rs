//! # Data Contracts Core
//!
//! Core data structures and types for the Data Contracts Engine.
//!
//! A data contract is a producer's declaration of the columns a dataset
//! carries, their logical types, and the service level expectations the data
//! must meet. This crate provides the types shared by the parser, the
//! validation engine and the CLI.
//!
//! ## Key Concepts
//!
//! - **Contract**: Declared columns (ordered name → type tag) plus an optional SLA
//! - **SLA**: Completeness (`">= 99%"`) and freshness (`"24h"` on a timestamp column)
//! - **Verdict**: The pass/fail outcome of a validation with errors, warnings and violations
//! - **Validation Event**: The verdict labelled with dataset and owner, as forwarded downstream
//!
//! ## Example
//!
//! ```rust
//! use contracts_core::{ContractBuilder, Verdict, Violation};
//!
//! let contract = ContractBuilder::new("sales_orders_v1")
//!     .owner("sales-data")
//!     .column("order_id", "string")
//!     .column("created_at", "datetime")
//!     .completeness(">= 99%")
//!     .freshness("24h", "created_at")
//!     .build();
//!
//! let mut verdict = Verdict::pass();
//! verdict.add_violation(
//!     Violation::Completeness { actual: "90.00%".into(), expected: ">= 99%".into() },
//!     "Completeness 90.00% below target 99.00%",
//! );
//! assert!(!verdict.passed());
//! # let _ = contract;
//! ```

pub mod builder;
pub mod contract;
pub mod error;
pub mod event;
pub mod verdict;

pub use builder::*;
pub use contract::*;
pub use error::*;
pub use event::*;
pub use verdict::*;
