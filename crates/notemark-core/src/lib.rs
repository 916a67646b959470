#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Structured query values for notemark.
//!
//! The query compiler in `notemark-lib` lowers a parsed query into these types.
//! They carry no syntax information and no parser dependency, so an execution
//! engine can consume them directly (in-process, or as JSON).
//!
//! JSON uses the tagged-array shape for expressions:
//!
//! ```
//! use notemark_core::{BinaryOp, Literal, QueryExpression};
//!
//! let expr = QueryExpression::binary(
//!     BinaryOp::Eq,
//!     QueryExpression::attr("done"),
//!     QueryExpression::Literal(Literal::Bool(false)),
//! );
//! assert_eq!(
//!     serde_json::to_string(&expr).unwrap(),
//!     r#"["=",["attr","done"],["boolean",false]]"#
//! );
//! ```

mod expr;
mod query;

#[cfg(test)]
mod query_tests;

pub use expr::{BinaryOp, Literal, LogicalOp, QueryExpression, UnknownOperator};
pub use query::{OrderBy, Query, SelectItem};
