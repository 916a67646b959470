//! Notemark: a lossless parser for notes and the query language they embed.
//!
//! # Example
//!
//! ```
//! use notemark_lib::{Grammar, parse};
//! use notemark_lib::tree::render_to_text;
//!
//! let source = "# Tasks\n\n- [TODO] water plants [due: 2024-05-01]\n";
//! let parse = parse(&Grammar::default(), source);
//! assert_eq!(render_to_text(&parse.syntax()), source);
//!
//! let query = notemark_lib::compile_query_source("task where done = false limit 5").unwrap();
//! assert_eq!(query.source, "task");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;
pub mod query;
pub mod tree;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use notemark_core::{Query, QueryExpression};
pub use parser::{
    Grammar, GrammarBuilder, GrammarError, GrammarExtension, Parse, build_grammar, parse,
    parse_query,
};
pub use query::{
    CompileError, ExprContext, compile_expression, compile_query, compile_query_source,
};

/// Errors surfaced by the library's fallible entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("query parsing failed with {} errors", .0.error_count())]
    QueryParseError(Diagnostics),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, Error>;
