//! Lowers parsed queries into [`notemark_core::Query`] values.
//!
//! The compiler only reads typed AST wrappers. A node it does not know is a
//! mismatch between grammar and compiler, reported as [`CompileError`] rather
//! than skipped.

mod compile;


use std::fmt;

pub use compile::{compile_expression, compile_query};

use notemark_core::Query;
use tracing::instrument;

use crate::Error;
use crate::parser::{SyntaxKind, parse_query};

/// Where an expression appears: filters must be boolean-shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprContext {
    Value,
    Filter,
}

impl fmt::Display for ExprContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprContext::Value => write!(f, "value"),
            ExprContext::Filter => write!(f, "filter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The node handed to [`compile_query`] is not a `Query`.
    #[error("expected a Query node, found {kind:?}")]
    NotAQuery { kind: SyntaxKind },

    #[error("unknown clause {kind:?}")]
    UnknownClause { kind: SyntaxKind },

    #[error("unexpected {kind:?} in {context} context")]
    UnexpectedExpression { kind: SyntaxKind, context: ExprContext },

    /// A recognized node lacks a required part; only recovered trees do.
    #[error("{kind:?} is missing its {what}")]
    Incomplete { kind: SyntaxKind, what: &'static str },
}

/// Parses and compiles query text. Syntax errors fail with
/// [`Error::QueryParseError`] before compilation starts.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn compile_query_source(source: &str) -> Result<Query, Error> {
    let parse = parse_query(source);
    if parse.diagnostics().has_errors() {
        return Err(Error::QueryParseError(parse.diagnostics().filtered()));
    }
    Ok(compile_query(&parse.syntax())?)
}
