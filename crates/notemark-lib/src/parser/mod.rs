//! Parser infrastructure for notes and their embedded queries.
//!
//! # Architecture
//!
//! Both grammars produce a lossless concrete syntax tree (CST) via Rowan's
//! green tree builder. Every byte of the input ends up in exactly one token,
//! so rendering the tree reproduces the source.
//!
//! - Document mode: coarse tokens, constructs found by scanning source lines,
//!   composite tokens emitted per construct. Only embedded queries report
//!   diagnostics.
//! - Query mode: fine-grained tokens, whitespace buffered as trivia,
//!   checkpoint-based wrapping for binary operators.
//!
//! Query fences and `#query` directives switch into query mode in place, so a
//! document tree holds fully parsed `Query` nodes.
//!
//! # Recovery Strategy
//!
//! Documents: a construct that does not complete is plain text; the rest of
//! the document is unaffected. Queries follow the usual rules:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. Recovery sets define synchronization points per production
//! 4. Past the nesting limit, expressions become errors and markup becomes text

pub mod ast;
pub mod cst;
pub mod dialect;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod dialect_tests;
#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};
pub use dialect::{Grammar, GrammarBuilder, GrammarError, GrammarExtension, build_grammar};

pub use self::core::Parser;

use rowan::GreenNode;
use tracing::instrument;

use crate::diagnostics::Diagnostics;

/// Parse result containing the green tree.
///
/// The tree is always complete; diagnostics are returned separately.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Diagnostics,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Creates a red view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (GreenNode, Diagnostics) {
        (self.green, self.diagnostics)
    }

    /// Typed view of the root: a `Document` or a `Query`.
    pub fn root(&self) -> ast::Root {
        match ast::Root::cast(self.syntax()) {
            Some(root) => root,
            None => unreachable!("parser always emits a Document or Query root"),
        }
    }
}

/// Parses a note. Total: any input yields a tree that renders back to it.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(grammar: &Grammar, source: &str) -> Parse {
    let mut parser = Parser::document(source, grammar);
    parser.parse_document_root();
    let (green, diagnostics) = parser.finish();
    Parse { green, diagnostics }
}

/// Parses standalone query text, with a `Query` node as the root.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_query(source: &str) -> Parse {
    let grammar = Grammar::default();
    let mut parser = Parser::query(source, &grammar);
    parser.parse_query_node();
    let (green, diagnostics) = parser.finish();
    Parse { green, diagnostics }
}
