//! Grammar productions for documents and queries.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Document productions never report diagnostics: a construct that cannot be
//! completed is left as plain text. Query productions follow the usual
//! recovery rules and report into the parser's diagnostics.

mod blocks;
mod directives;
mod expressions;
mod inlines;
mod links;
mod query;
mod scan;
