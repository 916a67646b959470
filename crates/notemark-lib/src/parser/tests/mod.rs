//! Snapshot tests for both grammars.
//!
//! Every helper asserts that the tree renders back to its input before
//! returning the dump.

use crate::parser::{Grammar, parse, parse_query};
use crate::tree::{CstPrinter, render_to_text};

mod grammar {
    mod blocks_tests;
    mod directives_tests;
    mod inlines_tests;
    mod links_tests;
    mod query_tests;
}

mod recovery {
    mod document_tests;
    mod query_tests;
}


fn dump(source: &str) -> String {
    let root = parse(&Grammar::default(), source).syntax();
    assert_eq!(render_to_text(&root), source);
    CstPrinter::new(&root).dump()
}

fn dump_query(source: &str) -> String {
    let root = parse_query(source).syntax();
    assert_eq!(render_to_text(&root), source);
    CstPrinter::new(&root).dump()
}

/// Plain-text diagnostics of a standalone query, unfiltered.
fn query_errors(source: &str) -> String {
    parse_query(source).diagnostics().to_string()
}
