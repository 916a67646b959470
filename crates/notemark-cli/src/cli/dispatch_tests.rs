//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Params extraction: correct fields are extracted from ArgMatches
//! 2. Conflicts: mutually exclusive flags are rejected
//! 3. Globals: --color and --log reach every subcommand

use std::path::PathBuf;

use clap::ArgMatches;

use super::*;
use crate::cli::commands::tree_command;

fn subcommand(args: &[&str]) -> ArgMatches {
    let matches = build_cli()
        .try_get_matches_from(args)
        .unwrap_or_else(|e| panic!("{args:?} should parse: {e}"));
    let (_, m) = matches.subcommand().expect("subcommand is required");
    m.clone()
}

#[test]
fn tree_params_from_matches() {
    let m = tree_command()
        .try_get_matches_from(["tree", "page.md", "--spans", "--extensions", "ext.json"])
        .unwrap();
    let params = TreeParams::from_matches(&m);

    assert_eq!(params.source_path, PathBuf::from("page.md"));
    assert_eq!(params.extensions, Some(PathBuf::from("ext.json")));
    assert!(params.spans);
    assert!(!params.json);
}

#[test]
fn tree_reads_stdin_dash() {
    let m = tree_command().try_get_matches_from(["tree", "-"]).unwrap();
    let params = TreeParams::from_matches(&m);
    assert_eq!(params.source_path, PathBuf::from("-"));
}

#[test]
fn tree_requires_source() {
    let result = tree_command().try_get_matches_from(["tree"]);
    assert!(result.is_err());
}

#[test]
fn tree_json_conflicts_with_spans() {
    let result = tree_command().try_get_matches_from(["tree", "page.md", "--json", "--spans"]);
    assert!(result.is_err(), "--json and --spans should conflict");
}

#[test]
fn query_text_positional() {
    let m = subcommand(&["notemark", "query", "task where done = false"]);
    let params = QueryParams::from_matches(&m);

    assert_eq!(params.query_text.as_deref(), Some("task where done = false"));
    assert_eq!(params.query_path, None);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn query_file_flag() {
    let m = subcommand(&["notemark", "query", "-f", "q.txt"]);
    let params = QueryParams::from_matches(&m);

    assert_eq!(params.query_text, None);
    assert_eq!(params.query_path, Some(PathBuf::from("q.txt")));
}

#[test]
fn query_text_conflicts_with_file() {
    let result = build_cli().try_get_matches_from(["notemark", "query", "task", "-f", "q.txt"]);
    assert!(result.is_err(), "QUERY and -f should conflict");
}

#[test]
fn color_is_global() {
    let m = subcommand(&["notemark", "check", "page.md", "--color", "never"]);
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.color, ColorChoice::Never);

    let m = subcommand(&["notemark", "--color", "always", "queries", "page.md"]);
    let params = QueriesParams::from_matches(&m);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn color_rejects_unknown_value() {
    let result = build_cli().try_get_matches_from(["notemark", "check", "page.md", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn log_is_global() {
    let matches = build_cli()
        .try_get_matches_from(["notemark", "tree", "page.md", "--log", "debug"])
        .unwrap();
    assert_eq!(
        matches.get_one::<String>("log").map(String::as_str),
        Some("debug")
    );
}

#[test]
fn subcommand_required() {
    let result = build_cli().try_get_matches_from(["notemark"]);
    assert!(result.is_err());
}

#[test]
fn color_choice_explicit() {
    assert!(ColorChoice::Always.should_colorize());
    assert!(!ColorChoice::Never.should_colorize());
}
