//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("notemark")
        .about("Inspect notemark documents and queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(color_arg())
        .arg(log_arg())
        .subcommand(tree_command())
        .subcommand(query_command())
        .subcommand(queries_command())
        .subcommand(check_command())
}

/// Dump the syntax tree of a note.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the syntax tree of a note")
        .after_help(
            r#"EXAMPLES:
  notemark tree page.md                 # indented dump
  notemark tree page.md --spans         # with byte ranges
  notemark tree page.md --json          # serialized tree
  cat page.md | notemark tree -         # from stdin
  notemark tree page.md --extensions ext.json"#,
        )
        .arg(source_path_arg())
        .arg(spans_arg())
        .arg(json_arg())
        .arg(extensions_arg())
}

/// Compile one query and print it as JSON.
pub fn query_command() -> Command {
    Command::new("query")
        .about("Compile a query and print it as JSON")
        .override_usage(
            "\
  notemark query <QUERY>
  notemark query -f <FILE>",
        )
        .arg(query_text_arg())
        .arg(query_file_arg())
}

/// Compile every query embedded in a note.
pub fn queries_command() -> Command {
    Command::new("queries")
        .about("Compile every query in a note (query fences and #query directives)")
        .arg(source_path_arg())
        .arg(extensions_arg())
}

/// Verify a note: lossless round trip and valid embedded queries.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check that a note parses losslessly and its queries are valid")
        .arg(source_path_arg())
        .arg(extensions_arg())
}
