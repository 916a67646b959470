//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Note file to read, `-` for stdin (positional).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Note file to read, or - for stdin")
}

/// Inline query text (positional).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .value_name("QUERY")
        .help("Query text, e.g. 'task where done = false'")
}

/// Query file (-f/--file).
pub fn query_file_arg() -> Arg {
    Arg::new("query_path")
        .short('f')
        .long("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("query_text")
        .help("Read the query from a file")
}

/// Grammar extensions as JSON (--extensions).
pub fn extensions_arg() -> Arg {
    Arg::new("extensions")
        .long("extensions")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON array of grammar extensions: [{\"name\", \"pattern\", \"trigger\"?}]")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .global(true)
        .help("Colorize output")
}

/// Log filter (--log).
pub fn log_arg() -> Arg {
    Arg::new("log")
        .long("log")
        .value_name("FILTER")
        .global(true)
        .help("Log filter for stderr, e.g. 'debug' or 'notemark_lib=trace' (default: RUST_LOG)")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// JSON tree output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .conflicts_with("spans")
        .help("Print the tree as JSON ({kind?, text?, span, children?})")
}
