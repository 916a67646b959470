use std::path::PathBuf;

use notemark_lib::parser::ast::Root;
use notemark_lib::tree::render_to_text;
use notemark_lib::{Grammar, compile_query, parse};
use tracing::info;

use super::input::{display_path, fail, load_grammar, load_source};

pub struct CheckArgs {
    pub source_path: PathBuf,
    pub extensions: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let grammar = load_grammar(args.extensions.as_deref()).unwrap_or_else(|e| fail(e));
    let source = load_source(&args.source_path).unwrap_or_else(|e| fail(e));
    let path = display_path(&args.source_path);

    let report = check(&grammar, &source);
    if report.is_ok() {
        // Silent on success (like cargo check)
        info!(path, queries = report.queries, "note is valid");
        return;
    }

    if !report.round_trip {
        eprintln!("error: {path}: rendering the tree does not reproduce the source");
    }
    if let Some(diagnostics) = &report.diagnostics {
        eprint!(
            "{}",
            diagnostics
                .printer()
                .source(&source)
                .path(&path)
                .colored(args.color)
                .render()
        );
    }
    for error in &report.compile_errors {
        eprintln!("error: {path}: {error}");
    }
    std::process::exit(1);
}

#[derive(Debug)]
pub struct CheckReport {
    pub round_trip: bool,
    pub queries: usize,
    pub diagnostics: Option<notemark_lib::Diagnostics>,
    pub compile_errors: Vec<notemark_lib::CompileError>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.round_trip && self.diagnostics.is_none() && self.compile_errors.is_empty()
    }
}

pub fn check(grammar: &Grammar, source: &str) -> CheckReport {
    let parse = parse(grammar, source);
    let round_trip = render_to_text(&parse.syntax()) == source;
    let diagnostics = parse
        .diagnostics()
        .has_errors()
        .then(|| parse.diagnostics().filtered());

    let mut queries = 0;
    let mut compile_errors = Vec::new();
    if diagnostics.is_none()
        && let Root::Document(document) = parse.root()
    {
        for query in document.queries() {
            queries += 1;
            if let Err(e) = compile_query(query.as_cst()) {
                compile_errors.push(e);
            }
        }
    }

    CheckReport {
        round_trip,
        queries,
        diagnostics,
        compile_errors,
    }
}
