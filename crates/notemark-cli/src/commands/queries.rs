use std::path::PathBuf;

use notemark_lib::parser::ast::Root;
use notemark_lib::{CompileError, Diagnostics, Grammar, Query, compile_query, parse};
use serde::Serialize;

use super::input::{display_path, fail, load_grammar, load_source};

pub struct QueriesArgs {
    pub source_path: PathBuf,
    pub extensions: Option<PathBuf>,
    pub color: bool,
}

/// One embedded query and where it sits in the note.
#[derive(Debug, Serialize)]
pub struct EmbeddedQuery {
    pub span: (u32, u32),
    pub query: Query,
}

pub fn run(args: QueriesArgs) {
    let grammar = load_grammar(args.extensions.as_deref()).unwrap_or_else(|e| fail(e));
    let source = load_source(&args.source_path).unwrap_or_else(|e| fail(e));

    match collect_queries(&grammar, &source) {
        Ok(queries) => match serde_json::to_string_pretty(&queries) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        },
        Err(QueriesError::Syntax(diagnostics)) => {
            let path = display_path(&args.source_path);
            eprint!(
                "{}",
                diagnostics
                    .printer()
                    .source(&source)
                    .path(&path)
                    .colored(args.color)
                    .render()
            );
            std::process::exit(1);
        }
        Err(QueriesError::Compile(e)) => fail(e),
    }
}

#[derive(Debug)]
pub enum QueriesError {
    Syntax(Diagnostics),
    Compile(CompileError),
}

/// Compiles every query in the note, in document order. Any syntax error in
/// any query fails the whole note.
pub fn collect_queries(grammar: &Grammar, source: &str) -> Result<Vec<EmbeddedQuery>, QueriesError> {
    let parse = parse(grammar, source);
    if parse.diagnostics().has_errors() {
        return Err(QueriesError::Syntax(parse.diagnostics().filtered()));
    }
    let Root::Document(document) = parse.root() else {
        return Ok(Vec::new());
    };
    document
        .queries()
        .map(|query| {
            let range = query.as_cst().text_range();
            Ok(EmbeddedQuery {
                span: (range.start().into(), range.end().into()),
                query: compile_query(query.as_cst()).map_err(QueriesError::Compile)?,
            })
        })
        .collect()
}
