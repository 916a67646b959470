use std::path::PathBuf;

use notemark_lib::{Error, compile_query_source};

use super::input::{display_path, fail, load_source};

pub struct QueryArgs {
    pub query_text: Option<String>,
    pub query_path: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: QueryArgs) {
    let (source, path) = match (args.query_text, &args.query_path) {
        (Some(text), None) => (text, "<query>".to_string()),
        (None, Some(path)) => (
            load_source(path).unwrap_or_else(|e| fail(e)),
            display_path(path),
        ),
        (Some(_), Some(_)) => fail("cannot use both QUERY and -f/--file"),
        (None, None) => fail("query required (positional or -f/--file)"),
    };

    match compile_query_source(&source) {
        Ok(query) => match query.to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        },
        Err(Error::QueryParseError(diagnostics)) => {
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
        Err(e) => fail(e),
    }
}
