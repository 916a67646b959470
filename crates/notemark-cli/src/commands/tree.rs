use std::path::PathBuf;

use notemark_lib::tree::{CstPrinter, to_tree_node};
use notemark_lib::{Grammar, parse};

use super::input::{fail, load_grammar, load_source};

pub struct TreeArgs {
    pub source_path: PathBuf,
    pub extensions: Option<PathBuf>,
    pub spans: bool,
    pub json: bool,
}

pub fn run(args: TreeArgs) {
    let grammar = load_grammar(args.extensions.as_deref()).unwrap_or_else(|e| fail(e));
    let source = load_source(&args.source_path).unwrap_or_else(|e| fail(e));
    let output = dump_tree(&grammar, &source, args.spans, args.json).unwrap_or_else(|e| fail(e));
    print!("{output}");
}

pub fn dump_tree(
    grammar: &Grammar,
    source: &str,
    spans: bool,
    json: bool,
) -> serde_json::Result<String> {
    let root = parse(grammar, source).syntax();
    if json {
        let node = to_tree_node(grammar, &root);
        return serde_json::to_string_pretty(&node).map(|out| out + "\n");
    }
    Ok(CstPrinter::new(&root)
        .grammar(grammar)
        .with_spans(spans)
        .dump())
}
