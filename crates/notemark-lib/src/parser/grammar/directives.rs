//! Block directives: `<!-- #name args -->` ... `<!-- /name -->`.
//!
//! The body between the markers is parsed as ordinary blocks. `#query`
//! arguments are parsed as an embedded query.

use tracing::debug;

use super::scan::{self, DirectiveMarker};
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    /// False when the directive has no matching close; nothing is emitted then.
    pub(super) fn parse_directive(&mut self, open: &DirectiveMarker) -> bool {
        let start = self.offset();
        let line = self.line();
        let name = open.name(line);

        let Some((close_start, close)) = self.find_directive_close(start + line.len(), name) else {
            debug!(name, "directive is never closed, reading it as text");
            return false;
        };
        if !self.enter_nesting() {
            debug!(name, "directive nested too deeply, reading it as text");
            return false;
        }

        self.start_node(SyntaxKind::Directive);
        self.parse_directive_marker(SyntaxKind::DirectiveStart, start, open, name == "query");
        self.with_limit(close_start, |p| p.parse_blocks());
        self.parse_directive_marker(SyntaxKind::DirectiveEnd, close_start, &close, false);
        self.finish_node();

        self.exit_nesting();
        true
    }

    /// Same-name opens between here and the close must be closed first.
    fn find_directive_close(&self, line_end: usize, name: &str) -> Option<(usize, DirectiveMarker)> {
        let mut depth = 0usize;
        let mut cursor = line_end;
        while let Some((start, line)) = self.next_line(cursor) {
            if let Some(marker) = scan::directive_marker(line)
                && marker.name(line) == name
            {
                if !marker.close {
                    depth += 1;
                } else if depth == 0 {
                    return Some((start, marker));
                } else {
                    depth -= 1;
                }
            }
            cursor = start + line.len();
        }
        None
    }

    fn parse_directive_marker(
        &mut self,
        kind: SyntaxKind,
        start: usize,
        marker: &DirectiveMarker,
        query_args: bool,
    ) {
        self.start_node(kind);
        self.token_len(SyntaxKind::DirectiveMark, "<!--".len());
        self.text_until(start + marker.name.start);
        self.token_until(SyntaxKind::DirectiveName, start + marker.name.end);
        if !marker.args.is_empty() {
            self.text_until(start + marker.args.start);
            if query_args {
                self.embedded_query(start + marker.args.end);
            } else {
                self.token_until(SyntaxKind::DirectiveArgs, start + marker.args.end);
            }
        }
        self.text_until(start + marker.end_mark);
        self.token_len(SyntaxKind::DirectiveMark, "-->".len());
        let line_end = self.line_end(self.offset());
        self.text_until(line_end);
        self.finish_node();
    }
}
