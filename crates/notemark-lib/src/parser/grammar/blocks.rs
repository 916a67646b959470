//! Block structure of a document.
//!
//! Blocks are line based. Each production decides its extent by scanning the
//! source lines ahead of the cursor, then emits. The `\n` that ends a block is
//! left for the caller; `\n`s strictly inside a block belong to it.

use tracing::debug;

use super::scan::{self, ListMarker};
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

const FRONT_MATTER_FENCE: &str = "---";

impl Parser<'_> {
    pub(crate) fn parse_document_root(&mut self) {
        self.start_node(SyntaxKind::Document);
        self.parse_front_matter();
        self.parse_blocks();
        self.finish_node();
    }

    /// Blocks until the current limit.
    pub(super) fn parse_blocks(&mut self) {
        while !self.eof() {
            if self.at(SyntaxKind::Newline) {
                self.bump();
                continue;
            }
            self.parse_block();
        }
    }

    fn parse_block(&mut self) {
        let start = self.offset();
        let line = self.line();

        if scan::is_blank(line) {
            self.text_until(start + line.len());
            return;
        }
        if let Some(marker) = scan::directive_marker(line)
            && !marker.close
            && self.parse_directive(&marker)
        {
            return;
        }
        if let Some((indent, ticks)) = scan::fence_open(line) {
            self.parse_code_block(indent, ticks);
            return;
        }
        if let Some(level) = scan::heading_level(line) {
            self.parse_heading(level);
            return;
        }
        if let Some(len) = scan::rule_len(line) {
            self.parse_rule(len);
            return;
        }
        if scan::quote_marker(line).is_some() {
            self.parse_blockquote();
            return;
        }
        if let Some(marker) = scan::list_marker(line)
            && self.enter_nesting()
        {
            self.parse_list_block(marker);
            self.exit_nesting();
            return;
        }
        if self.at_table_start(line) {
            self.parse_table();
            return;
        }
        self.parse_paragraph();
    }

    /// Inline content up to `end`.
    pub(super) fn parse_inline_until(&mut self, end: usize) {
        if end > self.offset() {
            self.with_limit(end, |p| p.parse_inlines());
        }
    }

    /// `---` on the very first line, closed by another `---` line.
    fn parse_front_matter(&mut self) {
        let open = self.line();
        if open.trim_end_matches('\r') != FRONT_MATTER_FENCE {
            return;
        }

        let mut cursor = open.len();
        let mut close = None;
        while let Some((start, line)) = self.next_line(cursor) {
            if line.trim_end_matches('\r') == FRONT_MATTER_FENCE {
                close = Some((start, line.len()));
                break;
            }
            cursor = start + line.len();
        }
        let Some((close_start, close_len)) = close else {
            debug!("front matter is never closed, reading it as content");
            return;
        };

        self.start_node(SyntaxKind::FrontMatter);
        self.token_len(SyntaxKind::FrontMatterMarker, FRONT_MATTER_FENCE.len());
        self.text_until(open.len());
        self.bump(); // '\n'
        if close_start > self.offset() {
            self.token_until(SyntaxKind::FrontMatterCode, close_start);
        }
        self.token_len(SyntaxKind::FrontMatterMarker, FRONT_MATTER_FENCE.len());
        self.text_until(close_start + close_len);
        self.finish_node();
    }

    fn parse_heading(&mut self, level: usize) {
        let end = self.offset() + self.line().len();
        self.start_node(SyntaxKind::Heading);
        self.token_len(SyntaxKind::HeadingMark, level);
        self.parse_inline_until(end);
        self.finish_node();
    }

    fn parse_rule(&mut self, len: usize) {
        let end = self.offset() + self.line().len();
        self.start_node(SyntaxKind::HorizontalRule);
        self.token_len(SyntaxKind::HorizontalRuleMark, len);
        self.text_until(end);
        self.finish_node();
    }

    /// Fenced code. An unclosed fence runs to the end of the visible input.
    /// A `query` fence holds a parsed `Query` instead of raw code text.
    fn parse_code_block(&mut self, indent: usize, ticks: usize) {
        let start = self.offset();
        let open = self.line();
        let info_raw = &open[indent + ticks..];
        let info = info_raw.trim();
        let info_start = start + indent + ticks + (info_raw.len() - info_raw.trim_start().len());

        let mut cursor = start + open.len();
        let mut close = None;
        while let Some((line_start, line)) = self.next_line(cursor) {
            if let Some((close_indent, close_ticks)) = scan::fence_close(line, ticks) {
                close = Some((line_start, close_indent, close_ticks, line.len()));
                break;
            }
            cursor = line_start + line.len();
        }
        let body_end = close.map_or(self.end(), |(line_start, ..)| line_start);

        self.start_node(SyntaxKind::CodeBlock);
        self.text_until(start + indent);
        self.token_len(SyntaxKind::CodeMark, ticks);
        if !info.is_empty() {
            self.text_until(info_start);
            self.token_until(SyntaxKind::CodeInfo, info_start + info.len());
        }
        self.text_until(start + open.len());
        if self.at(SyntaxKind::Newline) {
            self.bump();
        }

        let body_start = self.offset();
        if body_end > body_start {
            if info == "query" && !self.source[body_start..body_end].trim().is_empty() {
                self.embedded_query(body_end);
            } else {
                self.token_until(SyntaxKind::CodeText, body_end);
            }
        }

        if let Some((line_start, close_indent, close_ticks, line_len)) = close {
            self.text_until(line_start + close_indent);
            self.token_len(SyntaxKind::CodeMark, close_ticks);
            self.text_until(line_start + line_len);
        }
        self.finish_node();
    }

    /// Consecutive `>` lines.
    fn parse_blockquote(&mut self) {
        self.start_node(SyntaxKind::Blockquote);
        loop {
            let start = self.offset();
            let line = self.line();
            let Some(marker) = scan::quote_marker(line) else {
                break;
            };
            self.text_until(start + marker);
            self.token_len(SyntaxKind::QuoteMark, 1);
            self.parse_inline_until(start + line.len());

            match self.next_line(start + line.len()) {
                Some((_, next)) if scan::quote_marker(next).is_some() => self.bump(),
                _ => break,
            }
        }
        self.finish_node();
    }

    /// Sibling items sharing the first item's indentation and list type.
    fn parse_list_block(&mut self, first: ListMarker) {
        let kind = if first.ordered {
            SyntaxKind::OrderedList
        } else {
            SyntaxKind::BulletList
        };
        self.start_node(kind);
        loop {
            let start = self.offset();
            let Some(marker) = scan::list_marker(self.line()) else {
                break;
            };
            let item_end = self.list_item_end(start, marker.width);
            self.parse_list_item(start, marker, item_end);

            match self.next_line(item_end).and_then(|(_, next)| {
                scan::rule_len(next)
                    .is_none()
                    .then(|| scan::list_marker(next))
                    .flatten()
            }) {
                Some(next) if next.width == first.width && next.ordered == first.ordered => {
                    self.bump(); // '\n'
                }
                _ => break,
            }
        }
        self.finish_node();
    }

    /// An item spans its marker line plus following lines indented past the marker.
    fn list_item_end(&self, start: usize, width: usize) -> usize {
        let mut cursor = self.line_end(start);
        while let Some((line_start, line)) = self.next_line(cursor) {
            if scan::is_blank(line) || scan::indent_width(line) <= width {
                break;
            }
            cursor = line_start + line.len();
        }
        cursor
    }

    fn parse_list_item(&mut self, start: usize, marker: ListMarker, end: usize) {
        self.start_node(SyntaxKind::ListItem);
        self.with_limit(end, |p| {
            p.text_until(start + marker.start);
            p.token_until(SyntaxKind::ListMark, start + marker.end);
            let after = p.offset();
            p.text_until(after + scan::indent(p.line()));

            if let Some(len) = scan::task_state(p.rest()) {
                p.start_node(SyntaxKind::Task);
                p.parse_task_state(len);
                p.parse_item_body();
                p.finish_node();
            } else {
                p.parse_item_body();
            }
        });
        self.finish_node();
    }

    /// `[` state `]`
    fn parse_task_state(&mut self, len: usize) {
        self.start_node(SyntaxKind::TaskState);
        self.token_len(SyntaxKind::TaskMark, 1);
        self.token_len(SyntaxKind::TaskMarker, len);
        self.token_len(SyntaxKind::TaskMark, 1);
        self.finish_node();
    }

    /// First-line text, then continuation lines: nested lists or more text.
    fn parse_item_body(&mut self) {
        let first_end = self.line_end(self.offset());
        self.parse_inline_until(first_end);

        while self.at(SyntaxKind::Newline) {
            self.bump();
            let start = self.offset();
            let line = self.line();
            match scan::list_marker(line) {
                Some(marker) if scan::rule_len(line).is_none() && self.enter_nesting() => {
                    self.parse_list_block(marker);
                    self.exit_nesting();
                }
                _ => self.parse_inline_until(start + line.len()),
            }
        }
    }

    /// A row containing `|` directly followed by a delimiter row.
    fn at_table_start(&self, line: &str) -> bool {
        line.contains('|')
            && self
                .next_line(self.offset() + line.len())
                .is_some_and(|(_, next)| scan::is_table_delimiter(next))
    }

    fn parse_table(&mut self) {
        self.start_node(SyntaxKind::Table);
        self.parse_table_row(SyntaxKind::TableHeader);
        self.bump(); // '\n'
        let delimiter_end = self.offset() + self.line().len();
        self.token_until(SyntaxKind::TableDelimiterRow, delimiter_end);

        while self.at(SyntaxKind::Newline) {
            match self.next_line(self.offset()) {
                Some((_, next)) if next.contains('|') && !scan::is_blank(next) => {}
                _ => break,
            }
            self.bump();
            self.parse_table_row(SyntaxKind::TableRow);
        }
        self.finish_node();
    }

    fn parse_table_row(&mut self, kind: SyntaxKind) {
        let start = self.offset();
        let line = self.line();
        let pipes = scan::cell_pipes(line);

        self.start_node(kind);
        let mut cell_start = 0;
        for (i, &pipe) in pipes.iter().enumerate() {
            self.parse_table_cell(&line[cell_start..pipe], start + pipe, i == 0);
            self.token_len(SyntaxKind::TablePipe, 1);
            cell_start = pipe + 1;
        }
        self.parse_table_cell(&line[cell_start..], start + line.len(), true);
        self.finish_node();
    }

    /// Blank padding outside the outer pipes stays plain text.
    fn parse_table_cell(&mut self, cell: &str, end: usize, outer: bool) {
        if cell.is_empty() {
            return;
        }
        if outer && scan::is_blank(cell) {
            self.text_until(end);
            return;
        }
        self.start_node(SyntaxKind::TableCell);
        self.parse_inline_until(end);
        self.finish_node();
    }

    /// Lines up to a blank line or the start of another block.
    fn parse_paragraph(&mut self) {
        let mut end = self.line_end(self.offset());
        while let Some((start, next)) = self.next_line(end) {
            if interrupts_paragraph(next) {
                break;
            }
            end = start + next.len();
        }

        self.start_node(SyntaxKind::Paragraph);
        self.parse_inline_until(end);
        self.finish_node();
    }
}

fn interrupts_paragraph(line: &str) -> bool {
    scan::is_blank(line)
        || scan::heading_level(line).is_some()
        || scan::fence_open(line).is_some()
        || scan::rule_len(line).is_some()
        || scan::quote_marker(line).is_some()
        || scan::list_marker(line).is_some()
        || scan::directive_marker(line).is_some()
}
