//! Inline constructs.
//!
//! Every `parse_*` here returns whether it recognized its construct. A `false`
//! return means nothing was emitted and the caller keeps the token as text.

use tracing::trace;

use super::scan;
use crate::parser::Parser;
use crate::parser::cst::{SyntaxKind, extension_kind};

impl Parser<'_> {
    /// Inline content until the current limit.
    pub(super) fn parse_inlines(&mut self) {
        while !self.eof() {
            if self.grammar.has_extensions() && self.parse_extension() {
                continue;
            }
            let recognized = match self.nth_raw(0) {
                SyntaxKind::BracketOpen => {
                    self.parse_wiki_link() || self.parse_attribute() || self.parse_link()
                }
                SyntaxKind::Bang => self.parse_image(),
                SyntaxKind::BraceOpen => self.parse_command_link(),
                SyntaxKind::Backticks => self.parse_inline_code(),
                SyntaxKind::Stars
                | SyntaxKind::Underscores
                | SyntaxKind::Tildes
                | SyntaxKind::Equalses => self.parse_emphasis(),
                SyntaxKind::Hashes => self.parse_hashtag(),
                SyntaxKind::CommentOpen => self.parse_comment(),
                SyntaxKind::NakedUrl => self.parse_naked_url(),
                SyntaxKind::Escape | SyntaxKind::Newline => {
                    self.bump();
                    true
                }
                _ => false,
            };
            if !recognized {
                self.bump_text();
            }
        }
    }

    /// Registered extensions are tried before any built-in construct.
    fn parse_extension(&mut self) -> bool {
        let at = self.offset();
        let Some((index, end)) = self.grammar.match_extension(self.source, at, self.end()) else {
            return false;
        };
        trace!(extension = ?self.grammar.extension_name(index), at, end, "extension matched");
        self.start_node_raw(extension_kind(index));
        self.token_until(SyntaxKind::Text, end);
        self.finish_node();
        true
    }

    /// `*em*`, `_em_`, `**strong**`, `__strong__`, `~~struck~~`, `==marked==`
    fn parse_emphasis(&mut self) -> bool {
        let run = self.nth_text(0);
        let kind = match run {
            "*" | "_" => SyntaxKind::Emphasis,
            "**" | "__" => SyntaxKind::Strong,
            "~~" => SyntaxKind::Strikethrough,
            "==" => SyntaxKind::Highlight,
            _ => return false,
        };
        let at = self.offset();
        let content_start = at + run.len();
        let rest = &self.source[content_start..self.end()];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return false;
        }
        let intraword = run.starts_with('_');
        if intraword && self.source[..at].chars().next_back().is_some_and(char::is_alphanumeric) {
            return false;
        }
        let Some(close) = scan::emphasis_close(rest, run) else {
            return false;
        };
        let close_at = content_start + close;
        if intraword
            && self.source[close_at + run.len()..]
                .chars()
                .next()
                .is_some_and(char::is_alphanumeric)
        {
            return false;
        }
        if !self.enter_nesting() {
            return false;
        }

        self.start_node(kind);
        self.token_len(SyntaxKind::EmphasisMark, run.len());
        self.parse_inline_until(close_at);
        self.token_len(SyntaxKind::EmphasisMark, run.len());
        self.finish_node();
        self.exit_nesting();
        true
    }

    /// A backtick run closed by a run of the same length.
    fn parse_inline_code(&mut self) -> bool {
        let ticks = self.nth_text(0).len();
        let content_start = self.offset() + ticks;
        let Some(close) = scan::backtick_close(&self.source[content_start..self.end()], ticks) else {
            return false;
        };

        self.start_node(SyntaxKind::InlineCode);
        self.token_len(SyntaxKind::CodeMark, ticks);
        if close > 0 {
            self.token_len(SyntaxKind::CodeText, close);
        }
        self.token_len(SyntaxKind::CodeMark, ticks);
        self.finish_node();
        true
    }

    fn parse_hashtag(&mut self) -> bool {
        if self.nth_text(0) != "#" {
            return false;
        }
        let at = self.offset();
        if self.source[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '#')
        {
            return false;
        }
        let Some(len) = scan::hashtag_len(self.rest()) else {
            return false;
        };
        self.token_len(SyntaxKind::Hashtag, len);
        true
    }

    /// `<!-- text -->` within a line or paragraph.
    fn parse_comment(&mut self) -> bool {
        const OPEN: &str = "<!--";
        const CLOSE: &str = "-->";
        let Some(len) = self.rest()[OPEN.len()..].find(CLOSE) else {
            return false;
        };

        self.start_node(SyntaxKind::Comment);
        self.token_len(SyntaxKind::CommentMark, OPEN.len());
        if len > 0 {
            self.token_len(SyntaxKind::CommentText, len);
        }
        self.token_len(SyntaxKind::CommentMark, CLOSE.len());
        self.finish_node();
        true
    }

    fn parse_naked_url(&mut self) -> bool {
        let len = scan::trim_url(self.nth_text(0));
        self.token_len(SyntaxKind::NakedUrl, len);
        true
    }
}
