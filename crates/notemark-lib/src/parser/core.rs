//! Parser state machine and low-level operations.
//!
//! One `Parser` drives both grammars. In document mode, plain tokens are
//! accumulated into a pending `Text` run that is flushed whenever structure is
//! emitted; constructs compute their extent as byte offsets and emit
//! composite tokens with [`Parser::token_until`]. In query mode, whitespace is
//! trivia: buffered and attached as leading trivia to the next node or token.
//!
//! Tokens are coarse, so a construct may end inside one. [`Parser::split_at`]
//! re-lexes the straddling token on both sides of the boundary.

use std::cell::Cell;
use std::ops::Range;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::cst::{SyntaxKind, TokenSet};
use super::dialect::Grammar;
use super::lexer::{Token, lex_document, lex_query, offset, token_text};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

const DEBUG_FUEL: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Mode {
    Document,
    Query,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub span: TextRange,
}

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) grammar: &'src Grammar,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) mode: Mode,
    /// Tokens starting at or past this offset are invisible.
    pub(super) limit: TextSize,
    pending_text: Option<TextRange>,
    pub(super) trivia_buffer: Vec<Token>,
    pub(super) builder: GreenNodeBuilder<'static>,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    pub(super) last_diagnostic_pos: Option<TextSize>,
    pub(super) delimiter_stack: Vec<OpenDelimiter>,
    pub(super) debug_fuel: Cell<u32>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, grammar: &'src Grammar, mode: Mode) -> Self {
        let tokens = match mode {
            Mode::Document => lex_document(source, 0..source.len()),
            Mode::Query => lex_query(source, 0..source.len()),
        };
        Self {
            source,
            grammar,
            tokens,
            pos: 0,
            mode,
            limit: TextSize::from(source.len() as u32),
            pending_text: None,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            debug_fuel: Cell::new(DEBUG_FUEL),
        }
    }

    pub fn document(source: &'src str, grammar: &'src Grammar) -> Self {
        Self::new(source, grammar, Mode::Document)
    }

    pub fn query(source: &'src str, grammar: &'src Grammar) -> Self {
        Self::new(source, grammar, Mode::Query)
    }

    pub(super) fn finish(mut self) -> (GreenNode, Diagnostics) {
        self.flush_text();
        self.drain_trivia();
        (self.builder.finish(), self.diagnostics)
    }

    fn reset_debug_fuel(&self) {
        self.debug_fuel.set(DEBUG_FUEL);
    }

    fn lex(&self, range: Range<usize>) -> Vec<Token> {
        match self.mode {
            Mode::Document => lex_document(self.source, range),
            Mode::Query => lex_query(self.source, range),
        }
    }

    // --- Lookahead ---

    pub(super) fn current(&mut self) -> SyntaxKind {
        if self.mode == Mode::Query {
            self.skip_trivia_to_buffer();
        }
        self.nth_raw(0)
    }

    /// Raw lookahead; `Error` past the end or the current limit.
    pub(super) fn nth_raw(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.nth_token(lookahead).map_or(SyntaxKind::Error, |t| t.kind)
    }

    /// Lookahead without spending progress fuel.
    pub(super) fn nth_token(&self, lookahead: usize) -> Option<&Token> {
        self.tokens
            .get(self.pos + lookahead)
            .filter(|t| t.span.start() < self.limit)
    }

    pub(super) fn nth_text(&self, lookahead: usize) -> &'src str {
        self.nth_token(lookahead)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn nth_span(&self, lookahead: usize) -> TextRange {
        self.nth_token(lookahead)
            .map_or_else(|| TextRange::empty(self.end_size()), |t| t.span)
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        if self.mode == Mode::Query {
            self.skip_trivia_to_buffer();
        }
        self.nth_span(0)
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        let span = self.current_span();
        &self.source[Range::<usize>::from(span)]
    }

    /// Offset the parser can see up to: the tighter of limit and source end.
    pub(super) fn end_size(&self) -> TextSize {
        self.limit.min(TextSize::from(self.source.len() as u32))
    }

    pub(super) fn end(&self) -> usize {
        offset(self.end_size())
    }

    /// Byte offset of the next unconsumed token, trivia included.
    pub(super) fn offset(&self) -> usize {
        offset(self.nth_span(0).start())
    }

    pub(super) fn eof(&self) -> bool {
        self.nth_token(0).is_none()
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.nth_raw(0) == kind
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// LL(k) lookahead past trivia.
    fn peek_nth(&mut self, n: usize) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        let mut count = 0;
        let mut lookahead = 0;
        while let Some(token) = self.nth_token(lookahead) {
            if !token.kind.is_trivia() {
                if count == n {
                    return token.kind;
                }
                count += 1;
            }
            lookahead += 1;
        }
        SyntaxKind::Error
    }

    pub(super) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.peek_nth(1) == kind
    }

    /// The visible, unconsumed source.
    pub(super) fn rest(&self) -> &'src str {
        &self.source[self.offset().min(self.end())..self.end()]
    }

    /// Offset just before the next `\n` at or after `from`, capped at the limit.
    pub(super) fn line_end(&self, from: usize) -> usize {
        let end = self.end();
        self.source[from.min(end)..end]
            .find('\n')
            .map_or(end, |i| from + i)
    }

    /// The rest of the current line, without its `\n`.
    pub(super) fn line(&self) -> &'src str {
        let at = self.offset();
        &self.source[at..self.line_end(at)]
    }

    /// Start and text of the line after the one ending at `line_end`.
    pub(super) fn next_line(&self, line_end: usize) -> Option<(usize, &'src str)> {
        if line_end >= self.end() {
            return None;
        }
        let start = line_end + 1;
        Some((start, &self.source[start..self.line_end(start)]))
    }

    // --- Token surgery ---

    /// Makes `at` a token boundary, re-lexing the token that straddles it.
    pub(super) fn split_at(&mut self, at: usize) {
        let at_size = TextSize::from(at as u32);
        let idx = self.pos + self.tokens[self.pos..].partition_point(|t| t.span.end() <= at_size);
        let Some(token) = self.tokens.get(idx).copied() else {
            return;
        };
        if token.span.start() >= at_size {
            return;
        }
        let (start, end) = (offset(token.span.start()), offset(token.span.end()));
        let mut fresh = self.lex(start..at);
        fresh.extend(self.lex(at..end));
        self.tokens.splice(idx..idx + 1, fresh);
    }

    /// Skips every token ending at or before `end` without emitting it.
    fn advance_to(&mut self, end: usize) {
        self.split_at(end);
        let end = TextSize::from(end as u32);
        while self.tokens.get(self.pos).is_some_and(|t| t.span.end() <= end) {
            self.pos += 1;
        }
        self.reset_debug_fuel();
    }

    /// Runs `f` with everything from `end` onwards hidden.
    pub(super) fn with_limit<T>(&mut self, end: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        self.split_at(end);
        let saved = self.limit;
        self.limit = self.limit.min(TextSize::from(end as u32));
        let result = f(self);
        self.limit = saved;
        result
    }

    // --- Document-mode emission ---

    fn push_text(&mut self, range: TextRange) {
        self.pending_text = Some(match self.pending_text {
            Some(pending) => pending.cover(range),
            None => range,
        });
    }

    pub(super) fn flush_text(&mut self) {
        if let Some(range) = self.pending_text.take() {
            let text = &self.source[Range::<usize>::from(range)];
            self.builder.token(SyntaxKind::Text.into(), text);
        }
    }

    /// Appends the current token to the pending text run.
    pub(super) fn bump_text(&mut self) {
        assert!(!self.eof(), "bump_text called at EOF");
        let span = self.tokens[self.pos].span;
        self.push_text(span);
        self.pos += 1;
        self.reset_debug_fuel();
    }

    /// Appends everything up to `end` to the pending text run.
    pub(super) fn text_until(&mut self, end: usize) {
        let start = self.offset();
        if end <= start {
            return;
        }
        self.push_text(TextRange::new(
            TextSize::from(start as u32),
            TextSize::from(end as u32),
        ));
        self.advance_to(end);
    }

    /// Emits `source[offset..end]` as one token of `kind`.
    pub(super) fn token_until(&mut self, kind: SyntaxKind, end: usize) {
        let start = self.offset();
        assert!(end > start, "token_until: empty {kind:?} token at {start}");
        self.flush_text();
        self.drain_trivia();
        self.builder.token(kind.into(), &self.source[start..end]);
        self.advance_to(end);
    }

    /// Emits `len` bytes from the current offset as one token of `kind`.
    pub(super) fn token_len(&mut self, kind: SyntaxKind, len: usize) {
        let end = self.offset() + len;
        self.token_until(kind, end);
    }

    /// Emits the current token re-tagged as `kind`.
    pub(super) fn bump_as(&mut self, kind: SyntaxKind) {
        assert!(!self.eof(), "bump_as called at EOF");
        self.reset_debug_fuel();
        self.flush_text();
        self.drain_trivia();
        let token = self.tokens[self.pos];
        self.builder.token(kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    /// Parses `source[offset..end]` as a `Query` node in place.
    pub(super) fn embedded_query(&mut self, end: usize) {
        self.flush_text();
        let start = self.offset();
        let tokens = lex_query(self.source, start..end);
        let saved_tokens = std::mem::replace(&mut self.tokens, tokens);
        let saved_pos = std::mem::replace(&mut self.pos, 0);
        let saved_limit = std::mem::replace(&mut self.limit, TextSize::from(end as u32));
        let saved_mode = std::mem::replace(&mut self.mode, Mode::Query);
        let saved_depth = std::mem::replace(&mut self.depth, 0);

        self.parse_query_node();

        self.tokens = saved_tokens;
        self.pos = saved_pos;
        self.limit = saved_limit;
        self.mode = saved_mode;
        self.depth = saved_depth;
        self.delimiter_stack.clear();
        self.advance_to(end);
    }

    // --- Shared emission ---

    pub(super) fn skip_trivia_to_buffer(&mut self) {
        while let Some(token) = self.nth_token(0).copied() {
            if !token.kind.is_trivia() {
                break;
            }
            self.trivia_buffer.push(token);
            self.pos += 1;
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        for token in self.trivia_buffer.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
        }
    }

    pub(super) fn eat_trivia(&mut self) {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.start_node_raw(kind.into());
    }

    pub(super) fn start_node_raw(&mut self, kind: rowan::SyntaxKind) {
        self.flush_text();
        self.drain_trivia();
        self.builder.start_node(kind);
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.flush_text();
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_text();
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.flush_text();
        self.drain_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(token.kind.into(), text);
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    // --- Query-mode diagnostics ---

    fn current_suppression_span(&mut self) -> TextRange {
        let end = self.end_size();
        self.delimiter_stack
            .last()
            .map(|d| TextRange::new(d.span.start(), end))
            .unwrap_or_else(|| self.current_span())
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    fn bump_as_error(&mut self) {
        if !self.eof() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    fn get_error_ranges(&mut self) -> Option<(TextRange, TextRange)> {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return None;
        }
        let suppression = self.current_suppression_span();
        Some((range, suppression))
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        self.diagnostics
            .report(kind, range)
            .suppression_range(suppression)
            .emit();
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let Some((range, suppression)) = self.get_error_ranges() else {
            return;
        };
        self.diagnostics
            .report(kind, range)
            .message(message)
            .suppression_range(suppression)
            .emit();
    }

    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        self.bump_as_error();
    }

    pub(super) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        self.bump_as_error();
    }

    /// Wraps tokens up to the next recovery point in an `Error` node.
    pub(super) fn error_recover(
        &mut self,
        kind: DiagnosticKind,
        message: &str,
        recovery: TokenSet,
    ) {
        if self.currently_is_one_of(recovery) || self.eof() {
            self.error_msg(kind, message);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error_msg(kind, message);
        while !self.currently_is_one_of(recovery) && !self.eof() {
            self.bump();
        }
        self.finish_node();
    }

    pub(super) fn push_delimiter(&mut self) {
        let span = self.current_span();
        self.delimiter_stack.push(OpenDelimiter { span });
    }

    pub(super) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    pub(super) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        related_msg: impl Into<String>,
        open_range: TextRange,
    ) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        let full_range = TextRange::new(open_range.start(), current.end());
        self.diagnostics
            .report(kind, full_range)
            .related_to(related_msg, open_range)
            .emit();
    }

    // --- Nesting ---

    /// False once the grammar's nesting limit is reached; callers degrade to text.
    pub(super) fn enter_nesting(&mut self) -> bool {
        if self.depth >= self.grammar.max_depth() {
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }
}
