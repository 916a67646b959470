//! Query clauses.
//!
//! ```text
//! query  = source clause*
//! clause = "where" expr
//!        | "order" "by" item ("," item)*      item = expr ("asc" | "desc")?
//!        | "limit" expr
//!        | "select" sel ("," sel)*            sel  = expr ("as" name)?
//!        | "render" (pageref | string) "all"?
//! ```
//!
//! `by`, `asc`, `desc`, `as` and `all` are contextual: they lex as identifiers
//! and are re-tagged here.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{CLAUSE_FIRST, EXPR_FIRST};
use crate::parser::lexer::offset;

impl Parser<'_> {
    /// One `Query` node covering every remaining visible token.
    pub(crate) fn parse_query_node(&mut self) {
        self.start_node(SyntaxKind::Query);

        if self.currently_is(SyntaxKind::Id) {
            self.parse_source();
        } else if !self.currently_is_one_of(CLAUSE_FIRST) && !self.eof() {
            self.error_and_bump(DiagnosticKind::ExpectedSource);
        } else {
            self.error(DiagnosticKind::ExpectedSource);
        }

        let mut seen_limit = false;
        while !self.eof() {
            match self.current() {
                SyntaxKind::KwWhere => self.parse_where_clause(),
                SyntaxKind::KwOrder => self.parse_order_clause(),
                SyntaxKind::KwLimit => {
                    if seen_limit {
                        self.error(DiagnosticKind::DuplicateLimit);
                    }
                    seen_limit = true;
                    self.parse_limit_clause();
                }
                SyntaxKind::KwSelect => self.parse_select_clause(),
                SyntaxKind::KwRender => self.parse_render_clause(),
                SyntaxKind::Error => break,
                _ => self.error_and_bump_msg(
                    DiagnosticKind::TrailingInput,
                    "expected `where`, `order by`, `limit`, `select` or `render`",
                ),
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// Source names may contain `-`, `/` and digits as long as nothing
    /// separates them: `my-pages/2024`.
    fn parse_source(&mut self) {
        self.assert_current(SyntaxKind::Id);
        let mut lookahead = 1;
        let mut end = self.nth_span(0).end();
        while let Some(token) = self.nth_token(lookahead)
            && matches!(
                token.kind,
                SyntaxKind::Id | SyntaxKind::Minus | SyntaxKind::Number | SyntaxKind::Slash
            )
            && token.span.start() == end
        {
            end = token.span.end();
            lookahead += 1;
        }
        self.token_until(SyntaxKind::Id, offset(end));
    }

    fn at_contextual(&mut self, word: &str) -> bool {
        self.currently_is(SyntaxKind::Id) && self.current_text() == word
    }

    fn eat_contextual(&mut self, word: &str, kind: SyntaxKind) -> bool {
        if self.at_contextual(word) {
            self.bump_as(kind);
            true
        } else {
            false
        }
    }

    fn parse_clause_expr(&mut self) {
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr();
        } else {
            self.error(DiagnosticKind::ExpectedExpression);
        }
    }

    fn parse_where_clause(&mut self) {
        self.start_node(SyntaxKind::WhereClause);
        self.bump(); // consume 'where'
        self.parse_clause_expr();
        self.finish_node();
    }

    fn parse_limit_clause(&mut self) {
        self.start_node(SyntaxKind::LimitClause);
        self.bump(); // consume 'limit'
        self.parse_clause_expr();
        self.finish_node();
    }

    fn parse_order_clause(&mut self) {
        self.start_node(SyntaxKind::OrderClause);
        self.bump(); // consume 'order'
        if !self.eat_contextual("by", SyntaxKind::KwBy) {
            self.error(DiagnosticKind::ExpectedBy);
        }
        loop {
            self.start_node(SyntaxKind::OrderItem);
            self.parse_clause_expr();
            if !self.eat_contextual("desc", SyntaxKind::KwDesc) {
                self.eat_contextual("asc", SyntaxKind::KwAsc);
            }
            self.finish_node();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_select_clause(&mut self) {
        self.start_node(SyntaxKind::SelectClause);
        self.bump(); // consume 'select'
        loop {
            self.start_node(SyntaxKind::SelectItem);
            self.parse_clause_expr();
            if self.eat_contextual("as", SyntaxKind::KwAs) {
                if self.currently_is(SyntaxKind::Id) {
                    self.start_node(SyntaxKind::Name);
                    self.bump();
                    self.finish_node();
                } else {
                    self.error(DiagnosticKind::ExpectedName);
                }
            }
            self.finish_node();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_render_clause(&mut self) {
        self.start_node(SyntaxKind::RenderClause);
        self.bump(); // consume 'render'
        match self.current() {
            SyntaxKind::PageRef | SyntaxKind::String => self.bump(),
            _ => self.error(DiagnosticKind::ExpectedPageRef),
        }
        self.eat_contextual("all", SyntaxKind::KwAll);
        self.finish_node();
    }
}
