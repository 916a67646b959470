//! Query expressions, parsed by precedence climbing.
//!
//! Binary operators are left-associative. Every infix application wraps the
//! already-built left operand through a checkpoint, so the tree carries
//! labeled `BinaryExpr` / `LogicalExpr` nodes with exactly two operands.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{EXPR_FIRST, LIST_RECOVERY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    None,
    LogicOr,
    LogicAnd,
    Comparison,
    Term,
    Factor,
}

const fn infix_precedence(kind: SyntaxKind) -> Precedence {
    use SyntaxKind::*;
    match kind {
        KwOr => Precedence::LogicOr,
        KwAnd => Precedence::LogicAnd,
        Eq | NotEq | Lt | LtEq | Gt | GtEq | Match | NotMatch | KwIn => Precedence::Comparison,
        Plus | Minus => Precedence::Term,
        Star | Slash | Percent => Precedence::Factor,
        _ => Precedence::None,
    }
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) {
        self.parse_expr_prec(Precedence::None);
    }

    fn parse_expr_prec(&mut self, precedence: Precedence) {
        if !self.enter_nesting() {
            self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expression nested too deeply");
            return;
        }

        self.skip_trivia_to_buffer();
        let checkpoint = self.checkpoint();
        self.parse_postfix_expr();

        loop {
            let op = self.current();
            let op_precedence = infix_precedence(op);
            if precedence >= op_precedence {
                break;
            }
            let node = match op {
                SyntaxKind::KwAnd | SyntaxKind::KwOr => SyntaxKind::LogicalExpr,
                _ => SyntaxKind::BinaryExpr,
            };
            self.start_node_at(checkpoint, node);
            self.bump(); // consume operator
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_expr_prec(op_precedence);
            } else {
                self.error(DiagnosticKind::ExpectedExpression);
            }
            self.finish_node();
        }

        self.exit_nesting();
    }

    /// Primary followed by any number of `.field` accesses.
    fn parse_postfix_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();

        while self.currently_is(SyntaxKind::Dot) {
            self.start_node_at(checkpoint, SyntaxKind::AttrExpr);
            self.bump(); // consume '.'
            if self.currently_is(SyntaxKind::Id) {
                self.bump();
            } else {
                self.error(DiagnosticKind::ExpectedName);
            }
            self.finish_node();
        }
    }

    fn parse_primary(&mut self) {
        match self.current() {
            SyntaxKind::Id => {
                if self.next_is(SyntaxKind::ParenOpen) {
                    self.parse_call();
                } else {
                    self.start_node(SyntaxKind::Name);
                    self.bump();
                    self.finish_node();
                }
            }
            SyntaxKind::String | SyntaxKind::PageRef => self.parse_leaf(SyntaxKind::StringExpr),
            SyntaxKind::Number => self.parse_leaf(SyntaxKind::NumberExpr),
            SyntaxKind::Minus => self.parse_negative_number(),
            SyntaxKind::KwTrue | SyntaxKind::KwFalse => self.parse_leaf(SyntaxKind::BoolExpr),
            SyntaxKind::KwNull => self.parse_leaf(SyntaxKind::NullExpr),
            SyntaxKind::Slash => self.parse_regex(),
            SyntaxKind::BracketOpen => self.parse_list(),
            SyntaxKind::ParenOpen => self.parse_paren(),
            _ => self.error_and_bump(DiagnosticKind::ExpectedExpression),
        }
    }

    fn parse_leaf(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    fn parse_negative_number(&mut self) {
        self.start_node(SyntaxKind::NumberExpr);
        self.bump(); // consume '-'
        if !self.eat_token(SyntaxKind::Number) {
            self.error_msg(DiagnosticKind::ExpectedExpression, "`-` must be followed by a number");
        }
        self.finish_node();
    }

    /// `/pattern/`. The lexer knows nothing about regexes, so the literal is
    /// found by scanning for the next unescaped `/` on the same line.
    fn parse_regex(&mut self) {
        let start = self.offset();
        let line_end = self.line_end(start);
        let Some(close) = find_regex_end(&self.source[start + 1..line_end]) else {
            self.error_and_bump(DiagnosticKind::UnterminatedRegex);
            return;
        };
        self.start_node(SyntaxKind::RegexExpr);
        self.token_until(SyntaxKind::RegexLit, start + 1 + close + 1);
        self.finish_node();
    }

    fn parse_call(&mut self) {
        self.assert_current(SyntaxKind::Id);
        self.start_node(SyntaxKind::CallExpr);
        self.bump(); // consume name
        self.start_node(SyntaxKind::ArgList);
        self.parse_delimited(SyntaxKind::ParenClose, DiagnosticKind::UnclosedParen);
        self.finish_node();
        self.finish_node();
    }

    fn parse_list(&mut self) {
        self.start_node(SyntaxKind::ListExpr);
        self.parse_delimited(SyntaxKind::BracketClose, DiagnosticKind::UnclosedBracket);
        self.finish_node();
    }

    /// `open (expr ("," expr)*)? close`, current token being `open`.
    fn parse_delimited(&mut self, close: SyntaxKind, unclosed: DiagnosticKind) {
        let open_span = self.current_span();
        self.push_delimiter();
        self.bump(); // consume opening delimiter

        while !self.currently_is(close) && !self.eof() {
            if self.currently_is_one_of(EXPR_FIRST) {
                self.parse_expr();
            } else {
                self.error_recover(
                    DiagnosticKind::ExpectedExpression,
                    "expected a list element",
                    LIST_RECOVERY,
                );
                if !self.currently_is(SyntaxKind::Comma) {
                    break;
                }
            }
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.pop_delimiter();
        if !self.eat_token(close) {
            self.error_unclosed_delimiter(unclosed, "opened here", open_span);
        }
    }

    fn parse_paren(&mut self) {
        let open_span = self.current_span();
        self.start_node(SyntaxKind::ParenExpr);
        self.push_delimiter();
        self.bump(); // consume '('
        if self.currently_is_one_of(EXPR_FIRST) {
            self.parse_expr();
        } else {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        self.pop_delimiter();
        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_unclosed_delimiter(DiagnosticKind::UnclosedParen, "opened here", open_span);
        }
        self.finish_node();
    }
}

/// Index of the closing `/` in `body` (text after the opening `/`).
fn find_regex_end(body: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '/' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}
