use std::fmt::Write;

use rowan::{NodeOrToken, TextRange};

use super::node::kind_name;
use crate::parser::Grammar;
use crate::parser::cst::{SyntaxKind, SyntaxNode};

/// Indented CST dump: one `Kind` line per node, `Kind "text"` per token.
pub struct CstPrinter<'a> {
    root: &'a SyntaxNode,
    grammar: Option<&'a Grammar>,
    spans: bool,
    trivia: bool,
}

impl<'a> CstPrinter<'a> {
    pub fn new(root: &'a SyntaxNode) -> Self {
        Self {
            root,
            grammar: None,
            spans: false,
            trivia: false,
        }
    }

    /// Resolves extension node names through `grammar`.
    pub fn grammar(mut self, grammar: &'a Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    /// Also print whitespace and newline tokens.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.root, 0, w)
    }

    fn format_node(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let kind = self.kind_name(Some(node), node.kind());
        writeln!(w, "{prefix}{kind}{}", self.span_str(node.text_range()))?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_node(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        writeln!(
                            w,
                            "{prefix}  {:?}{} {:?}",
                            t.kind(),
                            self.span_str(t.text_range()),
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn kind_name(&self, node: Option<&SyntaxNode>, kind: SyntaxKind) -> String {
        match self.grammar {
            Some(grammar) => kind_name(grammar, node, kind),
            None => format!("{kind:?}"),
        }
    }

    fn span_str(&self, range: TextRange) -> String {
        if self.spans {
            format!(" [{}..{}]", u32::from(range.start()), u32::from(range.end()))
        } else {
            String::new()
        }
    }
}
