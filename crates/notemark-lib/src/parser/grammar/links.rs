//! Bracketed inline constructs: wiki links, attributes, links, images and
//! command links.

use super::scan;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

impl Parser<'_> {
    /// `[[Page]]` or `[[Page|Alias]]`
    pub(super) fn parse_wiki_link(&mut self) -> bool {
        let Some(body) = self.rest().strip_prefix("[[") else {
            return false;
        };
        let Some(close) = body.find("]]") else {
            return false;
        };
        let inner = &body[..close];
        if inner.contains(['[', ']', '\n']) {
            return false;
        }
        let (page, alias) = match inner.find('|') {
            Some(pipe) => (pipe, Some(inner.len() - pipe - 1)),
            None => (inner.len(), None),
        };
        if page == 0 || alias == Some(0) {
            return false;
        }

        self.start_node(SyntaxKind::WikiLink);
        self.token_len(SyntaxKind::WikiLinkMark, 2);
        self.token_len(SyntaxKind::WikiLinkPage, page);
        if let Some(alias) = alias {
            self.token_len(SyntaxKind::WikiLinkMark, 1);
            self.token_len(SyntaxKind::WikiLinkAlias, alias);
        }
        self.token_len(SyntaxKind::WikiLinkMark, 2);
        self.finish_node();
        true
    }

    /// `[name: value]` or `[name:: value]`. The value may hold balanced brackets.
    pub(super) fn parse_attribute(&mut self) -> bool {
        let rest = self.rest();
        let Some(close) = scan::matching_bracket(rest) else {
            return false;
        };
        if rest[close + 1..].starts_with('(') {
            return false;
        }
        let inner = &rest[1..close];
        let name = inner
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '$')))
            .unwrap_or(inner.len());
        if name == 0 {
            return false;
        }
        let after = &inner[name..];
        let (colon, colon_len) = if after.starts_with("::") {
            (SyntaxKind::DoubleColon, 2)
        } else if after.starts_with(':') {
            (SyntaxKind::Colon, 1)
        } else {
            return false;
        };
        let value_raw = &after[colon_len..];
        let padding = scan::indent(value_raw);
        let value = value_raw.len() - padding;
        if value == 0 || value_raw.contains('\n') {
            return false;
        }

        self.start_node(SyntaxKind::Attribute);
        self.token_len(SyntaxKind::AttributeMark, 1);
        self.token_len(SyntaxKind::AttributeName, name);
        self.token_len(colon, colon_len);
        let value_start = self.offset() + padding;
        self.text_until(value_start);
        self.token_len(SyntaxKind::AttributeValue, value);
        self.token_len(SyntaxKind::AttributeMark, 1);
        self.finish_node();
        true
    }

    /// `[text](url)`; the link text is inline content.
    pub(super) fn parse_link(&mut self) -> bool {
        let Some((text, url)) = scan::link_shape(self.rest()) else {
            return false;
        };
        if !self.enter_nesting() {
            return false;
        }

        self.start_node(SyntaxKind::Link);
        self.token_len(SyntaxKind::LinkMark, 1);
        let text_end = self.offset() + text;
        self.parse_inline_until(text_end);
        self.parse_link_target(url);
        self.finish_node();
        self.exit_nesting();
        true
    }

    /// `![alt](url)`; the alt text stays plain.
    pub(super) fn parse_image(&mut self) -> bool {
        let Some((alt, url)) = self.rest().strip_prefix('!').and_then(scan::link_shape) else {
            return false;
        };

        self.start_node(SyntaxKind::Image);
        self.token_len(SyntaxKind::LinkMark, 2);
        let alt_end = self.offset() + alt;
        self.text_until(alt_end);
        self.parse_link_target(url);
        self.finish_node();
        true
    }

    /// `](url)`
    fn parse_link_target(&mut self, url: usize) {
        self.token_len(SyntaxKind::LinkMark, 1);
        self.token_len(SyntaxKind::LinkMark, 1);
        self.token_len(SyntaxKind::Url, url);
        self.token_len(SyntaxKind::LinkMark, 1);
    }

    /// `{[Name]}`, `{[Name|Alias]}`, `{[Name](args)}`
    pub(super) fn parse_command_link(&mut self) -> bool {
        let Some(shape) = scan::command_link(self.rest()) else {
            return false;
        };

        self.start_node(SyntaxKind::CommandLink);
        self.token_len(SyntaxKind::CommandLinkMark, 2);
        self.token_len(SyntaxKind::CommandLinkName, shape.name);
        if let Some(alias) = shape.alias {
            self.token_len(SyntaxKind::CommandLinkMark, 1);
            self.token_len(SyntaxKind::CommandLinkAlias, alias);
        }
        self.token_len(SyntaxKind::CommandLinkMark, 1);
        if let Some(args) = shape.args {
            self.token_len(SyntaxKind::CommandLinkMark, 1);
            if args > 0 {
                self.token_len(SyntaxKind::CommandLinkArgs, args);
            }
            self.token_len(SyntaxKind::CommandLinkMark, 1);
        }
        self.token_len(SyntaxKind::CommandLinkMark, 1);
        self.finish_node();
        true
    }
}
