use rowan::NodeOrToken;
use serde::{Deserialize, Serialize};

use crate::parser::Grammar;
use crate::parser::cst::{SyntaxElement, SyntaxKind, SyntaxNode, extension_index};

/// Serializable snapshot of a CST: `{ kind?, text?, span, children? }`.
///
/// Plain text leaves carry no `kind`. Leaves carry `text`, inner nodes carry
/// `children`. Holds no parent links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub span: (u32, u32),
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Concatenated leaf text, in order.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in self.children.iter().flatten() {
            child.write_text(out);
        }
    }
}

/// Display name of a node or token kind. Extension nodes resolve to the
/// name they were registered under.
pub fn kind_name(grammar: &Grammar, node: Option<&SyntaxNode>, kind: SyntaxKind) -> String {
    if kind == SyntaxKind::Extension
        && let Some(name) = node
            .and_then(extension_index)
            .and_then(|index| grammar.extension_name(index))
    {
        return name.to_string();
    }
    format!("{kind:?}")
}

pub fn to_tree_node(grammar: &Grammar, node: &SyntaxNode) -> TreeNode {
    let range = node.text_range();
    TreeNode {
        kind: Some(kind_name(grammar, Some(node), node.kind())),
        text: None,
        span: (range.start().into(), range.end().into()),
        children: Some(
            node.children_with_tokens()
                .map(|child| element_to_tree_node(grammar, child))
                .collect(),
        ),
    }
}

fn element_to_tree_node(grammar: &Grammar, element: SyntaxElement) -> TreeNode {
    match element {
        NodeOrToken::Node(node) => to_tree_node(grammar, &node),
        NodeOrToken::Token(token) => {
            let range = token.text_range();
            let kind = token.kind();
            TreeNode {
                kind: (!kind.is_plain()).then(|| kind_name(grammar, None, kind)),
                text: Some(token.text().to_string()),
                span: (range.start().into(), range.end().into()),
                children: None,
            }
        }
    }
}
