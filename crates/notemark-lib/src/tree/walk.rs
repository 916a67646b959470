use rowan::{GreenNode, TextSize, WalkEvent};

use crate::parser::cst::{SyntaxElement, SyntaxKind, SyntaxNode};

/// First node of `kind` in pre-order, `tree` itself included.
pub fn find_node_of_type(tree: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    tree.descendants().find(|n| n.kind() == kind)
}

/// All nodes of `kind`, in document order.
pub fn collect_nodes_of_type(tree: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    tree.descendants().filter(|n| n.kind() == kind).collect()
}

/// Concatenated leaf text. For a parse root this is the original source.
pub fn render_to_text(tree: &SyntaxNode) -> String {
    tree.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .map(|token| token.text().to_owned())
        .collect()
}

/// Pre-order walk over nodes and tokens. Returning `true` from `visit` skips
/// the children of the element just visited; the walk itself continues.
pub fn traverse_tree(tree: &SyntaxNode, mut visit: impl FnMut(&SyntaxElement) -> bool) {
    let mut walk = tree.preorder_with_tokens();
    while let Some(event) = walk.next() {
        if let WalkEvent::Enter(element) = event
            && visit(&element)
            && element.as_node().is_some()
        {
            walk.skip_subtree();
        }
    }
}

/// Starts a traversal session: a red tree with parent links.
pub fn add_parent_pointers(green: &GreenNode) -> SyntaxNode {
    SyntaxNode::new_root(green.clone())
}

/// Ends a traversal session, returning the parent-free green tree of `node`.
pub fn remove_parent_pointers(node: SyntaxNode) -> GreenNode {
    node.green().into_owned()
}

/// Nearest proper ancestor of `node` satisfying `predicate`.
pub fn find_parent_matching(
    node: &SyntaxNode,
    mut predicate: impl FnMut(&SyntaxNode) -> bool,
) -> Option<SyntaxNode> {
    node.ancestors().skip(1).find(|n| predicate(n))
}

/// Smallest node whose range contains `offset`. Ranges are half-open, except
/// that the end of `tree` itself still resolves to `tree`.
pub fn node_at_pos(tree: &SyntaxNode, offset: TextSize) -> Option<SyntaxNode> {
    let range = tree.text_range();
    if !range.contains(offset) && offset != range.end() {
        return None;
    }
    let mut node = tree.clone();
    while let Some(child) = node
        .children()
        .find(|child| child.text_range().contains(offset))
    {
        node = child;
    }
    Some(node)
}
