//! Read-only utilities over the CST, shared by every consumer of a parse.
//!
//! Rowan keeps parent links out of the persisted green tree: a red
//! [`SyntaxNode`](crate::parser::SyntaxNode) carries them for as long as it
//! lives. [`add_parent_pointers`] and [`remove_parent_pointers`] mark the
//! boundary of such a traversal session.

mod node;
mod printer;
mod walk;

#[cfg(test)]
mod printer_tests;

pub use node::{TreeNode, kind_name, to_tree_node};
pub use printer::CstPrinter;
pub use walk::{
    add_parent_pointers, collect_nodes_of_type, find_node_of_type, find_parent_matching,
    node_at_pos, remove_parent_pointers, render_to_text, traverse_tree,
};
