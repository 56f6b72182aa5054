//! Textual dump of a tree: a debugging aid, not a wire format.

use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree as TextTree;

use crate::address::AddressMode;
use crate::arena::NodeArena;
use crate::tree::Tree;

/// Conversion into a [`termtree::Tree`] for nested textual rendering.
pub trait TreeRender {
    fn to_tree_string(&self) -> TextTree<String>;
}

impl<T: Display, M: AddressMode<T>> TreeRender for Tree<T, M> {
    fn to_tree_string(&self) -> TextTree<String> {
        let arena = self.arena();
        if let Some(root_idx) = arena.root() {
            let label = arena
                .get(root_idx)
                .map(|node| node.value.to_string())
                .unwrap_or_default();
            let mut tree = TextTree::new(label);

            fn build_tree<T: Display>(
                arena: &NodeArena<T>,
                idx: Index,
                parent_tree: &mut TextTree<String>,
            ) {
                if let Some(node) = arena.get(idx) {
                    for &child_idx in &node.children {
                        if let Some(child) = arena.get(child_idx) {
                            let mut child_tree = TextTree::new(child.value.to_string());
                            build_tree(arena, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }

            build_tree(arena, root_idx, &mut tree);
            tree
        } else {
            TextTree::new("(empty tree)".to_string())
        }
    }
}

impl<T: Display, M: AddressMode<T>> Tree<T, M> {
    /// Human-readable nested rendering of the entire structure.
    pub fn dump(&self) -> String {
        self.to_tree_string().to_string()
    }
}
