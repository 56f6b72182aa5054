//! Arena-backed node store: owning child links, non-owning parent links.

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Value payload for this node
    pub value: T,
    /// Index of the parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, kept in sibling order
    pub children: Vec<Index>,
}

/// Arena-based tree structure for efficient hierarchy management.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// index lookups. The arena owns every node; `Index` values are relations,
/// never ownership, so dropping the arena releases the whole structure
/// deterministically.
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    /// Arena storage for all tree nodes
    nodes: Arena<TreeNode<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Discards the entire existing structure and starts a fresh
    /// single-node tree.
    #[instrument(level = "trace", skip(self, value))]
    pub fn set_root(&mut self, value: T) -> Index {
        self.nodes.clear();
        let idx = self.nodes.insert(TreeNode {
            value,
            parent: None,
            children: Vec::new(),
        });
        self.root = Some(idx);
        idx
    }

    pub fn get(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.nodes.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut TreeNode<T>> {
        self.nodes.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a new child of `parent`, placed among the current siblings
    /// at the first position where `precedes(new, sibling)` holds.
    ///
    /// Returns None if `parent` is not in the arena.
    #[instrument(level = "trace", skip(self, value, precedes))]
    pub fn insert_child(
        &mut self,
        value: T,
        parent: Index,
        precedes: impl Fn(&T, &T) -> bool,
    ) -> Option<Index> {
        let pos = self.ordered_position(parent, &value, &precedes)?;
        let idx = self.nodes.insert(TreeNode {
            value,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.insert(pos, idx);
        }
        Some(idx)
    }

    /// Re-links an existing detached node under `parent`, ordered like
    /// [`insert_child`](Self::insert_child).
    #[instrument(level = "trace", skip(self, precedes))]
    pub fn attach(&mut self, idx: Index, parent: Index, precedes: impl Fn(&T, &T) -> bool) {
        let pos = self
            .nodes
            .get(idx)
            .and_then(|node| self.ordered_position(parent, &node.value, &precedes));
        let Some(pos) = pos else { return };
        if let Some(node) = self.nodes.get_mut(idx) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.insert(pos, idx);
        }
    }

    fn ordered_position(
        &self,
        parent: Index,
        value: &T,
        precedes: &impl Fn(&T, &T) -> bool,
    ) -> Option<usize> {
        let parent_node = self.nodes.get(parent)?;
        let mut pos = parent_node.children.len();
        for (i, &child_idx) in parent_node.children.iter().enumerate() {
            let child = self.nodes.get(child_idx)?;
            if precedes(value, &child.value) {
                pos = i;
                break;
            }
        }
        Some(pos)
    }

    /// Unlinks `idx` from its parent's child list and clears its parent
    /// link. The node itself (and its subtree) stays in the arena.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, idx: Index) {
        let parent = self.nodes.get(idx).and_then(|node| node.parent);
        if let Some(parent_idx) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent_idx) {
                parent_node.children.retain(|&child| child != idx);
            }
        }
        if let Some(node) = self.nodes.get_mut(idx) {
            node.parent = None;
        }
    }

    /// Makes an already-detached node the new root.
    #[instrument(level = "trace", skip(self))]
    pub fn adopt_root(&mut self, idx: Index) {
        if let Some(node) = self.nodes.get_mut(idx) {
            node.parent = None;
        }
        self.root = Some(idx);
    }

    /// Removes `idx` and its entire subtree, returning the removed values
    /// in pre-order.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_subtree(&mut self, idx: Index) -> Vec<T> {
        self.detach(idx);
        let doomed: Vec<Index> = self.iter_from(idx).map(|(i, _)| i).collect();
        if self.root == Some(idx) {
            self.root = None;
        }
        let mut removed = Vec::with_capacity(doomed.len());
        for i in doomed {
            if let Some(node) = self.nodes.remove(i) {
                removed.push(node.value);
            }
        }
        removed
    }

    /// Removes one node whose children have already been detached or
    /// re-parented elsewhere.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_single(&mut self, idx: Index) -> Option<T> {
        if self.root == Some(idx) {
            self.root = None;
        }
        self.nodes.remove(idx).map(|node| node.value)
    }

    /// Pre-order iterator over the whole tree, children in sibling order.
    pub fn iter(&self) -> ArenaIter<'_, T> {
        ArenaIter::new(self, self.root)
    }

    /// Pre-order iterator over the subtree rooted at `idx`.
    pub fn iter_from(&self, idx: Index) -> ArenaIter<'_, T> {
        ArenaIter::new(self, Some(idx))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(node) = self.get(idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }
}

impl<T: Clone> NodeArena<T> {
    /// Deep-copies the subtree rooted at `idx` into a fresh arena whose
    /// root is the copy of `idx`. Sibling order is preserved; the former
    /// parent link is not reproduced.
    #[instrument(level = "trace", skip(self))]
    pub fn extract(&self, idx: Index) -> Option<NodeArena<T>> {
        let src_root = self.nodes.get(idx)?;
        let mut out = NodeArena::new();
        let dst_root = out.nodes.insert(TreeNode {
            value: src_root.value.clone(),
            parent: None,
            children: Vec::new(),
        });
        out.root = Some(dst_root);

        let mut stack = vec![(idx, dst_root)];
        while let Some((src_idx, dst_idx)) = stack.pop() {
            let Some(src) = self.nodes.get(src_idx) else {
                continue;
            };
            for &src_child in &src.children {
                if let Some(child) = self.nodes.get(src_child) {
                    let dst_child = out.nodes.insert(TreeNode {
                        value: child.value.clone(),
                        parent: Some(dst_idx),
                        children: Vec::new(),
                    });
                    if let Some(dst_node) = out.nodes.get_mut(dst_idx) {
                        dst_node.children.push(dst_child);
                    }
                    stack.push((src_child, dst_child));
                }
            }
        }
        Some(out)
    }
}

/// Borrowing pre-order iterator over arena nodes.
pub struct ArenaIter<'a, T> {
    arena: &'a NodeArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> ArenaIter<'a, T> {
    fn new(arena: &'a NodeArena<T>, start: Option<Index>) -> Self {
        let mut stack = Vec::new();
        if let Some(idx) = start {
            stack.push(idx);
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for ArenaIter<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
