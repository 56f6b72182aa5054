//! The tree container: construction, mutation, addressing and queries.

use std::fmt::Debug;

use generational_arena::Index;
use tracing::instrument;

use crate::address::{AddressMode, ByKey, ByValue};
use crate::arena::NodeArena;
use crate::cursor::Cursor;
use crate::errors::{TreeError, TreeResult};
use crate::identity::{ascending, Comparator, Identity};

/// Removal policy for [`Tree::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Remove the node and its entire subtree.
    Cascade,
    /// Re-parent the node's direct children onto its parent, then remove
    /// the node alone. Deeper descendants keep their own structure.
    Promote,
}

/// A strict hierarchy with stable node identity and ordered siblings.
///
/// `M` decides how nodes are addressed: [`ValueTree`] names nodes by the
/// stored value itself, [`KeyedTree`] by the [`Identity`] matching key via
/// an O(1)-average index. Either way the container owns exactly one root
/// (or is empty), every other node has exactly one parent, and siblings
/// are kept in comparator order.
///
/// No failing operation mutates the structure: all admission checks run
/// before the first edit.
#[derive(Debug, Clone)]
pub struct Tree<T, M: AddressMode<T>> {
    arena: NodeArena<T>,
    mode: M,
}

/// Tree addressed by equality of the stored value.
pub type ValueTree<T> = Tree<T, ByValue<T>>;

/// Tree addressed by the [`Identity`] matching key.
pub type KeyedTree<T> = Tree<T, ByKey<T>>;

impl<T: PartialEq + Debug> Tree<T, ByValue<T>> {
    /// Empty value-addressed tree with natural ascending sibling order.
    pub fn new() -> Self
    where
        T: Ord,
    {
        Self::with_order(ascending::<T>)
    }

    /// Empty value-addressed tree with a caller-supplied sibling order.
    pub fn with_order(cmp: Comparator<T>) -> Self {
        Self {
            arena: NodeArena::new(),
            mode: ByValue::new(cmp),
        }
    }
}

impl<T: PartialEq + Debug + Ord> Default for Tree<T, ByValue<T>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identity> Tree<T, ByKey<T>> {
    /// Empty key-indexed tree with natural ascending sibling order.
    pub fn new() -> Self
    where
        T::Rank: Ord,
    {
        Self::with_order(ascending::<T::Rank>)
    }

    /// Empty key-indexed tree with a caller-supplied sibling order.
    pub fn with_order(cmp: Comparator<T::Rank>) -> Self {
        Self {
            arena: NodeArena::new(),
            mode: ByKey::new(cmp),
        }
    }
}

impl<T: Identity> Default for Tree<T, ByKey<T>>
where
    T::Rank: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M: AddressMode<T>> Tree<T, M> {
    pub(crate) fn arena(&self) -> &NodeArena<T> {
        &self.arena
    }

    fn locate(&self, addr: &M::Addr) -> TreeResult<Index> {
        self.mode
            .locate(&self.arena, addr)
            .ok_or_else(|| TreeError::NotFound(format!("{addr:?}")))
    }

    /// Replaces the whole structure with a fresh single-node tree holding
    /// `value`. Calling this on a non-empty tree is the deliberate reset
    /// semantic, not an error; every prior node is destroyed.
    #[instrument(level = "debug", skip(self, value))]
    pub fn set_root(&mut self, value: T) -> TreeResult<()> {
        self.mode.admit_root(&value)?;
        self.mode.reset();
        let idx = self.arena.set_root(value);
        if let Some(node) = self.arena.get(idx) {
            self.mode.record(&node.value, idx);
        }
        Ok(())
    }

    pub fn root(&self) -> TreeResult<&T> {
        self.arena
            .root()
            .and_then(|idx| self.arena.get(idx))
            .map(|node| &node.value)
            .ok_or(TreeError::EmptyTree)
    }

    pub fn root_mut(&mut self) -> TreeResult<&mut T> {
        let idx = self.arena.root().ok_or(TreeError::EmptyTree)?;
        self.arena
            .get_mut(idx)
            .map(|node| &mut node.value)
            .ok_or(TreeError::EmptyTree)
    }

    /// Moves `value` into a new node under the node named by `parent`,
    /// placed among its siblings in comparator order.
    #[instrument(level = "debug", skip(self, value))]
    pub fn insert(&mut self, value: T, parent: &M::Addr) -> TreeResult<()> {
        let parent_idx = self
            .mode
            .locate(&self.arena, parent)
            .ok_or_else(|| TreeError::ParentNotFound(format!("{parent:?}")))?;
        self.mode.admit_child(&self.arena, parent_idx, &value)?;

        let Self { arena, mode } = self;
        if let Some(idx) = arena.insert_child(value, parent_idx, |a, b| mode.precedes(a, b)) {
            if let Some(node) = arena.get(idx) {
                mode.record(&node.value, idx);
            }
        }
        Ok(())
    }

    pub fn find(&self, addr: &M::Addr) -> TreeResult<&T> {
        let idx = self.locate(addr)?;
        self.arena
            .get(idx)
            .map(|node| &node.value)
            .ok_or_else(|| TreeError::NotFound(format!("{addr:?}")))
    }

    /// Mutable access to a stored value.
    ///
    /// In the value-addressed variant, mutating the value changes the
    /// address it is found under. In the key-indexed variant the matching
    /// key must stay untouched; a changed sorting key takes effect on the
    /// next [`reorder`](Self::reorder).
    pub fn find_mut(&mut self, addr: &M::Addr) -> TreeResult<&mut T> {
        let idx = self.locate(addr)?;
        self.arena
            .get_mut(idx)
            .map(|node| &mut node.value)
            .ok_or_else(|| TreeError::NotFound(format!("{addr:?}")))
    }

    pub fn contains(&self, addr: &M::Addr) -> bool {
        self.mode.locate(&self.arena, addr).is_some()
    }

    pub fn parent(&self, addr: &M::Addr) -> TreeResult<&T> {
        let idx = self.locate(addr)?;
        let parent_idx = self
            .arena
            .get(idx)
            .and_then(|node| node.parent)
            .ok_or_else(|| TreeError::NoParent(format!("{addr:?}")))?;
        self.arena
            .get(parent_idx)
            .map(|node| &node.value)
            .ok_or_else(|| TreeError::NotFound(format!("{addr:?}")))
    }

    /// Removes the node named by `addr` under the given policy.
    ///
    /// Root policy: `Cascade` empties the container; `Promote` requires at
    /// most one child (the child becomes the new root) and fails with
    /// [`TreeError::InvalidRemoval`], mutating nothing, when the root has
    /// several children.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, addr: &M::Addr, policy: Removal) -> TreeResult<()> {
        let idx = self.locate(addr)?;
        let (parent, kids) = {
            let node = self
                .arena
                .get(idx)
                .ok_or_else(|| TreeError::NotFound(format!("{addr:?}")))?;
            (node.parent, node.children.clone())
        };

        match policy {
            Removal::Cascade => {
                for value in self.arena.remove_subtree(idx) {
                    self.mode.forget(&value);
                }
            }
            Removal::Promote => match parent {
                Some(parent_idx) => {
                    self.arena.detach(idx);
                    let Self { arena, mode } = self;
                    for kid in kids {
                        arena.detach(kid);
                        arena.attach(kid, parent_idx, |a, b| mode.precedes(a, b));
                    }
                    if let Some(value) = arena.remove_single(idx) {
                        mode.forget(&value);
                    }
                }
                None => match kids.len() {
                    0 => {
                        for value in self.arena.remove_subtree(idx) {
                            self.mode.forget(&value);
                        }
                    }
                    1 => {
                        let kid = kids[0];
                        self.arena.detach(kid);
                        self.arena.adopt_root(kid);
                        if let Some(value) = self.arena.remove_single(idx) {
                            self.mode.forget(&value);
                        }
                    }
                    n => {
                        return Err(TreeError::InvalidRemoval(format!(
                            "cannot promote {n} children of the root; exactly one child required"
                        )))
                    }
                },
            },
        }
        Ok(())
    }

    /// Re-places the node named by `addr` among its siblings after a
    /// caller-side sorting-key change. No-op for the root.
    #[instrument(level = "debug", skip(self))]
    pub fn reorder(&mut self, addr: &M::Addr) -> TreeResult<()> {
        let idx = self.locate(addr)?;
        let parent = self.arena.get(idx).and_then(|node| node.parent);
        if let Some(parent_idx) = parent {
            self.arena.detach(idx);
            let Self { arena, mode } = self;
            arena.attach(idx, parent_idx, |a, b| mode.precedes(a, b));
        }
        Ok(())
    }

    /// Direct children of the named node, in current sibling order.
    pub fn children(&self, addr: &M::Addr) -> TreeResult<Cursor<T>>
    where
        T: Clone,
    {
        let idx = self.locate(addr)?;
        let items = self
            .arena
            .get(idx)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&child| self.arena.get(child).map(|n| n.value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(Cursor::new(items))
    }

    /// The other children of the named node's parent; empty for the root.
    pub fn siblings(&self, addr: &M::Addr) -> TreeResult<Cursor<T>>
    where
        T: Clone,
    {
        let idx = self.locate(addr)?;
        let parent = self.arena.get(idx).and_then(|node| node.parent);
        let items = match parent {
            Some(parent_idx) => self
                .arena
                .get(parent_idx)
                .map(|parent_node| {
                    parent_node
                        .children
                        .iter()
                        .filter(|&&child| child != idx)
                        .filter_map(|&child| self.arena.get(child).map(|n| n.value.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(Cursor::new(items))
    }

    /// Every value exactly once, pre-order depth-first, children in
    /// sibling order: a deterministic, priority-ordered enumeration of
    /// the whole structure.
    pub fn traverse(&self) -> Cursor<T>
    where
        T: Clone,
    {
        let items = self.arena.iter().map(|(_, node)| node.value.clone()).collect();
        Cursor::new(items)
    }

    /// Deep-clones the subtree rooted at `addr` into a new independent
    /// container whose root is the cloned node.
    #[instrument(level = "debug", skip(self))]
    pub fn subtree(&self, addr: &M::Addr) -> TreeResult<Self>
    where
        T: Clone,
        M: Clone,
    {
        let idx = self.locate(addr)?;
        let arena = self
            .arena
            .extract(idx)
            .ok_or_else(|| TreeError::NotFound(format!("{addr:?}")))?;
        let mut mode = self.mode.clone();
        mode.reset();
        mode.reindex(&arena);
        Ok(Self { arena, mode })
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Longest root-to-leaf node count; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.arena.depth()
    }
}
