//! Addressing strategies: one capability-polymorphic contract, two modes.
//!
//! The container is generic over how nodes are named. [`ByValue`] addresses
//! nodes by equality of the stored value and walks the structure to find
//! them; [`ByKey`] addresses nodes by the [`Identity`] matching key through
//! an auxiliary index, giving O(1)-average lookup independent of value
//! mutation or value duplication.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;

use generational_arena::Index;

use crate::arena::NodeArena;
use crate::errors::{TreeError, TreeResult};
use crate::identity::{Comparator, Identity};

/// Addressing strategy of a [`Tree`](crate::tree::Tree).
///
/// Implementations resolve caller-facing addresses to arena indices, vet
/// values before they enter the structure, keep any auxiliary index in
/// lockstep with structural mutation, and define sibling order.
pub trait AddressMode<T> {
    /// What callers pass to name a node.
    type Addr: Debug;

    /// Resolves an address to the node it names, if any.
    fn locate(&self, arena: &NodeArena<T>, addr: &Self::Addr) -> Option<Index>;

    /// Vets a value about to replace the whole structure as the new root.
    fn admit_root(&self, value: &T) -> TreeResult<()>;

    /// Vets a value about to be inserted under `parent`.
    fn admit_child(&self, arena: &NodeArena<T>, parent: Index, value: &T) -> TreeResult<()>;

    /// Notes that `value` now lives at `idx`.
    fn record(&mut self, value: &T, idx: Index);

    /// Notes that `value` left the structure.
    fn forget(&mut self, value: &T);

    /// Drops all bookkeeping (the structure is being discarded).
    fn reset(&mut self);

    /// Rebuilds bookkeeping from scratch over `arena` (after a clone or
    /// subtree extraction).
    fn reindex(&mut self, arena: &NodeArena<T>);

    /// Sibling order: true when `a` must come before `b`.
    fn precedes(&self, a: &T, b: &T) -> bool;
}

/// Value-addressed mode: nodes are named by the stored value itself.
///
/// Lookups are pre-order equality scans, so duplicated values resolve to
/// the first match; duplicates among one set of siblings are rejected to
/// keep them pairwise distinguishable.
pub struct ByValue<T> {
    cmp: Comparator<T>,
}

impl<T> ByValue<T> {
    pub fn new(cmp: Comparator<T>) -> Self {
        Self { cmp }
    }
}

impl<T> Clone for ByValue<T> {
    fn clone(&self) -> Self {
        Self { cmp: self.cmp }
    }
}

impl<T> fmt::Debug for ByValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByValue").finish_non_exhaustive()
    }
}

impl<T: PartialEq + Debug> AddressMode<T> for ByValue<T> {
    type Addr = T;

    fn locate(&self, arena: &NodeArena<T>, addr: &T) -> Option<Index> {
        arena
            .iter()
            .find(|(_, node)| node.value == *addr)
            .map(|(idx, _)| idx)
    }

    fn admit_root(&self, _value: &T) -> TreeResult<()> {
        Ok(())
    }

    fn admit_child(&self, arena: &NodeArena<T>, parent: Index, value: &T) -> TreeResult<()> {
        let Some(parent_node) = arena.get(parent) else {
            return Err(TreeError::ParentNotFound(format!("{value:?}")));
        };
        for &child_idx in &parent_node.children {
            if let Some(child) = arena.get(child_idx) {
                if child.value == *value {
                    return Err(TreeError::DuplicateIdentity(format!("{value:?}")));
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, _value: &T, _idx: Index) {}

    fn forget(&mut self, _value: &T) {}

    fn reset(&mut self) {}

    fn reindex(&mut self, _arena: &NodeArena<T>) {}

    fn precedes(&self, a: &T, b: &T) -> bool {
        (self.cmp)(a, b) == Ordering::Less
    }
}

/// Key-indexed mode: nodes are named by their [`Identity`] matching key.
///
/// A key-to-index map is kept as a complete bijection over live nodes;
/// every structural mutation updates it together with the tree edit.
pub struct ByKey<T: Identity> {
    cmp: Comparator<T::Rank>,
    index: HashMap<T::Key, Index>,
}

impl<T: Identity> ByKey<T> {
    pub fn new(cmp: Comparator<T::Rank>) -> Self {
        Self {
            cmp,
            index: HashMap::new(),
        }
    }

    /// Number of keys currently indexed; always equals the node count.
    pub fn indexed(&self) -> usize {
        self.index.len()
    }
}

impl<T: Identity> Clone for ByKey<T> {
    fn clone(&self) -> Self {
        Self {
            cmp: self.cmp,
            index: self.index.clone(),
        }
    }
}

impl<T: Identity> fmt::Debug for ByKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByKey").field("index", &self.index).finish()
    }
}

impl<T: Identity> AddressMode<T> for ByKey<T> {
    type Addr = T::Key;

    fn locate(&self, _arena: &NodeArena<T>, addr: &T::Key) -> Option<Index> {
        self.index.get(addr).copied()
    }

    fn admit_root(&self, value: &T) -> TreeResult<()> {
        if !value.has_valid_key() {
            return Err(TreeError::InvalidIdentity);
        }
        Ok(())
    }

    fn admit_child(&self, _arena: &NodeArena<T>, _parent: Index, value: &T) -> TreeResult<()> {
        if !value.has_valid_key() {
            return Err(TreeError::InvalidIdentity);
        }
        let key = value.matching_key();
        if self.index.contains_key(&key) {
            return Err(TreeError::DuplicateIdentity(format!("{key:?}")));
        }
        Ok(())
    }

    fn record(&mut self, value: &T, idx: Index) {
        self.index.insert(value.matching_key(), idx);
    }

    fn forget(&mut self, value: &T) {
        self.index.remove(&value.matching_key());
    }

    fn reset(&mut self) {
        self.index.clear();
    }

    fn reindex(&mut self, arena: &NodeArena<T>) {
        self.index.clear();
        for (idx, node) in arena.iter() {
            self.index.insert(node.value.matching_key(), idx);
        }
    }

    fn precedes(&self, a: &T, b: &T) -> bool {
        match (self.cmp)(&a.sorting_key(), &b.sorting_key()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            // Deterministic sibling order: break rank ties by matching key
            Ordering::Equal => a.matching_key() < b.matching_key(),
        }
    }
}
