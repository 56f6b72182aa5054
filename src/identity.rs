//! Identity contract for values stored in a key-indexed tree.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// Comparator over sorting keys, used purely for sibling placement.
///
/// A plain function pointer keeps the container cloneable and debuggable.
pub type Comparator<R> = fn(&R, &R) -> Ordering;

/// Natural ascending order, the default for both tree variants.
pub fn ascending<R: Ord>(a: &R, b: &R) -> Ordering {
    a.cmp(b)
}

/// Inverted order, e.g. to list heavier bodies first.
pub fn descending<R: Ord>(a: &R, b: &R) -> Ordering {
    b.cmp(a)
}

/// Capability a value must satisfy to live in a [`KeyedTree`].
///
/// The matching key addresses the node and must stay immutable and unique
/// for the value's lifetime within one container. The sorting key orders
/// the value among its siblings; changing it after insertion does not
/// re-sort automatically (see [`Tree::reorder`]).
///
/// [`KeyedTree`]: crate::tree::KeyedTree
/// [`Tree::reorder`]: crate::tree::Tree::reorder
pub trait Identity {
    /// Unique identity used to address the node.
    type Key: Clone + Ord + Hash + Debug + Default;
    /// Sorting key ordered by the container's comparator.
    type Rank;

    fn matching_key(&self) -> Self::Key;

    fn sorting_key(&self) -> Self::Rank;

    /// A default-valued matching key is rejected on insertion.
    fn has_valid_key(&self) -> bool {
        self.matching_key() != Self::Key::default()
    }
}
