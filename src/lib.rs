//! Generic, mutable, multi-way tree container for strict hierarchies with
//! stable node identity, ordered siblings, ownership-transferring insertion
//! and structural editing (subtree removal, promotion, extraction, deep
//! cloning).
//!
//! Two addressing variants share one container type:
//!
//! - [`ValueTree`] names nodes by equality of the stored value and walks
//!   the structure to find them.
//! - [`KeyedTree`] names nodes by the [`Identity`] matching key through an
//!   auxiliary index, giving O(1)-average lookup independent of value
//!   mutation or duplication elsewhere in the tree.
//!
//! Containers are single-threaded; callers needing shared access must
//! serialize externally.
//!
//! # Example
//!
//! ```
//! use idtree::{Removal, ValueTree};
//!
//! let mut tree = ValueTree::new();
//! tree.set_root(134).unwrap();
//! tree.insert(5, &134).unwrap();
//! tree.insert(6, &134).unwrap();
//! tree.insert(8, &6).unwrap();
//!
//! assert_eq!(tree.children(&134).unwrap().collect::<Vec<_>>(), vec![5, 6]);
//!
//! // Promote: 8 is re-parented onto 134 before 6 is destroyed.
//! tree.remove(&6, Removal::Promote).unwrap();
//! assert_eq!(tree.children(&134).unwrap().collect::<Vec<_>>(), vec![5, 8]);
//! assert_eq!(tree.parent(&8).unwrap(), &134);
//! ```

pub mod address;
pub mod arena;
pub mod cursor;
pub mod errors;
pub mod identity;
pub mod render;
pub mod tree;
pub mod util;

pub use address::{AddressMode, ByKey, ByValue};
pub use cursor::Cursor;
pub use errors::{TreeError, TreeResult};
pub use identity::{ascending, descending, Comparator, Identity};
pub use render::TreeRender;
pub use tree::{KeyedTree, Removal, Tree, ValueTree};
