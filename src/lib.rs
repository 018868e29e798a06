//! An ordered set backed by a red-black tree.
//!
//! ```
//! use rbtree::{Color, RBTree};
//!
//! let mut tree = RBTree::new();
//! for x in [10, 20, 30] {
//!     assert!(tree.insert(x));
//! }
//! assert!(!tree.insert(20));
//!
//! let root = tree.root().unwrap();
//! assert_eq!((*root.value(), root.color()), (20, Color::Black));
//! assert_eq!(tree.min(), Ok(&10));
//! assert!(tree.remove(&10));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [20, 30]);
//! ```

#![forbid(unsafe_code)]

pub mod error;

// not concurrent
pub mod non_concurrent;

pub use error::{RBTreeError, Result};
pub use non_concurrent::rbtree::{Color, Iter, NodeId, NodeRef, Order, RBTree};
