use thiserror::Error;

use crate::non_concurrent::rbtree::NodeId;

pub type Result<T> = std::result::Result<T, RBTreeError>;

/// Failures reported by [`RBTree`](crate::RBTree) operations.
///
/// Absence is not a failure: `insert` on a duplicate and `remove` on a missing
/// element report `false` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RBTreeError {
    /// `min`/`max` on a tree with no elements.
    #[error("the tree is empty")]
    EmptyTree,

    /// A link points at an arena slot that has already been retired.
    #[error("node {0} has already been released")]
    DanglingReference(NodeId),
}
