use std::fmt;
use std::ops::{Index, IndexMut, Not};

use super::RBTree;


/// The color bit carried by every node. The sentinel always reads as `Black`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Black,
}

/// Which child link of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;
    fn not(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Index of a node in its tree's arena.
///
/// Two values are reserved: `NIL` is the sentinel every leaf points at, and `HEADER`
/// is the virtual node sitting above the root (its right link *is* the root).
/// Neither is ever stored in the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const NIL: NodeId = NodeId(u32::MAX);
    pub(crate) const HEADER: NodeId = NodeId(u32::MAX - 1);

    /// Largest index the arena may hand out.
    pub(crate) const MAX_INDEX: usize = (u32::MAX - 2) as usize;

    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX_INDEX, "rbtree arena exhausted ({index} slots)");
        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Whether this refers to an arena slot (not the sentinel or the header).
    pub(crate) fn is_real(self) -> bool {
        self.index() <= Self::MAX_INDEX
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NodeId::NIL => f.write_str("#nil"),
            NodeId::HEADER => f.write_str("#header"),
            NodeId(index) => write!(f, "#{index}"),
        }
    }
}


// PROVE: any node with height `h` has black height at least `h/2`
// PROVE: the subtree located at any node `x` contains at least `2^bh(x) - 1` nodes (use induction)
// LEMMA: An RBTree with `n` internal nodes has height at most `2*log₂(n+1)`

pub(crate) struct RBTreeNode<T> {
    pub(crate) color: Color,
    pub(crate) value: T,
    pub(crate) children: [NodeId; 2],
}

impl<T> RBTreeNode<T> {
    /// A fresh red leaf with the sentinel on both sides, as insertion creates it.
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            color: Color::Red,
            value,
            children: [NodeId::NIL; 2],
        }
    }
}

impl<T> Index<Dir> for RBTreeNode<T> {
    type Output = NodeId;
    fn index(&self, dir: Dir) -> &NodeId {
        &self.children[dir as usize]
    }
}

impl<T> IndexMut<Dir> for RBTreeNode<T> {
    fn index_mut(&mut self, dir: Dir) -> &mut NodeId {
        &mut self.children[dir as usize]
    }
}


/// A read-only view of one real node of an [`RBTree`].
pub struct NodeRef<'a, T> {
    pub(super) tree: &'a RBTree<T>,
    pub(super) id: NodeId,
}

// manual impls: deriving would put a `T: Clone` bound on them
impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    /// The arena index of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The element stored in this node.
    pub fn value(&self) -> &'a T {
        &self.tree.nodes[self.id].value
    }

    /// This node's current color.
    pub fn color(&self) -> Color {
        self.tree.nodes[self.id].color
    }

    /// The left child, or `None` where the link is the sentinel.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.child(Dir::Left)
    }

    /// The right child, or `None` where the link is the sentinel.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.child(Dir::Right)
    }

    fn child(&self, dir: Dir) -> Option<NodeRef<'a, T>> {
        self.tree.view(self.tree.nodes[self.id][dir])
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}
