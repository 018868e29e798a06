//! A single-owner red-black tree storing its nodes in an index arena.
//!
//! Every leaf link points at a shared black sentinel (`NodeId::NIL`) instead of being
//! absent, and insertion rebalances top-down in the same pass that finds the
//! attachment point. Removal rebalances bottom-up along a recorded path.

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::error::{RBTreeError, Result};

mod arena;
mod insert;
mod node;
mod remove;
mod visit;

#[cfg(test)]
mod tests;

use arena::Arena;
use node::{Dir, RBTreeNode};

pub use node::{Color, NodeId, NodeRef};
pub use visit::{Iter, Order};


/// An ordered set of `T`, balanced as a red-black tree.
///
/// Invariants held between calls:
/// 1. every node is red or black, and the sentinel is black
/// 2. the root is black
/// 3. a red node never has a red child
/// 4. every path from a node down to the sentinel crosses the same number of black nodes
/// 5. left subtrees hold strictly smaller elements, right subtrees strictly greater ones
pub struct RBTree<T> {
    nodes: Arena<T>,
    root: NodeId,
}

impl<T> RBTree<T> {
    pub const fn new() -> Self {
        Self { nodes: Arena::new(), root: NodeId::NIL }
    }

    /// An empty tree with room for `capacity` nodes before the arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Arena::with_capacity(capacity), root: NodeId::NIL }
    }

    /// A tree holding just `value`.
    pub fn with_value(value: T) -> Self {
        let mut nodes = Arena::with_capacity(1);
        let root = nodes.alloc(RBTreeNode { color: Color::Black, ..RBTreeNode::leaf(value) });
        Self { nodes, root }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// The root node, if the tree has one.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.view(self.root)
    }

    /// Complexity: O(log(n))
    pub fn min(&self) -> Result<&T> {
        self.extreme(Dir::Left)
    }

    /// Complexity: O(log(n))
    pub fn max(&self) -> Result<&T> {
        self.extreme(Dir::Right)
    }

    /// Number of nodes on the longest path from the root to a leaf.
    ///
    /// Complexity: O(n)
    pub fn height(&self) -> usize {
        fn height_from<T>(tree: &RBTree<T>, id: NodeId) -> usize {
            if id.is_nil() { return 0 }
            let node = &tree.nodes[id];
            1 + height_from(tree, node[Dir::Left]).max(height_from(tree, node[Dir::Right]))
        }
        height_from(self, self.root)
    }

    /// Release every node, leaving an empty tree. Does nothing to an empty tree.
    pub fn clear(&mut self) {
        if self.is_empty() { return }
        debug!("Clearing tree of {} nodes", self.len());
        self.nodes.clear();
        self.root = NodeId::NIL;
    }

    /// Move the contents out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    fn extreme(&self, dir: Dir) -> Result<&T> {
        if self.is_empty() {
            return Err(RBTreeError::EmptyTree)
        }
        let mut id = self.root;
        while self.nodes[id][dir].is_real() {
            id = self.nodes[id][dir];
        }
        Ok(&self.nodes[id].value)
    }

    fn view(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        id.is_real().then_some(NodeRef { tree: self, id })
    }

    // The sentinel and the header answer every structural query like a black node with no children,
    // except that the header's right link is the root. Writes aimed at the sentinel are dropped.

    fn color(&self, id: NodeId) -> Color {
        if id.is_real() { self.nodes[id].color } else { Color::Black }
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        if id.is_real() {
            self.nodes[id].color = color;
        }
    }

    fn child(&self, id: NodeId, dir: Dir) -> NodeId {
        if id.is_real() {
            self.nodes[id][dir]
        } else if id == NodeId::HEADER && dir == Dir::Right {
            self.root
        } else {
            NodeId::NIL
        }
    }

    fn set_child(&mut self, id: NodeId, dir: Dir, child: NodeId) {
        if id.is_real() {
            self.nodes[id][dir] = child;
        } else if id == NodeId::HEADER {
            debug_assert_eq!(dir, Dir::Right, "the root hangs off the header's right link");
            self.root = child;
        }
    }

    /// Rotate the subtree at `id` so that `id` moves down on the `dir` side and its
    /// child on the other side takes its place. Returns the new subtree root; the
    /// caller is responsible for re-linking it under the old parent.
    fn rotate(&mut self, id: NodeId, dir: Dir) -> NodeId {
        let risen = self.nodes[id][!dir];
        debug_assert!(risen.is_real(), "rotating {id} {dir:?} with no child to lift");
        trace!("Rotating {id} {dir:?}, lifting {risen}");

        let middle = self.nodes[risen][dir];
        self.nodes[id][!dir] = middle;
        self.nodes[risen][dir] = id;
        risen
    }
}

impl<T: Ord> RBTree<T> {
    /// Complexity: O(log(n))
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// The stored element equal to `value`, if any.
    ///
    /// Complexity: O(log(n))
    pub fn get(&self, value: &T) -> Option<&T> {
        let mut id = self.root;
        while id.is_real() {
            let node = &self.nodes[id];
            id = match value.cmp(&node.value) {
                Ordering::Less => node[Dir::Left],
                Ordering::Greater => node[Dir::Right],
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }
}

impl<T: Clone> RBTree<T> {
    /// Deep-copy the tree into a fresh arena.
    ///
    /// Children are copied before the parent node that links them is assembled, so the copy
    /// never holds a half-built link. A link to a retired slot aborts the copy.
    pub fn try_clone(&self) -> Result<Self> {
        fn clone_from<T: Clone>(src: &Arena<T>, dst: &mut Arena<T>, id: NodeId) -> Result<NodeId> {
            if id.is_nil() { return Ok(NodeId::NIL) }
            let node = src.try_get(id)?;
            let left = clone_from(src, dst, node[Dir::Left])?;
            let right = clone_from(src, dst, node[Dir::Right])?;
            Ok(dst.alloc(RBTreeNode {
                color: node.color,
                value: node.value.clone(),
                children: [left, right],
            }))
        }

        let mut nodes = Arena::with_capacity(self.len());
        let root = clone_from(&self.nodes, &mut nodes, self.root)?;
        debug!("Cloned tree of {} nodes", nodes.len());
        Ok(Self { nodes, root })
    }
}

impl<T> Default for RBTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RBTree<T> {
    fn clone(&self) -> Self {
        self.try_clone().expect("every link of a live tree points at a live node")
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RBTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RBTree<T> {}

impl<T: Ord> FromIterator<T> for RBTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RBTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a RBTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
