use std::fmt::Display;
use std::iter::FusedIterator;
use std::ops::AddAssign;

use super::node::{Dir, NodeId};
use super::RBTree;


/// Where a node is handled relative to its two subtrees during a depth-first walk.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Order {
    /// node, left, right
    #[default]
    PreOrder,
    /// left, node, right (ascending)
    InOrder,
    /// left, right, node
    PostOrder,
}

impl<T> RBTree<T> {
    /// Call `f` on every element exactly once, in the given depth-first `order`.
    pub fn visit<F: FnMut(&T)>(&self, order: Order, mut f: F) {
        self.visit_from(self.root, order, &mut f)
    }

    fn visit_from<F: FnMut(&T)>(&self, id: NodeId, order: Order, f: &mut F) {
        if id.is_nil() { return }

        let node = &self.nodes[id];
        if order == Order::PreOrder { f(&node.value) }
        self.visit_from(node[Dir::Left], order, f);
        if order == Order::InOrder { f(&node.value) }
        self.visit_from(node[Dir::Right], order, f);
        if order == Order::PostOrder { f(&node.value) }
    }

    /// Map every element through `f` and sum the results with `+=`.
    ///
    /// Each node's result is combined with the folds of its left and right subtrees;
    /// an empty subtree contributes `U::default()`. `order` decides the order in which
    /// `f` is called, and so the order in which non-commutative results are combined.
    pub fn fold<U, F>(&self, order: Order, mut f: F) -> U
    where
        U: Default + AddAssign,
        F: FnMut(&T) -> U,
    {
        self.fold_from(self.root, order, &mut f)
    }

    fn fold_from<U, F>(&self, id: NodeId, order: Order, f: &mut F) -> U
    where
        U: Default + AddAssign,
        F: FnMut(&T) -> U,
    {
        if id.is_nil() {
            return U::default()
        }

        let node = &self.nodes[id];
        let (left, right) = (node[Dir::Left], node[Dir::Right]);
        match order {
            Order::PreOrder => {
                let mut acc = f(&node.value);
                acc += self.fold_from(left, order, f);
                acc += self.fold_from(right, order, f);
                acc
            }
            Order::InOrder => {
                let mut acc = self.fold_from(left, order, f);
                acc += f(&node.value);
                acc += self.fold_from(right, order, f);
                acc
            }
            Order::PostOrder => {
                let mut acc = self.fold_from(left, order, f);
                acc += self.fold_from(right, order, f);
                acc += f(&node.value);
                acc
            }
        }
    }

    /// Iterate over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { tree: self, stack: Vec::new(), remaining: self.len() };
        iter.descend_left(self.root);
        iter
    }
}

impl<T: Display> RBTree<T> {
    /// The elements in pre-order, separated by single spaces.
    pub fn dfs_string(&self) -> String {
        let mut out = String::new();
        self.visit(Order::PreOrder, |value| {
            if !out.is_empty() { out.push(' ') }
            out += &value.to_string();
        });
        out
    }
}


/// In-order iterator over an [`RBTree`], created by [`RBTree::iter`].
pub struct Iter<'a, T> {
    tree: &'a RBTree<T>,
    // nodes whose left subtree has been pushed but who have not been yielded yet
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<T> Iter<'_, T> {
    fn descend_left(&mut self, mut id: NodeId) {
        while id.is_real() {
            self.stack.push(id);
            id = self.tree.nodes[id][Dir::Left];
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        self.descend_left(tree.nodes[id][Dir::Right]);
        self.remaining -= 1;
        Some(&tree.nodes[id].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
