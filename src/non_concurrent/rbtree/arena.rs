use std::ops::{Index, IndexMut};

use log::trace;

use crate::error::{RBTreeError, Result};
use super::node::{NodeId, RBTreeNode};


enum Slot<T> {
    Occupied(RBTreeNode<T>),
    /// A retired slot, threaded onto the free list.
    Vacant { next_free: Option<NodeId> },
}

/// Backing storage for the nodes of one tree.
///
/// Links between nodes are plain indices, so rotations never touch ownership.
/// Removing a node "retires" its index: the slot goes on a free list and is handed
/// out again by the next `alloc`. Any stale `NodeId` pointing at a retired slot is
/// reported as a [`RBTreeError::DanglingReference`] by the checked accessors.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<NodeId>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of live (occupied) slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn alloc(&mut self, node: RBTreeNode<T>) -> NodeId {
        self.len += 1;

        if let Some(id) = self.free_head {
            let slot = &mut self.slots[id.index()];
            if let Slot::Vacant { next_free } = *slot {
                self.free_head = next_free;
                *slot = Slot::Occupied(node);
                trace!("Reusing retired slot {id}");
                return id;
            }
            // NOTE: the free list only ever links vacant slots
            unreachable!("free list points at occupied slot {id}");
        }

        let id = NodeId::from_index(self.slots.len());
        self.slots.push(Slot::Occupied(node));
        id
    }

    /// Retire `id`, returning the node that lived there.
    pub(crate) fn retire(&mut self, id: NodeId) -> Result<RBTreeNode<T>> {
        self.try_get(id)?;

        let vacant = Slot::Vacant { next_free: self.free_head };
        match std::mem::replace(&mut self.slots[id.index()], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                self.len -= 1;
                trace!("Retired slot {id}");
                Ok(node)
            }
            Slot::Vacant { .. } => unreachable!("slot {id} was checked to be occupied"),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&RBTreeNode<T>> {
        match self.slots.get(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut RBTreeNode<T>> {
        match self.slots.get_mut(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn try_get(&self, id: NodeId) -> Result<&RBTreeNode<T>> {
        self.get(id).ok_or(RBTreeError::DanglingReference(id))
    }

    /// Swap the values held by two distinct live nodes, leaving links and colors alone.
    pub(crate) fn swap_values(&mut self, a: NodeId, b: NodeId) {
        assert_ne!(a, b, "cannot swap a node's value with itself");
        let (lo, hi) = if a.index() < b.index() { (a, b) } else { (b, a) };

        let (head, tail) = self.slots.split_at_mut(hi.index());
        match (&mut head[lo.index()], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => std::mem::swap(&mut x.value, &mut y.value),
            _ => panic!("dangling node reference while swapping {a} and {b}"),
        }
    }

    /// Drop every node at once.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

// unchecked access is for links the tree itself maintains; a miss here is a bug in the tree
impl<T> Index<NodeId> for Arena<T> {
    type Output = RBTreeNode<T>;
    fn index(&self, id: NodeId) -> &RBTreeNode<T> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("dangling node reference {id}"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut RBTreeNode<T> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("dangling node reference {id}"),
        }
    }
}
