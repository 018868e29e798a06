use log::{debug, trace};

use super::node::{Color, Dir, NodeId, RBTreeNode};
use super::RBTree;


/// The four cursors of a top-down descent. Lives for one `insert` call.
///
/// `NodeId::HEADER` stands in for "above the root", so a rotation near the top of the
/// tree re-links through the header's right link, i.e. the root slot.
struct Descent {
    current: NodeId,
    parent: NodeId,
    grand: NodeId,
    great: NodeId,
}

impl Descent {
    fn start() -> Self {
        Self {
            current: NodeId::HEADER,
            parent: NodeId::HEADER,
            grand: NodeId::HEADER,
            great: NodeId::HEADER,
        }
    }

    fn shift(&mut self, next: NodeId) {
        self.great = self.grand;
        self.grand = self.parent;
        self.parent = self.current;
        self.current = next;
    }
}

impl<T: Ord> RBTree<T> {
    /// Adds `value` to the tree. Returns `false` (and leaves the tree untouched) if an
    /// equal element is already present.
    ///
    /// Rebalancing happens on the way down: any node met with two red children is
    /// recolored (and rotated if that makes a red-red pair), so the new red leaf only ever
    /// needs one more fixup at the bottom.
    ///
    /// Complexity: O(log(n))
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            debug!("Rejected duplicate insert");
            return false
        }

        // the new leaf is allocated detached; its value is the key the descent compares against
        let key = self.nodes.alloc(RBTreeNode::leaf(value));
        let mut path = Descent::start();

        loop {
            let next = self.child(path.current, self.side_of(path.current, key));
            path.shift(next);
            if path.current.is_nil() { break }

            let [left, right] = self.nodes[path.current].children;
            if self.color(left) == Color::Red && self.color(right) == Color::Red {
                self.reorient(&mut path, key);
            }
        }

        let dir = self.side_of(path.parent, key);
        self.set_child(path.parent, dir, key);
        trace!("Attached {key} under {} ({dir:?})", path.parent);

        path.current = key;
        self.reorient(&mut path, key);

        debug!("Inserted {key}; tree now holds {} nodes", self.len());
        true
    }

    /// Which child of `at` the element held by `key` belongs under. The header sorts
    /// below everything, so the root is always on its right.
    fn side_of(&self, at: NodeId, key: NodeId) -> Dir {
        if at != NodeId::HEADER && self.nodes[key].value < self.nodes[at].value {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    /// Color flip at `path.current`, followed by a single or double rotation if the flip
    /// made `current` and `parent` both red.
    fn reorient(&mut self, path: &mut Descent, key: NodeId) {
        trace!("Color flip at {}", path.current);
        self.set_color(path.current, Color::Red);
        let [left, right] = self.nodes[path.current].children;
        self.set_color(left, Color::Black);
        self.set_color(right, Color::Black);

        if self.color(path.parent) == Color::Red {
            // a red parent is never the root, so `grand` is a real node
            self.set_color(path.grand, Color::Red);
            if self.side_of(path.grand, key) != self.side_of(path.parent, key) {
                trace!("Zig-zag at {}, rotating {} first", path.grand, path.parent);
                path.parent = self.rotate_toward(key, path.grand);
            }
            path.current = self.rotate_toward(key, path.great);
            self.set_color(path.current, Color::Black);
        }

        self.set_color(self.root, Color::Black);
    }

    /// Rotate the child of `above` that lies on `key`'s side, lifting that child's own child
    /// on `key`'s side. The lifted node is re-linked under `above` and returned.
    fn rotate_toward(&mut self, key: NodeId, above: NodeId) -> NodeId {
        let dir = self.side_of(above, key);
        let pivot = self.child(above, dir);
        let risen = self.rotate(pivot, !self.side_of(pivot, key));
        self.set_child(above, dir, risen);
        risen
    }
}
