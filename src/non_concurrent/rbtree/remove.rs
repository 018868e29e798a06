use std::cmp::Ordering;

use log::{debug, trace};

use super::node::{Color, Dir, NodeId};
use super::RBTree;


/// The ancestors of the node being removed, each with the side the descent took from it.
type Path = Vec<(NodeId, Dir)>;

impl<T: Ord> RBTree<T> {
    /// Removes the element equal to `value`. Returns `false` if there was none.
    ///
    /// Complexity: O(log(n))
    pub fn remove(&mut self, value: &T) -> bool {
        let mut path = Path::new();
        let mut target = self.root;
        while target.is_real() {
            let dir = match value.cmp(&self.nodes[target].value) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => break,
            };
            path.push((target, dir));
            target = self.nodes[target][dir];
        }
        if target.is_nil() {
            return false
        }

        // with two children, trade places with the in-order successor, which has no left child
        let mut doomed = target;
        if self.nodes[target][Dir::Left].is_real() && self.nodes[target][Dir::Right].is_real() {
            path.push((target, Dir::Right));
            doomed = self.nodes[target][Dir::Right];
            while self.nodes[doomed][Dir::Left].is_real() {
                path.push((doomed, Dir::Left));
                doomed = self.nodes[doomed][Dir::Left];
            }
            trace!("Swapping {target} with successor {doomed}");
            self.nodes.swap_values(target, doomed);
        }

        let [left, right] = self.nodes[doomed].children;
        let replacement = if left.is_real() { left } else { right };
        self.relink(path.last().copied(), replacement);
        trace!("Spliced out {doomed}, {replacement} takes its place");

        // `doomed` was just read through a live link, so its slot is occupied
        let removed = match self.nodes.retire(doomed) {
            Ok(node) => node,
            Err(err) => unreachable!("{err} while removing"),
        };
        if removed.color == Color::Black {
            if self.color(replacement) == Color::Red {
                self.set_color(replacement, Color::Black);
            } else {
                self.fix_double_black(path);
            }
        }

        debug!("Removed {doomed}; tree now holds {} nodes", self.len());
        true
    }

    /// Restore black-height after a black node was spliced out below the last entry of `path`.
    ///
    /// The node on that side (possibly the sentinel) is one black short. Each round either
    /// settles the deficit locally or pushes it one level up.
    fn fix_double_black(&mut self, mut path: Path) {
        while let Some((parent, dir)) = path.pop() {
            // the deficient side is one black short, so the other side has at least one black node
            let mut sibling = self.nodes[parent][!dir];

            if self.color(sibling) == Color::Red {
                trace!("Red sibling {sibling}, rotating {parent} {dir:?}");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                let risen = self.rotate(parent, dir);
                self.relink(path.last().copied(), risen);
                path.push((risen, dir));
                sibling = self.nodes[parent][!dir];
            }

            let near = self.child(sibling, dir);
            let far = self.child(sibling, !dir);

            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                self.set_color(sibling, Color::Red);
                if self.color(parent) == Color::Red {
                    self.set_color(parent, Color::Black);
                    break
                }
                trace!("Pushing black deficit up from {parent}");
                continue
            }

            if self.color(far) == Color::Black {
                trace!("Near nephew {near} red, rotating sibling {sibling}");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                sibling = self.rotate(sibling, !dir);
                self.set_child(parent, !dir, sibling);
            }

            trace!("Far nephew red, rotating {parent} {dir:?}");
            self.set_color(sibling, self.color(parent));
            self.set_color(parent, Color::Black);
            let far = self.child(sibling, !dir);
            self.set_color(far, Color::Black);
            let risen = self.rotate(parent, dir);
            self.relink(path.last().copied(), risen);
            break
        }

        self.set_color(self.root, Color::Black);
    }

    /// Hang `child` where the last descent step pointed, or at the root if there was none.
    fn relink(&mut self, link: Option<(NodeId, Dir)>, child: NodeId) {
        match link {
            Some((parent, dir)) => self.set_child(parent, dir, child),
            None => self.root = child,
        }
    }
}
