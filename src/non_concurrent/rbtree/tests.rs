use std::collections::BTreeSet;
use std::fmt::Debug;

use proptest::prelude::*;

use crate::error::RBTreeError;
use super::{Color, NodeRef, RBTree};


fn initialize_logging() {
    use simplelog::*;
    // another test may have installed it already
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// Walks the tree through `NodeRef` only and panics on any broken invariant.
/// Returns `(node count, black height, height)`.
fn check_invariants<T: Ord + Debug>(tree: &RBTree<T>) -> (usize, usize, usize) {
    fn walk<T: Ord + Debug>(node: Option<NodeRef<'_, T>>, lo: Option<&T>, hi: Option<&T>) -> (usize, usize, usize) {
        // the sentinel counts as one black node
        let Some(node) = node else { return (0, 1, 0) };
        let value = node.value();

        if let Some(lo) = lo { assert!(lo < value, "{value:?} sits right of {lo:?} but is not greater") }
        if let Some(hi) = hi { assert!(value < hi, "{value:?} sits left of {hi:?} but is not smaller") }

        if node.color() == Color::Red {
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert_eq!(child.color(), Color::Black, "red {value:?} has red child {:?}", child.value());
            }
        }

        let (left_count, left_black, left_height) = walk(node.left(), lo, Some(value));
        let (right_count, right_black, right_height) = walk(node.right(), Some(value), hi);
        assert_eq!(left_black, right_black, "black heights differ below {value:?}");

        (
            left_count + right_count + 1,
            left_black + (node.color() == Color::Black) as usize,
            left_height.max(right_height) + 1,
        )
    }

    if let Some(root) = tree.root() {
        assert_eq!(root.color(), Color::Black, "red root {:?}", root.value());
    }
    let (count, black_height, height) = walk(tree.root(), None, None);
    assert_eq!(count, tree.len());
    assert_eq!(height, tree.height());
    assert!(
        height as f64 <= 2.0 * ((count + 1) as f64).log2(),
        "height {height} too large for {count} nodes"
    );
    (count, black_height, height)
}

fn contents<T: Copy>(tree: &RBTree<T>) -> Vec<T> {
    tree.iter().copied().collect()
}

fn sample() -> RBTree<i32> {
    [20, 10, 30, 5, 15, 25, 35].into_iter().collect()
}


#[test]
fn empty_tree() {
    let tree = RBTree::<i32>::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.min(), Err(RBTreeError::EmptyTree));
    assert_eq!(tree.max(), Err(RBTreeError::EmptyTree));
    assert!(!tree.contains(&0));
    assert!(tree.root().is_none());
    assert_eq!(tree.height(), 0);
    check_invariants(&tree);
}

#[test]
fn ascending_triple_rotates_to_balanced() {
    initialize_logging();
    let mut tree = RBTree::new();
    for x in [10, 20, 30] {
        assert!(tree.insert(x));
        check_invariants(&tree);
    }

    let root = tree.root().unwrap();
    assert_eq!(*root.value(), 20);
    assert_eq!(root.color(), Color::Black);

    let (left, right) = (root.left().unwrap(), root.right().unwrap());
    assert_eq!((*left.value(), left.color()), (10, Color::Red));
    assert_eq!((*right.value(), right.color()), (30, Color::Red));
}

#[test]
fn zig_zag_double_rotates() {
    initialize_logging();
    for order in [[30, 10, 20], [10, 30, 20]] {
        let tree = order.into_iter().collect::<RBTree<_>>();
        check_invariants(&tree);

        let root = tree.root().unwrap();
        assert_eq!(*root.value(), 20);
        assert_eq!(root.left().map(|n| *n.value()), Some(10));
        assert_eq!(root.right().map(|n| *n.value()), Some(30));
    }
}

#[test]
fn remove_root_with_two_children() {
    initialize_logging();
    let mut tree = sample();
    check_invariants(&tree);

    assert!(tree.remove(&20));
    check_invariants(&tree);
    assert_eq!(contents(&tree), [5, 10, 15, 25, 30, 35]);
    assert_eq!(tree.root().map(|n| *n.value()), Some(25));
    assert!(!tree.contains(&20));
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut tree = sample();
    let before = tree.dfs_string();

    assert!(!tree.insert(15));
    assert_eq!(tree.len(), 7);
    // no restructuring either
    assert_eq!(tree.dfs_string(), before);

    let mut tree = RBTree::new();
    assert!(tree.insert("x"));
    assert!(!tree.insert("x"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn insert_then_remove_round_trip() {
    let mut tree = RBTree::new();
    assert!(tree.insert(42));
    assert!(tree.contains(&42));
    assert_eq!(tree.get(&42), Some(&42));

    assert!(tree.remove(&42));
    assert!(!tree.contains(&42));
    assert!(!tree.remove(&42));
    assert!(tree.is_empty());
    check_invariants(&tree);
}

#[test]
fn remove_absent_leaves_tree_alone() {
    let mut tree = sample();
    let before = tree.dfs_string();
    assert!(!tree.remove(&17));
    assert!(!RBTree::<i32>::new().remove(&1));
    assert_eq!(tree.dfs_string(), before);
}

#[test]
fn min_and_max() {
    let mut tree = sample();
    assert_eq!(tree.min(), Ok(&5));
    assert_eq!(tree.max(), Ok(&35));

    tree.remove(&5);
    tree.remove(&35);
    assert_eq!(tree.min(), Ok(&10));
    assert_eq!(tree.max(), Ok(&30));

    let solo = RBTree::with_value('q');
    assert_eq!(solo.min(), Ok(&'q'));
    assert_eq!(solo.max(), Ok(&'q'));
    check_invariants(&solo);
}

#[test]
fn clone_is_independent() {
    let tree = sample();
    let mut copy = tree.clone();
    assert_eq!(copy, tree);
    assert_eq!(copy.dfs_string(), tree.dfs_string());

    assert!(copy.insert(99));
    assert!(copy.remove(&10));
    assert!(!tree.contains(&99));
    assert!(tree.contains(&10));
    assert_ne!(copy, tree);
    check_invariants(&tree);
    check_invariants(&copy);
}

#[test]
fn clone_of_released_node_is_dangling() {
    let mut tree = sample();
    let leaf = tree.root().and_then(|root| root.left()).and_then(|n| n.left()).unwrap().id();

    // release a node behind the tree's back
    tree.nodes.retire(leaf).unwrap();

    assert_eq!(tree.try_clone().err(), Some(RBTreeError::DanglingReference(leaf)));
}

#[test]
#[should_panic(expected = "dangling node reference")]
fn remove_through_released_node_panics() {
    let mut tree = sample();
    let leaf = tree.root().and_then(|root| root.left()).and_then(|n| n.left()).unwrap().id();
    tree.nodes.retire(leaf).unwrap();

    // reaching a retired slot is a tree bug, never a silent `true`
    tree.remove(&5);
}

#[test]
fn test_logger_is_installed() {
    initialize_logging();
    assert!(log::log_enabled!(log::Level::Debug));
    assert!(!log::log_enabled!(log::Level::Trace));
}

#[test]
fn clear_is_idempotent() {
    initialize_logging();
    let mut tree = sample();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    tree.clear();
    assert!(tree.is_empty());

    // still usable afterwards
    tree.extend([3, 1, 2]);
    assert_eq!(contents(&tree), [1, 2, 3]);
    check_invariants(&tree);
}

#[test]
fn take_leaves_source_empty() {
    let mut tree = sample();
    let moved = tree.take();
    assert!(tree.is_empty());
    assert_eq!(moved.len(), 7);
    check_invariants(&moved);

    assert!(tree.insert(1));
    assert!(!moved.contains(&1));
}

#[test]
fn debug_and_equality() {
    let a = [3, 1, 2].into_iter().collect::<RBTree<_>>();
    let b = [1, 2, 3].into_iter().collect::<RBTree<_>>();
    assert_eq!(format!("{a:?}"), "{1, 2, 3}");
    // same elements, different insertion history
    assert_eq!(a, b);
    assert_eq!(RBTree::<u8>::default(), RBTree::with_capacity(16));
}

#[test]
fn removed_slots_are_reused() {
    let mut tree = RBTree::with_capacity(4);
    tree.extend(0..4);
    tree.remove(&1);
    tree.remove(&2);
    tree.insert(10);
    tree.insert(11);

    let mut ids = vec![];
    let mut stack = tree.root().into_iter().collect::<Vec<_>>();
    while let Some(node) = stack.pop() {
        ids.push(node.id());
        stack.extend(node.left());
        stack.extend(node.right());
    }
    ids.sort_by_key(|id| id.index());
    assert_eq!(ids.iter().map(|id| id.index()).collect::<Vec<_>>(), [0, 1, 2, 3]);
}

#[test]
fn sequential_bulk_operations() {
    initialize_logging();
    let mut tree = RBTree::new();
    for x in 0..1000 {
        assert!(tree.insert(x));
    }
    check_invariants(&tree);

    for x in (0..1000).step_by(2) {
        assert!(tree.remove(&x));
    }
    check_invariants(&tree);
    assert_eq!(contents(&tree), (1..1000).step_by(2).collect::<Vec<_>>());

    for x in (0..1000).rev() {
        assert_eq!(tree.remove(&x), x % 2 == 1);
        if x % 50 == 0 { check_invariants(&tree); }
    }
    assert!(tree.is_empty());
}


proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_btreeset_model(ops in prop::collection::vec((any::<bool>(), 0u8..128), 0..300)) {
        let mut tree = RBTree::new();
        let mut model = BTreeSet::new();

        for (insert, x) in ops {
            if insert {
                prop_assert_eq!(tree.insert(x), model.insert(x));
            } else {
                prop_assert_eq!(tree.remove(&x), model.remove(&x));
            }
            check_invariants(&tree);
            prop_assert_eq!(tree.len(), model.len());
        }

        prop_assert_eq!(contents(&tree), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.min().ok(), model.first());
        prop_assert_eq!(tree.max().ok(), model.last());
    }

    #[test]
    fn in_order_is_strictly_ascending(values in prop::collection::vec(any::<i32>(), 0..500)) {
        let tree = values.iter().copied().collect::<RBTree<_>>();
        let sorted = contents(&tree);
        prop_assert!(sorted.windows(2).all(|w| w[0] < w[1]));

        let mut in_order = vec![];
        tree.visit(super::Order::InOrder, |&v| in_order.push(v));
        prop_assert_eq!(in_order, sorted);
    }

    #[test]
    fn clone_survives_mutation(values in prop::collection::vec(0i16..1000, 1..200), extra in 1000i16..2000) {
        let tree = values.into_iter().collect::<RBTree<_>>();
        let mut copy = tree.clone();
        copy.insert(extra);
        let victim = *tree.min().unwrap();
        copy.remove(&victim);

        prop_assert!(!tree.contains(&extra));
        prop_assert!(tree.contains(&victim));
        check_invariants(&copy);
    }
}
