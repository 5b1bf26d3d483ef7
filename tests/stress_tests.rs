//! Stress tests that push heap-ordered trees through large workloads
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

mod common;

use common::assert_invariants;
use heap_ordered_tree::{HeapTree, NodeId};

/// Insert many children into one node and pop them all back
#[test]
fn test_massive_operations() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(-1, -1.0).unwrap();

    for i in (0..1000).rev() {
        tree.add_child(root, i, i as f64).unwrap();
    }
    assert_eq!(tree.child_count(root), 1000);

    for i in 0..1000 {
        let child = tree.pop_min_child(root).unwrap();
        assert_eq!(tree.payload(child), Some(&i));
    }
    assert_eq!(tree.child_count(root), 0);
    assert_eq!(tree.len(), 1001);
}

/// Lower every child's priority below all others, in insertion order
#[test]
fn test_many_decreases() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(-1, -1.0).unwrap();
    let children: Vec<_> = (0..500)
        .map(|i| tree.add_child(root, i, 10_000.0 + i as f64).unwrap())
        .collect();

    for (i, &child) in children.iter().enumerate() {
        assert_eq!(tree.update_priority(child, i as f64), Ok(10_000.0 + i as f64));
    }
    assert_invariants(&tree);

    for i in 0..500 {
        let child = tree.pop_min_child(root).unwrap();
        assert_eq!(tree.payload(child), Some(&i));
    }
}

/// Interleave inserts with pops so the heap never fully drains
#[test]
fn test_alternating_ops() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(-1, -1.0).unwrap();
    let mut last = f64::NEG_INFINITY;

    for i in 0..200 {
        tree.add_child(root, i, (i * 2) as f64).unwrap();
        tree.add_child(root, i + 1000, (i * 2 + 1) as f64).unwrap();
        let popped = tree.pop_min_child(root).unwrap();
        let priority = tree.priority(popped).unwrap();
        assert!(priority >= last, "popped {priority} after {last}");
        last = priority;
    }
    assert_eq!(tree.child_count(root), 200);
    assert_invariants(&tree);
}

/// Remove children from arbitrary heap positions until none remain
#[test]
fn test_remove_from_every_position() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(-1, -1.0).unwrap();
    for i in 0..300 {
        tree.add_child(root, i, ((i * 7919) % 301) as f64).unwrap();
    }

    let mut position = 0usize;
    while tree.child_count(root) > 0 {
        position = (position + 37) % tree.child_count(root);
        let victim = tree.children(root)[position];
        tree.remove(victim).unwrap();
        assert_eq!(tree.parent(victim), None);
        assert_invariants(&tree);
    }
    assert_eq!(tree.roots().count(), 301);
}

/// Extreme and duplicate priorities still order correctly
#[test]
fn test_extreme_priorities() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(0, 0.0).unwrap();
    let priorities = [
        f64::INFINITY,
        f64::MAX,
        1e300,
        0.0,
        -0.0,
        f64::MIN_POSITIVE,
        -1e300,
        f64::MIN,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    ];
    for (i, &p) in priorities.iter().enumerate() {
        tree.add_child(root, i as i32, p).unwrap();
    }
    assert_invariants(&tree);

    let mut popped = Vec::new();
    while let Ok(child) = tree.pop_min_child(root) {
        popped.push(tree.priority(child).unwrap());
    }
    assert!(popped.windows(2).all(|w| w[0] <= w[1]), "{popped:?}");
    assert_eq!(popped.first(), Some(&f64::NEG_INFINITY));
    assert_eq!(popped.last(), Some(&f64::INFINITY));
}

/// A long chain exercises the iterative walks
#[test]
fn test_deep_chain() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(0, 0.0).unwrap();
    let mut tip = root;
    for i in 1..20_000 {
        tip = tree.add_child(tip, i, i as f64).unwrap();
    }
    assert_eq!(tree.root_of(tip), Some(root));
    assert_eq!(tree.subtree_len(root), 20_000);

    let middle = tree.children(root)[0];
    tree.remove(middle).unwrap();
    assert_eq!(tree.root_of(tip), Some(middle));
    assert_eq!(tree.take_subtree(middle).unwrap().len(), 19_999);
    assert_eq!(tree.len(), 1);
}

/// Attaching fresh leaves under an ever-deeper tip stays cheap
#[test]
fn test_deep_chain_of_attached_leaves() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(0, 0.0).unwrap();
    let mut tip = root;
    for i in 1..40_000 {
        let leaf = tree.create_root(i, i as f64).unwrap();
        tree.add_child_tree(tip, leaf).unwrap();
        tip = leaf;
    }
    assert_eq!(tree.roots().count(), 1);
    assert_eq!(tree.root_of(tip), Some(root));
    assert_eq!(tree.subtree_len(root), 40_000);
}

/// Best-first expansion: repeatedly take the cheapest frontier node off the
/// root, add its successors to the frontier, and park it on a chain of
/// expanded nodes.
#[test]
fn test_best_first_expansion() {
    let mut tree = HeapTree::new();
    let root = tree.create_root(0u64, 0.0).unwrap();
    tree.add_child(root, 1, 1.0).unwrap();
    let mut expanded: Vec<NodeId> = Vec::new();
    let mut costs = Vec::new();

    for _ in 0..1000 {
        let best = tree.pop_min_child(root).unwrap();
        let cost = tree.priority(best).unwrap();
        costs.push(cost);
        let label = *tree.payload(best).unwrap();

        // Two successors with strictly higher cost.
        for k in 1..=2u64 {
            let successor = tree.create_root(label * 2 + k, cost + k as f64).unwrap();
            tree.add_child_tree(root, successor).unwrap();
        }
        tree.add_child_tree(expanded.last().copied().unwrap_or(root), best)
            .unwrap();
        tree.update_priority(best, f64::INFINITY).unwrap();
        expanded.push(best);
    }

    // Expanded nodes form one chain hanging under the root.
    assert_eq!(tree.root_of(*expanded.last().unwrap()), Some(root));
    assert!(costs.windows(2).all(|w| w[0] <= w[1]), "costs must not decrease");
    assert_invariants(&tree);
}
