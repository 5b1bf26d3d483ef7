//! Shared test utilities: structural invariant checks and tracing setup.
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... build a tree ...
//!     common::assert_invariants(&tree);
//! }
//! ```
//!
//! Set `RUST_LOG=heap_ordered_tree=trace` and build with `--features tracing`
//! to see the crate's structural events in test output.

#![allow(dead_code)]

use std::sync::Once;

use heap_ordered_tree::{HeapTree, NodeId};
use rustc_hash::FxHashSet;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Checks every structural invariant of the whole arena:
///
/// - each child slot is no smaller than its heap parent slot
/// - `children(parent(n))[heap_index(n)] == n` for every attached node
/// - roots report heap index 0
/// - every node is reachable from exactly one root (no cycles, no sharing)
pub fn assert_invariants<T>(tree: &HeapTree<T>) {
    let mut seen = FxHashSet::default();
    for root in tree.roots() {
        assert_eq!(tree.heap_index(root), Some(0), "root {root:?} has a stale heap index");
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            assert!(seen.insert(node), "node {node:?} reached twice");
            let children = tree.children(node);
            for (i, &child) in children.iter().enumerate() {
                assert_eq!(tree.parent(child), Some(node), "parent link of {child:?}");
                assert_eq!(tree.heap_index(child), Some(i), "heap index of {child:?}");
                if i > 0 {
                    let above = children[(i - 1) / 2];
                    assert!(
                        tree.priority(above) <= tree.priority(child),
                        "heap property violated under {node:?} at slot {i}"
                    );
                }
            }
            assert_eq!(tree.min_child(node), children.first().copied());
            assert_eq!(tree.child_count(node), children.len());
            stack.extend_from_slice(children);
        }
    }
    assert_eq!(seen.len(), tree.len(), "some nodes are unreachable from any root");
}

/// Priorities of `id`'s children in the order they pop, leaving the tree intact.
pub fn pop_order<T: Clone>(tree: &HeapTree<T>, id: NodeId) -> Vec<f64> {
    let mut scratch = tree.clone();
    let mut order = Vec::new();
    while let Ok(child) = scratch.pop_min_child(id) {
        order.push(scratch.priority(child).unwrap_or(f64::NAN));
    }
    order
}
