//! Heap-Ordered Trees for Rust
//!
//! This crate provides a generic tree in which every node's direct children
//! are kept as a binary min-heap keyed by an `f64` priority. Each level of
//! the tree is an independent priority queue, which suits algorithms that
//! expand a search space best-first while keeping the hierarchy of what they
//! explored (game-tree search, branch-and-bound, incremental expansion).
//!
//! # Features
//!
//! - **O(1)** parent lookup and minimum-child lookup from any node
//! - **O(log c)** insert, pop-minimum, priority update, and removal of an
//!   arbitrary node among its c siblings, via each node's cached heap index
//! - **O(k)** construction of a node from k pre-built subtrees
//! - Detached nodes keep their subtrees and can be re-attached anywhere
//! - Optional `tracing` feature for structural-change events
//!
//! # Example
//!
//! ```rust
//! use heap_ordered_tree::HeapTree;
//!
//! let mut tree = HeapTree::new();
//! let children = (1..=5)
//!     .rev()
//!     .map(|v| tree.create_root(v, v as f64))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! let root = tree.create_with_children(0, 0.0, children).unwrap();
//!
//! let mut order = Vec::new();
//! while let Ok(child) = tree.pop_min_child(root) {
//!     order.push(*tree.payload(child).unwrap());
//! }
//! assert_eq!(order, vec![1, 2, 3, 4, 5]);
//! ```

mod tracing_helpers;

mod heap;
mod priority;
pub mod traits;
pub mod tree;

pub use traits::{Prioritized, TreeError};
pub use tree::{HeapTree, NodeId};
