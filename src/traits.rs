//! Common traits and the error type for heap-ordered trees
//!
//! - [`TreeError`]: every precondition violation a tree operation can report
//! - [`Prioritized`]: optional capability for payloads that carry their own priority
//!
//! Priorities are explicit `f64` arguments throughout the crate. [`Prioritized`]
//! exists for callers whose payload already knows its ordering key; the tree
//! reads it once at insertion and stores it separately from the payload.

use std::fmt;

/// Error type for tree operations
///
/// Every operation that returns one of these leaves the tree unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The node id does not refer to a live node (it was taken out of the tree)
    InvalidNode,
    /// The node has no parent, so there is no sibling heap to remove it from
    NotAttached,
    /// The node has no children to pop
    NoChildren,
    /// The node already has a parent, or appears twice in one batch
    AlreadyAttached,
    /// Attaching the node would make it its own ancestor
    WouldCycle,
    /// The priority is NaN and cannot be ordered
    InvalidPriority,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidNode => write!(f, "node id does not refer to a live node"),
            TreeError::NotAttached => write!(f, "node has no parent"),
            TreeError::NoChildren => write!(f, "node has no children"),
            TreeError::AlreadyAttached => write!(f, "node is already attached to a parent"),
            TreeError::WouldCycle => {
                write!(f, "attaching the node would make it its own ancestor")
            }
            TreeError::InvalidPriority => write!(f, "priority is NaN"),
        }
    }
}

impl std::error::Error for TreeError {}

/// A payload that knows its own priority
///
/// Used by [`HeapTree::add_prioritized_child`](crate::HeapTree::add_prioritized_child)
/// and [`HeapTree::create_prioritized_root`](crate::HeapTree::create_prioritized_root).
/// The priority is read once when the node is created; later changes to the
/// payload do not move it. Call
/// [`HeapTree::update_priority`](crate::HeapTree::update_priority) for that.
///
/// # Example
///
/// ```rust
/// use heap_ordered_tree::{HeapTree, Prioritized};
///
/// struct Move {
///     score: f64,
/// }
///
/// impl Prioritized for Move {
///     fn priority(&self) -> f64 {
///         -self.score
///     }
/// }
///
/// let mut tree = HeapTree::new();
/// let root = tree.create_prioritized_root(Move { score: 0.0 }).unwrap();
/// tree.add_prioritized_child(root, Move { score: 3.0 }).unwrap();
/// let best = tree.add_prioritized_child(root, Move { score: 9.0 }).unwrap();
/// assert_eq!(tree.min_child(root), Some(best));
/// ```
pub trait Prioritized {
    /// Returns the value used for min-heap ordering
    fn priority(&self) -> f64;
}
