//! Heap-ordered tree
//!
//! A tree in which every node's children form a binary min-heap by priority,
//! independently at every level. Each node supports both tree operations
//! (parent/child navigation, insertion anywhere) and priority-queue
//! operations on its children (insert, extract-min, update, remove).
//!
//! Nodes live in an arena owned by [`HeapTree`] and are addressed by
//! generational [`NodeId`] keys. The parent link is a key, so the only owning
//! edge is arena → node and no reference cycles can form. An arena may hold
//! several roots: every node detached by [`HeapTree::remove`] or
//! [`HeapTree::pop_min_child`] becomes one, with its subtree intact.
//!
//! Each node caches its position in its parent's heap array,
//! so updating or removing a node by id costs O(log c) for c siblings rather
//! than a scan.
//!
//! # Time Complexity
//!
//! | Operation              | Complexity |
//! |------------------------|------------|
//! | `create_root`          | O(1)       |
//! | `create_with_children` | O(k)       |
//! | `add_child`            | O(log c)   |
//! | `min_child`            | O(1)       |
//! | `update_priority`      | O(log c)   |
//! | `remove`               | O(log c)   |
//! | `pop_min_child`        | O(log c)   |
//! | `add_child_tree`       | O(log c), plus O(depth) for a non-leaf subtree |
//!
//! # Example
//!
//! ```rust
//! use heap_ordered_tree::HeapTree;
//!
//! let mut tree = HeapTree::new();
//! let root = tree.create_root("root", 0.0).unwrap();
//! let far = tree.add_child(root, "far", 9.0).unwrap();
//! let near = tree.add_child(root, "near", 2.0).unwrap();
//! tree.add_child(near, "nearer", 1.0).unwrap();
//!
//! assert_eq!(tree.min_child(root), Some(near));
//! tree.update_priority(far, 1.0).unwrap();
//! assert_eq!(tree.min_child(root), Some(far));
//!
//! let best = tree.pop_min_child(root).unwrap();
//! assert_eq!(tree.payload(best), Some(&"far"));
//! assert_eq!(tree.parent(best), None);
//! ```

use std::mem;

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::heap::{self, HeapSlots};
use crate::priority::Priority;
use crate::tracing_helpers::{debug_log, trace_log};
use crate::traits::{Prioritized, TreeError};

new_key_type! {
    /// Identifies a node within a [`HeapTree`]
    ///
    /// Ids are generational: once a node is taken out of the tree with
    /// [`HeapTree::take_subtree`], its id never refers to another node.
    ///
    /// An id is only meaningful for the arena that issued it. Ids carry no
    /// arena tag, so an id from another `HeapTree` whose slot and version
    /// happen to match a live node here is accepted as that node.
    pub struct NodeId;
}

#[derive(Debug, Clone)]
struct Node<T> {
    payload: T,
    priority: Priority,
    parent: Option<NodeId>,
    /// Binary min-heap of child ids
    children: Vec<NodeId>,
    /// Position in the parent's `children`; 0 when detached
    heap_index: usize,
}

type Nodes<T> = SlotMap<NodeId, Node<T>>;

impl<T> HeapSlots for Nodes<T> {
    type Key = NodeId;

    #[inline]
    fn priority(&self, key: NodeId) -> f64 {
        self[key].priority.get()
    }

    #[inline]
    fn set_heap_index(&mut self, key: NodeId, index: usize) {
        self[key].heap_index = index;
    }
}

/// An arena of heap-ordered trees
///
/// See the [module documentation](self) for the model. Accessors such as
/// [`child_count`](Self::child_count) and [`parent`](Self::parent) accept an
/// absent node and return a neutral default, so recursive traversals can
/// bottom out naturally. Mutators report misuse as a [`TreeError`] and leave
/// the tree untouched.
#[derive(Debug, Clone)]
pub struct HeapTree<T> {
    nodes: Nodes<T>,
}

impl<T> HeapTree<T> {
    /// Creates an empty tree arena
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Creates an empty tree arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Returns the number of nodes across all trees in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterates over every parentless node, in no particular order
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Creates a new root node without children
    ///
    /// # Errors
    /// `InvalidPriority` if `priority` is NaN.
    pub fn create_root(&mut self, payload: T, priority: f64) -> Result<NodeId, TreeError> {
        let priority = Priority::new(priority)?;
        Ok(self.alloc(payload, priority))
    }

    /// Creates a new root node adopting already-built subtrees as children
    ///
    /// The children are heapified once, which is O(k) rather than the
    /// O(k log k) of adding them one by one.
    ///
    /// # Errors
    /// - `InvalidPriority` if `priority` is NaN
    /// - `InvalidNode` if a child id is not live
    /// - `AlreadyAttached` if a child has a parent or appears twice
    pub fn create_with_children<I>(
        &mut self,
        payload: T,
        priority: f64,
        children: I,
    ) -> Result<NodeId, TreeError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let priority = Priority::new(priority)?;
        let mut children: Vec<NodeId> = children.into_iter().collect();

        let mut seen = FxHashSet::default();
        seen.reserve(children.len());
        for &child in &children {
            if self.node(child)?.parent.is_some() || !seen.insert(child) {
                return Err(TreeError::AlreadyAttached);
            }
        }

        let id = self.alloc(payload, priority);
        for &child in &children {
            self.nodes[child].parent = Some(id);
        }
        heap::init(&mut self.nodes, children.as_mut_slice());
        debug_log!(node = ?id, children = children.len(), "heapified initial children");
        self.nodes[id].children = children;
        Ok(id)
    }

    /// Creates a new child of `parent` and places it in the parent's heap
    ///
    /// # Errors
    /// - `InvalidPriority` if `priority` is NaN
    /// - `InvalidNode` if `parent` is not live
    pub fn add_child(
        &mut self,
        parent: NodeId,
        payload: T,
        priority: f64,
    ) -> Result<NodeId, TreeError> {
        let priority = Priority::new(priority)?;
        self.node(parent)?;
        let id = self.alloc(payload, priority);
        self.attach(parent, id);
        Ok(id)
    }

    /// Attaches the detached subtree rooted at `child` under `parent`
    ///
    /// # Errors
    /// - `InvalidNode` if either id is not live
    /// - `AlreadyAttached` if `child` has a parent
    /// - `WouldCycle` if `child` is the root of `parent`'s tree
    ///
    /// Attaching a childless node costs O(log c). A child that has children of
    /// its own could be an ancestor of `parent`, so that case also walks from
    /// `parent` up to its root.
    pub fn add_child_tree(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.node(parent)?;
        let subtree = self.node(child)?;
        if subtree.parent.is_some() {
            return Err(TreeError::AlreadyAttached);
        }
        // A detached node can only be an ancestor of `parent` as its root, and
        // a detached leaf only of itself.
        let would_cycle = if subtree.children.is_empty() {
            parent == child
        } else {
            self.root_of(parent) == Some(child)
        };
        if would_cycle {
            return Err(TreeError::WouldCycle);
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Returns the child with the minimum priority without removing it
    ///
    /// Returns `None` for a childless or absent node.
    pub fn min_child(&self, id: impl Into<Option<NodeId>>) -> Option<NodeId> {
        self.get(id)?.children.first().copied()
    }

    /// Returns the number of direct children, or 0 for an absent node
    pub fn child_count(&self, id: impl Into<Option<NodeId>>) -> usize {
        self.get(id).map_or(0, |node| node.children.len())
    }

    /// Returns the parent, or `None` for a root or absent node
    pub fn parent(&self, id: impl Into<Option<NodeId>>) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Returns the children in heap-array order
    ///
    /// Only the first entry is guaranteed to be the minimum. Empty for an
    /// absent node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    /// Returns the payload of a live node
    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.payload)
    }

    /// Returns the payload of a live node for in-place mutation
    ///
    /// The priority is stored separately, so this never disturbs heap order.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.payload)
    }

    /// Returns the priority of a live node
    pub fn priority(&self, id: NodeId) -> Option<f64> {
        self.nodes.get(id).map(|node| node.priority.get())
    }

    /// Returns the node's position in its parent's heap (0 for a root)
    pub fn heap_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id).map(|node| node.heap_index)
    }

    /// Returns the root of the tree containing `id`
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        let mut node = self.nodes.get(current)?;
        while let Some(parent) = node.parent {
            current = parent;
            node = &self.nodes[parent];
        }
        Some(current)
    }

    /// Counts `id` and all of its descendants, or 0 for an absent node
    pub fn subtree_len(&self, id: NodeId) -> usize {
        if !self.nodes.contains_key(id) {
            return 0;
        }
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        stack.push(id);
        let mut count = 0;
        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend_from_slice(&self.nodes[current].children);
        }
        count
    }

    /// Changes a node's priority and repairs its parent's heap
    ///
    /// Returns the old priority. A root's priority is not constrained by
    /// anything, so no heap work happens for it.
    ///
    /// # Errors
    /// - `InvalidPriority` if `priority` is NaN
    /// - `InvalidNode` if `id` is not live
    pub fn update_priority(&mut self, id: NodeId, priority: f64) -> Result<f64, TreeError> {
        let priority = Priority::new(priority)?;
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidNode)?;
        let old = mem::replace(&mut node.priority, priority);
        self.fix(id);
        Ok(old.get())
    }

    /// Replaces a node's payload and priority together, repairing the heap
    ///
    /// Returns the old payload and priority.
    ///
    /// # Errors
    /// - `InvalidPriority` if `priority` is NaN
    /// - `InvalidNode` if `id` is not live
    pub fn replace(
        &mut self,
        id: NodeId,
        payload: T,
        priority: f64,
    ) -> Result<(T, f64), TreeError> {
        let priority = Priority::new(priority)?;
        let node = self.nodes.get_mut(id).ok_or(TreeError::InvalidNode)?;
        let old_payload = mem::replace(&mut node.payload, payload);
        let old_priority = mem::replace(&mut node.priority, priority);
        self.fix(id);
        Ok((old_payload, old_priority.get()))
    }

    /// Detaches a node from its parent's heap
    ///
    /// The node becomes a root; its own subtree is untouched.
    ///
    /// # Errors
    /// - `InvalidNode` if `id` is not live
    /// - `NotAttached` if the node is already a root
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.node(id)?;
        let parent = node.parent.ok_or(TreeError::NotAttached)?;
        let index = node.heap_index;
        let removed = self.with_children(parent, |nodes, h| heap::remove(nodes, h, index));
        debug_assert_eq!(removed, id, "heap_index out of sync");
        self.unlink(id);
        trace_log!(node = ?id, parent = ?parent, "removed from parent heap");
        Ok(())
    }

    /// Detaches and returns the minimum-priority child
    ///
    /// # Errors
    /// - `InvalidNode` if `id` is not live
    /// - `NoChildren` if the node has no children
    pub fn pop_min_child(&mut self, id: NodeId) -> Result<NodeId, TreeError> {
        self.node(id)?;
        let child = self
            .with_children(id, |nodes, h| heap::pop(nodes, h))
            .ok_or(TreeError::NoChildren)?;
        self.unlink(child);
        trace_log!(node = ?child, parent = ?id, "popped min child");
        Ok(child)
    }

    /// Takes a detached subtree out of the arena
    ///
    /// Returns the payloads in pre-order (each node before its children,
    /// children in heap-array order). Every id in the subtree goes stale.
    ///
    /// # Errors
    /// - `InvalidNode` if `id` is not live
    /// - `AlreadyAttached` if the node has a parent; detach it first
    pub fn take_subtree(&mut self, id: NodeId) -> Result<Vec<T>, TreeError> {
        if self.node(id)?.parent.is_some() {
            return Err(TreeError::AlreadyAttached);
        }
        let mut payloads = Vec::new();
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children.into_iter().rev());
                payloads.push(node.payload);
            }
        }
        debug_log!(node = ?id, taken = payloads.len(), "took subtree");
        Ok(payloads)
    }

    fn get(&self, id: impl Into<Option<NodeId>>) -> Option<&Node<T>> {
        id.into().and_then(|id| self.nodes.get(id))
    }

    fn node(&self, id: NodeId) -> Result<&Node<T>, TreeError> {
        self.nodes.get(id).ok_or(TreeError::InvalidNode)
    }

    fn alloc(&mut self, payload: T, priority: Priority) -> NodeId {
        self.nodes.insert(Node {
            payload,
            priority,
            parent: None,
            children: Vec::new(),
            heap_index: 0,
        })
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.with_children(parent, |nodes, h| heap::push(nodes, h, child));
        trace_log!(
            node = ?child,
            parent = ?parent,
            heap_index = self.nodes[child].heap_index,
            "attached"
        );
    }

    fn unlink(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        node.parent = None;
        node.heap_index = 0;
    }

    /// Repairs the parent's heap after `id`'s priority changed in place
    fn fix(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        if let Some(parent) = node.parent {
            let index = node.heap_index;
            self.with_children(parent, |nodes, h| heap::fix(nodes, h.as_mut_slice(), index));
        }
    }

    /// Runs `f` on `parent`'s child heap with the rest of the arena available
    fn with_children<R>(
        &mut self,
        parent: NodeId,
        f: impl FnOnce(&mut Nodes<T>, &mut Vec<NodeId>) -> R,
    ) -> R {
        let mut children = mem::take(&mut self.nodes[parent].children);
        let result = f(&mut self.nodes, &mut children);
        self.nodes[parent].children = children;
        result
    }
}

impl<T: Prioritized> HeapTree<T> {
    /// Creates a new root node, reading its priority from the payload
    ///
    /// # Errors
    /// `InvalidPriority` if the payload reports NaN.
    pub fn create_prioritized_root(&mut self, payload: T) -> Result<NodeId, TreeError> {
        let priority = payload.priority();
        self.create_root(payload, priority)
    }

    /// Creates a new child of `parent`, reading its priority from the payload
    ///
    /// # Errors
    /// Same as [`add_child`](Self::add_child).
    pub fn add_prioritized_child(
        &mut self,
        parent: NodeId,
        payload: T,
    ) -> Result<NodeId, TreeError> {
        let priority = payload.priority();
        self.add_child(parent, payload, priority)
    }
}

impl<T> Default for HeapTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
