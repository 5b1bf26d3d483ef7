//! Array-heap primitives with self-tracking indices
//!
//! These are the binary min-heap building blocks used on every node's
//! children. Unlike [`std::collections::BinaryHeap`], the heap array holds
//! keys into separate slot storage: priorities are read through
//! [`HeapSlots::priority`], and every time an element moves, its new position
//! is written back through [`HeapSlots::set_heap_index`]. A node therefore
//! always knows where it lives in its parent's heap, which turns
//! "find this node, then repair" from O(n) into O(log n).
//!
//! ```text
//!                 0
//!         1               2
//!     3       4       5       6
//!   7   8   9  10  11  12  13  14
//! ```
//!
//! Parent of `j` is `(j - 1) / 2`; children of `i` are `2i + 1` and `2i + 2`.
//!
//! All comparisons use strict `<`, so equal priorities never swap and no
//! ordering among ties is guaranteed.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `init`    | O(n)       |
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `remove`  | O(log n)   |
//! | `fix`     | O(log n)   |

/// Slot storage seen by the heap primitives
///
/// Implemented by the tree's node arena; the primitives never touch payloads.
pub(crate) trait HeapSlots {
    /// Key stored in the heap array
    type Key: Copy;

    /// Returns the ordering priority of the slot
    fn priority(&self, key: Self::Key) -> f64;

    /// Records the slot's current position in the heap array
    fn set_heap_index(&mut self, key: Self::Key, index: usize);
}

#[inline]
fn less<S: HeapSlots>(slots: &S, h: &[S::Key], i: usize, j: usize) -> bool {
    slots.priority(h[i]) < slots.priority(h[j])
}

#[inline]
fn swap<S: HeapSlots>(slots: &mut S, h: &mut [S::Key], i: usize, j: usize) {
    h.swap(i, j);
    slots.set_heap_index(h[i], i);
    slots.set_heap_index(h[j], j);
}

/// Restores the heap property over an arbitrary sequence in O(n)
///
/// Every element's index is stamped first, so this is safe to call on a
/// sequence assembled from scratch.
pub(crate) fn init<S: HeapSlots>(slots: &mut S, h: &mut [S::Key]) {
    for (i, &key) in h.iter().enumerate() {
        slots.set_heap_index(key, i);
    }
    let n = h.len();
    for i in (0..n / 2).rev() {
        down(slots, h, i, n);
    }
}

/// Appends `key` and sifts it up to its place
pub(crate) fn push<S: HeapSlots>(slots: &mut S, h: &mut Vec<S::Key>, key: S::Key) {
    let index = h.len();
    h.push(key);
    slots.set_heap_index(key, index);
    up(slots, h, index);
}

/// Removes and returns the minimum element, or `None` if the heap is empty
pub(crate) fn pop<S: HeapSlots>(slots: &mut S, h: &mut Vec<S::Key>) -> Option<S::Key> {
    if h.is_empty() {
        return None;
    }
    let n = h.len() - 1;
    swap(slots, h, 0, n);
    down(slots, h, 0, n);
    h.pop()
}

/// Removes and returns the element at index `i`
///
/// The replacement taken from the end may belong above or below `i`, so a
/// sift-down is tried first and a sift-up only if it did nothing.
///
/// # Panics
/// If `i` is out of bounds.
pub(crate) fn remove<S: HeapSlots>(slots: &mut S, h: &mut Vec<S::Key>, i: usize) -> S::Key {
    let n = h.len() - 1;
    if n != i {
        swap(slots, h, i, n);
        if !down(slots, h, i, n) {
            up(slots, h, i);
        }
    }
    h.swap_remove(n)
}

/// Repairs the heap after the priority at index `i` changed in place
pub(crate) fn fix<S: HeapSlots>(slots: &mut S, h: &mut [S::Key], i: usize) {
    if !down(slots, h, i, h.len()) {
        up(slots, h, i);
    }
}

/// Moves the element at `j` toward the root while it is strictly smaller than its parent
pub(crate) fn up<S: HeapSlots>(slots: &mut S, h: &mut [S::Key], mut j: usize) {
    while j > 0 {
        let parent = (j - 1) / 2;
        if !less(slots, h, j, parent) {
            break;
        }
        swap(slots, h, parent, j);
        j = parent;
    }
}

/// Moves the element at `i0` toward the leaves of `h[..n]`
///
/// Returns whether the element moved.
pub(crate) fn down<S: HeapSlots>(slots: &mut S, h: &mut [S::Key], i0: usize, n: usize) -> bool {
    let mut i = i0;
    loop {
        // Overflowed child index means no such child.
        let Some(left) = i.checked_mul(2).and_then(|x| x.checked_add(1)) else {
            break;
        };
        if left >= n {
            break;
        }
        let mut smallest = left;
        if let Some(right) = left.checked_add(1) {
            if right < n && less(slots, h, right, left) {
                smallest = right;
            }
        }
        if !less(slots, h, smallest, i) {
            break;
        }
        swap(slots, h, i, smallest);
        i = smallest;
    }
    i > i0
}
