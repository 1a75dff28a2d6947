//! Indexed binary heap with in-place priority changes.
//!
//! Entries live in a binary-heap array; a side table maps every live item to
//! its current array slot so that [`IndexedHeap::change_priority`] can find
//! an entry in O(1) before sifting it. Each item may be present at most once.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

/// Which end of the priority order [`IndexedHeap::poll`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Smallest priority first.
    #[default]
    Min,
    /// Largest priority first.
    Max,
}

/// Contract violations reported by [`IndexedHeap`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("item is already in the heap")]
    Duplicate,

    #[error("item is not in the heap")]
    Missing,
}

#[derive(Debug, Clone)]
struct Entry<T, P> {
    item: T,
    priority: P,
}

/// A min- or max-ordered priority queue supporting priority changes.
///
/// `insert`, `poll` and `change_priority` are O(log n); `peek`, `len`,
/// `contains` and `priority` are O(1). Ties between equal priorities are
/// broken arbitrarily.
#[derive(Debug, Clone)]
pub struct IndexedHeap<T, P> {
    order: Order,
    entries: Vec<Entry<T, P>>,
    index: HashMap<T, usize>,
}

impl<T, P> IndexedHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Ord,
{
    /// Create an empty heap with the given order.
    pub fn new(order: Order) -> Self {
        Self {
            order,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty min-heap.
    pub fn min() -> Self {
        Self::new(Order::Min)
    }

    /// Create an empty max-heap.
    pub fn max() -> Self {
        Self::new(Order::Max)
    }

    /// The order chosen at construction.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of live items.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `item` is currently in the heap.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Current priority of `item`, if present.
    pub fn priority(&self, item: &T) -> Option<&P> {
        self.index.get(item).map(|&i| &self.entries[i].priority)
    }

    /// The item that [`poll`](Self::poll) would return, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.entries.first().map(|e| &e.item)
    }

    /// Like [`peek`](Self::peek), also returning the priority.
    #[inline]
    pub fn peek_with_priority(&self) -> Option<(&T, &P)> {
        self.entries.first().map(|e| (&e.item, &e.priority))
    }

    /// Add `item` with `priority`.
    ///
    /// Fails with [`HeapError::Duplicate`] if `item` is already present.
    pub fn insert(&mut self, item: T, priority: P) -> Result<(), HeapError> {
        if self.index.contains_key(&item) {
            return Err(HeapError::Duplicate);
        }
        let pos = self.entries.len();
        self.index.insert(item.clone(), pos);
        self.entries.push(Entry { item, priority });
        self.sift_up(pos);
        Ok(())
    }

    /// Remove and return the item with the extreme priority.
    pub fn poll(&mut self) -> Option<T> {
        self.poll_with_priority().map(|(item, _)| item)
    }

    /// Like [`poll`](Self::poll), also returning the priority.
    pub fn poll_with_priority(&mut self) -> Option<(T, P)> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(0, last);
        let Entry { item, priority } = self.entries.pop()?;
        self.index.remove(&item);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((item, priority))
    }

    /// Replace the priority of a present `item`.
    ///
    /// Works in both directions: the entry is sifted towards the root when
    /// the new priority comes earlier in the heap order, towards the leaves
    /// otherwise. Fails with [`HeapError::Missing`] if `item` is absent.
    pub fn change_priority(&mut self, item: &T, priority: P) -> Result<(), HeapError> {
        let pos = *self.index.get(item).ok_or(HeapError::Missing)?;
        let old = std::mem::replace(&mut self.entries[pos].priority, priority);
        if self.precedes(&self.entries[pos].priority, &old) {
            self.sift_up(pos);
        } else {
            self.sift_down(pos);
        }
        Ok(())
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Consume the heap, returning its items in poll order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(item) = self.poll() {
            out.push(item);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    /// Whether priority `a` must sit above `b` in this heap's order.
    #[inline]
    fn precedes(&self, a: &P, b: &P) -> bool {
        match self.order {
            Order::Min => a < b,
            Order::Max => a > b,
        }
    }

    #[inline]
    fn before(&self, i: usize, j: usize) -> bool {
        self.precedes(&self.entries[i].priority, &self.entries[j].priority)
    }

    /// Swap two slots and keep the index in step.
    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.entries.swap(i, j);
        if let Some(slot) = self.index.get_mut(&self.entries[i].item) {
            *slot = i;
        }
        if let Some(slot) = self.index.get_mut(&self.entries[j].item) {
            *slot = j;
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.before(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;
            if left < len && self.before(left, best) {
                best = left;
            }
            if right < len && self.before(right, best) {
                best = right;
            }
            if best == i {
                break;
            }
            self.swap(i, best);
            i = best;
        }
    }
}

impl<T, P> Default for IndexedHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Ord,
{
    fn default() -> Self {
        Self::min()
    }
}
