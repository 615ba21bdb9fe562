//! Binary min-heap keyed by a numeric priority.
//!
//! There is no decrease-key. Callers push a node again when its priority
//! improves and discard stale entries when they are popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry. Ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// priority first, and among equal priorities the earliest push first.
#[derive(Debug, Clone)]
struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-priority queue with deterministic FIFO tie-breaking.
///
/// # Examples
///
/// ```
/// use city_router::search::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.push(5.0, "far");
/// queue.push(1.0, "near");
/// queue.push(1.0, "also near");
///
/// assert_eq!(queue.pop(), Some((1.0, "near")));
/// assert_eq!(queue.pop(), Some((1.0, "also near")));
/// assert_eq!(queue.pop(), Some((5.0, "far")));
/// assert_eq!(queue.pop(), None);
/// ```
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Insert an item. O(log n).
    pub fn push(&mut self, priority: f64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    /// Remove and return the item with the smallest priority. O(log n).
    pub fn pop(&mut self) -> Option<(f64, T)> {
        self.heap.pop().map(|e| (e.priority, e.item))
    }

    /// Smallest priority currently queued.
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.priority)
    }

    /// Iterate over queued items in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|e| &e.item)
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue() {
        let mut q: PriorityQueue<u32> = PriorityQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.peek_priority(), None);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn pops_in_priority_order() {
        let mut q = PriorityQueue::new();
        for (p, item) in [(3.0, 'c'), (1.0, 'a'), (4.0, 'd'), (2.0, 'b')] {
            q.push(p, item);
        }
        assert_eq!(q.peek_priority(), Some(1.0));

        let order: Vec<char> = std::iter::from_fn(|| q.pop().map(|(_, c)| c)).collect();
        assert_eq!(order, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut q = PriorityQueue::new();
        for item in 0..10 {
            q.push(7.0, item);
        }
        let order: Vec<i32> = std::iter::from_fn(|| q.pop().map(|(_, i)| i)).collect();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut q = PriorityQueue::new();
        q.push(5.0, "x");
        q.push(2.0, "x");
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some((2.0, "x")));
        assert_eq!(q.pop(), Some((5.0, "x")));
    }

    #[test]
    fn items_lists_everything() {
        let mut q = PriorityQueue::new();
        q.push(1.0, 10);
        q.push(0.5, 20);
        let mut items: Vec<i32> = q.items().copied().collect();
        items.sort();
        assert_eq!(items, vec![10, 20]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pops_sorted_and_stable(priorities in prop::collection::vec(0u32..50, 0..200)) {
            let mut q = PriorityQueue::new();
            for (i, p) in priorities.iter().enumerate() {
                q.push(f64::from(*p), i);
            }

            let mut popped = Vec::new();
            while let Some((p, i)) = q.pop() {
                popped.push((p, i));
            }

            prop_assert_eq!(popped.len(), priorities.len());
            for window in popped.windows(2) {
                let (p1, i1) = window[0];
                let (p2, i2) = window[1];
                prop_assert!(p1 < p2 || (p1 == p2 && i1 < i2));
            }
        }

        #[test]
        fn same_ops_same_order(priorities in prop::collection::vec(0.0f64..100.0, 0..100)) {
            let drain = |ps: &[f64]| {
                let mut q = PriorityQueue::new();
                for (i, p) in ps.iter().enumerate() {
                    q.push(*p, i);
                }
                std::iter::from_fn(|| q.pop().map(|(_, i)| i)).collect::<Vec<_>>()
            };
            prop_assert_eq!(drain(&priorities), drain(&priorities));
        }
    }
}
