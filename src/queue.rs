//! Binary min-heap ordered by a caller-supplied comparator.

use std::cmp::Ordering;
use std::fmt;

/// A priority queue that pops the smallest element under `compare`.
///
/// Unlike [`std::collections::BinaryHeap`], the ordering is a value supplied at
/// construction rather than the element's `Ord` impl.
pub struct PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    data: Vec<T>,
    compare: C,
}

impl<T, C> PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty queue.
    pub fn new(compare: C) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    /// Builds a queue from `data`, heapifying bottom-up in `O(k)`.
    pub fn from_vec(data: Vec<T>, compare: C) -> Self {
        let mut queue = Self { data, compare };
        for pos in (0..queue.data.len() / 2).rev() {
            queue.sift_down(pos);
        }
        queue
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the minimum, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// The minimum without removing it, or `None` when empty.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Heap storage in array order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if (self.compare)(&self.data[pos], &self.data[parent]) != Ordering::Less {
                break;
            }
            self.data.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.data.len();
        let half = len / 2;
        while pos < half {
            let mut best = 2 * pos + 1;
            let right = best + 1;
            if right < len && (self.compare)(&self.data[right], &self.data[best]) == Ordering::Less {
                best = right;
            }
            if (self.compare)(&self.data[best], &self.data[pos]) != Ordering::Less {
                break;
            }
            self.data.swap(pos, best);
            pos = best;
        }
    }
}

impl<T: Ord> PriorityQueue<T, fn(&T, &T) -> Ordering> {
    /// A queue ordered by `T`'s natural ordering.
    pub fn natural() -> Self {
        Self::new(T::cmp)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("data", &self.data)
            .finish()
    }
}
