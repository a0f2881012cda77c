//! A binary min-heap keyed by a caller-supplied function.

use std::fmt;

/// Priority queue stored as an implicit binary tree in a `Vec`.
///
/// Elements are ordered by `key(element)`. Keys may change while elements
/// sit in the heap (e.g. tentative distances); call [`heapify`] afterwards
/// to restore the heap order.
///
/// [`heapify`]: Self::heapify
///
/// # Examples
///
/// ```
/// use trellis::algorithms::BinaryMinHeap;
///
/// let mut heap = BinaryMinHeap::new(|pair: &(char, u32)| pair.1);
/// heap.extend([('a', 20), ('b', 3), ('c', 10)]);
///
/// assert_eq!(heap.extract_min(), Some(('b', 3)));
///
/// if let Some(entry) = heap.find_mut(|pair| pair.0 == 'a') {
///     entry.1 = 1;
/// }
/// heap.heapify();
/// assert_eq!(heap.extract_min(), Some(('a', 1)));
/// ```
pub struct BinaryMinHeap<T, F> {
    tree: Vec<T>,
    key: F,
}

impl<T: fmt::Debug, F> fmt::Debug for BinaryMinHeap<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryMinHeap")
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

fn parent(index: usize) -> usize {
    (index - 1) / 2
}

fn left(index: usize) -> usize {
    2 * index + 1
}

fn right(index: usize) -> usize {
    2 * index + 2
}

impl<T, K, F> BinaryMinHeap<T, F>
where
    F: Fn(&T) -> K,
    K: PartialOrd,
{
    pub fn new(key: F) -> Self {
        Self {
            tree: Vec::new(),
            key,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Adds an element and restores heap order.
    pub fn insert(&mut self, element: T) {
        self.tree.push(element);
        self.bubble_up(self.tree.len() - 1);
    }

    /// The element with the smallest key, without removing it.
    pub fn min(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Removes and returns the element with the smallest key.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.tree.is_empty() {
            return None;
        }
        let min = self.tree.swap_remove(0);
        if !self.tree.is_empty() {
            self.bubble_down(0);
        }
        Some(min)
    }

    /// Returns the first element matching `predicate` for in-place updates.
    ///
    /// Changing the element's key breaks the heap order until
    /// [`heapify`](Self::heapify) is called.
    pub fn find_mut(&mut self, predicate: impl Fn(&T) -> bool) -> Option<&mut T> {
        self.tree.iter_mut().find(|element| predicate(element))
    }

    /// Re-establishes heap order after keys have changed.
    pub fn heapify(&mut self) {
        if self.tree.len() < 2 {
            return;
        }
        for start in (0..=parent(self.tree.len() - 1)).rev() {
            self.bubble_down(start);
        }
    }

    /// Consumes the heap, yielding its elements in ascending key order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.tree.len());
        while let Some(element) = self.extract_min() {
            sorted.push(element);
        }
        sorted
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.key)(&self.tree[a]) < (self.key)(&self.tree[b])
    }

    fn bubble_up(&mut self, mut index: usize) {
        while index > 0 {
            let up = parent(index);
            if !self.less(index, up) {
                break;
            }
            self.tree.swap(index, up);
            index = up;
        }
    }

    fn bubble_down(&mut self, mut index: usize) {
        let len = self.tree.len();
        loop {
            let (l, r) = (left(index), right(index));
            let mut smallest = index;
            if l < len && self.less(l, smallest) {
                smallest = l;
            }
            if r < len && self.less(r, smallest) {
                smallest = r;
            }
            if smallest == index {
                break;
            }
            self.tree.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T, K, F> Extend<T> for BinaryMinHeap<T, F>
where
    F: Fn(&T) -> K,
    K: PartialOrd,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}
