//! A binary max-heap over a Vec.
//!
//! The Vec is a complete binary tree laid out level by level: the children of
//! index `i` are at `2i + 1` and `2i + 2`, and its parent at `(i - 1) / 2`.
//! Every parent compares greater than or equal to its children, so the root
//! at index 0 is always the maximum.
//!
//! ```text
//!            90                    [90, 64, 34, 12, 22, 11, 25]
//!         /      \
//!       64        34
//!      /  \      /  \
//!    12    22  11    25
//! ```

use std::fmt;
use std::iter::FromIterator;
use std::slice;

use crate::container::Container;
use crate::error::{Error, Result};

/// Max-heap. Pushes sift up, pops sift down, both O(log n).
#[derive(Clone)]
pub struct MaxHeap<T> {
    data: Vec<T>,
}

impl<T: Ord> MaxHeap<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Heapifies a Vec in place, bottom-up, in O(n).
    pub fn from_vec(data: Vec<T>) -> Self {
        let mut heap = Self { data };
        let len = heap.data.len();

        // every index from len / 2 on is a leaf, which is already a heap
        for pos in (0..len / 2).rev() {
            heap.sift_down(pos, len);
        }

        heap
    }

    /// Adds a value and sifts it up until its parent is no smaller.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        let last = self.data.len() - 1;
        self.sift_up(last);
    }

    /// Takes the maximum out. The last leaf is swapped into the root and
    /// sifted down to restore the heap.
    pub fn pop(&mut self) -> Result<T> {
        if self.data.is_empty() {
            return Err(Error::EmptyContainer);
        }

        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let max = self.data.pop().ok_or(Error::EmptyContainer)?;

        let len = self.data.len();
        self.sift_down(0, len);

        Ok(max)
    }

    /// The maximum, left in place.
    pub fn peek(&self) -> Result<&T> {
        self.data.first().ok_or(Error::EmptyContainer)
    }

    /// The values in heap order, which is to say no useful order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// The backing Vec as it stands, in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Sorts the heap's own storage ascending by repeatedly moving the max to
    /// the end of a shrinking heap.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut end = self.data.len();

        while end > 1 {
            end -= 1;
            self.data.swap(0, end);
            self.sift_down(0, end);
        }

        self.data
    }

    /// Whether every parent in the Vec is at least as large as its children.
    pub fn is_valid(&self) -> bool {
        (1..self.data.len()).all(|i| self.data[(i - 1) / 2] >= self.data[i])
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.data[pos] <= self.data[parent] {
                break;
            }
            self.data.swap(pos, parent);
            pos = parent;
        }
    }

    /// Sifts the value at `pos` down within the first `end` slots.
    fn sift_down(&mut self, mut pos: usize, end: usize) {
        loop {
            let left = 2 * pos + 1;
            if left >= end {
                break;
            }

            let right = left + 1;
            let larger = if right < end && self.data[right] > self.data[left] {
                right
            } else {
                left
            };

            if self.data[pos] >= self.data[larger] {
                break;
            }

            self.data.swap(pos, larger);
            pos = larger;
        }
    }
}

impl<T> Container for MaxHeap<T> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Ord> Default for MaxHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MaxHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: Ord> From<Vec<T>> for MaxHeap<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Ord> FromIterator<T> for MaxHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Ord> Extend<T> for MaxHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;

    use super::MaxHeap;
    use crate::{Container, Error};

    #[test]
    fn pops_in_descending_order() {
        let mut heap = MaxHeap::new();
        for v in &[64, 34, 25, 12, 22, 11, 90] {
            heap.push(*v);
            assert!(heap.is_valid());
        }

        assert_eq!(Ok(&90), heap.peek());

        let mut popped = Vec::new();
        while let Ok(v) = heap.pop() {
            assert!(heap.is_valid());
            popped.push(v);
        }

        assert_eq!(vec![90, 64, 34, 25, 22, 12, 11], popped);
    }

    #[test]
    fn empty_heap() {
        let mut heap: MaxHeap<u8> = MaxHeap::default();
        assert_eq!(Err(Error::EmptyContainer), heap.pop());
        assert_eq!(Err(Error::EmptyContainer), heap.peek());
        assert!(heap.is_empty());
    }

    #[test]
    fn heapify_in_place() {
        let heap = MaxHeap::from_vec(vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
        assert!(heap.is_valid());
        assert_eq!(Ok(&9), heap.peek());
        assert_eq!(11, heap.len());
        assert_eq!(
            vec![1, 1, 2, 3, 3, 4, 5, 5, 5, 6, 9],
            heap.into_sorted_vec()
        );
    }

    #[test]
    fn reverse_makes_a_min_heap() {
        let mut heap: MaxHeap<Reverse<i32>> = vec![5, 1, 3].into_iter().map(Reverse).collect();
        heap.push(Reverse(0));
        assert_eq!(Ok(Reverse(0)), heap.pop());
        assert_eq!(Ok(Reverse(1)), heap.pop());
    }

    #[test]
    fn push_then_pop_restores() {
        let mut heap: MaxHeap<i32> = vec![7, 3, 5].into_iter().collect();
        heap.push(10);
        assert_eq!(Ok(10), heap.pop());

        let mut rest = heap.into_vec();
        rest.sort();
        assert_eq!(vec![3, 5, 7], rest);
    }
}
