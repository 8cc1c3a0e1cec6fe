//! A plain, unbalanced binary search tree.
//!
//! Nothing here ever rebalances, so inserting sorted input builds a tree that
//! is really a linked list leaning to one side. Every operation walks the tree
//! with a loop instead of recursing, and the tree tears itself down with an
//! explicit stack, so a degenerate tree of any depth is only slow, never a
//! stack overflow.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

use super::{BinaryNode, InOrder};
use crate::container::Container;
use crate::error::{Error, Result};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

impl<T> BinaryNode for Node<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// An ordered set on an unbalanced binary search tree.
pub struct BinarySearchTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T: Ord> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Adds a value to the set. Returns false, leaving the tree untouched, if
    /// an equal value was already there.
    pub fn insert(&mut self, value: T) -> bool {
        let mut cursor = &mut self.root;

        while let Some(node) = cursor {
            cursor = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }

        *cursor = Some(Box::new(Node::leaf(value)));
        self.len += 1;

        true
    }

    /// Takes a value out of the set.
    ///
    /// A node with two children is replaced by its in-order successor, the
    /// smallest value in its right subtree.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let mut cursor = &mut self.root;

        loop {
            let ordering = match cursor {
                Some(node) => value.cmp(&node.value),
                None => return Err(Error::NotFound),
            };

            cursor = match ordering {
                Ordering::Equal => break,
                Ordering::Less => &mut cursor.as_mut().ok_or(Error::NotFound)?.left,
                Ordering::Greater => &mut cursor.as_mut().ok_or(Error::NotFound)?.right,
            };
        }

        let mut node = cursor.take().ok_or(Error::NotFound)?;

        *cursor = match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let (successor, right) = Self::take_min(right);
                Some(Box::new(Node {
                    value: successor,
                    left: Some(left),
                    right,
                }))
            }
        };

        self.len -= 1;

        Ok(node.value)
    }

    pub fn contains(&self, value: &T) -> bool {
        let mut link = self.root.as_deref();

        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }

        false
    }

    /// The smallest value in the set.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// The largest value in the set.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// The number of nodes on the longest path from the root down, counted a
    /// level at a time so a degenerate tree doesn't recurse.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: VecDeque<&Node<T>> = self.root.as_deref().into_iter().collect();

        while !level.is_empty() {
            height += 1;
            for _ in 0..level.len() {
                if let Some(node) = level.pop_front() {
                    level.extend(node.left.as_deref());
                    level.extend(node.right.as_deref());
                }
            }
        }

        height
    }

    /// Ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: InOrder::new(self.root.as_deref(), self.len),
        }
    }

    /// Checks the search tree ordering over the whole tree.
    pub fn is_valid(&self) -> bool {
        let mut count = 0;
        let mut prev: Option<&T> = None;

        for value in self.iter() {
            if let Some(prev) = prev {
                if prev >= value {
                    return false;
                }
            }
            prev = Some(value);
            count += 1;
        }

        count == self.len
    }

    /// Detaches the smallest node of a subtree, returning its value and what
    /// is left of the subtree.
    fn take_min(mut root: Box<Node<T>>) -> (T, Link<T>) {
        if root.left.is_none() {
            let Node { value, right, .. } = *root;
            return (value, right);
        }

        let mut cursor = &mut root.left;
        while cursor.as_ref().map_or(false, |node| node.left.is_some()) {
            cursor = &mut cursor
                .as_mut()
                .expect("cursor only advances onto nodes with a left child")
                .left;
        }

        let min = cursor
            .take()
            .expect("cursor only advances onto nodes with a left child");
        let Node { value, right, .. } = *min;
        *cursor = right;

        (value, Some(root))
    }
}

impl<T> Container for BinarySearchTree<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        // tear down with an explicit stack; dropping the root outright would
        // recurse once per level, and a degenerate tree has a lot of levels
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }

        self.len = 0;
    }
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

pub struct Iter<'a, T> {
    inner: InOrder<'a, Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::BinarySearchTree;
    use crate::{Container, Error};

    fn contents(tree: &BinarySearchTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn insert_and_walk_in_order() {
        let mut tree = BinarySearchTree::new();
        for v in &[50, 30, 70, 20, 40, 60, 80] {
            assert!(tree.insert(*v));
        }
        assert!(!tree.insert(40));

        assert_eq!(7, tree.len());
        assert_eq!(vec![20, 30, 40, 50, 60, 70, 80], contents(&tree));
        assert_eq!(Some(&20), tree.min());
        assert_eq!(Some(&80), tree.max());
        assert_eq!(3, tree.height());
        assert!(tree.contains(&60));
        assert!(!tree.contains(&65));
        assert!(tree.is_valid());
    }

    #[test]
    fn remove_every_shape_of_node() {
        let mut tree: BinarySearchTree<i32> =
            vec![50, 30, 70, 20, 40, 60, 80, 65].into_iter().collect();

        // leaf
        assert_eq!(Ok(20), tree.remove(&20));
        // one child
        assert_eq!(Ok(60), tree.remove(&60));
        // two children, successor deep in the right subtree
        assert_eq!(Ok(50), tree.remove(&50));
        // missing
        assert_eq!(Err(Error::NotFound), tree.remove(&50));

        assert_eq!(vec![30, 40, 65, 70, 80], contents(&tree));
        assert!(tree.is_valid());
        assert_eq!(5, tree.len());
    }

    #[test]
    fn iterator_restarts() {
        let tree: BinarySearchTree<i32> = vec![3, 1, 2].into_iter().collect();
        let mut first = tree.iter();
        assert_eq!(Some(&1), first.next());

        assert_eq!(vec![1, 2, 3], contents(&tree));
        assert_eq!(Some(&2), first.next());
    }

    #[test]
    fn degenerate_tree_is_fine() {
        // sorted input makes a tree that's one long right spine
        let mut tree: BinarySearchTree<i32> = (0..10_000).collect();
        assert_eq!(10_000, tree.height());
        assert!(tree.contains(&9_999));
        assert_eq!(Ok(9_999), tree.remove(&9_999));
        assert_eq!(Ok(0), tree.remove(&0));
        assert_eq!(9_998, tree.len());
        assert_eq!(Some(&9_998), tree.max());
        drop(tree);
    }

    #[test]
    fn empty_tree() {
        let mut tree: BinarySearchTree<i32> = BinarySearchTree::default();
        assert_eq!(None, tree.min());
        assert_eq!(0, tree.height());
        assert_eq!(Err(Error::NotFound), tree.remove(&1));
        assert!(tree.is_empty());
        assert_eq!("{}", format!("{:?}", tree));
    }
}
