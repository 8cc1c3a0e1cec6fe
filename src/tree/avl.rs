//! An AVL tree: a binary search tree which keeps the heights of every node's
//! two subtrees within one of each other.
//!
//! Each node caches its own height. After an insert or removal, every node on
//! the path back up to the root recomputes its height and, if its subtrees
//! have drifted two apart, gets rotated back into shape:
//!
//! ```text
//!  left-left       left-right        right-right      right-left
//!      z               z              z                 z
//!     /               /                \                 \
//!    y               y                  y                 y
//!   /                 \                  \               /
//!  x                   x                  x             x
//!
//!  rotate z right   rotate y left,    rotate z left    rotate y right,
//!                   then z right                       then z left
//! ```
//!
//! Because the height stays logarithmic, the recursion here is too.

use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FromIterator;

use log::trace;

use super::{BinaryNode, InOrder};
use crate::container::Container;
use crate::error::{Error, Result};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    /// Nodes on the longest path down from here, this one included. A leaf is
    /// 1 and an empty subtree is 0.
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
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

fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

/// An ordered set on a height-balanced binary search tree.
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T: Ord> AvlTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Adds a value to the set. Returns false, leaving the tree untouched, if
    /// an equal value was already there.
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = Self::insert_at(&mut self.root, value);
        if inserted {
            self.len += 1;
        }

        #[cfg(test)]
        assert!(self.is_valid());

        inserted
    }

    /// Takes a value out of the set.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let removed = Self::remove_at(&mut self.root, value).ok_or(Error::NotFound)?;
        self.len -= 1;

        #[cfg(test)]
        assert!(self.is_valid());

        Ok(removed)
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

    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Height of the tree, which for an AVL tree of n nodes is under
    /// 1.44 log2(n + 2).
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: InOrder::new(self.root.as_deref(), self.len),
        }
    }

    /// Checks, over the whole tree, that the values are in search tree order,
    /// every cached height is right and every balance factor is -1, 0 or 1.
    pub fn is_valid(&self) -> bool {
        fn check<T: Ord>(link: &Link<T>, lower: Option<&T>, upper: Option<&T>) -> Option<usize> {
            let node = match link {
                Some(node) => node,
                None => return Some(0),
            };

            if lower.map_or(false, |lower| node.value <= *lower)
                || upper.map_or(false, |upper| node.value >= *upper)
            {
                return None;
            }

            let left = check(&node.left, lower, Some(&node.value))?;
            let right = check(&node.right, Some(&node.value), upper)?;
            let expected = 1 + cmp::max(left, right);

            if node.height != expected || (left as isize - right as isize).abs() > 1 {
                return None;
            }

            Some(expected)
        }

        check(&self.root, None, None).is_some() && self.iter().count() == self.len
    }

    fn insert_at(link: &mut Link<T>, value: T) -> bool {
        let inserted = match link {
            None => {
                *link = Some(Box::new(Node::leaf(value)));
                return true;
            }
            Some(node) => match value.cmp(&node.value) {
                Ordering::Less => Self::insert_at(&mut node.left, value),
                Ordering::Greater => Self::insert_at(&mut node.right, value),
                Ordering::Equal => false,
            },
        };

        if inserted {
            Self::rebalance(link);
        }

        inserted
    }

    fn remove_at(link: &mut Link<T>, value: &T) -> Option<T> {
        let ordering = match link {
            Some(node) => value.cmp(&node.value),
            None => return None,
        };

        let removed = match ordering {
            Ordering::Less => Self::remove_at(&mut link.as_mut()?.left, value)?,
            Ordering::Greater => Self::remove_at(&mut link.as_mut()?.right, value)?,
            Ordering::Equal => {
                let mut node = link.take()?;

                *link = match (node.left.take(), node.right.take()) {
                    (None, None) => None,
                    (Some(child), None) | (None, Some(child)) => Some(child),
                    (Some(left), Some(right)) => {
                        // the in-order successor takes this node's place
                        let mut right = Some(right);
                        let successor = Self::remove_min(&mut right);
                        let mut replacement = Node::leaf(successor);
                        replacement.left = Some(left);
                        replacement.right = right;
                        Some(Box::new(replacement))
                    }
                };

                node.value
            }
        };

        Self::rebalance(link);

        Some(removed)
    }

    /// Takes the smallest value out of a non-empty subtree, rebalancing on
    /// the way back up.
    fn remove_min(link: &mut Link<T>) -> T {
        let has_left = link.as_ref().map_or(false, |node| node.left.is_some());

        if !has_left {
            let node = link.take().expect("remove_min is only called on non-empty subtrees");
            let Node { value, right, .. } = *node;
            *link = right;
            return value;
        }

        let min = Self::remove_min(
            &mut link
                .as_mut()
                .expect("remove_min is only called on non-empty subtrees")
                .left,
        );
        Self::rebalance(link);

        min
    }

    /// Refreshes the height of the node at `link` and rotates it back into
    /// balance if its subtrees are two apart.
    fn rebalance(link: &mut Link<T>) {
        let mut node = match link.take() {
            Some(node) => node,
            None => return,
        };

        node.update_height();

        let balance = node.balance_factor();
        if balance > 1 {
            if balance_factor(&node.left) < 0 {
                node.left = node.left.take().map(Self::rotate_left);
            }
            node = Self::rotate_right(node);
        } else if balance < -1 {
            if balance_factor(&node.right) > 0 {
                node.right = node.right.take().map(Self::rotate_right);
            }
            node = Self::rotate_left(node);
        }

        *link = Some(node);
    }

    /// Lifts the left child above `node`. The left child has to exist.
    fn rotate_right(mut node: Box<Node<T>>) -> Box<Node<T>> {
        trace!("avl: rotate right at height {}", node.height);

        let mut pivot = match node.left.take() {
            Some(pivot) => pivot,
            None => return node,
        };

        node.left = pivot.right.take();
        node.update_height();
        pivot.right = Some(node);
        pivot.update_height();

        pivot
    }

    /// Lifts the right child above `node`. The right child has to exist.
    fn rotate_left(mut node: Box<Node<T>>) -> Box<Node<T>> {
        trace!("avl: rotate left at height {}", node.height);

        let mut pivot = match node.right.take() {
            Some(pivot) => pivot,
            None => return node,
        };

        node.right = pivot.left.take();
        node.update_height();
        pivot.left = Some(node);
        pivot.update_height();

        pivot
    }
}

impl<T> Container for AvlTree<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
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
