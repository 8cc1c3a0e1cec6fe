//! A red-black tree, after the insert and delete fixups in CLRS.
//!
//! Nodes live in a single Vec and refer to their parent and children by
//! index, which gives every node the parent link the fixups need without any
//! shared ownership. Removed slots are freelisted and reused by later inserts.
//! Missing children are `None` and count as black.
//!
//! The colour rules, which together keep the height under 2 log2(n + 1):
//!
//! 1. the root is black,
//! 2. a red node never has a red child,
//! 3. every path from a node down to a missing child passes the same number
//!    of black nodes.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use log::trace;

use crate::container::Container;
use crate::error::{Error, Result};

/// Index of a node in the tree's storage vec.
type Link = Option<usize>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

struct Node<T> {
    value: T,
    color: Color,
    parent: Link,
    left: Link,
    right: Link,
}

/// An ordered set on a red-black tree.
pub struct RedBlackTree<T> {
    /// The nodes in the tree. `None` slots are on the freelist.
    store: Vec<Option<Node<T>>>,

    /// Slots which aren't in use anymore. These will be reused.
    free: Vec<usize>,

    root: Link,
    len: usize,
}

impl<T: Ord> RedBlackTree<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Adds a value to the set. Returns false, leaving the tree untouched, if
    /// an equal value was already there.
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut went_left = false;
        let mut at = self.root;

        while let Some(idx) = at {
            parent = Some(idx);
            at = match value.cmp(&self.node(idx).value) {
                Ordering::Less => {
                    went_left = true;
                    self.left(idx)
                }
                Ordering::Greater => {
                    went_left = false;
                    self.right(idx)
                }
                Ordering::Equal => return false,
            };
        }

        let idx = self.alloc(Node {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(idx),
            Some(p) if went_left => self.node_mut(p).left = Some(idx),
            Some(p) => self.node_mut(p).right = Some(idx),
        }

        self.len += 1;
        self.insert_fixup(idx);

        #[cfg(test)]
        assert!(self.is_valid());

        true
    }

    /// Takes a value out of the set.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let z = self.find(value).ok_or(Error::NotFound)?;

        let mut removed_color = self.node(z).color;
        let x;
        let x_parent;

        match (self.left(z), self.right(z)) {
            (None, right) => {
                x = right;
                x_parent = self.parent(z);
                self.transplant(z, right);
            }
            (left, None) => {
                x = left;
                x_parent = self.parent(z);
                self.transplant(z, left);
            }
            (Some(left), Some(right)) => {
                // the successor y moves into z's place, taking z's colour;
                // what's lost is y's colour at y's old position
                let y = self.minimum(right);
                removed_color = self.node(y).color;
                x = self.right(y);

                if self.parent(y) == Some(z) {
                    x_parent = Some(y);
                } else {
                    x_parent = self.parent(y);
                    self.transplant(y, x);
                    self.node_mut(y).right = Some(right);
                    self.node_mut(right).parent = Some(y);
                }

                self.transplant(z, Some(y));
                self.node_mut(y).left = Some(left);
                self.node_mut(left).parent = Some(y);
                self.node_mut(y).color = self.node(z).color;
            }
        }

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }

        let node = self.store[z]
            .take()
            .expect("red-black tree references a vacant slot");
        self.free.push(z);
        self.len -= 1;

        #[cfg(test)]
        assert!(self.is_valid());

        Ok(node.value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| &self.node(self.minimum(root)).value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut at = self.root?;
        while let Some(right) = self.right(at) {
            at = right;
        }
        Some(&self.node(at).value)
    }

    /// Number of nodes on the longest path from the root down.
    pub fn height(&self) -> usize {
        fn height<T: Ord>(tree: &RedBlackTree<T>, link: Link) -> usize {
            match link {
                None => 0,
                Some(idx) => {
                    1 + height(tree, tree.left(idx)).max(height(tree, tree.right(idx)))
                }
            }
        }

        height(self, self.root)
    }

    /// Black nodes on the way down from the root to any missing child, root
    /// excluded. Every such path agrees in a valid tree; this one follows
    /// left children.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut at = self.root.and_then(|root| self.left(root));

        while let Some(idx) = at {
            if self.node(idx).color == Color::Black {
                count += 1;
            }
            at = self.left(idx);
        }

        // the missing child at the bottom counts as black
        if self.root.is_some() {
            count += 1;
        }

        count
    }

    /// Ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Checks every red-black rule, the search tree ordering, and that the
    /// parent links agree with the child links.
    pub fn is_valid(&self) -> bool {
        // black height of the subtree at `link`, or None if anything is off
        fn check<T: Ord>(
            tree: &RedBlackTree<T>,
            link: Link,
            parent: Link,
            lower: Option<&T>,
            upper: Option<&T>,
        ) -> Option<usize> {
            let idx = match link {
                Some(idx) => idx,
                None => return Some(1),
            };
            let node = tree.store.get(idx)?.as_ref()?;

            if node.parent != parent
                || lower.map_or(false, |lower| node.value <= *lower)
                || upper.map_or(false, |upper| node.value >= *upper)
            {
                return None;
            }

            if node.color == Color::Red
                && (tree.color(node.left) == Color::Red || tree.color(node.right) == Color::Red)
            {
                return None;
            }

            let left = check(tree, node.left, link, lower, Some(&node.value))?;
            let right = check(tree, node.right, link, Some(&node.value), upper)?;
            if left != right {
                return None;
            }

            Some(left + if node.color == Color::Black { 1 } else { 0 })
        }

        self.color(self.root) == Color::Black
            && check(self, self.root, None, None, None).is_some()
            && self.iter().count() == self.len
    }

    fn find(&self, value: &T) -> Link {
        let mut at = self.root;

        while let Some(idx) = at {
            at = match value.cmp(&self.node(idx).value) {
                Ordering::Less => self.left(idx),
                Ordering::Greater => self.right(idx),
                Ordering::Equal => return Some(idx),
            };
        }

        None
    }

    fn minimum(&self, mut idx: usize) -> usize {
        while let Some(left) = self.left(idx) {
            idx = left;
        }
        idx
    }

    /// Restores the colour rules after inserting the red node `z`. The only
    /// thing that can be wrong is `z` and its parent both being red.
    fn insert_fixup(&mut self, mut z: usize) {
        while let Some(p) = self.parent(z) {
            if self.node(p).color == Color::Black {
                break;
            }

            // a red parent is never the root, so there's a grandparent
            let g = match self.parent(p) {
                Some(g) => g,
                None => break,
            };

            if Some(p) == self.left(g) {
                let uncle = self.right(g);
                if self.color(uncle) == Color::Red {
                    // red uncle: push the blackness down from the
                    // grandparent and carry on from there
                    self.set_color(Some(p), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(g), Color::Red);
                    z = g;
                } else {
                    if Some(z) == self.right(p) {
                        // zig-zag: straighten it out first
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z).expect("rotated node has a parent");
                    let g = self.parent(p).expect("rotated node has a grandparent");
                    self.set_color(Some(p), Color::Black);
                    self.set_color(Some(g), Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(Some(p), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(g), Color::Red);
                    z = g;
                } else {
                    if Some(z) == self.left(p) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z).expect("rotated node has a parent");
                    let g = self.parent(p).expect("rotated node has a grandparent");
                    self.set_color(Some(p), Color::Black);
                    self.set_color(Some(g), Color::Red);
                    self.rotate_left(g);
                }
            }
        }

        self.set_color(self.root, Color::Black);
    }

    /// Restores the colour rules after a black node was taken out from above
    /// `x`. `x` may be a missing child, so its parent is passed along too.
    fn remove_fixup(&mut self, mut x: Link, mut parent: Link) {
        while x != self.root && self.color(x) == Color::Black {
            let p = match parent {
                Some(p) => p,
                None => break,
            };

            if x == self.left(p) {
                // x is short a black node, so its sibling can't be missing
                let mut w = match self.right(p) {
                    Some(w) => w,
                    None => break,
                };

                if self.node(w).color == Color::Red {
                    self.set_color(Some(w), Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_left(p);
                    w = match self.right(p) {
                        Some(w) => w,
                        None => break,
                    };
                }

                if self.color(self.left(w)) == Color::Black
                    && self.color(self.right(w)) == Color::Black
                {
                    self.set_color(Some(w), Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if self.color(self.right(w)) == Color::Black {
                        self.set_color(self.left(w), Color::Black);
                        self.set_color(Some(w), Color::Red);
                        self.rotate_right(w);
                        w = match self.right(p) {
                            Some(w) => w,
                            None => break,
                        };
                    }

                    let p_color = self.node(p).color;
                    self.set_color(Some(w), p_color);
                    self.set_color(Some(p), Color::Black);
                    self.set_color(self.right(w), Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                    parent = None;
                }
            } else {
                let mut w = match self.left(p) {
                    Some(w) => w,
                    None => break,
                };

                if self.node(w).color == Color::Red {
                    self.set_color(Some(w), Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_right(p);
                    w = match self.left(p) {
                        Some(w) => w,
                        None => break,
                    };
                }

                if self.color(self.right(w)) == Color::Black
                    && self.color(self.left(w)) == Color::Black
                {
                    self.set_color(Some(w), Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if self.color(self.left(w)) == Color::Black {
                        self.set_color(self.right(w), Color::Black);
                        self.set_color(Some(w), Color::Red);
                        self.rotate_left(w);
                        w = match self.left(p) {
                            Some(w) => w,
                            None => break,
                        };
                    }

                    let p_color = self.node(p).color;
                    self.set_color(Some(w), p_color);
                    self.set_color(Some(p), Color::Black);
                    self.set_color(self.left(w), Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                    parent = None;
                }
            }
        }

        self.set_color(x, Color::Black);
    }

    /// Lifts the right child of `x` above it.
    fn rotate_left(&mut self, x: usize) {
        trace!("red-black: rotate left at slot {}", x);

        let y = match self.right(x) {
            Some(y) => y,
            None => return,
        };

        let y_left = self.left(y);
        self.node_mut(x).right = y_left;
        if let Some(y_left) = y_left {
            self.node_mut(y_left).parent = Some(x);
        }

        self.replace_child(x, Some(y));

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// Lifts the left child of `x` above it.
    fn rotate_right(&mut self, x: usize) {
        trace!("red-black: rotate right at slot {}", x);

        let y = match self.left(x) {
            Some(y) => y,
            None => return,
        };

        let y_right = self.right(y);
        self.node_mut(x).left = y_right;
        if let Some(y_right) = y_right {
            self.node_mut(y_right).parent = Some(x);
        }

        self.replace_child(x, Some(y));

        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// Puts `v` where `u` hangs off its parent (or at the root).
    fn transplant(&mut self, u: usize, v: Link) {
        self.replace_child(u, v);
    }

    /// Points whatever referenced `u` from above at `v` instead, and gives
    /// `v` `u`'s parent.
    fn replace_child(&mut self, u: usize, v: Link) {
        let parent = self.parent(u);

        match parent {
            None => self.root = v,
            Some(p) if self.left(p) == Some(u) => self.node_mut(p).left = v,
            Some(p) => self.node_mut(p).right = v,
        }

        if let Some(v) = v {
            self.node_mut(v).parent = parent;
        }
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.store[idx] = Some(node);
                idx
            }
            None => {
                self.store.push(Some(node));
                self.store.len() - 1
            }
        }
    }
}

impl<T> RedBlackTree<T> {
    fn node(&self, idx: usize) -> &Node<T> {
        self.store[idx]
            .as_ref()
            .expect("red-black tree references a vacant slot")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        self.store[idx]
            .as_mut()
            .expect("red-black tree references a vacant slot")
    }

    fn parent(&self, idx: usize) -> Link {
        self.node(idx).parent
    }

    fn left(&self, idx: usize) -> Link {
        self.node(idx).left
    }

    fn right(&self, idx: usize) -> Link {
        self.node(idx).right
    }

    /// Missing children are black.
    fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |idx| self.node(idx).color)
    }

    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(idx) = link {
            self.node_mut(idx).color = color;
        }
    }
}

impl<T> Container for RedBlackTree<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// In-order walk, holding the slots whose left side is done but which
/// haven't been yielded yet.
pub struct Iter<'a, T> {
    tree: &'a RedBlackTree<T>,
    stack: Vec<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(idx) = link {
            self.stack.push(idx);
            link = self.tree.left(idx);
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        self.push_left_spine(tree.right(idx));
        self.remaining = self.remaining.saturating_sub(1);
        Some(&tree.node(idx).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Ord> RedBlackTree<T> {
    /// Takes every value out, in ascending order, leaving the tree empty.
    pub fn drain_sorted(&mut self) -> Vec<T> {
        let order: Vec<usize> = {
            let mut order = Vec::with_capacity(self.len);
            let mut stack = Vec::new();
            let mut at = self.root;
            loop {
                while let Some(idx) = at {
                    stack.push(idx);
                    at = self.left(idx);
                }
                match stack.pop() {
                    Some(idx) => {
                        order.push(idx);
                        at = self.right(idx);
                    }
                    None => break,
                }
            }
            order
        };

        let mut store = mem::take(&mut self.store);
        self.clear();

        order
            .into_iter()
            .filter_map(|idx| store[idx].take().map(|node| node.value))
            .collect()
    }
}
