//! Ordered sets kept as binary search trees.
//!
//! All three trees share one surface: `insert` returns whether the value was
//! new (trees are sets, so inserting a value that's already there changes
//! nothing), `remove` hands the value back or reports
//! [`Error::NotFound`](crate::Error::NotFound) and leaves the tree alone,
//! `contains` answers yes or no, and `iter` walks the values in ascending
//! order. The iterators are lazy and keep an explicit stack rather than
//! recursing, and calling `iter` again starts a fresh walk.
//!
//! | Tree | Balancing | Node storage |
//! |------|-----------|--------------|
//! | [`BinarySearchTree`] | none, degenerates to a list on sorted input | boxed nodes |
//! | [`AvlTree`] | heights, rotations on every mutation | boxed nodes |
//! | [`RedBlackTree`] | colours, recolour/rotate on every mutation | Vec of nodes linked by index |

pub mod avl;
pub mod bst;
pub mod red_black;

pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use red_black::RedBlackTree;

/// A node in one of the boxed trees, as far as walking it in order cares.
pub(crate) trait BinaryNode {
    type Value;

    fn value(&self) -> &Self::Value;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
}

/// In-order walk over a boxed tree. Holds the path of nodes whose left side
/// has been visited but which haven't been yielded yet.
pub(crate) struct InOrder<'a, N> {
    stack: Vec<&'a N>,
    remaining: usize,
}

impl<'a, N: BinaryNode> InOrder<'a, N> {
    pub(crate) fn new(root: Option<&'a N>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a N>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left();
        }
    }
}

impl<'a, N: BinaryNode> Iterator for InOrder<'a, N> {
    type Item = &'a N::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
