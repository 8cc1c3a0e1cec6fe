//! A last-in first-out stack on top of a Vec. The top of the stack is the end
//! of the Vec, so push and pop never shuffle anything.

use std::iter::{FromIterator, Rev};
use std::slice;

use crate::container::Container;
use crate::error::{Error, Result};

/// LIFO stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty stack which can take `capacity` pushes before it
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Pushes a value onto the top of the stack.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Pops the value off the top of the stack.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(Error::EmptyContainer)
    }

    /// Looks at the top of the stack without removing it.
    pub fn peek(&self) -> Result<&T> {
        self.items.last().ok_or(Error::EmptyContainer)
    }

    pub fn peek_mut(&mut self) -> Result<&mut T> {
        self.items.last_mut().ok_or(Error::EmptyContainer)
    }

    /// Iterates from the top of the stack to the bottom, i.e. in pop order.
    pub fn iter(&self) -> Rev<slice::Iter<'_, T>> {
        self.items.iter().rev()
    }
}

impl<T> Container for Stack<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Pushes every item in order, so the last item yielded ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
