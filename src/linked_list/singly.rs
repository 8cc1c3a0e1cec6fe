//! The linked list everybody writes first: boxed nodes, each owning the next.

use std::fmt;
use std::iter::FromIterator;

use crate::container::Container;
use crate::error::{Error, Result};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// A singly linked list. Pushing and popping at the front are O(1); anything
/// positional walks from the head.
pub struct SinglyLinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Pushes a value onto the front of the list.
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Appends a value to the back of the list. This has to walk the whole
    /// chain to find the end.
    pub fn push_back(&mut self, value: T) {
        let cursor = self.cursor_at(self.len);
        *cursor = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Takes the value off the front of the list.
    pub fn pop_front(&mut self) -> Result<T> {
        let node = self.head.take().ok_or(Error::EmptyContainer)?;
        let Node { value, next } = *node;
        self.head = next;
        self.len -= 1;

        Ok(value)
    }

    /// The first value in the list.
    pub fn front(&self) -> Result<&T> {
        self.head
            .as_ref()
            .map(|node| &node.value)
            .ok_or(Error::EmptyContainer)
    }

    /// Inserts a value so it ends up `index` places from the front. Inserting
    /// at `len()` appends; past that there's no such position.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(Error::NotFound);
        }

        let cursor = self.cursor_at(index);
        let next = cursor.take();
        *cursor = Some(Box::new(Node { value, next }));
        self.len += 1;

        Ok(())
    }

    /// Removes the value `index` places from the front.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(Error::NotFound);
        }

        let cursor = self.cursor_at(index);
        let node = cursor.take().ok_or(Error::NotFound)?;
        let Node { value, next } = *node;
        *cursor = next;
        self.len -= 1;

        Ok(value)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Reverses the list in place by flipping every link.
    pub fn reverse(&mut self) {
        let mut reversed: Link<T> = None;
        let mut rest = self.head.take();

        while let Some(mut node) = rest {
            rest = node.next.take();
            node.next = reversed;
            reversed = Some(node);
        }

        self.head = reversed;
    }

    /// Front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// The link slot `index` hops from the head: the head itself for 0, the
    /// last node's (empty) `next` for `len`. Callers check `index <= len`.
    fn cursor_at(&mut self, index: usize) -> &mut Link<T> {
        let mut cursor = &mut self.head;

        for _ in 0..index {
            cursor = &mut cursor
                .as_mut()
                .expect("cursor index checked against list length")
                .next;
        }

        cursor
    }
}

impl<T> Container for SinglyLinkedList<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        // unlink one node at a time; letting the head drop would recurse
        // once per node
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }

        self.len = 0;
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    /// Builds the list in iteration order, so the first item yielded is at
    /// the front.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_front(value);
        }
        list.reverse();
        list
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}
