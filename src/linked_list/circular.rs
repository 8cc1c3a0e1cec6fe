//! A singly linked ring. The list only remembers its tail; the head is always
//! whatever the tail points at, so both ends are reachable in one hop and
//! rotating the ring is just moving the tail along.

use std::fmt;
use std::iter::FromIterator;

use super::NodeHandle;
use crate::container::Container;
use crate::error::{Error, Result};

struct Node<T> {
    value: T,
    next: NodeHandle,
}

/// A circular singly linked list over a freelisted Vec of nodes.
pub struct CircularList<T> {
    store: Vec<Option<Node<T>>>,
    free: Vec<NodeHandle>,
    tail: Option<NodeHandle>,
    len: usize,
}

impl<T> CircularList<T> {
    pub fn new() -> Self {
        Self {
            store: Vec::new(),
            free: Vec::new(),
            tail: None,
            len: 0,
        }
    }

    pub fn front(&self) -> Result<&T> {
        let head = self.head().ok_or(Error::EmptyContainer)?;
        Ok(&self.node(head).value)
    }

    pub fn back(&self) -> Result<&T> {
        let tail = self.tail.ok_or(Error::EmptyContainer)?;
        Ok(&self.node(tail).value)
    }

    /// Pushes a value in just after the tail, which makes it the new head.
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        self.link_after_tail(value)
    }

    /// Pushes a value in just after the tail and makes it the new tail.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let idx = self.link_after_tail(value);
        self.tail = Some(idx);
        idx
    }

    /// Takes the value at the head of the ring.
    pub fn pop_front(&mut self) -> Result<T> {
        let tail = self.tail.ok_or(Error::EmptyContainer)?;
        let head = self.node(tail).next;
        Ok(self.unlink_after(tail, head))
    }

    /// Advances the ring by one: the head moves round to become the tail.
    /// Does nothing to an empty ring.
    pub fn rotate(&mut self) {
        if let Some(tail) = self.tail {
            self.tail = Some(self.node(tail).next);
        }
    }

    /// Removes the first value equal to `value`, going round from the head.
    pub fn remove(&mut self, value: &T) -> Result<T>
    where
        T: PartialEq,
    {
        let mut prev = self.tail.ok_or(Error::NotFound)?;

        for _ in 0..self.len {
            let at = self.node(prev).next;
            if self.node(at).value == *value {
                return Ok(self.unlink_after(prev, at));
            }
            prev = at;
        }

        Err(Error::NotFound)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Goes round the ring exactly once, starting at the head.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head(),
            remaining: self.len,
        }
    }

    fn head(&self) -> Option<NodeHandle> {
        self.tail.map(|tail| self.node(tail).next)
    }

    /// Splices a new node in between the tail and the head. On an empty ring
    /// the node points at itself and becomes the tail.
    fn link_after_tail(&mut self, value: T) -> NodeHandle {
        let idx = self
            .free
            .pop()
            .unwrap_or_else(|| NodeHandle(self.store.len()));

        let next = match self.tail {
            Some(tail) => self.node(tail).next,
            None => idx,
        };

        let node = Some(Node { value, next });
        if self.store.len() <= idx.0 {
            self.store.push(node);
        } else {
            self.store[idx.0] = node;
        }

        match self.tail {
            Some(tail) => self.node_mut(tail).next = idx,
            None => self.tail = Some(idx),
        }

        self.len += 1;

        idx
    }

    /// Unlinks `at`, which must be the node after `prev`, and freelists it.
    fn unlink_after(&mut self, prev: NodeHandle, at: NodeHandle) -> T {
        let node = self.store[at.0]
            .take()
            .expect("circular list references a vacant slot");

        if self.len == 1 {
            self.tail = None;
        } else {
            self.node_mut(prev).next = node.next;
            if Some(at) == self.tail {
                self.tail = Some(prev);
            }
        }

        self.free.push(at);
        self.len -= 1;

        node.value
    }

    fn node(&self, handle: NodeHandle) -> &Node<T> {
        self.store[handle.0]
            .as_ref()
            .expect("circular list references a vacant slot")
    }

    fn node_mut(&mut self, handle: NodeHandle) -> &mut Node<T> {
        self.store[handle.0]
            .as_mut()
            .expect("circular list references a vacant slot")
    }
}

impl<T> Container for CircularList<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.tail = None;
        self.len = 0;
    }
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for CircularList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

pub struct Iter<'a, T> {
    list: &'a CircularList<T>,
    next: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.next?);
        self.next = Some(node.next);
        self.remaining -= 1;

        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::CircularList;
    use crate::{Container, Error};

    fn contents(list: &CircularList<char>) -> Vec<char> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_both_ends() {
        let mut list = CircularList::new();
        list.push_back('b');
        list.push_back('c');
        list.push_front('a');

        assert_eq!(vec!['a', 'b', 'c'], contents(&list));
        assert_eq!(Ok(&'a'), list.front());
        assert_eq!(Ok(&'c'), list.back());
    }

    #[test]
    fn rotate_goes_round() {
        let mut list: CircularList<char> = "abcd".chars().collect();

        list.rotate();
        assert_eq!(vec!['b', 'c', 'd', 'a'], contents(&list));

        // a full lap brings it back
        for _ in 0..3 {
            list.rotate();
        }
        assert_eq!(vec!['a', 'b', 'c', 'd'], contents(&list));
    }

    #[test]
    fn pop_and_remove() {
        let mut list: CircularList<char> = "abcd".chars().collect();

        assert_eq!(Ok('a'), list.pop_front());
        assert_eq!(Ok('d'), list.remove(&'d'));
        assert_eq!(Ok(&'c'), list.back());
        assert_eq!(Err(Error::NotFound), list.remove(&'z'));
        assert_eq!(Ok('b'), list.remove(&'b'));
        assert_eq!(Ok('c'), list.pop_front());

        assert!(list.is_empty());
        assert_eq!(Err(Error::EmptyContainer), list.pop_front());
        assert_eq!(Err(Error::NotFound), list.remove(&'a'));

        // empty rings still rotate, they just don't go anywhere
        list.rotate();
        assert_eq!(0, list.iter().count());
    }

    #[test]
    fn slots_are_reused() {
        let mut list = CircularList::new();
        list.push_back('x');
        list.push_back('y');
        list.pop_front().unwrap();
        list.push_back('z');

        assert_eq!(2, list.store.len());
        assert_eq!(vec!['y', 'z'], contents(&list));
        assert!(list.contains(&'z'));
    }
}
