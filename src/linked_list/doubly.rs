//! A doubly linked list which flattens all its nodes onto a Vec for storage,
//! gaining data locality and O(1) access by handle.

use std::fmt;
use std::iter::FromIterator;
use std::mem;

use super::NodeHandle;
use crate::container::Container;
use crate::error::{Error, Result};

/// A node that lives in a linked list.
struct Node<T> {
    /// The value being stored.
    value: T,

    /// The index of the node previous to this one.
    prev: NodeHandle,

    /// The index of the next node in the list.
    next: NodeHandle,
}

/// A position in the storage vec, which either holds a live node or is
/// waiting on the freelist to be reused.
enum Slot<T> {
    Occupied(Node<T>),
    Vacant,
}

/// A doubly linked list with a single contiguous Vec of nodes, which are
/// addressed by their position in the Vec. It freelists slots that have been
/// removed and reuses them on the next insert. There's no compaction.
///
/// The links are circular: the head's `prev` is the tail and the tail's `next`
/// is the head, so the list only has to remember where the head is and both
/// ends are one hop away. The `len` is what tells iteration when to stop going
/// round.
///
/// Every insert hands back a [`NodeHandle`], which can be used to read or
/// remove that node later without walking the list.
pub struct LinkedList<T> {
    /// The nodes in the list.
    store: Vec<Slot<T>>,

    /// Entries in the list which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// The first node in the list.
    head: Option<NodeHandle>,

    /// Number of live nodes.
    len: usize,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new linked list with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Gets an element from the list by handle.
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        match self.store.get(handle.0) {
            Some(Slot::Occupied(node)) => Some(&node.value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        match self.store.get_mut(handle.0) {
            Some(Slot::Occupied(node)) => Some(&mut node.value),
            _ => None,
        }
    }

    /// Gets the element `index` places from the front.
    pub fn nth(&self, index: usize) -> Option<&T> {
        self.handle_at(index).and_then(|handle| self.get(handle))
    }

    /// The first value in the list.
    pub fn front(&self) -> Result<&T> {
        let head = self.head.ok_or(Error::EmptyContainer)?;
        Ok(&self.node(head).value)
    }

    /// The last value in the list.
    pub fn back(&self) -> Result<&T> {
        let tail = self.tail().ok_or(Error::EmptyContainer)?;
        Ok(&self.node(tail).value)
    }

    /// Pushes a value onto the front of the list and returns a handle to the
    /// node.
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let idx = match self.head {
            Some(head) => self.link_before(head, value),
            None => self.link_alone(value),
        };

        self.head = Some(idx);

        idx
    }

    /// Pushes a value onto the back of the list and returns a handle to the
    /// node.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        match self.head {
            // just before the head, going round, is the back of the list
            Some(head) => self.link_before(head, value),
            None => {
                let idx = self.link_alone(value);
                self.head = Some(idx);
                idx
            }
        }
    }

    /// Inserts a value so that it ends up `index` places from the front,
    /// shifting everything from there onward back by one. Inserting at
    /// `len()` appends; anything past that is [`Error::NotFound`].
    pub fn insert(&mut self, index: usize, value: T) -> Result<NodeHandle> {
        if index > self.len {
            return Err(Error::NotFound);
        }

        if index == 0 {
            return Ok(self.push_front(value));
        }

        if index == self.len {
            return Ok(self.push_back(value));
        }

        let at = self.handle_at(index).ok_or(Error::NotFound)?;
        let idx = self.link_before(at, value);

        #[cfg(test)]
        self.continuity_test();

        Ok(idx)
    }

    /// Pops the front node off the list if it exists.
    pub fn pop_front(&mut self) -> Result<T> {
        let head = self.head.ok_or(Error::EmptyContainer)?;
        self.remove_node(head)
    }

    /// Pops the back node off the list if it exists.
    pub fn pop_back(&mut self) -> Result<T> {
        let tail = self.tail().ok_or(Error::EmptyContainer)?;
        self.remove_node(tail)
    }

    /// Removes the value `index` places from the front.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let handle = self.handle_at(index).ok_or(Error::NotFound)?;
        self.remove_node(handle)
    }

    /// Remove an arbitrary node from the list. Handles whose node has already
    /// been removed report [`Error::NotFound`].
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<T> {
        match self.store.get(handle.0) {
            Some(Slot::Occupied(_)) => {}
            _ => return Err(Error::NotFound),
        }

        let node = match mem::replace(&mut self.store[handle.0], Slot::Vacant) {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("slot was checked to be occupied"),
        };

        if self.len == 1 {
            // just reset head and freelist the node
            self.head = None;
        } else {
            if Some(handle) == self.head {
                self.head = Some(node.next);
            }

            // link prev to next and next to prev so node doesn't exist in the
            // chain anymore; it'll get overwritten at some later push by
            // placing its handle on the freelist
            self.node_mut(node.prev).next = node.next;
            self.node_mut(node.next).prev = node.prev;
        }

        self.free.push(handle);
        self.len -= 1;

        #[cfg(test)]
        self.continuity_test();

        Ok(node.value)
    }

    /// Whether any value in the list is equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Iterates front to back. The iterator is double-ended, so `.rev()` goes
    /// back to front.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail(),
            remaining: self.len,
        }
    }

    /// The last node, which is the one before the head going round.
    fn tail(&self) -> Option<NodeHandle> {
        self.head.map(|head| self.node(head).prev)
    }

    /// Finds the handle `index` places from the front, walking in from
    /// whichever end is closer.
    fn handle_at(&self, index: usize) -> Option<NodeHandle> {
        if index >= self.len {
            return None;
        }

        let mut at = self.head?;

        if index <= self.len / 2 {
            for _ in 0..index {
                at = self.node(at).next;
            }
        } else {
            for _ in index..self.len {
                at = self.node(at).prev;
            }
        }

        Some(at)
    }

    /// Links a new node into the chain just before `next`.
    fn link_before(&mut self, next: NodeHandle, value: T) -> NodeHandle {
        let prev = self.node(next).prev;
        let idx = self.place(Node { value, prev, next });

        self.node_mut(prev).next = idx;
        self.node_mut(next).prev = idx;

        idx
    }

    /// Places the first node of an empty list, which links round to itself.
    fn link_alone(&mut self, value: T) -> NodeHandle {
        let idx = self.next_free();
        self.place(Node {
            value,
            prev: idx,
            next: idx,
        })
    }

    /// Where the next node will land: the first available location in the
    /// storage vec, or the end of it.
    fn next_free(&self) -> NodeHandle {
        self.free
            .last()
            .copied()
            .unwrap_or_else(|| NodeHandle(self.store.len()))
    }

    /// Stores a node at the next free location and returns where it went.
    fn place(&mut self, node: Node<T>) -> NodeHandle {
        let idx = self
            .free
            .pop()
            .unwrap_or_else(|| NodeHandle(self.store.len()));

        if self.store.len() <= idx.0 {
            self.store.push(Slot::Occupied(node));
        } else {
            self.store[idx.0] = Slot::Occupied(node);
        }

        self.len += 1;

        idx
    }

    fn node(&self, handle: NodeHandle) -> &Node<T> {
        match &self.store[handle.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("linked list references a vacant slot"),
        }
    }

    fn node_mut(&mut self, handle: NodeHandle) -> &mut Node<T> {
        match &mut self.store[handle.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("linked list references a vacant slot"),
        }
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        // walk the list both ways and make sure it matches the number of
        // live nodes
        assert_eq!(self.len, self.iter().count());
        assert_eq!(self.len, self.iter().rev().count());
        assert_eq!(self.len + self.free.len(), self.store.len());

        // every node's neighbours point back at it
        let mut at = self.head;
        for _ in 0..self.len {
            let here = at.expect("live list has a head");
            let node = self.node(here);
            assert_eq!(here, self.node(node.next).prev);
            assert_eq!(here, self.node(node.prev).next);
            at = Some(node.next);
        }
    }
}

impl<T> Container for LinkedList<T> {
    fn len(&self) -> usize {
        self.len
    }

    /// Clears this linked list. Does not free the underlying buffers.
    fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.front?);
        self.front = Some(node.next);
        self.remaining -= 1;

        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.back?);
        self.back = Some(node.prev);
        self.remaining -= 1;

        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::LinkedList;
    use crate::{Container, Error};

    fn contents(list: &LinkedList<u32>) -> Vec<u32> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_both_ends() {
        let mut list = LinkedList::with_capacity(4);
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        list.push_front(0);

        assert_eq!(vec![0, 1, 2, 3], contents(&list));
        assert_eq!(vec![3, 2, 1, 0], list.iter().rev().copied().collect::<Vec<_>>());
        assert_eq!(Ok(&0), list.front());
        assert_eq!(Ok(&3), list.back());
        list.continuity_test();
    }

    #[test]
    fn pop_both_ends() {
        let mut list: LinkedList<u32> = (0..4).collect();

        assert_eq!(Ok(0), list.pop_front());
        assert_eq!(Ok(3), list.pop_back());
        assert_eq!(Ok(1), list.pop_front());
        assert_eq!(Ok(2), list.pop_back());
        assert_eq!(Err(Error::EmptyContainer), list.pop_front());
        assert_eq!(Err(Error::EmptyContainer), list.pop_back());
        assert_eq!(Err(Error::EmptyContainer), list.front());
        assert!(list.is_empty());
    }

    #[test]
    fn insert_and_remove_by_index() {
        let mut list: LinkedList<u32> = vec![10, 30, 50].into_iter().collect();

        assert!(list.insert(1, 20).is_ok());
        assert!(list.insert(3, 40).is_ok());
        assert!(list.insert(5, 60).is_ok());
        assert!(list.insert(0, 0).is_ok());
        assert_eq!(Err(Error::NotFound), list.insert(99, 99));
        assert_eq!(vec![0, 10, 20, 30, 40, 50, 60], contents(&list));

        assert_eq!(Ok(40), list.remove(4));
        assert_eq!(Ok(0), list.remove(0));
        assert_eq!(Ok(60), list.remove(4));
        assert_eq!(Err(Error::NotFound), list.remove(4));
        assert_eq!(vec![10, 20, 30, 50], contents(&list));
        assert_eq!(Some(&30), list.nth(2));
        assert_eq!(None, list.nth(4));
    }

    #[test]
    fn handles_survive_other_removals() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(Ok(2), list.remove_node(b));
        assert_eq!(Err(Error::NotFound), list.remove_node(b));
        assert_eq!(Some(&1), list.get(a));
        assert_eq!(Some(&3), list.get(c));

        if let Some(v) = list.get_mut(c) {
            *v = 30;
        }
        assert_eq!(vec![1, 30], contents(&list));
    }

    #[test]
    fn freelisted_slots_are_reused() {
        let mut list = LinkedList::new();
        list.push_back(1);
        let b = list.push_back(2);
        list.push_back(3);

        list.remove_node(b).unwrap();
        let d = list.push_front(0);

        // the freed slot got picked up rather than growing the store
        assert_eq!(b, d);
        assert_eq!(3, list.store.len());
        assert_eq!(vec![0, 1, 3], contents(&list));
    }

    #[test]
    fn clear_and_reuse() {
        let mut list: LinkedList<u32> = (0..10).collect();
        assert!(list.contains(&7));

        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(&7));
        assert_eq!(0, list.iter().count());

        list.push_back(5);
        assert_eq!(vec![5], contents(&list));
        assert_eq!("[5]", format!("{:?}", list));
    }
}
