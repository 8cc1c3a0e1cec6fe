//! Linked lists, three ways.
//!
//! - [`SinglyLinkedList`] is the textbook one: a chain of boxed nodes, each
//!   owning the next.
//! - [`LinkedList`] is doubly linked, but flattens all its nodes onto a single
//!   Vec and links them by index instead of by pointer.
//! - [`CircularList`] is a singly linked ring over the same kind of Vec.
//!
//! None of these need reference counting or raw pointers. The Box chain has a
//! single owner per node by construction, and the index-linked lists own all
//! their nodes through the storage Vec, so a cycle of links is just a cycle of
//! numbers.

pub mod circular;
pub mod doubly;
pub mod singly;

pub use circular::CircularList;
pub use doubly::LinkedList;
pub use singly::SinglyLinkedList;

/// The index of a node in an index-linked list's storage vec. Handed out by
/// inserts so a caller can come back to the node later in O(1). A handle stays
/// valid until its node is removed; after that the slot may be reused by a
/// later insert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);
