//! Textbook data structures and algorithms, written out longhand.
//!
//! Everything here is a self-contained implementation of something you'd
//! find in a data structures course: linked lists, a stack and queues, three
//! kinds of binary search tree, a binary heap, a hash table with linear
//! probing, graphs, a skip list, and the classic sorts and searches. None of
//! the collections lean on their standard library counterparts, so each one
//! can be read on its own to see how the thing actually works.
//!
//! The collections share a little surface:
//!
//! - [`Container`] names `len`, `is_empty` and `clear` the same way for all of
//!   them.
//! - Anything that can fail returns a [`Result`] with the one crate-wide
//!   [`Error`]: asking an empty structure for an element is
//!   [`Error::EmptyContainer`], asking for something that isn't there is
//!   [`Error::NotFound`], and so on. A failed call leaves its structure as it
//!   was.
//! - Lookups that are questions rather than demands (`contains`, the
//!   searches, skip list `get`) answer with a `bool` or an `Option`.
//!
//! The crate logs through the `log` facade: hash table rebuilds and skip list
//! growth at debug level, tree rotations at trace level. It never installs a
//! logger of its own.
//!
//! ```
//! use classic_dsa::{AvlTree, Container, HashTable, MaxHeap};
//!
//! let mut tree: AvlTree<i32> = (1..=7).collect();
//! assert_eq!(3, tree.height());
//! assert!(tree.remove(&4).is_ok());
//!
//! let mut table = HashTable::new();
//! table.set("answer", 42);
//! assert_eq!(Ok(&42), table.get("answer"));
//!
//! let mut heap: MaxHeap<u8> = vec![3, 9, 4].into_iter().collect();
//! assert_eq!(Ok(9), heap.pop());
//! assert_eq!(2, heap.len());
//! ```

pub mod algorithms;
pub mod container;
pub mod error;
pub mod graph;
pub mod hash_table;
pub mod heap;
pub mod identity_hasher;
pub mod linked_list;
pub mod queue;
pub mod skip_list;
pub mod stack;
pub mod tree;

pub use container::Container;
pub use error::{Error, Result};
pub use graph::{AdjacencyList, AdjacencyMatrix, Direction, Graph};
pub use hash_table::{HashSet, HashTable};
pub use heap::MaxHeap;
pub use identity_hasher::BuildIdentityHasher;
pub use linked_list::{CircularList, LinkedList, NodeHandle, SinglyLinkedList};
pub use queue::{CircularQueue, Queue};
pub use skip_list::SkipList;
pub use stack::Stack;
pub use tree::{AvlTree, BinarySearchTree, RedBlackTree};
