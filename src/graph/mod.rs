//! Graphs over arbitrary vertex labels, in the two textbook representations.
//!
//! [`AdjacencyList`] keeps, per vertex, the edges leaving it; it's compact for
//! sparse graphs and finding one edge costs the vertex's degree.
//! [`AdjacencyMatrix`] keeps a V by V grid of optional weights; it answers
//! edge queries in constant time and pays for that with quadratic space.
//!
//! Both take vertex labels `V` (anything hashable and cloneable) and edge
//! weights `W`, which default to `()` for unweighted graphs. An undirected
//! graph stores each edge in both directions but counts it once. Naming a
//! vertex the graph has never seen is [`Error::NotFound`](crate::Error),
//! and so is removing an edge that isn't there.
//!
//! Breadth- and depth-first walks live in [`traversal`] and run on anything
//! implementing [`Graph`].

pub mod adjacency_list;
pub mod adjacency_matrix;
pub mod traversal;

pub use adjacency_list::AdjacencyList;
pub use adjacency_matrix::AdjacencyMatrix;
pub use traversal::{bfs, bfs_distances, dfs, Bfs, Dfs};

use std::hash::Hash;

use crate::error::Result;

/// Whether an edge from `u` to `v` also runs from `v` to `u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Directed,
    Undirected,
}

/// What a traversal needs to know about a graph.
pub trait Graph {
    type Vertex: Eq + Hash + Clone;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// The vertices one edge away from `vertex`, in the graph's own order.
    fn neighbors(&self, vertex: &Self::Vertex) -> Result<Vec<Self::Vertex>>;
}
