use std::fmt;
use std::hash::Hash;

use super::{Direction, Graph};
use crate::container::Container;
use crate::error::{Error, Result};
use crate::hash_table::HashTable;

struct Vertex<V, W> {
    label: V,
    edges: Vec<(V, W)>,
}

/// A graph kept as a list of outgoing edges per vertex. Vertices and each
/// vertex's edges stay in the order they were added.
pub struct AdjacencyList<V, W = ()> {
    direction: Direction,
    slots: HashTable<V, usize>,
    vertices: Vec<Vertex<V, W>>,
    edge_count: usize,
}

impl<V, W> AdjacencyList<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            slots: HashTable::new(),
            vertices: Vec::new(),
            edge_count: 0,
        }
    }

    pub fn directed() -> Self {
        Self::new(Direction::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Direction::Undirected)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Adds a vertex with no edges. Returns false if it was already there.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.slots.contains(&vertex) {
            return false;
        }

        self.slots.set(vertex.clone(), self.vertices.len());
        self.vertices.push(Vertex {
            label: vertex,
            edges: Vec::new(),
        });

        true
    }

    /// Connects `from` to `to`, or reweighs the edge if they're already
    /// connected. Both vertices must already be in the graph.
    pub fn add_edge(&mut self, from: &V, to: &V, weight: W) -> Result<()> {
        let u = self.slot(from)?;
        let v = self.slot(to)?;

        let added = Self::upsert(&mut self.vertices[u].edges, to, weight.clone());
        if self.direction == Direction::Undirected && u != v {
            Self::upsert(&mut self.vertices[v].edges, from, weight);
        }

        if added {
            self.edge_count += 1;
        }

        Ok(())
    }

    /// Takes a vertex out along with every edge touching it.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<()> {
        let slot = self.slot(vertex)?;
        let removed = self.vertices.remove(slot);
        self.slots.delete(vertex)?;

        let mut dropped_edges = removed.edges.len();
        for other in self.vertices.iter_mut() {
            let before = other.edges.len();
            other.edges.retain(|(to, _)| to != vertex);
            if self.direction == Direction::Directed {
                dropped_edges += before - other.edges.len();
            }
        }
        self.edge_count -= dropped_edges;

        for (slot, shifted) in self.vertices.iter().enumerate().skip(slot) {
            self.slots.set(shifted.label.clone(), slot);
        }

        Ok(())
    }

    /// Takes the edge from `from` to `to` out, handing back its weight.
    pub fn remove_edge(&mut self, from: &V, to: &V) -> Result<W> {
        let u = self.slot(from)?;
        let v = self.slot(to)?;

        let weight = Self::take(&mut self.vertices[u].edges, to).ok_or(Error::NotFound)?;
        if self.direction == Direction::Undirected && u != v {
            Self::take(&mut self.vertices[v].edges, from);
        }
        self.edge_count -= 1;

        Ok(weight)
    }

    pub fn has_edge(&self, from: &V, to: &V) -> Result<bool> {
        Ok(self.edge_weight(from, to)?.is_some())
    }

    /// The weight on the edge from `from` to `to`, if there is one.
    pub fn edge_weight(&self, from: &V, to: &V) -> Result<Option<&W>> {
        let u = self.slot(from)?;
        self.slot(to)?;

        Ok(self.vertices[u]
            .edges
            .iter()
            .find(|(label, _)| label == to)
            .map(|(_, weight)| weight))
    }

    /// Where `vertex`'s edges lead, in the order they were added.
    pub fn neighbors(&self, vertex: &V) -> Result<Vec<V>> {
        let slot = self.slot(vertex)?;
        Ok(self.vertices[slot]
            .edges
            .iter()
            .map(|(label, _)| label.clone())
            .collect())
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.slots.contains(vertex)
    }

    /// Vertex labels in the order they were added.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter().map(|vertex| &vertex.label)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn slot(&self, vertex: &V) -> Result<usize> {
        self.slots.get(vertex).map(|slot| *slot)
    }

    /// Returns true when the edge is new.
    fn upsert(edges: &mut Vec<(V, W)>, to: &V, weight: W) -> bool {
        match edges.iter_mut().find(|(label, _)| label == to) {
            Some((_, existing)) => {
                *existing = weight;
                false
            }
            None => {
                edges.push((to.clone(), weight));
                true
            }
        }
    }

    fn take(edges: &mut Vec<(V, W)>, to: &V) -> Option<W> {
        let pos = edges.iter().position(|(label, _)| label == to)?;
        Some(edges.remove(pos).1)
    }
}

impl<V, W> Graph for AdjacencyList<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    type Vertex = V;

    fn contains_vertex(&self, vertex: &V) -> bool {
        AdjacencyList::contains_vertex(self, vertex)
    }

    fn neighbors(&self, vertex: &V) -> Result<Vec<V>> {
        AdjacencyList::neighbors(self, vertex)
    }
}

impl<V, W> Container for AdjacencyList<V, W> {
    /// The number of vertices.
    fn len(&self) -> usize {
        self.vertices.len()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.vertices.clear();
        self.edge_count = 0;
    }
}

impl<V, W> Default for AdjacencyList<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    /// Directed.
    fn default() -> Self {
        Self::directed()
    }
}

impl<V: fmt::Debug, W: fmt::Debug> fmt::Debug for AdjacencyList<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.vertices.iter().map(|vertex| (&vertex.label, &vertex.edges)))
            .finish()
    }
}
