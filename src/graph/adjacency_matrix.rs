use std::fmt;
use std::hash::Hash;

use super::{Direction, Graph};
use crate::container::Container;
use crate::error::{Error, Result};
use crate::hash_table::HashTable;

/// A graph kept as a square grid of optional edge weights. Row `i`, column
/// `j` holds the edge from vertex `i` to vertex `j`, where a vertex's index is
/// its position in insertion order among the vertices still present.
pub struct AdjacencyMatrix<V, W = ()> {
    direction: Direction,
    indices: HashTable<V, usize>,
    labels: Vec<V>,
    cells: Vec<Vec<Option<W>>>,
    edge_count: usize,
}

impl<V, W> AdjacencyMatrix<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            indices: HashTable::new(),
            labels: Vec::new(),
            cells: Vec::new(),
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

    /// Adds a vertex with no edges, growing the grid by a row and a column.
    /// Returns false if it was already there.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.indices.contains(&vertex) {
            return false;
        }

        let n = self.labels.len() + 1;
        for row in self.cells.iter_mut() {
            row.push(None);
        }
        let mut row = Vec::with_capacity(n);
        row.resize_with(n, || None);
        self.cells.push(row);

        self.indices.set(vertex.clone(), self.labels.len());
        self.labels.push(vertex);

        true
    }

    /// Connects `from` to `to`, or reweighs the edge if they're already
    /// connected.
    pub fn add_edge(&mut self, from: &V, to: &V, weight: W) -> Result<()> {
        let u = self.index(from)?;
        let v = self.index(to)?;

        if self.cells[u][v].is_none() {
            self.edge_count += 1;
        }
        if self.direction == Direction::Undirected {
            self.cells[v][u] = Some(weight.clone());
        }
        self.cells[u][v] = Some(weight);

        Ok(())
    }

    /// Takes a vertex out with every edge touching it. Every vertex added
    /// after it moves up one index, and the grid closes the gap.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<()> {
        let i = self.index(vertex)?;

        let outgoing = self.cells[i].iter().filter(|cell| cell.is_some()).count();
        let dropped_edges = match self.direction {
            Direction::Undirected => outgoing,
            Direction::Directed => {
                let incoming = self.cells.iter().filter(|row| row[i].is_some()).count();
                let self_loop = self.cells[i][i].is_some() as usize;
                outgoing + incoming - self_loop
            }
        };
        self.edge_count -= dropped_edges;

        self.cells.remove(i);
        for row in self.cells.iter_mut() {
            row.remove(i);
        }
        self.labels.remove(i);
        self.indices.delete(vertex)?;

        for (index, label) in self.labels.iter().enumerate().skip(i) {
            self.indices.set(label.clone(), index);
        }

        Ok(())
    }

    pub fn remove_edge(&mut self, from: &V, to: &V) -> Result<W> {
        let u = self.index(from)?;
        let v = self.index(to)?;

        let weight = self.cells[u][v].take().ok_or(Error::NotFound)?;
        if self.direction == Direction::Undirected {
            self.cells[v][u] = None;
        }
        self.edge_count -= 1;

        Ok(weight)
    }

    pub fn has_edge(&self, from: &V, to: &V) -> Result<bool> {
        Ok(self.edge_weight(from, to)?.is_some())
    }

    pub fn edge_weight(&self, from: &V, to: &V) -> Result<Option<&W>> {
        let u = self.index(from)?;
        let v = self.index(to)?;
        Ok(self.cells[u][v].as_ref())
    }

    /// Where `vertex`'s edges lead, in index order.
    pub fn neighbors(&self, vertex: &V) -> Result<Vec<V>> {
        let u = self.index(vertex)?;
        Ok(self.cells[u]
            .iter()
            .zip(self.labels.iter())
            .filter(|(cell, _)| cell.is_some())
            .map(|(_, label)| label.clone())
            .collect())
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.indices.contains(vertex)
    }

    /// Vertex labels in index order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.labels.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn index(&self, vertex: &V) -> Result<usize> {
        self.indices.get(vertex).map(|index| *index)
    }
}

impl<V, W> Graph for AdjacencyMatrix<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    type Vertex = V;

    fn contains_vertex(&self, vertex: &V) -> bool {
        AdjacencyMatrix::contains_vertex(self, vertex)
    }

    fn neighbors(&self, vertex: &V) -> Result<Vec<V>> {
        AdjacencyMatrix::neighbors(self, vertex)
    }
}

impl<V, W> Container for AdjacencyMatrix<V, W> {
    /// The number of vertices.
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn clear(&mut self) {
        self.indices.clear();
        self.labels.clear();
        self.cells.clear();
        self.edge_count = 0;
    }
}

impl<V, W> Default for AdjacencyMatrix<V, W>
where
    V: Eq + Hash + Clone,
    W: Clone,
{
    fn default() -> Self {
        Self::directed()
    }
}

impl<V: fmt::Debug, W: fmt::Debug> fmt::Debug for AdjacencyMatrix<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.labels.iter().zip(self.cells.iter()).map(|(label, row)| {
            let edges: Vec<(&V, &W)> = self
                .labels
                .iter()
                .zip(row.iter())
                .filter_map(|(to, cell)| cell.as_ref().map(|weight| (to, weight)))
                .collect();
            (label, edges)
        });
        f.debug_map().entries(rows).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AdjacencyMatrix;
    use crate::{Container, Error};

    #[test]
    fn grid_grows_with_vertices() {
        let mut graph: AdjacencyMatrix<char, f32> = AdjacencyMatrix::undirected();
        for v in "abcd".chars() {
            graph.add_vertex(v);
        }
        assert_eq!(4, graph.cells.len());
        assert!(graph.cells.iter().all(|row| row.len() == 4));

        graph.add_edge(&'a', &'c', 1.5).unwrap();
        graph.add_edge(&'d', &'a', 2.5).unwrap();
        assert_eq!(Ok(Some(&1.5)), graph.edge_weight(&'c', &'a'));
        assert_eq!(Ok(vec!['c', 'd']), graph.neighbors(&'a'));
        assert_eq!(2, graph.edge_count());
        assert_eq!(Err(Error::NotFound), graph.edge_weight(&'a', &'z'));
    }

    #[test]
    fn directed_removal_compacts() {
        let mut graph: AdjacencyMatrix<u32> = AdjacencyMatrix::default();
        for v in 0..4 {
            graph.add_vertex(v);
        }
        graph.add_edge(&0, &1, ()).unwrap();
        graph.add_edge(&2, &1, ()).unwrap();
        graph.add_edge(&1, &3, ()).unwrap();
        graph.add_edge(&1, &1, ()).unwrap();
        graph.add_edge(&3, &0, ()).unwrap();
        graph.add_edge(&2, &3, ()).unwrap();
        assert_eq!(6, graph.edge_count());

        graph.remove_vertex(&1).unwrap();
        assert_eq!(2, graph.edge_count());
        assert_eq!(3, graph.cells.len());
        assert!(graph.cells.iter().all(|row| row.len() == 3));
        assert_eq!(vec![&0, &2, &3], graph.vertices().collect::<Vec<_>>());

        // 3 moved from index 3 to index 2 and kept its edges
        assert_eq!(Ok(true), graph.has_edge(&2, &3));
        assert_eq!(Ok(true), graph.has_edge(&3, &0));
        assert_eq!(Ok(false), graph.has_edge(&0, &3));
        assert_eq!(Err(Error::NotFound), graph.has_edge(&1, &0));
    }

    #[test]
    fn undirected_edge_removal() {
        let mut graph: AdjacencyMatrix<&str, u8> = AdjacencyMatrix::undirected();
        graph.add_vertex("x");
        graph.add_vertex("y");
        graph.add_edge(&"x", &"y", 7).unwrap();
        graph.add_edge(&"y", &"y", 1).unwrap();
        assert_eq!(2, graph.edge_count());

        assert_eq!(Ok(7), graph.remove_edge(&"y", &"x"));
        assert_eq!(Ok(false), graph.has_edge(&"x", &"y"));
        assert_eq!(Err(Error::NotFound), graph.remove_edge(&"x", &"y"));

        graph.remove_vertex(&"y").unwrap();
        assert_eq!(0, graph.edge_count());
        assert_eq!(1, graph.len());
        assert_eq!("{\"x\": []}", format!("{:?}", graph));
    }
}
