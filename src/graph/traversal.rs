//! Lazy breadth- and depth-first walks.
//!
//! Both walks yield each vertex reachable from the start exactly once and
//! keep their frontier on the heap, so long paths are no trouble. They borrow
//! the graph for as long as they run.

use std::collections::VecDeque;

use super::Graph;
use crate::error::{Error, Result};
use crate::hash_table::HashSet;

/// Starts a breadth-first walk at `start`: the start, then everything one
/// edge away, then everything two edges away, and so on.
pub fn bfs<'g, G: Graph>(graph: &'g G, start: &G::Vertex) -> Result<Bfs<'g, G>> {
    if !graph.contains_vertex(start) {
        return Err(Error::NotFound);
    }

    let mut visited = HashSet::new();
    visited.insert(start.clone());

    let mut queue = VecDeque::new();
    queue.push_back((start.clone(), 0));

    Ok(Bfs {
        graph,
        queue,
        visited,
    })
}

/// Starts a depth-first walk at `start`, yielding vertices in pre-order and
/// following each vertex's neighbors in the order the graph lists them.
pub fn dfs<'g, G: Graph>(graph: &'g G, start: &G::Vertex) -> Result<Dfs<'g, G>> {
    if !graph.contains_vertex(start) {
        return Err(Error::NotFound);
    }

    Ok(Dfs {
        graph,
        stack: vec![start.clone()],
        visited: HashSet::new(),
    })
}

/// Every vertex reachable from `start`, paired with its distance in edges,
/// in breadth-first order.
pub fn bfs_distances<G: Graph>(graph: &G, start: &G::Vertex) -> Result<Vec<(G::Vertex, usize)>> {
    let mut walk = bfs(graph, start)?;
    let mut out = Vec::new();
    while let Some(pair) = walk.next_with_depth() {
        out.push(pair);
    }
    Ok(out)
}

pub struct Bfs<'g, G: Graph> {
    graph: &'g G,
    queue: VecDeque<(G::Vertex, usize)>,
    visited: HashSet<G::Vertex>,
}

impl<'g, G: Graph> Bfs<'g, G> {
    /// The next vertex and how many edges it is from the start.
    pub fn next_with_depth(&mut self) -> Option<(G::Vertex, usize)> {
        let (vertex, depth) = self.queue.pop_front()?;

        let neighbors = self
            .graph
            .neighbors(&vertex)
            .expect("the walk only queues vertices the graph handed it");
        for next in neighbors {
            if self.visited.insert(next.clone()) {
                self.queue.push_back((next, depth + 1));
            }
        }

        Some((vertex, depth))
    }
}

impl<'g, G: Graph> Iterator for Bfs<'g, G> {
    type Item = G::Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_depth().map(|(vertex, _)| vertex)
    }
}

pub struct Dfs<'g, G: Graph> {
    graph: &'g G,
    stack: Vec<G::Vertex>,
    visited: HashSet<G::Vertex>,
}

impl<'g, G: Graph> Iterator for Dfs<'g, G> {
    type Item = G::Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(vertex) = self.stack.pop() {
            if !self.visited.insert(vertex.clone()) {
                continue;
            }

            // pushed backwards so the first neighbor comes off the stack first
            let neighbors = self
                .graph
                .neighbors(&vertex)
                .expect("the walk only stacks vertices the graph handed it");
            for next in neighbors.into_iter().rev() {
                if !self.visited.contains(&next) {
                    self.stack.push(next);
                }
            }

            return Some(vertex);
        }

        None
    }
}
