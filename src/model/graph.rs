//! Host and pattern graphs as node count + edge multiset.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// A graph: dense node IDs `0..node_count`, directed flag, edge multiset.
///
/// Duplicate edges and self-loops are permitted transiently — the null-model
/// synthesizer places pattern copies blindly — and are removed by
/// [`Graph::simplify`] before any structural comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    directed: bool,
    nodes: usize,
    edges: Vec<(u32, u32)>,
}

impl Graph {
    /// An edgeless graph on `nodes` vertices.
    pub fn empty(nodes: usize, directed: bool) -> Self {
        Self { directed, nodes, edges: Vec::new() }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Append `count` isolated vertices.
    pub fn add_nodes(&mut self, count: usize) {
        self.nodes += count;
    }

    /// Append one edge. For undirected graphs the stored orientation is
    /// arbitrary; comparisons treat `(a, b)` and `(b, a)` as equal.
    pub fn add_edge(&mut self, from: u32, to: u32) {
        debug_assert!((from as usize) < self.nodes && (to as usize) < self.nodes);
        self.edges.push((from, to));
    }

    /// Iterate over edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges.iter().copied()
    }

    /// Remove self-loops and duplicate edges, keeping first occurrences.
    ///
    /// Undirected edges are canonicalized to `(min, max)` so that the two
    /// orientations of the same edge collapse.
    pub fn simplify(&mut self) {
        let directed = self.directed;
        let mut seen: HashSet<(u32, u32)> = HashSet::with_capacity(self.edges.len());
        self.edges.retain_mut(|edge| {
            if edge.0 == edge.1 {
                return false;
            }
            if !directed && edge.0 > edge.1 {
                *edge = (edge.1, edge.0);
            }
            seen.insert(*edge)
        });
    }

    /// Whether `(from, to)` is present; orientation-insensitive when
    /// undirected.
    pub fn has_edge(&self, from: u32, to: u32) -> bool {
        self.edges.iter().any(|&(a, b)| {
            (a, b) == (from, to) || (!self.directed && (a, b) == (to, from))
        })
    }

    /// Number of edges (with multiplicity) whose endpoints both lie in
    /// `verts`. Self-loops on a member vertex count.
    ///
    /// This is the edge count of the induced subgraph on `verts`, which the
    /// deduplication pass compares against the pattern's edge count.
    pub fn induced_edge_count(&self, verts: &[u32]) -> usize {
        self.edges
            .iter()
            .filter(|(a, b)| verts.contains(a) && verts.contains(b))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_removes_loops_and_duplicates() {
        let mut g = Graph::empty(3, true);
        g.add_edge(0, 1);
        g.add_edge(0, 1);
        g.add_edge(1, 1);
        g.add_edge(1, 2);
        g.simplify();
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 2));
        assert!(!g.has_edge(1, 1));
    }

    #[test]
    fn test_simplify_undirected_collapses_orientations() {
        let mut g = Graph::empty(2, false);
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        g.simplify();
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(1, 0));
    }

    #[test]
    fn test_directed_has_edge_respects_orientation() {
        let mut g = Graph::empty(2, true);
        g.add_edge(0, 1);
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
    }

    #[test]
    fn test_induced_edge_count() {
        let mut g = Graph::empty(4, true);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 0);
        assert_eq!(g.induced_edge_count(&[0, 1, 2]), 2);
        assert_eq!(g.induced_edge_count(&[0, 1]), 1);
        assert_eq!(g.induced_edge_count(&[1, 3]), 0);
    }
}
