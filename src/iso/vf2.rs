//! VF2-style backtracking enumerator — the built-in oracle.
//!
//! Patterns here are 3–4 vertices, so the state space is tiny; the classic
//! VF2 refinements reduce to degree pruning plus edge-consistency checks
//! against the already-mapped prefix. Candidates are tried in ascending
//! host-vertex order, so the enumeration order is deterministic.

use hashbrown::HashSet;
use smallvec::SmallVec;

use super::IsomorphismOracle;
use crate::model::{Graph, Mapping};

/// Built-in matching oracle. Stateless; per-call scratch only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vf2Oracle;

impl Vf2Oracle {
    pub fn new() -> Self {
        Self
    }
}

impl IsomorphismOracle for Vf2Oracle {
    fn subisomorphisms(&self, host: &Graph, pattern: &Graph) -> Vec<Mapping> {
        let mut results = Vec::new();
        Search::new(host, pattern).run(false, &mut results);
        results
    }

    fn is_isomorphic(&self, a: &Graph, b: &Graph) -> bool {
        if a.is_directed() != b.is_directed()
            || a.node_count() != b.node_count()
            || a.edge_count() != b.edge_count()
        {
            return false;
        }
        let mut results = Vec::new();
        Search::new(b, a).run(true, &mut results);
        !results.is_empty()
    }
}

/// One matching run: host indexes, pattern constraints, assignment state.
struct Search {
    host_nodes: usize,
    host_edges: HashSet<(u32, u32)>,
    host_out: Vec<u32>,
    host_in: Vec<u32>,
    /// Per pattern vertex `k`: edges to already-assigned vertices `j < k`,
    /// as `(j, forward)` where `forward` means the pattern edge runs k -> j.
    prior_edges: Vec<SmallVec<[(usize, bool); 4]>>,
    pattern_out: Vec<u32>,
    pattern_in: Vec<u32>,
    assigned: Vec<i64>,
    used: Vec<bool>,
}

impl Search {
    fn new(host: &Graph, pattern: &Graph) -> Self {
        let n = host.node_count();
        let p = pattern.node_count();
        let directed = host.is_directed();

        let mut host_edges = HashSet::with_capacity(host.edge_count() * 2);
        let mut host_out = vec![0u32; n];
        let mut host_in = vec![0u32; n];
        for (a, b) in host.edges() {
            if host_edges.insert((a, b)) && a != b {
                host_out[a as usize] += 1;
                host_in[b as usize] += 1;
            }
            if !directed {
                host_edges.insert((b, a));
            }
        }
        if !directed {
            // Undirected degree = out + in counted above on one orientation.
            for v in 0..n {
                host_out[v] += host_in[v];
                host_in[v] = host_out[v];
            }
        }

        let mut prior_edges: Vec<SmallVec<[(usize, bool); 4]>> = vec![SmallVec::new(); p];
        let mut pattern_out = vec![0u32; p];
        let mut pattern_in = vec![0u32; p];
        for (a, b) in pattern.edges() {
            let (a, b) = (a as usize, b as usize);
            pattern_out[a] += 1;
            pattern_in[b] += 1;
            if a > b {
                prior_edges[a].push((b, true));
            } else {
                prior_edges[b].push((a, false));
            }
        }
        if !directed {
            for v in 0..p {
                pattern_out[v] += pattern_in[v];
                pattern_in[v] = pattern_out[v];
            }
        }

        Self {
            host_nodes: n,
            host_edges,
            host_out,
            host_in,
            prior_edges,
            pattern_out,
            pattern_in,
            assigned: vec![-1; p],
            used: vec![false; n],
        }
    }

    fn run(&mut self, stop_at_first: bool, results: &mut Vec<Mapping>) {
        if self.assigned.is_empty() || self.assigned.len() > self.host_nodes {
            return;
        }
        self.extend(0, stop_at_first, results);
    }

    fn extend(&mut self, depth: usize, stop_at_first: bool, results: &mut Vec<Mapping>) {
        if depth == self.assigned.len() {
            results.push(Mapping::new(self.assigned.iter().copied()));
            return;
        }
        for candidate in 0..self.host_nodes {
            if self.used[candidate] || !self.feasible(depth, candidate as u32) {
                continue;
            }
            self.assigned[depth] = candidate as i64;
            self.used[candidate] = true;
            self.extend(depth + 1, stop_at_first, results);
            self.used[candidate] = false;
            self.assigned[depth] = -1;
            if stop_at_first && !results.is_empty() {
                return;
            }
        }
    }

    /// Degree pruning plus edge consistency against the mapped prefix.
    fn feasible(&self, k: usize, candidate: u32) -> bool {
        let c = candidate as usize;
        if self.host_out[c] < self.pattern_out[k] || self.host_in[c] < self.pattern_in[k] {
            return false;
        }
        for &(j, forward) in &self.prior_edges[k] {
            let other = self.assigned[j] as u32;
            let (from, to) = if forward { (candidate, other) } else { (other, candidate) };
            if !self.host_edges.contains(&(from, to)) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain3(directed: bool) -> Graph {
        let mut g = Graph::empty(3, directed);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g
    }

    #[test]
    fn test_chain_matches_itself_once() {
        let oracle = Vf2Oracle::new();
        let p = chain3(true);
        let maps = oracle.subisomorphisms(&p, &p);
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].slots(), &[0, 1, 2]);
    }

    #[test]
    fn test_undirected_chain_has_two_self_mappings() {
        let oracle = Vf2Oracle::new();
        let p = chain3(false);
        assert_eq!(oracle.automorphism_count(&p), 2);
    }

    #[test]
    fn test_two_disjoint_chains_give_two_mappings() {
        let oracle = Vf2Oracle::new();
        let mut host = Graph::empty(6, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(3, 4);
        host.add_edge(4, 5);
        let maps = oracle.subisomorphisms(&host, &chain3(true));
        assert_eq!(maps.len(), 2);
    }

    #[test]
    fn test_monomorphism_ignores_extra_host_edges() {
        // Directed triangle hosts the 2-chain via every rotation.
        let oracle = Vf2Oracle::new();
        let mut host = Graph::empty(3, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(2, 0);
        let maps = oracle.subisomorphisms(&host, &chain3(true));
        assert_eq!(maps.len(), 3);
    }

    #[test]
    fn test_is_isomorphic_relabel() {
        let oracle = Vf2Oracle::new();
        let mut a = Graph::empty(3, true);
        a.add_edge(0, 1);
        a.add_edge(1, 2);
        let mut b = Graph::empty(3, true);
        b.add_edge(2, 0);
        b.add_edge(0, 1);
        assert!(oracle.is_isomorphic(&a, &b));
    }

    #[test]
    fn test_is_isomorphic_rejects_different_structure() {
        let oracle = Vf2Oracle::new();
        let mut a = Graph::empty(3, true);
        a.add_edge(0, 1);
        a.add_edge(1, 2);
        let mut b = Graph::empty(3, true);
        b.add_edge(0, 1);
        b.add_edge(2, 1);
        assert!(!oracle.is_isomorphic(&a, &b));
    }

    #[test]
    fn test_pattern_larger_than_host_yields_nothing() {
        let oracle = Vf2Oracle::new();
        let host = Graph::empty(2, true);
        assert!(oracle.subisomorphisms(&host, &chain3(true)).is_empty());
    }
}
