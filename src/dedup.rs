//! Deduplication of raw subisomorphism matches into unique motif instances.
//!
//! The oracle returns one mapping per vertex *ordering*, so a single
//! occurrence of the pattern shows up once per automorphism, and on directed
//! hosts some matches are spurious (their vertex set carries host edges the
//! pattern lacks). This module produces both views the statistics need: the
//! validity-filtered raw list and the canonical unique-instance list.
//!
//! The uniqueness scan is O(k² · size²) over k surviving mappings, which is
//! fine for the intended operating range of up to a few hundred thousand raw
//! matches. Check the debug logs for the raw count if a run crawls.

use tracing::debug;

use crate::iso::IsomorphismOracle;
use crate::model::{Graph, Mapping, Pattern};

/// The two deduplication products for one (host, pattern) pair.
#[derive(Debug, Clone)]
pub struct Instances {
    cleaned: Vec<Mapping>,
    valid: usize,
    unique: Vec<Mapping>,
}

impl Instances {
    /// Every raw mapping, spurious ones stamped invalid in place.
    pub fn cleaned(&self) -> &[Mapping] {
        &self.cleaned
    }

    /// Number of mappings that survived cleanup.
    pub fn valid_count(&self) -> usize {
        self.valid
    }

    /// First-seen mapping per distinct vertex set.
    pub fn unique(&self) -> &[Mapping] {
        &self.unique
    }

    /// True instance count.
    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }
}

/// Enumerate, clean, and deduplicate the pattern's occurrences in `graph`.
pub fn find_instances<O: IsomorphismOracle>(
    oracle: &O,
    graph: &Graph,
    pattern: &Pattern,
) -> Instances {
    let mut cleaned = oracle.subisomorphisms(graph, pattern.graph());
    debug!(raw = cleaned.len(), "enumerated raw mappings");
    let valid = clean_mappings(graph, pattern, &mut cleaned);
    let unique = unique_instances(&cleaned);
    debug!(valid, unique = unique.len(), "deduplicated instances");
    Instances { cleaned, valid, unique }
}

/// Invalidate spurious mappings in place; returns the surviving count.
///
/// A mapping is spurious when the host's induced subgraph on its vertex set
/// has more edges than the pattern — possible on directed hosts, where the
/// enumerator only checks that pattern edges are present. Undirected hosts
/// skip the pass entirely, keeping the original tool's working assumption
/// that undirected matches are edge-exact.
pub fn clean_mappings(graph: &Graph, pattern: &Pattern, mappings: &mut [Mapping]) -> usize {
    if !graph.is_directed() {
        return mappings.len();
    }
    let pattern_edges = pattern.edge_count();
    let mut valid = 0;
    for mapping in mappings.iter_mut() {
        if graph.induced_edge_count(&mapping.vertices()) == pattern_edges {
            valid += 1;
        } else {
            mapping.invalidate();
        }
    }
    valid
}

/// First-seen valid mapping per distinct vertex set, order-independent.
///
/// Two mappings denote the same instance iff their vertex sets are equal as
/// sets; which representative survives depends on enumeration order, but the
/// resulting count does not.
pub fn unique_instances(cleaned: &[Mapping]) -> Vec<Mapping> {
    let mut unique: Vec<Mapping> = Vec::new();
    for mapping in cleaned.iter().filter(|m| m.is_valid()) {
        if !unique.iter().any(|u| u.same_vertex_set(mapping)) {
            unique.push(mapping.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iso::Vf2Oracle;

    fn chain_pattern(oracle: &Vf2Oracle) -> Pattern {
        let mut g = Graph::empty(3, true);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        Pattern::new(g, oracle).unwrap()
    }

    #[test]
    fn test_overlapping_chains_stay_distinct() {
        // A directed 4-cycle holds four 2-chains, pairwise overlapping.
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let mut host = Graph::empty(4, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(2, 3);
        host.add_edge(3, 0);
        let instances = find_instances(&oracle, &host, &pattern);
        assert_eq!(instances.unique_count(), 4);
    }

    #[test]
    fn test_directed_cleanup_drops_spurious_matches() {
        // The 2-chain maps into a directed triangle three ways, but every
        // vertex set carries a third edge the pattern lacks.
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let mut host = Graph::empty(3, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(2, 0);
        let instances = find_instances(&oracle, &host, &pattern);
        assert_eq!(instances.valid_count(), 0);
        assert_eq!(instances.unique_count(), 0);
        assert!(instances.cleaned().iter().all(|m| !m.is_valid()));
    }

    #[test]
    fn test_unique_count_is_order_independent() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let mut host = Graph::empty(5, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(2, 3);
        host.add_edge(3, 4);
        let mut mappings = oracle.subisomorphisms(&host, pattern.graph());
        clean_mappings(&host, &pattern, &mut mappings);
        let forward = unique_instances(&mappings);
        mappings.reverse();
        let backward = unique_instances(&mappings);
        assert_eq!(forward.len(), backward.len());
    }

    #[test]
    fn test_symmetric_pattern_collapses_orbit() {
        // Undirected 2-chain: each occurrence appears twice (two endpoint
        // orders) and collapses to one instance.
        let oracle = Vf2Oracle::new();
        let mut g = Graph::empty(3, false);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let pattern = Pattern::new(g, &oracle).unwrap();
        let mut host = Graph::empty(3, false);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        let instances = find_instances(&oracle, &host, &pattern);
        assert_eq!(instances.valid_count(), 2);
        assert_eq!(instances.unique_count(), 1);
    }
}
