//! Clustering-type census: every distinct way two pattern copies overlap.
//!
//! Two instances of a motif can share 1..size−1 vertices, and not every
//! identification of vertices is possible — some would force edges onto a
//! copy that the pattern does not have. The catalogue enumerates the merges
//! that survive that faithfulness check, deduplicated by isomorphism, and
//! observed instance pairs are then bucketed against it.
//!
//! The overlap enumeration is hand-specialized for 3- and 4-vertex patterns;
//! anything larger is rejected at catalogue construction.

use tracing::debug;

use crate::iso::IsomorphismOracle;
use crate::model::{Graph, Mapping, Pattern};
use crate::{Error, Result};

// ============================================================================
// Catalogue
// ============================================================================

/// Append-only catalogue of canonical overlap graphs, built once per
/// pattern. Entry order is the classification tie-break order.
#[derive(Debug, Clone)]
pub struct TypeCatalogue {
    entries: Vec<Graph>,
}

impl TypeCatalogue {
    /// Enumerate every faithful overlap of two copies of `pattern`.
    pub fn build<O: IsomorphismOracle>(oracle: &O, pattern: &Pattern) -> Result<Self> {
        let size = pattern.size();
        if !(3..=4).contains(&size) {
            return Err(Error::UnsupportedPatternSize(size));
        }

        let mut entries: Vec<Graph> = Vec::new();
        for overlap in 1..size {
            match overlap {
                1 => {
                    for i in 0..size {
                        for i2 in 0..size {
                            consider(&mut entries, oracle, pattern, &[i], &[i2]);
                        }
                    }
                }
                2 => {
                    for i in 0..size {
                        for j in (0..size).filter(|&j| j != i) {
                            for i2 in 0..size {
                                for j2 in (0..size).filter(|&j2| j2 != i2) {
                                    consider(&mut entries, oracle, pattern, &[i, j], &[i2, j2]);
                                }
                            }
                        }
                    }
                }
                3 => {
                    let triples = ordered_triples(size);
                    for m1 in &triples {
                        for m2 in &triples {
                            consider(&mut entries, oracle, pattern, m1, m2);
                        }
                    }
                }
                _ => unreachable!("pattern size capped at 4"),
            }
        }

        debug!(types = entries.len(), size, "clustering-type catalogue built");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalogue entries in classification order.
    pub fn entries(&self) -> &[Graph] {
        &self.entries
    }
}

fn ordered_triples(size: usize) -> Vec<[usize; 3]> {
    let mut out = Vec::new();
    for i in 0..size {
        for j in 0..size {
            for k in 0..size {
                if i != j && i != k && j != k {
                    out.push([i, j, k]);
                }
            }
        }
    }
    out
}

/// Merge one candidate overlap mapping and append it if it is faithful and
/// new. `m1[k]` in copy 1 is identified with `m2[k]` in copy 2.
fn consider<O: IsomorphismOracle>(
    entries: &mut Vec<Graph>,
    oracle: &O,
    pattern: &Pattern,
    m1: &[usize],
    m2: &[usize],
) {
    let size = pattern.size();
    let overlap = m1.len();
    let merged = merge_copies(pattern, m1, m2);

    // Faithful merge: re-extracting either copy's vertex set must give back
    // exactly the pattern's edges — identification must not add any.
    let first: Vec<u32> = (0..size as u32).collect();
    if merged.induced_edge_count(&first) != pattern.edge_count() {
        return;
    }
    let mut second: Vec<u32> = m1.iter().map(|&v| v as u32).collect();
    second.extend(size as u32..(2 * size - overlap) as u32);
    if merged.induced_edge_count(&second) != pattern.edge_count() {
        return;
    }

    if entries.iter().any(|e| oracle.is_isomorphic(&merged, e)) {
        return;
    }
    entries.push(merged);
}

/// Two pattern copies with `m2[k]` collapsed onto `m1[k]`; all edges from
/// both copies, duplicates removed.
fn merge_copies(pattern: &Pattern, m1: &[usize], m2: &[usize]) -> Graph {
    let size = pattern.size();
    let mut merged = pattern.graph().clone();
    merged.add_nodes(size - m1.len());

    // Copy-2 vertex -> merged node: shared vertices collapse onto copy 1,
    // the rest take fresh IDs in index order.
    let mut map = vec![usize::MAX; size];
    for (k, &v2) in m2.iter().enumerate() {
        map[v2] = m1[k];
    }
    let mut next = size;
    for slot in map.iter_mut() {
        if *slot == usize::MAX {
            *slot = next;
            next += 1;
        }
    }

    for (a, b) in pattern.graph().edges() {
        merged.add_edge(map[a as usize] as u32, map[b as usize] as u32);
    }
    merged.simplify();
    merged
}

// ============================================================================
// Census
// ============================================================================

/// Per-type pair counts; the trailing bucket is the unclustered (disjoint)
/// one.
#[derive(Debug, Clone)]
pub struct TypeCensus {
    counts: Vec<u64>,
    node_sets: Option<Vec<Vec<u32>>>,
}

impl TypeCensus {
    /// One count per catalogue entry, plus the unclustered bucket last.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn unclustered(&self) -> u64 {
        self.counts[self.counts.len() - 1]
    }

    /// Host node IDs involved in each type, first-seen order. `None` unless
    /// collection was requested.
    pub fn node_sets(&self) -> Option<&[Vec<u32>]> {
        self.node_sets.as_deref()
    }
}

/// Bucket every unordered pair of unique instances against the catalogue.
///
/// Disjoint pairs land in the unclustered bucket without any structural
/// comparison. Overlapping pairs are rebuilt from the host graph — not from
/// pattern edges alone — and matched against catalogue entries in order,
/// first match winning. A pair matching no entry is an error, never silently
/// dropped.
pub fn classify_pairs<O: IsomorphismOracle>(
    oracle: &O,
    graph: &Graph,
    pattern: &Pattern,
    catalogue: &TypeCatalogue,
    instances: &[Mapping],
    collect_nodes: bool,
) -> Result<TypeCensus> {
    let mut counts = vec![0u64; catalogue.len() + 1];
    let mut node_sets =
        collect_nodes.then(|| vec![Vec::<u32>::new(); catalogue.len()]);

    for (i, a) in instances.iter().enumerate() {
        for b in &instances[i + 1..] {
            let shared = a.shared_vertices(b);
            if shared == 0 {
                let unclustered = counts.len() - 1;
                counts[unclustered] += 1;
                continue;
            }

            let observed = observed_merge(graph, pattern, a, b);
            let bucket = catalogue
                .entries()
                .iter()
                .position(|e| oracle.is_isomorphic(&observed, e))
                .ok_or(Error::Unclassified { shared })?;
            counts[bucket] += 1;

            if let Some(sets) = node_sets.as_mut() {
                let set = &mut sets[bucket];
                for v in a.vertices().into_iter().chain(b.vertices()) {
                    if !set.contains(&v) {
                        set.push(v);
                    }
                }
            }
        }
    }

    Ok(TypeCensus { counts, node_sets })
}

/// The merged subgraph two overlapping instances actually form in the host:
/// copy 1's pattern edges on its own vertices, plus every host edge among
/// copy 2's vertices that touches a non-shared vertex.
fn observed_merge(graph: &Graph, pattern: &Pattern, a: &Mapping, b: &Mapping) -> Graph {
    let size = pattern.size();
    let mut merged = pattern.graph().clone();

    // Merged node -> host vertex; copy 1 occupies 0..size in slot order.
    let mut host_of: Vec<u32> = a.vertices().into_vec();
    for k in 0..size {
        let v = b.vertex(k);
        if !host_of[..size].contains(&v) {
            merged.add_nodes(1);
            host_of.push(v);
        }
    }

    let b_verts = b.vertices();
    for appended in &host_of[size..] {
        for (from, to) in graph.edges() {
            if from != *appended && to != *appended {
                continue;
            }
            if !b_verts.contains(&from) || !b_verts.contains(&to) {
                continue;
            }
            let (Some(pf), Some(pt)) = (
                host_of.iter().position(|&h| h == from),
                host_of.iter().position(|&h| h == to),
            ) else {
                continue;
            };
            merged.add_edge(pf as u32, pt as u32);
        }
    }

    merged.simplify();
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup;
    use crate::iso::Vf2Oracle;

    fn chain_pattern(oracle: &Vf2Oracle) -> Pattern {
        let mut g = Graph::empty(3, true);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        Pattern::new(g, oracle).unwrap()
    }

    #[test]
    fn test_catalogue_entries_pairwise_non_isomorphic() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let catalogue = TypeCatalogue::build(&oracle, &pattern).unwrap();
        assert!(!catalogue.is_empty());
        for (i, a) in catalogue.entries().iter().enumerate() {
            for b in &catalogue.entries()[i + 1..] {
                assert!(!oracle.is_isomorphic(a, b));
            }
        }
    }

    #[test]
    fn test_catalogue_rejects_large_patterns() {
        let oracle = Vf2Oracle::new();
        let mut g = Graph::empty(5, true);
        for v in 0..4 {
            g.add_edge(v, v + 1);
        }
        let pattern = Pattern::new(g, &oracle).unwrap();
        assert!(matches!(
            TypeCatalogue::build(&oracle, &pattern),
            Err(Error::UnsupportedPatternSize(5))
        ));
    }

    #[test]
    fn test_merge_collapses_shared_vertices() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let merged = merge_copies(&pattern, &[2], &[0]);
        // Two chains sharing one vertex: 5 nodes, 4 edges.
        assert_eq!(merged.node_count(), 5);
        assert_eq!(merged.edge_count(), 4);
    }

    #[test]
    fn test_single_overlapping_pair_classified_once() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        // 0 -> 1 -> 2 and 0 -> 3 -> 4 share vertex 0.
        let mut host = Graph::empty(5, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(0, 3);
        host.add_edge(3, 4);

        let catalogue = TypeCatalogue::build(&oracle, &pattern).unwrap();
        let instances = dedup::find_instances(&oracle, &host, &pattern);
        assert_eq!(instances.unique_count(), 2);

        let census = classify_pairs(
            &oracle,
            &host,
            &pattern,
            &catalogue,
            instances.unique(),
            true,
        )
        .unwrap();

        assert_eq!(census.counts().iter().sum::<u64>(), 1);
        assert_eq!(census.unclustered(), 0);
        // The one classified bucket saw all five host vertices.
        let sets = census.node_sets().unwrap();
        let hit: Vec<_> = sets.iter().filter(|s| !s.is_empty()).collect();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].len(), 5);
    }

    #[test]
    fn test_disjoint_pair_is_unclustered() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let mut host = Graph::empty(6, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(3, 4);
        host.add_edge(4, 5);

        let catalogue = TypeCatalogue::build(&oracle, &pattern).unwrap();
        let instances = dedup::find_instances(&oracle, &host, &pattern);
        let census = classify_pairs(
            &oracle,
            &host,
            &pattern,
            &catalogue,
            instances.unique(),
            false,
        )
        .unwrap();

        assert_eq!(census.unclustered(), 1);
        assert_eq!(census.counts().iter().sum::<u64>(), 1);
    }

    #[test]
    fn test_every_pair_lands_in_exactly_one_bucket() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        // Directed 4-cycle: four instances, six pairs, all overlapping.
        let mut host = Graph::empty(4, true);
        host.add_edge(0, 1);
        host.add_edge(1, 2);
        host.add_edge(2, 3);
        host.add_edge(3, 0);

        let catalogue = TypeCatalogue::build(&oracle, &pattern).unwrap();
        let instances = dedup::find_instances(&oracle, &host, &pattern);
        assert_eq!(instances.unique_count(), 4);

        let census = classify_pairs(
            &oracle,
            &host,
            &pattern,
            &catalogue,
            instances.unique(),
            false,
        )
        .unwrap();
        assert_eq!(census.counts().iter().sum::<u64>(), 6);
        assert_eq!(census.unclustered(), 0);
    }
}
