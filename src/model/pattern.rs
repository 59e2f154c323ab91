//! The motif: a small pattern graph with its cached symmetry count.

use serde::{Deserialize, Serialize};

use super::Graph;
use crate::iso::IsomorphismOracle;
use crate::{Error, Result};

/// A pattern graph plus its automorphism count (rotational symmetry).
///
/// The automorphism count — the number of self-mappings of the pattern onto
/// itself — is computed once at construction and reused by every statistic
/// that de-multiplies raw match counts into true instance counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    graph: Graph,
    automorphisms: u64,
}

impl Pattern {
    /// Wrap a pattern graph, caching its automorphism count.
    pub fn new<O: IsomorphismOracle>(graph: Graph, oracle: &O) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(Error::Input("pattern must have at least one vertex".into()));
        }
        let automorphisms = oracle.automorphism_count(&graph);
        debug_assert!(automorphisms >= 1, "identity self-mapping always exists");
        Ok(Self { graph, automorphisms })
    }

    /// Build the pattern for one isomorphism class of 3- or 4-vertex graphs.
    ///
    /// `directed` should match the host graph: the class index is
    /// interpreted within the directed or undirected catalogue accordingly.
    pub fn from_isoclass<O: IsomorphismOracle>(
        size: usize,
        class_id: usize,
        directed: bool,
        oracle: &O,
    ) -> Result<Self> {
        let graph = oracle.pattern_from_isoclass(size, class_id, directed)?;
        Self::new(graph, oracle)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of pattern vertices.
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Cached automorphism count, always >= 1.
    pub fn automorphisms(&self) -> u64 {
        self.automorphisms
    }
}
