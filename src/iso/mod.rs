//! # Isomorphism Oracle
//!
//! This is THE contract between the statistics engines and whatever does
//! the actual subgraph matching. Everything the core needs is defined here:
//! mapping enumeration, exact isomorphism tests, automorphism counts, and
//! pattern construction from an isomorphism-class index.
//!
//! | Implementation | Module | Description |
//! |----------------|--------|-------------|
//! | `Vf2Oracle` | `vf2` | Built-in VF2-style backtracking enumerator |

pub mod isoclass;
pub mod vf2;

pub use vf2::Vf2Oracle;

use crate::Result;
use crate::model::{Graph, Mapping};

/// The matching contract consumed by deduplication, synthesis, and
/// classification.
///
/// Only [`subisomorphisms`](IsomorphismOracle::subisomorphisms) is required;
/// the other operations have generic defaults an implementation may override
/// with something faster.
pub trait IsomorphismOracle: Sync {
    /// Every injective mapping of `pattern`'s vertices onto `host` vertices
    /// such that each pattern edge lands on a host edge.
    ///
    /// Matches are monomorphisms: the mapped vertex set may carry host edges
    /// beyond the pattern's. The deduplication pass filters those where the
    /// caller needs edge-exact instances.
    fn subisomorphisms(&self, host: &Graph, pattern: &Graph) -> Vec<Mapping>;

    /// Exact isomorphism between two graphs.
    ///
    /// Default: equal directedness, node and edge counts, plus at least one
    /// subisomorphism — which at equal sizes is a bijection.
    fn is_isomorphic(&self, a: &Graph, b: &Graph) -> bool {
        a.is_directed() == b.is_directed()
            && a.node_count() == b.node_count()
            && a.edge_count() == b.edge_count()
            && !self.subisomorphisms(b, a).is_empty()
    }

    /// Number of self-mappings of `pattern` onto itself. Always >= 1
    /// (identity).
    fn automorphism_count(&self, pattern: &Graph) -> u64 {
        self.subisomorphisms(pattern, pattern).len() as u64
    }

    /// Representative graph of one isomorphism class of small graphs.
    fn pattern_from_isoclass(
        &self,
        size: usize,
        class_id: usize,
        directed: bool,
    ) -> Result<Graph> {
        isoclass::create(size, class_id, directed)
    }
}
