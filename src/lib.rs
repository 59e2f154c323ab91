//! # motifclust — Motif Clustering Statistics
//!
//! Statistics describing how instances of a small connectivity pattern
//! ("motif") overlap and cluster inside a larger network.
//!
//! ## What it computes
//!
//! 1. **Unique instances**: raw subisomorphism matches deduplicated into
//!    canonical occurrences, respecting the pattern's automorphism symmetry
//! 2. **Clustering coefficient**: realized vertex sharing between instance
//!    pairs, normalized against the theoretical maximum
//! 3. **z-score**: the observed coefficient against a null model of random
//!    graphs matched on node count and motif-instance count
//! 4. **Clustering types**: a census of every distinct way two pattern
//!    copies overlap, bucketed by isomorphism
//!
//! ## Quick Start
//!
//! ```rust
//! use motifclust::{Analyzer, Graph, Pattern};
//!
//! # fn example() -> motifclust::Result<()> {
//! // Two directed 2-chains sharing a vertex.
//! let mut host = Graph::empty(5, true);
//! for (a, b) in [(0, 1), (1, 2), (0, 3), (3, 4)] {
//!     host.add_edge(a, b);
//! }
//!
//! let analyzer = Analyzer::vf2();
//! let mut chain = Graph::empty(3, true);
//! chain.add_edge(0, 1);
//! chain.add_edge(1, 2);
//! let pattern = Pattern::new(chain, analyzer.oracle())?;
//! let coefficient = analyzer.coefficient(&host, &pattern)?;
//! assert_eq!(coefficient, 0.5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Pattern sizes
//!
//! Patterns are 3 or 4 vertices. The overlap-type enumeration is
//! hand-specialized per size and rejects anything larger outright.

// ============================================================================
// Modules
// ============================================================================

pub mod classify;
pub mod dedup;
pub mod extract;
pub mod gml;
pub mod iso;
pub mod model;
pub mod stats;
pub mod synth;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{TypeCatalogue, TypeCensus};
pub use dedup::Instances;
pub use extract::Extraction;
pub use iso::{IsomorphismOracle, Vf2Oracle};
pub use model::{Graph, Mapping, Pattern};
pub use stats::{CancelToken, SampleOptions, SampleReport};

// ============================================================================
// Top-level Analyzer handle
// ============================================================================

/// The primary entry point. An `Analyzer` wraps an isomorphism oracle and
/// exposes every statistic over it.
pub struct Analyzer<O: IsomorphismOracle> {
    oracle: O,
}

impl<O: IsomorphismOracle> Analyzer<O> {
    /// Create an Analyzer with the given oracle.
    pub fn with_oracle(oracle: O) -> Self {
        Self { oracle }
    }

    /// Access the underlying oracle (for advanced use).
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Build a pattern from an isomorphism-class index, caching its
    /// automorphism count.
    pub fn pattern_from_isoclass(
        &self,
        size: usize,
        class_id: usize,
        directed: bool,
    ) -> Result<Pattern> {
        Pattern::from_isoclass(size, class_id, directed, &self.oracle)
    }

    /// Cleaned and deduplicated occurrences of `pattern` in `graph`.
    pub fn instances(&self, graph: &Graph, pattern: &Pattern) -> Instances {
        dedup::find_instances(&self.oracle, graph, pattern)
    }

    /// Observed motif clustering coefficient.
    pub fn coefficient(&self, graph: &Graph, pattern: &Pattern) -> Result<f64> {
        stats::coefficient(&self.oracle, graph, pattern)
    }

    /// Observed coefficient plus a null-model sampling distribution and
    /// z-score.
    pub fn sample(
        &self,
        graph: &Graph,
        pattern: &Pattern,
        options: &SampleOptions,
        cancel: &CancelToken,
    ) -> Result<SampleReport> {
        stats::run_samples(&self.oracle, graph, pattern, options, cancel)
    }

    /// Clustering-type catalogue and the census of observed instance pairs.
    pub fn census(
        &self,
        graph: &Graph,
        pattern: &Pattern,
        collect_nodes: bool,
    ) -> Result<(TypeCatalogue, TypeCensus)> {
        let catalogue = TypeCatalogue::build(&self.oracle, pattern)?;
        let instances = self.instances(graph, pattern);
        let census = classify::classify_pairs(
            &self.oracle,
            graph,
            pattern,
            &catalogue,
            instances.unique(),
            collect_nodes,
        )?;
        Ok((catalogue, census))
    }

    /// Union of every unique instance as its own graph, with the
    /// new-ID → host-ID map.
    pub fn extract(&self, graph: &Graph, pattern: &Pattern) -> Extraction {
        extract::extract_union(&self.oracle, graph, pattern)
    }
}

/// Analyzer over the built-in VF2 oracle.
impl Analyzer<Vf2Oracle> {
    pub fn vf2() -> Self {
        Self::with_oracle(Vf2Oracle::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Input(String),

    #[error("GML parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(
        "synthesis could not reach {target} instances \
         (stopped at {achieved} after {trials} stalled trials)"
    )]
    Synthesis { target: usize, achieved: usize, trials: u64 },

    #[error("clustering coefficient undefined: {unique} unique instances, need at least 2")]
    UndefinedStatistic { unique: usize },

    #[error("overlap enumeration supports 3- and 4-vertex patterns, got {0}")]
    UnsupportedPatternSize(usize),

    #[error("no valid samples: every null-model draw failed")]
    NoValidSamples,

    #[error("instance pair sharing {shared} vertices matches no clustering type")]
    Unclassified { shared: usize },

    #[error("cancelled")]
    Cancelled,

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
