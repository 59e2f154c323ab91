//! Null-model synthesis: random graphs constrained to an exact motif count.
//!
//! A best-effort stochastic hill-climb, not a guaranteed construction:
//! batches of pattern copies are thrown at random vertex assignments, the
//! candidate is recounted, and the batch is accepted on progress or rejected
//! (with a smaller batch) on overshoot. Callers must treat failure as a
//! normal outcome — the sampler records failed trials and moves on.

use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::dedup;
use crate::iso::IsomorphismOracle;
use crate::model::{Graph, Pattern};
use crate::stats::CancelToken;
use crate::{Error, Result};

/// Build a random graph on `nodes` vertices containing exactly `target`
/// unique instances of `pattern`.
///
/// `max_trials` bounds the consecutive no-progress iterations; with
/// `max_trials == 0` and a nonzero target this fails immediately. A zero
/// target trivially succeeds with the empty graph.
pub fn synthesize<O: IsomorphismOracle, R: Rng>(
    oracle: &O,
    nodes: usize,
    directed: bool,
    pattern: &Pattern,
    target: usize,
    max_trials: u64,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<Graph> {
    if target == 0 {
        return Ok(Graph::empty(nodes, directed));
    }
    if nodes == 0 {
        return Err(Error::Synthesis { target, achieved: 0, trials: 0 });
    }

    let mut graph = Graph::empty(nodes, directed);
    let mut add = (target / 5).max(1);
    let mut trials: u64 = 0;
    let mut accepted = 0usize;

    while trials < max_trials {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut candidate = graph.clone();
        for _ in 0..add {
            place_random_copy(&mut candidate, pattern, rng);
        }
        // Blind placement duplicates edges and drops self-loops here, before
        // any structural comparison sees them.
        candidate.simplify();

        let current = dedup::find_instances(oracle, &candidate, pattern).unique_count();
        trace!(current, target, add, trials, "synthesis step");

        if current == target {
            debug!(target, "synthesis reached target");
            return Ok(candidate);
        }
        if current < target && current != accepted {
            // Progress: keep the batch and aim the next one at the gap.
            graph = candidate;
            accepted = current;
            add = ((target - current) / 3).max(1);
            trials = 0;
        } else {
            // Overshoot or stall: drop the batch and try smaller.
            add /= 3;
            if add < 1 {
                add = 1;
                trials += 1;
            }
        }
    }

    debug!(target, achieved = accepted, trials, "synthesis gave up");
    Err(Error::Synthesis { target, achieved: accepted, trials })
}

/// Stamp one pattern copy onto `graph` at a uniform-random vertex
/// assignment. Assignments may collide or self-loop; that is resolved by the
/// caller's simplify step.
fn place_random_copy<R: Rng>(graph: &mut Graph, pattern: &Pattern, rng: &mut R) {
    let nodes = graph.node_count() as u32;
    let slots: SmallVec<[u32; 4]> = (0..pattern.size())
        .map(|_| rng.random_range(0..nodes))
        .collect();
    for (a, b) in pattern.graph().edges() {
        graph.add_edge(slots[a as usize], slots[b as usize]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iso::Vf2Oracle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn chain_pattern(oracle: &Vf2Oracle) -> Pattern {
        let mut g = Graph::empty(3, true);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        Pattern::new(g, oracle).unwrap()
    }

    #[test]
    fn test_zero_target_returns_empty_graph() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let cancel = CancelToken::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let g = synthesize(&oracle, 10, true, &pattern, 0, 200, &mut rng, &cancel).unwrap();
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_zero_trials_fails_immediately() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let cancel = CancelToken::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = synthesize(&oracle, 10, true, &pattern, 3, 0, &mut rng, &cancel).unwrap_err();
        assert!(matches!(err, Error::Synthesis { target: 3, .. }));
    }

    #[test]
    fn test_success_has_exact_count_and_nodes() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let cancel = CancelToken::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let g = synthesize(&oracle, 20, true, &pattern, 4, 200, &mut rng, &cancel).unwrap();
        assert_eq!(g.node_count(), 20);
        assert_eq!(dedup::find_instances(&oracle, &g, &pattern).unique_count(), 4);
    }

    #[test]
    fn test_cancellation_short_circuits() {
        let oracle = Vf2Oracle::new();
        let pattern = chain_pattern(&oracle);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = synthesize(&oracle, 10, true, &pattern, 2, 200, &mut rng, &cancel).unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
