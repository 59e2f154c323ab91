//! The motif clustering coefficient: realized vertex sharing between
//! instance pairs over the theoretical maximum.
//!
//! The computation runs on the *cleaned raw* mapping list rather than the
//! deduplicated one, then divides the pair totals through by the pattern's
//! automorphism count: each true instance appears `rot` times in the raw
//! list, so each instance pair is counted `rot²` times. That rescaling is
//! exact only when every instance's orbit size equals the pattern's global
//! automorphism count — true for the vertex-transitive patterns this was
//! designed around, and deliberately kept as-is rather than corrected (see
//! `test_rescaling_assumption_pinned`).

use std::time::Instant;

use tracing::debug;

use crate::dedup::{self, Instances};
use crate::iso::IsomorphismOracle;
use crate::model::{Graph, Pattern};
use crate::{Error, Result};

/// Clustering coefficient of `pattern` inside `graph`.
///
/// Undefined (an error, distinct from a valid zero) when fewer than two
/// unique instances exist — there are no pairs to share anything.
pub fn coefficient<O: IsomorphismOracle>(
    oracle: &O,
    graph: &Graph,
    pattern: &Pattern,
) -> Result<f64> {
    let started = Instant::now();
    let instances = dedup::find_instances(oracle, graph, pattern);
    let value = coefficient_from_instances(pattern, &instances);
    debug!(elapsed = ?started.elapsed(), "clustering coefficient computed");
    value
}

/// As [`coefficient`], reusing an already-deduplicated instance set.
pub fn coefficient_from_instances(pattern: &Pattern, instances: &Instances) -> Result<f64> {
    let size = pattern.size();
    let rot = pattern.automorphisms() as i64;
    let valid = instances.valid_count() as i64;

    // Each true instance contributes `rot` raw mappings.
    let unique = valid / rot;
    if unique < 2 {
        return Err(Error::UndefinedStatistic { unique: unique as usize });
    }

    let cleaned = instances.cleaned();
    let mut total_shared: i64 = 0;
    for (i, a) in cleaned.iter().enumerate() {
        if !a.is_valid() {
            continue;
        }
        for b in &cleaned[i + 1..] {
            if !b.is_valid() {
                continue;
            }
            let found = a.shared_vertices(b);
            // A full vertex-set match is the same instance under symmetry,
            // not a pair of distinct instances; leave it out.
            if found < size {
                total_shared += found as i64;
            }
        }
    }

    let actual_shared = total_shared / (rot * rot);
    let possible_shared = (size as i64 - 1) * unique * (unique - 1) / 2;
    debug!(valid, unique, total_shared, actual_shared, possible_shared, "coefficient terms");

    Ok(actual_shared as f64 / possible_shared as f64)
}
