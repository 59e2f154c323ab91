//! Null-model sampling: repeated synthesis trials aggregated into a z-score.
//!
//! Trials are independent — each gets its own seeded RNG and its own graph —
//! so the loop is an embarrassingly parallel map. `parallelism == 1` runs
//! the plain sequential path; higher values fan trials out over a dedicated
//! thread pool. Either way the result vector is ordered by trial index, so
//! sequential and parallel runs of the same seed agree exactly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::iso::IsomorphismOracle;
use crate::model::{Graph, Pattern};
use crate::stats::coefficient::{coefficient, coefficient_from_instances};
use crate::{Error, Result, dedup, synth};

/// Sentinel recorded for a trial whose synthesis (or scoring) failed.
pub const FAILED_SAMPLE: f64 = -1.0;

// ============================================================================
// Options and cancellation
// ============================================================================

/// Knobs for one sampling run. Passed by value; no process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleOptions {
    /// Number of null-model graphs to draw.
    pub sample_size: usize,
    /// Synthesis trial budget per draw.
    pub max_trials: u64,
    /// Worker threads for the trial fan-out; 1 = sequential.
    pub parallelism: usize,
    /// Base seed; trial `t` uses `seed + t`, so runs are reproducible and
    /// trials uncorrelated.
    pub seed: u64,
}

impl SampleOptions {
    pub fn new(sample_size: usize, max_trials: u64) -> Self {
        Self { sample_size, max_trials, parallelism: 1, seed: 0 }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Cooperative cancellation flag shared across trials.
///
/// `max_trials` bounds each synthesis loop, but a hostile target can still
/// make a run arbitrarily long; this is the external stop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Report
// ============================================================================

/// Outcome of a sampling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReport {
    /// Observed coefficient of the real graph.
    pub observed: f64,
    /// Unique-instance count the null models were matched to.
    pub target_count: usize,
    /// One coefficient per trial, [`FAILED_SAMPLE`] for failed ones.
    pub samples: Vec<f64>,
    /// `None` when no trial produced a valid coefficient.
    pub z_score: Option<f64>,
    /// Number of failed trials (partial-failure signal).
    pub failed: usize,
}

// ============================================================================
// Sampling
// ============================================================================

/// Score `graph` against `options.sample_size` random graphs matched on node
/// count and motif-instance count.
///
/// Fails up front when the observed coefficient is undefined; individual
/// trial failures are recorded as sentinels and excluded from the z-score.
pub fn run_samples<O: IsomorphismOracle>(
    oracle: &O,
    graph: &Graph,
    pattern: &Pattern,
    options: &SampleOptions,
    cancel: &CancelToken,
) -> Result<SampleReport> {
    let started = Instant::now();
    let instances = dedup::find_instances(oracle, graph, pattern);
    let observed = coefficient_from_instances(pattern, &instances)?;
    let target = instances.unique_count();
    let nodes = graph.node_count();
    let directed = graph.is_directed();

    let trial = |index: usize| -> f64 {
        if cancel.is_cancelled() {
            return FAILED_SAMPLE;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(options.seed.wrapping_add(index as u64));
        match synth::synthesize(
            oracle,
            nodes,
            directed,
            pattern,
            target,
            options.max_trials,
            &mut rng,
            cancel,
        ) {
            Ok(sample) => coefficient(oracle, &sample, pattern).unwrap_or(FAILED_SAMPLE),
            Err(_) => FAILED_SAMPLE,
        }
    };

    let samples = parallel_map(options.parallelism, options.sample_size, trial)?;
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let failed = samples.iter().filter(|s| **s < 0.0).count();
    let z = z_score(observed, &samples).ok();
    debug!(
        observed,
        target,
        failed,
        elapsed = ?started.elapsed(),
        "sampling run finished"
    );

    Ok(SampleReport { observed, target_count: target, samples, z_score: z, failed })
}

/// z-score of `observed` against the valid (non-sentinel) samples.
///
/// Population mean and variance, no finite-sample correction — kept as the
/// original statistic defines it.
pub fn z_score(observed: f64, samples: &[f64]) -> Result<f64> {
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for &s in samples.iter().filter(|s| **s >= 0.0) {
        sum += s;
        sum_sq += s * s;
        count += 1;
    }
    if count == 0 {
        return Err(Error::NoValidSamples);
    }
    let mean = sum / count as f64;
    let mean_sq = sum_sq / count as f64;
    Ok((observed - mean) / (mean_sq - mean * mean).sqrt())
}

/// Map `f` over `0..count`, sequentially or on a pool of `parallelism`
/// workers. Results are in index order either way, so the downstream
/// reduction cannot observe scheduling.
fn parallel_map<T, F>(parallelism: usize, count: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    if parallelism <= 1 {
        return Ok((0..count).map(f).collect());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
        .map_err(|e| Error::Input(format!("cannot build sampling thread pool: {e}")))?;
    Ok(pool.install(|| (0..count).into_par_iter().map(f).collect()))
}
