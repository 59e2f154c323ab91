//! # Clustering Statistics
//!
//! The observed motif clustering coefficient and its null-model z-score.

pub mod coefficient;
pub mod sample;

pub use coefficient::{coefficient, coefficient_from_instances};
pub use sample::{CancelToken, SampleOptions, SampleReport, run_samples, z_score};
