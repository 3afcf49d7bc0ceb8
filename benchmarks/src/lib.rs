//! Benchmark utilities for crossfit-encoders.
//!
//! - Synthetic categorical datasets with a controllable number of levels
//! - Timing and summary statistics for the fold-scaling report

pub mod data;
pub mod utils;

pub use data::SyntheticDataset;
pub use utils::{benchmark_with_warmup, time_fn, BenchmarkStats};
