//! Fold-scaling report: wall time of `fit_transform` against `fit`.
//!
//! Run with: cargo run --release --package benchmarks

use benchmarks::{benchmark_with_warmup, SyntheticDataset};
use crossfit_encoders::{SupervisedTransformer, TargetEncoder};

fn main() {
    println!("crossfit-encoders fold-scaling report");
    println!();
    println!(
        "{:>8} {:>6} {:>14} {:>14} {:>8}",
        "rows", "folds", "fit (ms)", "fit_xf (ms)", "ratio"
    );

    for &n_rows in &[10_000usize, 100_000] {
        let data = SyntheticDataset::generate(n_rows, &[8, 200, 5_000], 42);
        for &n_folds in &[2usize, 5, 10] {
            let (_, fit) = benchmark_with_warmup(1, 5, || {
                let mut encoder = TargetEncoder::new().with_n_folds(n_folds);
                encoder.fit(&data.x, &data.y).is_ok()
            });
            let (_, cross) = benchmark_with_warmup(1, 5, || {
                let mut encoder = TargetEncoder::new().with_n_folds(n_folds);
                encoder.fit_transform(&data.x, &data.y).is_ok()
            });
            println!(
                "{:>8} {:>6} {:>14.2} {:>14.2} {:>8.2}",
                n_rows,
                n_folds,
                fit.median_ms,
                cross.median_ms,
                cross.median_ms / fit.median_ms.max(f64::EPSILON)
            );
        }
    }

    println!();
    println!("Criterion benchmarks:");
    println!("  cargo bench --package benchmarks --bench target_encoder");
}
