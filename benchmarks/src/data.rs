//! Seeded synthetic datasets.

use crossfit_encoders::{CategoricalFrame, Category};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Categorical features plus a continuous target.
///
/// Column `j` has `cardinalities[j]` levels. The target is the sum of a
/// fixed per-level effect over all columns plus uniform noise, so encodings
/// carry real signal.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub x: CategoricalFrame,
    pub y: Vec<f64>,
}

impl SyntheticDataset {
    /// Generate `n_rows` rows with the given column cardinalities.
    pub fn generate(n_rows: usize, cardinalities: &[usize], seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let effects: Vec<Vec<f64>> = cardinalities
            .iter()
            .map(|&levels| (0..levels).map(|_| rng.gen_range(-1.0..1.0)).collect())
            .collect();

        let mut y: Vec<f64> = (0..n_rows).map(|_| rng.gen_range(-0.5..0.5)).collect();
        let mut columns = Vec::with_capacity(cardinalities.len());
        for (col, &levels) in cardinalities.iter().enumerate() {
            let mut column = Vec::with_capacity(n_rows);
            for target in y.iter_mut() {
                let level = rng.gen_range(0..levels.max(1));
                *target += effects[col].get(level).copied().unwrap_or(0.0);
                column.push(Category::Code(level as i64));
            }
            columns.push(column);
        }

        let x = CategoricalFrame::new(columns)
            .unwrap_or_else(|e| panic!("generated columns must have equal length: {}", e));
        Self { x, y }
    }

    /// Binary version of the same data: 1 where the target is above zero.
    pub fn binarized(&self) -> Vec<f64> {
        self.y.iter().map(|&v| if v > 0.0 { 1.0 } else { 0.0 }).collect()
    }
}
