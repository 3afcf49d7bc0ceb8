//! Shrinkage of per-category target means toward the global mean.
//!
//! For a category `c` seen `n_c` times with target mean `mean_c`, and global
//! mean `mean_g` over the same rows:
//! ```text
//! encoded(c) = (n_c * mean_c + m * mean_g) / (n_c + m)
//! ```
//! The smoothing strength `m` comes from a [`ShrinkageStrategy`].
//! [`Smoothing::Auto`] estimates it per category as
//! ```text
//! m_c = var_c / var_g
//! ```
//! where `var_c` is the population variance of the target inside the category
//! and `var_g` the population variance over all rows. A category whose target
//! is noisy relative to the whole set is pulled harder toward `mean_g`.

use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};

/// Running count, mean and variance of a set of target values (Welford).
///
/// Squared deviations must stay finite; the target encoder rejects targets
/// beyond [`MAX_TARGET_MAGNITUDE`](crate::preprocessing::MAX_TARGET_MAGNITUDE).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl TargetStats {
    /// Add one target value.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Number of values seen.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of the values seen (0 when empty).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (ddof = 0) of the values seen.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.m2 / self.count as f64).max(0.0)
        }
    }
}

impl FromIterator<f64> for TargetStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = TargetStats::default();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}

/// Source of the smoothing strength `m`.
///
/// Implementations must be deterministic. Returning `None` means the
/// category carries no usable signal and encodes to the global mean.
pub trait ShrinkageStrategy {
    /// Smoothing strength for one category, given its statistics and those
    /// of all rows the table is learned from.
    fn strength(&self, category: &TargetStats, global: &TargetStats) -> Option<f64>;

    /// Encoded value of one category.
    fn shrink(&self, category: &TargetStats, global: &TargetStats) -> f64 {
        let n = category.count() as f64;
        match self.strength(category, global) {
            Some(m) if n + m > 0.0 => (n * category.mean() + m * global.mean()) / (n + m),
            _ => global.mean(),
        }
    }
}

/// Built-in smoothing strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Smoothing {
    /// Empirical-Bayes estimate `m = var_c / var_g` per category.
    #[default]
    Auto,
    /// The same `m` for every category. `0` disables shrinkage.
    Fixed(f64),
}

impl Smoothing {
    /// Check that a fixed strength is finite and non-negative.
    pub fn validate(&self) -> Result<(), PreprocessingError> {
        match *self {
            Smoothing::Auto => Ok(()),
            Smoothing::Fixed(m) if m.is_finite() && m >= 0.0 => Ok(()),
            Smoothing::Fixed(m) => Err(PreprocessingError::InvalidParameter(format!(
                "smoothing must be a finite non-negative number, got {}",
                m
            ))),
        }
    }
}

impl ShrinkageStrategy for Smoothing {
    fn strength(&self, category: &TargetStats, global: &TargetStats) -> Option<f64> {
        match *self {
            Smoothing::Fixed(m) => Some(m),
            Smoothing::Auto => {
                let global_var = global.variance();
                // Constant target: every category mean equals the global mean.
                if global_var <= 0.0 {
                    return None;
                }
                Some(category.variance() / global_var)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(values: &[f64]) -> TargetStats {
        values.iter().copied().collect()
    }

    #[test]
    fn test_target_stats_mean_and_variance() {
        let s = stats(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count(), 4);
        assert!((s.mean() - 2.5).abs() < 1e-12);
        assert!((s.variance() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_target_stats_empty() {
        let s = TargetStats::default();
        assert_eq!(s.count(), 0);
        assert_eq!(s.variance(), 0.0);
    }

    #[test]
    fn test_fixed_zero_is_category_mean() {
        let cat = stats(&[1.0, 1.0]);
        let global = stats(&[1.0, 1.0, 0.0, 0.0]);
        assert!((Smoothing::Fixed(0.0).shrink(&cat, &global) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_formula() {
        // n = 2, mean_c = 1, mean_g = 0.5, m = 2 -> (2 + 1) / 4
        let cat = stats(&[1.0, 1.0]);
        let global = stats(&[1.0, 1.0, 0.0, 0.0]);
        assert!((Smoothing::Fixed(2.0).shrink(&cat, &global) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_auto_pure_category_keeps_its_mean() {
        // var_c = 0 -> m = 0
        let cat = stats(&[3.0, 3.0, 3.0]);
        let global = stats(&[3.0, 3.0, 3.0, 0.0, 1.0]);
        assert!((Smoothing::Auto.shrink(&cat, &global) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_auto_matches_lambda_form() {
        let cat = stats(&[0.0, 2.0, 4.0]);
        let global = stats(&[0.0, 2.0, 4.0, 10.0, 12.0, -3.0]);
        let n = 3.0;
        let lambda = n * global.variance() / (n * global.variance() + cat.variance());
        let expected = lambda * cat.mean() + (1.0 - lambda) * global.mean();
        assert!((Smoothing::Auto.shrink(&cat, &global) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_auto_constant_target_is_global_mean() {
        let cat = stats(&[5.0]);
        let global = stats(&[5.0, 5.0, 5.0]);
        assert_eq!(Smoothing::Auto.strength(&cat, &global), None);
        assert_eq!(Smoothing::Auto.shrink(&cat, &global), 5.0);
    }

    #[test]
    fn test_validate() {
        assert!(Smoothing::Auto.validate().is_ok());
        assert!(Smoothing::Fixed(0.0).validate().is_ok());
        assert!(Smoothing::Fixed(10.0).validate().is_ok());
        assert!(Smoothing::Fixed(-1.0).validate().is_err());
        assert!(Smoothing::Fixed(f64::NAN).validate().is_err());
        assert!(Smoothing::Fixed(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_custom_strategy() {
        struct CountHalf;
        impl ShrinkageStrategy for CountHalf {
            fn strength(&self, category: &TargetStats, _: &TargetStats) -> Option<f64> {
                Some(category.count() as f64)
            }
        }
        // m = n -> halfway between category and global mean
        let cat = stats(&[2.0, 2.0]);
        let global = stats(&[2.0, 2.0, 0.0, 0.0]);
        assert!((CountHalf.shrink(&cat, &global) - 1.5).abs() < 1e-12);
    }
}
