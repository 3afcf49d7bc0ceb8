//! Per-column encoding tables.

use crate::dataset::Category;
use crate::preprocessing::encoding::smoothing::{ShrinkageStrategy, TargetStats};
use std::collections::HashMap;

/// Mapping from category to encoded value, with a fallback for categories
/// that were not seen while learning.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodingTable {
    values: HashMap<Category, f64>,
    fallback: f64,
}

impl EncodingTable {
    /// Learn a table from the given rows of one column.
    ///
    /// Only the rows listed in `rows` contribute, both to the per-category
    /// statistics and to the global mean/variance used for shrinkage. The
    /// fallback is the global target mean over those rows.
    ///
    /// `rows` must be non-empty and every index must be valid for both
    /// `column` and `target`.
    pub fn learn<S, I>(column: &[Category], target: &[f64], rows: I, strategy: &S) -> Self
    where
        S: ShrinkageStrategy + ?Sized,
        I: IntoIterator<Item = usize>,
    {
        let mut global = TargetStats::default();
        let mut per_category: HashMap<&Category, TargetStats> = HashMap::new();
        for row in rows {
            let value = target[row];
            global.push(value);
            per_category.entry(&column[row]).or_default().push(value);
        }

        let values = per_category
            .into_iter()
            .map(|(category, stats)| (category.clone(), strategy.shrink(&stats, &global)))
            .collect();

        Self {
            values,
            fallback: global.mean(),
        }
    }

    /// Rebuild a table from stored `(category, value)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (Category, f64)>, fallback: f64) -> Self {
        Self {
            values: entries.into_iter().collect(),
            fallback,
        }
    }

    /// Encoded value for `category`; the fallback if it was never seen.
    pub fn encode(&self, category: &Category) -> f64 {
        self.values.get(category).copied().unwrap_or(self.fallback)
    }

    /// Encoded value for a category seen while learning.
    pub fn get(&self, category: &Category) -> Option<f64> {
        self.values.get(category).copied()
    }

    /// Value used for unseen categories.
    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Number of learned categories.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no category was learned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Learned `(category, value)` pairs sorted by category.
    pub fn sorted_entries(&self) -> Vec<(Category, f64)> {
        let mut entries: Vec<(Category, f64)> = self
            .values
            .iter()
            .map(|(category, &value)| (category.clone(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
