//! K-fold splitters.

use crate::preprocessing::PreprocessingError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Partition of `0..n_rows` into disjoint folds.
///
/// Every row belongs to exactly one fold. Row indices inside each fold are
/// kept in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldAssignment {
    folds: Vec<Vec<usize>>,
    fold_of: Vec<usize>,
}

impl FoldAssignment {
    /// Build an assignment from explicit folds.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::InvalidParameter`] if a row index is out
    /// of range, appears twice, or is not covered by any fold.
    pub fn try_from_folds(
        mut folds: Vec<Vec<usize>>,
        n_rows: usize,
    ) -> Result<Self, PreprocessingError> {
        let mut fold_of = vec![usize::MAX; n_rows];
        for (fold_idx, fold) in folds.iter_mut().enumerate() {
            fold.sort_unstable();
            for &row in fold.iter() {
                if row >= n_rows {
                    return Err(PreprocessingError::InvalidParameter(format!(
                        "row {} in fold {} is out of range for {} rows",
                        row, fold_idx, n_rows
                    )));
                }
                if fold_of[row] != usize::MAX {
                    return Err(PreprocessingError::InvalidParameter(format!(
                        "row {} assigned to folds {} and {}",
                        row, fold_of[row], fold_idx
                    )));
                }
                fold_of[row] = fold_idx;
            }
        }
        if let Some(row) = fold_of.iter().position(|&f| f == usize::MAX) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "row {} is not assigned to any fold",
                row
            )));
        }
        Ok(Self { folds, fold_of })
    }

    /// Number of folds.
    pub fn n_folds(&self) -> usize {
        self.folds.len()
    }

    /// Number of rows covered.
    pub fn n_rows(&self) -> usize {
        self.fold_of.len()
    }

    /// Rows of fold `idx`, ascending.
    ///
    /// # Panics
    /// If `idx >= n_folds()`.
    pub fn fold(&self, idx: usize) -> &[usize] {
        &self.folds[idx]
    }

    /// Fold that `row` belongs to.
    ///
    /// # Panics
    /// If `row >= n_rows()`.
    pub fn fold_of(&self, row: usize) -> usize {
        self.fold_of[row]
    }

    /// Rows outside fold `idx`, ascending.
    pub fn complement(&self, idx: usize) -> Vec<usize> {
        self.fold_of
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f != idx)
            .map(|(row, _)| row)
            .collect()
    }

    /// Iterate over the folds in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.folds.iter().map(Vec::as_slice)
    }
}

fn check_n_splits(n_splits: usize, n_rows: usize) -> Result<(), PreprocessingError> {
    if n_rows == 0 {
        return Err(PreprocessingError::EmptyInput(
            "Cannot split zero rows into folds".to_string(),
        ));
    }
    if n_splits < 2 {
        return Err(PreprocessingError::InvalidParameter(format!(
            "number of folds must be at least 2, got {}",
            n_splits
        )));
    }
    if n_splits > n_rows {
        return Err(PreprocessingError::InvalidParameter(format!(
            "number of folds ({}) cannot exceed number of rows ({})",
            n_splits, n_rows
        )));
    }
    Ok(())
}

/// K-fold splitter.
///
/// Rows are shuffled (when `shuffle` is set) and then cut into `n_splits`
/// contiguous groups. The first `n_rows % n_splits` folds receive one extra
/// row, so fold sizes differ by at most one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
}

impl KFold {
    /// Create a shuffling splitter with `n_splits` folds.
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: true,
        }
    }

    /// Set whether rows are shuffled before being cut into folds.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Number of folds produced.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Split `n_rows` rows into folds.
    ///
    /// # Errors
    /// [`PreprocessingError::EmptyInput`] for zero rows,
    /// [`PreprocessingError::InvalidParameter`] if `n_splits < 2` or
    /// `n_splits > n_rows`.
    pub fn split<R: Rng + ?Sized>(
        &self,
        n_rows: usize,
        rng: &mut R,
    ) -> Result<FoldAssignment, PreprocessingError> {
        check_n_splits(self.n_splits, n_rows)?;

        let mut indices: Vec<usize> = (0..n_rows).collect();
        if self.shuffle {
            indices.shuffle(rng);
        }

        let base = n_rows / self.n_splits;
        let extra = n_rows % self.n_splits;
        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold_idx in 0..self.n_splits {
            let size = if fold_idx < extra { base + 1 } else { base };
            folds.push(indices[start..start + size].to_vec());
            start += size;
        }

        FoldAssignment::try_from_folds(folds, n_rows)
    }
}

/// Stratified k-fold splitter for class-labelled rows.
///
/// Rows of each class are shuffled separately (when `shuffle` is set), the
/// classes are laid out one after another, and rows are dealt round-robin
/// into the folds. Fold sizes differ by at most one and each class is spread
/// as evenly as possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StratifiedKFold {
    n_splits: usize,
    shuffle: bool,
}

impl StratifiedKFold {
    /// Create a shuffling stratified splitter with `n_splits` folds.
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: true,
        }
    }

    /// Set whether rows are shuffled within each class.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Number of folds produced.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Split rows labelled with class indices `classes` into folds.
    ///
    /// # Errors
    /// Same as [`KFold::split`], with `n_rows = classes.len()`.
    pub fn split<R: Rng + ?Sized>(
        &self,
        classes: &[usize],
        rng: &mut R,
    ) -> Result<FoldAssignment, PreprocessingError> {
        let n_rows = classes.len();
        check_n_splits(self.n_splits, n_rows)?;

        let n_classes = classes.iter().max().map_or(0, |&c| c + 1);
        let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
        for (row, &class) in classes.iter().enumerate() {
            by_class[class].push(row);
        }

        let mut folds: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];
        let mut position = 0;
        for mut rows in by_class {
            if self.shuffle {
                rows.shuffle(rng);
            }
            for row in rows {
                folds[position % self.n_splits].push(row);
                position += 1;
            }
        }

        FoldAssignment::try_from_folds(folds, n_rows)
    }
}
