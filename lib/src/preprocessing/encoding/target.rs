//! Target encoding with internal cross fitting.
//!
//! Each category of a categorical column is replaced by a shrunk estimate of
//! the target mean for that category (see [`Smoothing`]).
//!
//! - [`TargetEncoder::fit`] learns one table per column from all rows.
//!   [`TargetEncoder::transform`] applies those tables to new data.
//! - [`TargetEncoder::fit_transform`] encodes the training rows with k-fold
//!   cross fitting: the rows of fold `i` are encoded with a table learned from
//!   the other `k - 1` folds, so no row's encoding has seen its own target.
//!   It then stores the same full-data tables as `fit`.
//!
//! Using `fit` + `transform` on the training data leaks each row's target
//! into its own feature, which a downstream model will happily overfit on
//! when categories are rare (high-cardinality identifiers are the extreme
//! case). Use `fit_transform` for the training set.
//!
//! # Example
//! ```rust
//! use crossfit_encoders::dataset::CategoricalFrame;
//! use crossfit_encoders::preprocessing::{Smoothing, SupervisedTransformer, TargetEncoder};
//!
//! let x = CategoricalFrame::from_str_columns(&[vec![
//!     Some("a"), Some("a"), Some("b"), Some("b"), Some("a"), Some("b"),
//! ]]).unwrap();
//! let y = [1.0, 1.2, 0.1, 0.0, 0.9, 0.2];
//!
//! let mut encoder = TargetEncoder::new()
//!     .with_n_folds(3)
//!     .with_smoothing(Smoothing::Fixed(1.0))
//!     .with_random_seed(7);
//! let train = encoder.fit_transform(&x, &y).unwrap();
//! assert_eq!(train.dim(), (6, 1));
//!
//! let unseen = CategoricalFrame::from_str_columns(&[vec![Some("c")]]).unwrap();
//! let test = encoder.transform(&unseen).unwrap();
//! assert_eq!(test[[0, 0]], encoder.fitted().unwrap().target_mean());
//! ```

use crate::dataset::{CategoricalFrame, Category};
use crate::model_selection::{FoldAssignment, KFold, StratifiedKFold};
use crate::preprocessing::encoding::label::LabelEncoder;
use crate::preprocessing::encoding::smoothing::Smoothing;
use crate::preprocessing::encoding::table::EncodingTable;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, SupervisedTransformer};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Kind of target the encoder is fitted on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    /// Binary if the target has exactly two distinct integral values, else
    /// continuous.
    #[default]
    Auto,
    /// Real-valued target; encodings are shrunk conditional means.
    Continuous,
    /// Two-class target; classes are mapped to 0/1 and encodings are shrunk
    /// conditional probabilities of the larger class.
    Binary,
}

/// Configuration for TargetEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetEncoderConfig {
    /// Number of cross-fitting folds used by `fit_transform`.
    pub n_folds: usize,
    /// Shrinkage toward the global mean.
    pub smoothing: Smoothing,
    /// Seed of the fold shuffle.
    pub random_seed: u64,
    /// Shuffle rows before cutting them into folds.
    pub shuffle: bool,
    /// How to interpret the target.
    pub target_type: TargetType,
}

impl Default for TargetEncoderConfig {
    fn default() -> Self {
        Self {
            n_folds: 5,
            smoothing: Smoothing::Auto,
            random_seed: 0,
            shuffle: true,
            target_type: TargetType::Auto,
        }
    }
}

impl TargetEncoderConfig {
    /// Check hyperparameters that do not depend on the data.
    pub fn validate(&self) -> Result<(), PreprocessingError> {
        if self.n_folds < 2 {
            return Err(PreprocessingError::InvalidParameter(format!(
                "n_folds must be at least 2, got {}",
                self.n_folds
            )));
        }
        self.smoothing.validate()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PreprocessingError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json_string(&self) -> Result<String, PreprocessingError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Largest accepted target magnitude. Squared deviations of targets within
/// this bound stay finite in the running variance.
pub const MAX_TARGET_MAGNITUDE: f64 = 1e100;

/// Target vector after validation and class mapping.
struct PreparedTarget {
    values: Vec<f64>,
    target_type: TargetType,
    classes: Option<Vec<f64>>,
    class_index: Option<Vec<usize>>,
}

fn prepare_target(y: &[f64], requested: TargetType) -> Result<PreparedTarget, PreprocessingError> {
    if let Some(row) = y.iter().position(|v| !v.is_finite()) {
        return Err(PreprocessingError::InvalidTarget(format!(
            "target must be finite, got {} at row {}",
            y[row], row
        )));
    }
    if let Some(row) = y.iter().position(|v| v.abs() > MAX_TARGET_MAGNITUDE) {
        return Err(PreprocessingError::InvalidTarget(format!(
            "target magnitude must not exceed {:e}, got {} at row {}",
            MAX_TARGET_MAGNITUDE, y[row], row
        )));
    }

    let continuous = || PreparedTarget {
        values: y.to_vec(),
        target_type: TargetType::Continuous,
        classes: None,
        class_index: None,
    };

    if requested == TargetType::Continuous {
        return Ok(continuous());
    }

    let labels = LabelEncoder::new().fit(y)?;
    let binary = match (requested, labels.n_classes()) {
        (TargetType::Binary, 2) => true,
        (TargetType::Binary, n) => {
            return Err(PreprocessingError::InvalidTarget(format!(
                "binary target must have exactly 2 classes, got {}",
                n
            )))
        }
        // Two non-integral values (e.g. two prices) stay a regression target.
        (_, 2) => labels.classes().iter().all(|c| c.fract() == 0.0),
        _ => false,
    };
    if !binary {
        return Ok(continuous());
    }

    let class_index = labels.transform(y)?;
    Ok(PreparedTarget {
        values: class_index.iter().map(|&c| c as f64).collect(),
        target_type: TargetType::Binary,
        classes: Some(labels.classes().to_vec()),
        class_index: Some(class_index),
    })
}

fn check_inputs(x: &CategoricalFrame, y: &[f64]) -> Result<(), PreprocessingError> {
    if x.n_rows() != y.len() {
        return Err(PreprocessingError::DimensionMismatch {
            expected_rows: x.n_rows(),
            got_rows: y.len(),
        });
    }
    if x.n_rows() == 0 {
        return Err(PreprocessingError::EmptyInput(
            "Cannot fit TargetEncoder on zero rows".to_string(),
        ));
    }
    if x.n_columns() == 0 {
        return Err(PreprocessingError::EmptyInput(
            "Cannot fit TargetEncoder without categorical columns".to_string(),
        ));
    }
    Ok(())
}

/// Target encoder with internal cross fitting.
///
/// Stateful: starts unfitted, holds a [`FittedTargetEncoder`] after a
/// successful fit. A failed fit leaves the previous state untouched.
#[derive(Clone, Debug, Default)]
pub struct TargetEncoder {
    config: TargetEncoderConfig,
    fitted: Option<FittedTargetEncoder>,
}

impl TargetEncoder {
    /// Create an unfitted encoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfitted encoder from a configuration.
    pub fn from_config(config: TargetEncoderConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    /// Set the number of cross-fitting folds.
    pub fn with_n_folds(mut self, n_folds: usize) -> Self {
        self.config.n_folds = n_folds;
        self
    }

    /// Set the smoothing strategy.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.config.smoothing = smoothing;
        self
    }

    /// Set the seed of the fold shuffle.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Set whether rows are shuffled before fold assignment.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.config.shuffle = shuffle;
        self
    }

    /// Set how the target is interpreted.
    pub fn with_target_type(mut self, target_type: TargetType) -> Self {
        self.config.target_type = target_type;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &TargetEncoderConfig {
        &self.config
    }

    /// Take the fitted value out of the encoder.
    pub fn into_fitted(self) -> Result<FittedTargetEncoder, PreprocessingError> {
        self.fitted.ok_or_else(not_fitted)
    }

    /// Like [`SupervisedTransformer::fit_transform`], with a caller-supplied
    /// random source for the fold shuffle instead of one seeded from
    /// `random_seed`.
    pub fn fit_transform_with_rng<R: Rng + ?Sized>(
        &mut self,
        x: &CategoricalFrame,
        y: &[f64],
        rng: &mut R,
    ) -> Result<Array2<f64>, PreprocessingError> {
        self.config.validate()?;
        check_inputs(x, y)?;
        let target = prepare_target(y, self.config.target_type)?;
        let (n_rows, n_cols) = x.shape();

        let folds = self.split(&target, n_rows, rng)?;
        debug!(
            n_rows,
            n_cols,
            n_folds = folds.n_folds(),
            target_type = ?target.target_type,
            "cross-fitting target encoder"
        );

        let fold_tables = self.fold_tables(x, &target.values, &folds);
        let mut encoded = Array2::<f64>::zeros((n_rows, n_cols));
        for (fold_idx, tables) in fold_tables.iter().enumerate() {
            for &row in folds.fold(fold_idx) {
                for (col, table) in tables.iter().enumerate() {
                    encoded[[row, col]] = table.encode(&x.column(col)[row]);
                }
            }
        }

        self.fitted = Some(self.fit_full(x, target));
        Ok(encoded)
    }

    fn split<R: Rng + ?Sized>(
        &self,
        target: &PreparedTarget,
        n_rows: usize,
        rng: &mut R,
    ) -> Result<FoldAssignment, PreprocessingError> {
        match &target.class_index {
            Some(classes) => StratifiedKFold::new(self.config.n_folds)
                .with_shuffle(self.config.shuffle)
                .split(classes, rng),
            None => KFold::new(self.config.n_folds)
                .with_shuffle(self.config.shuffle)
                .split(n_rows, rng),
        }
    }

    /// For each fold, one table per column learned from the other folds.
    fn fold_tables(
        &self,
        x: &CategoricalFrame,
        target: &[f64],
        folds: &FoldAssignment,
    ) -> Vec<Vec<EncodingTable>> {
        let smoothing = self.config.smoothing;
        let learn = |fold_idx: usize| {
            let train_rows = folds.complement(fold_idx);
            trace!(fold = fold_idx, n_train = train_rows.len(), "learning fold tables");
            x.columns()
                .map(|column| {
                    EncodingTable::learn(column, target, train_rows.iter().copied(), &smoothing)
                })
                .collect::<Vec<_>>()
        };

        map_folds(folds.n_folds(), learn)
    }

    fn fit_full(&self, x: &CategoricalFrame, target: PreparedTarget) -> FittedTargetEncoder {
        let n_rows = x.n_rows();
        let smoothing = self.config.smoothing;
        let tables: Vec<EncodingTable> = x
            .columns()
            .map(|column| EncodingTable::learn(column, &target.values, 0..n_rows, &smoothing))
            .collect();
        let target_mean = tables.first().map_or(0.0, EncodingTable::fallback);

        FittedTargetEncoder {
            config: self.config.clone(),
            tables,
            target_mean,
            target_type: target.target_type,
            classes: target.classes,
            feature_names: x.names().map(<[String]>::to_vec),
        }
    }
}

/// `f(0), f(1), ..., f(n - 1)` in fold order.
#[cfg(feature = "parallel")]
fn map_folds<T, F>(n_folds: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    (0..n_folds).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_folds<T, F>(n_folds: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n_folds).map(f).collect()
}

fn not_fitted() -> PreprocessingError {
    PreprocessingError::NotFitted(
        "TargetEncoder must be fitted before calling transform".to_string(),
    )
}

impl SupervisedTransformer for TargetEncoder {
    type Input = CategoricalFrame;
    type Target = [f64];
    type Output = Array2<f64>;
    type Fitted = FittedTargetEncoder;

    fn fit(&mut self, x: &CategoricalFrame, y: &[f64]) -> Result<&mut Self, PreprocessingError> {
        self.config.validate()?;
        check_inputs(x, y)?;
        let target = prepare_target(y, self.config.target_type)?;
        debug!(
            n_rows = x.n_rows(),
            n_cols = x.n_columns(),
            target_type = ?target.target_type,
            "fitting target encoder"
        );
        self.fitted = Some(self.fit_full(x, target));
        Ok(self)
    }

    fn fit_transform(
        &mut self,
        x: &CategoricalFrame,
        y: &[f64],
    ) -> Result<Array2<f64>, PreprocessingError> {
        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        self.fit_transform_with_rng(x, y, &mut rng)
    }

    fn fitted(&self) -> Result<&FittedTargetEncoder, PreprocessingError> {
        self.fitted.as_ref().ok_or_else(not_fitted)
    }
}

/// Serializable parameters for a fitted TargetEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetEncoderParams {
    /// Configuration the encoder was fitted with.
    pub config: TargetEncoderConfig,
    /// Learned categories per column, sorted.
    pub categories_: Vec<Vec<Category>>,
    /// Encoded value per category, aligned with `categories_`.
    pub encodings_: Vec<Vec<f64>>,
    /// Global target mean (fallback for unseen categories).
    pub target_mean_: f64,
    /// Resolved target type (never `Auto`).
    pub target_type_: TargetType,
    /// Original class labels for a binary target.
    pub classes_: Option<Vec<f64>>,
    /// Column names seen during fit.
    pub feature_names_in_: Option<Vec<String>>,
    /// Number of input features.
    pub n_features_in: usize,
}

/// Fitted TargetEncoder: full-data encoding tables and the global mean.
///
/// Immutable; `transform` only reads it, so it can be shared across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedTargetEncoder {
    config: TargetEncoderConfig,
    tables: Vec<EncodingTable>,
    target_mean: f64,
    target_type: TargetType,
    classes: Option<Vec<f64>>,
    feature_names: Option<Vec<String>>,
}

impl FittedTargetEncoder {
    /// Global target mean over all training rows.
    ///
    /// For a binary target this is the fraction of rows in the larger class.
    pub fn target_mean(&self) -> f64 {
        self.target_mean
    }

    /// Resolved target type (`Continuous` or `Binary`).
    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    /// Class labels of a binary target, `[class mapped to 0, class mapped to 1]`.
    pub fn classes(&self) -> Option<&[f64]> {
        self.classes.as_deref()
    }

    /// Configuration the encoder was fitted with.
    pub fn config(&self) -> &TargetEncoderConfig {
        &self.config
    }

    /// Categories learned for column `col`, sorted.
    pub fn categories(&self, col: usize) -> Option<Vec<Category>> {
        self.tables
            .get(col)
            .map(|t| t.sorted_entries().into_iter().map(|(c, _)| c).collect())
    }

    /// Encodings of column `col`, aligned with [`Self::categories`].
    pub fn encodings(&self, col: usize) -> Option<Vec<f64>> {
        self.tables
            .get(col)
            .map(|t| t.sorted_entries().into_iter().map(|(_, v)| v).collect())
    }

    /// Learned encoding of one category, `None` if it was not seen in fit.
    pub fn encoding_for(&self, col: usize, category: &Category) -> Option<f64> {
        self.tables.get(col).and_then(|t| t.get(category))
    }

    /// Output column names: the fitted column names, or `x0, x1, ...`.
    pub fn feature_names_out(&self) -> Vec<String> {
        match &self.feature_names {
            Some(names) => names.clone(),
            None => (0..self.tables.len()).map(|i| format!("x{}", i)).collect(),
        }
    }
}

impl FittedTransformer for FittedTargetEncoder {
    type Input = CategoricalFrame;
    type Output = Array2<f64>;
    type Params = TargetEncoderParams;

    fn transform(&self, data: &CategoricalFrame) -> Result<Array2<f64>, PreprocessingError> {
        let (rows, cols) = data.shape();
        if cols != self.tables.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.tables.len(),
                got_features: cols,
            });
        }

        let mut result = Array2::<f64>::zeros((rows, cols));
        for (col, (table, column)) in self.tables.iter().zip(data.columns()).enumerate() {
            for (row, category) in column.iter().enumerate() {
                result[[row, col]] = table.encode(category);
            }
        }
        Ok(result)
    }

    fn extract_params(&self) -> TargetEncoderParams {
        let (categories_, encodings_): (Vec<Vec<Category>>, Vec<Vec<f64>>) = self
            .tables
            .iter()
            .map(|t| -> (Vec<Category>, Vec<f64>) { t.sorted_entries().into_iter().unzip() })
            .unzip();

        TargetEncoderParams {
            config: self.config.clone(),
            categories_,
            encodings_,
            target_mean_: self.target_mean,
            target_type_: self.target_type,
            classes_: self.classes.clone(),
            feature_names_in_: self.feature_names.clone(),
            n_features_in: self.tables.len(),
        }
    }

    fn from_params(params: TargetEncoderParams) -> Result<Self, PreprocessingError> {
        if params.categories_.len() != params.n_features_in
            || params.encodings_.len() != params.n_features_in
        {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: params.n_features_in,
                got_features: params.categories_.len(),
            });
        }
        if let Some(names) = &params.feature_names_in_ {
            if names.len() != params.n_features_in {
                return Err(PreprocessingError::FeatureMismatch {
                    expected_features: params.n_features_in,
                    got_features: names.len(),
                });
            }
        }

        let mut tables = Vec::with_capacity(params.n_features_in);
        for (col, (cats, values)) in params
            .categories_
            .into_iter()
            .zip(params.encodings_)
            .enumerate()
        {
            if cats.len() != values.len() {
                return Err(PreprocessingError::SerializationError(format!(
                    "column {}: {} categories but {} encodings",
                    col,
                    cats.len(),
                    values.len()
                )));
            }
            tables.push(EncodingTable::from_entries(
                cats.into_iter().zip(values),
                params.target_mean_,
            ));
        }

        Ok(FittedTargetEncoder {
            config: params.config,
            tables,
            target_mean: params.target_mean_,
            target_type: params.target_type_,
            classes: params.classes_,
            feature_names: params.feature_names_in_,
        })
    }

    fn n_features_in(&self) -> usize {
        self.tables.len()
    }
}
