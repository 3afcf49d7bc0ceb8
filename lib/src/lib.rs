//! # crossfit-encoders
//!
//! Target encoding of categorical features with internal cross fitting.
//!
//! A target encoder replaces every category with a shrunk estimate of the
//! target mean for that category. Encoding the training data with the same
//! statistics it was learned from leaks each row's target into its own
//! feature; this crate avoids that by encoding the training data with k-fold
//! cross fitting, while new data is encoded with statistics from the full
//! training set.
//!
//! ## Core Design Principles
//!
//! - **Fit/transform separation**: [`TargetEncoder`] owns its configuration
//!   and, once fitted, an immutable [`FittedTargetEncoder`]. Re-fitting
//!   replaces the fitted value; transforming never touches it.
//! - **Injectable randomness**: fold shuffles come from a seed or a
//!   caller-supplied [`rand::Rng`].
//! - **Shrinkage**: the encoder uses fixed or variance-based automatic
//!   smoothing. Custom [`preprocessing::ShrinkageStrategy`] implementations
//!   can build single-column tables with [`preprocessing::EncodingTable::learn`].
//!
//! ## Quick Start
//!
//! ```rust
//! use crossfit_encoders::dataset::CategoricalFrame;
//! use crossfit_encoders::preprocessing::{SupervisedTransformer, TargetEncoder};
//!
//! let x_train = CategoricalFrame::from_str_columns(&[vec![
//!     Some("red"), Some("blue"), Some("red"), Some("blue"), Some("red"), None,
//! ]]).unwrap();
//! let y_train = [3.1, 0.9, 2.8, 1.2, 3.3, 2.0];
//!
//! let mut encoder = TargetEncoder::new().with_n_folds(3).with_random_seed(0);
//!
//! // Each row encoded with statistics from the other folds
//! let train = encoder.fit_transform(&x_train, &y_train).unwrap();
//! assert_eq!(train.dim(), (6, 1));
//!
//! // New data encoded with the full training set
//! let x_test = CategoricalFrame::from_str_columns(&[vec![Some("red"), Some("green")]]).unwrap();
//! let test = encoder.transform(&x_test).unwrap();
//! assert_eq!(test[[1, 0]], encoder.fitted().unwrap().target_mean());
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: Categorical labels and in-memory frames
//! - `model_selection`: K-fold and stratified k-fold row partitioning
//! - `preprocessing`: Target and label encoders, shrinkage strategies
//! - `serialization`: Byte encoding of fitted parameters
//!
//! ## Cargo Features
//!
//! - `parallel` (default): learn the per-fold tables on the rayon pool.

/// Categorical labels and in-memory frames.
pub mod dataset;

/// Row partitioning for cross fitting.
pub mod model_selection;

/// Supervised preprocessing transformers.
pub mod preprocessing;

/// Fitted parameter persistence.
pub mod serialization;

pub use dataset::{CategoricalFrame, Category};
pub use preprocessing::{
    FittedTargetEncoder, FittedTransformer, PreprocessingError, Smoothing, SupervisedTransformer,
    TargetEncoder, TargetEncoderConfig, TargetType,
};
