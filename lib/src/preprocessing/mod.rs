//! Supervised preprocessing transformers.
//!
//! # Design Philosophy
//!
//! - **Explicit two-phase API**: an encoder object is fitted, then transforms;
//!   its fitted state is a plain immutable value.
//! - **Reproducible**: every random choice (fold shuffling) comes from a seed
//!   or a caller-supplied random source.
//! - **Serializable**: fitted encoders can be saved and loaded.
//! - **sklearn-compatible**: API familiar to users of scikit-learn.
//!
//! # Core Traits
//!
//! - [`SupervisedTransformer`]: stateful transformer learning from `(X, y)`
//! - [`FittedTransformer`]: fitted value ready for inference
//!
//! # Example
//!
//! ```ignore
//! use crossfit_encoders::preprocessing::{
//!     FittedTransformer, SupervisedTransformer, TargetEncoder,
//! };
//!
//! let mut encoder = TargetEncoder::new().with_random_seed(0);
//!
//! // Cross-fitted encoding of the training data
//! let x_train_encoded = encoder.fit_transform(&x_train, &y_train)?;
//!
//! // Full-data encoding of new data
//! let x_test_encoded = encoder.transform(&x_test)?;
//!
//! // Save for later use
//! encoder.fitted()?.save_to_file("encoder.bin")?;
//! let loaded = FittedTargetEncoder::load_from_file("encoder.bin")?;
//! ```

pub mod encoding;
pub mod error;
pub mod traits;

// Re-export main types
pub use encoding::{
    EncodingTable, FittedLabelEncoder, FittedTargetEncoder, LabelEncoder, ShrinkageStrategy,
    Smoothing, TargetEncoder, TargetEncoderConfig, TargetEncoderParams, TargetStats, TargetType,
    MAX_TARGET_MAGNITUDE,
};
pub use error::PreprocessingError;
pub use traits::{FittedTransformer, SupervisedTransformer};
