//! Core traits for supervised preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`SupervisedTransformer`]: the stateful encoder object. It owns its
//!   configuration and, once fitted, an immutable fitted value.
//! - [`FittedTransformer`]: the fitted value itself; ready for inference and
//!   serialization.

use crate::preprocessing::error::PreprocessingError;
use crate::serialization::SerializableParams;

/// Trait for transformers that learn from a feature input and a target.
///
/// The transformer has two states. It starts unfitted; `fit` or
/// `fit_transform` moves it to fitted, and any later fit replaces the fitted
/// value wholesale. `transform` is valid only when fitted and never changes
/// state.
///
/// # Example
/// ```ignore
/// use crossfit_encoders::preprocessing::{SupervisedTransformer, TargetEncoder};
///
/// let mut encoder = TargetEncoder::new();
/// let train_encoded = encoder.fit_transform(&x_train, &y_train)?;
/// let test_encoded = encoder.transform(&x_test)?;
/// ```
pub trait SupervisedTransformer {
    /// Feature input type.
    type Input;
    /// Target type.
    type Target: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// The fitted value produced by `fit`.
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Learn the fitted state from the data, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - Input or target is empty
    /// - Row counts of input and target differ
    /// - Target contains invalid values
    fn fit(&mut self, x: &Self::Input, y: &Self::Target)
        -> Result<&mut Self, PreprocessingError>;

    /// Fit and return the encoding of the training data.
    ///
    /// Implementations may encode the training data differently from what
    /// `fit` followed by `transform` would produce (e.g. with cross fitting),
    /// but must leave the same fitted state as `fit`.
    fn fit_transform(
        &mut self,
        x: &Self::Input,
        y: &Self::Target,
    ) -> Result<Self::Output, PreprocessingError>;

    /// Transform data using the fitted state.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::NotFitted`] before the first fit.
    fn transform(&self, x: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        self.fitted()?.transform(x)
    }

    /// Borrow the fitted value.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::NotFitted`] before the first fit.
    fn fitted(&self) -> Result<&Self::Fitted, PreprocessingError>;

    /// Returns `true` once a fit has succeeded.
    fn is_fitted(&self) -> bool {
        self.fitted().is_ok()
    }
}

/// Trait for fitted transformers ready for inference.
///
/// A fitted transformer is a plain value: it is never mutated by `transform`
/// and can be shared between threads. It can also be serialized and
/// deserialized for deployment.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
/// - `save_to_file` / `load_from_file` are cross-platform compatible.
pub trait FittedTransformer: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the input shape doesn't match the
    /// number of features seen during fit.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let params = self.extract_params();
        let bytes = params.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;
}
