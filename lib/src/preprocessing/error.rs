//! Error types for preprocessing operations.

use std::fmt;

/// Error type for preprocessing operations.
///
/// Every variant is a caller-correctable input or usage error; none of them
/// is retried or recovered internally.
#[derive(Debug)]
pub enum PreprocessingError {
    /// Row counts of the categorical input and the target (or of two
    /// columns of the same frame) disagree.
    DimensionMismatch { expected_rows: usize, got_rows: usize },
    /// Empty data provided where non-empty was required.
    EmptyInput(String),
    /// A fitted-only operation was called before `fit`.
    NotFitted(String),
    /// Feature dimension mismatch.
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    /// Invalid hyperparameter value or malformed categorical input.
    InvalidParameter(String),
    /// Target vector cannot be used for the requested target type.
    InvalidTarget(String),
    /// Serialization or deserialization error.
    SerializationError(String),
    /// I/O error during file operations.
    IoError(String),
}

impl fmt::Display for PreprocessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessingError::DimensionMismatch {
                expected_rows,
                got_rows,
            } => {
                write!(
                    f,
                    "Dimension mismatch: expected {} rows, got {}",
                    expected_rows, got_rows
                )
            }
            PreprocessingError::EmptyInput(msg) => {
                write!(f, "Empty input: {}", msg)
            }
            PreprocessingError::NotFitted(msg) => {
                write!(f, "Not fitted: {}", msg)
            }
            PreprocessingError::FeatureMismatch {
                expected_features,
                got_features,
            } => {
                write!(
                    f,
                    "Feature mismatch: expected {} features, got {}",
                    expected_features, got_features
                )
            }
            PreprocessingError::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
            PreprocessingError::InvalidTarget(msg) => {
                write!(f, "Invalid target: {}", msg)
            }
            PreprocessingError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            PreprocessingError::IoError(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PreprocessingError {}

impl From<std::io::Error> for PreprocessingError {
    fn from(err: std::io::Error) -> Self {
        PreprocessingError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for PreprocessingError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}
