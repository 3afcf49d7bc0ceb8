//! Label encoding for 1D target labels.
//!
//! Maps target labels to class indices (0, 1, 2, ...). The target encoder
//! uses it to turn a two-valued target into 0/1.

use crate::preprocessing::error::PreprocessingError;

// -0.0 and 0.0 are the same label.
fn canonical(val: f64) -> f64 {
    if val == 0.0 {
        0.0
    } else {
        val
    }
}

/// Label encoder for 1D target labels.
///
/// Classes are the distinct target values in ascending order.
///
/// # Example
/// ```rust
/// use crossfit_encoders::preprocessing::LabelEncoder;
///
/// let fitted = LabelEncoder::new().fit(&[3.0, -1.0, 3.0]).unwrap();
/// assert_eq!(fitted.classes(), &[-1.0, 3.0]);
/// assert_eq!(fitted.transform(&[3.0, -1.0]).unwrap(), vec![1, 0]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelEncoder;

impl LabelEncoder {
    /// Create a new LabelEncoder.
    pub fn new() -> Self {
        Self
    }

    /// Fit the encoder to the labels and return the fitted encoder.
    pub fn fit(&self, labels: &[f64]) -> Result<FittedLabelEncoder, PreprocessingError> {
        if labels.is_empty() {
            return Err(PreprocessingError::EmptyInput(
                "Cannot fit LabelEncoder on empty labels".to_string(),
            ));
        }

        let mut classes_ = Vec::with_capacity(labels.len());
        for (row, &val) in labels.iter().enumerate() {
            if !val.is_finite() {
                return Err(PreprocessingError::InvalidTarget(format!(
                    "LabelEncoder expects finite values, got {} at row {}",
                    val, row
                )));
            }
            classes_.push(canonical(val));
        }
        classes_.sort_by(f64::total_cmp);
        classes_.dedup();

        Ok(FittedLabelEncoder { classes_ })
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&self, labels: &[f64]) -> Result<Vec<usize>, PreprocessingError> {
        let fitted = self.fit(labels)?;
        fitted.transform(labels)
    }
}

/// Fitted LabelEncoder.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedLabelEncoder {
    /// Unique classes in ascending order.
    classes_: Vec<f64>,
}

impl FittedLabelEncoder {
    /// Get the unique classes.
    pub fn classes(&self) -> &[f64] {
        &self.classes_
    }

    /// Get the number of classes.
    pub fn n_classes(&self) -> usize {
        self.classes_.len()
    }

    /// Transform labels to class indices.
    pub fn transform(&self, labels: &[f64]) -> Result<Vec<usize>, PreprocessingError> {
        labels
            .iter()
            .map(|&val| {
                self.classes_
                    .binary_search_by(|class| class.total_cmp(&canonical(val)))
                    .map_err(|_| {
                        PreprocessingError::InvalidTarget(format!("Unknown label value: {}", val))
                    })
            })
            .collect()
    }
}
