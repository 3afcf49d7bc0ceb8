//! Categorical feature encoding.
//!
//! # Available Encoders
//!
//! ## TargetEncoder
//! Replaces each category with a shrunk mean of the target for that category.
//! Training data is encoded with internal k-fold cross fitting.
//!
//! ```ignore
//! // Input:  [["a"], ["a"], ["b"], ["b"]],  y = [1, 1, 0, 0]
//! // Output: [[~1], [~1], [~0], [~0]]  (shrunk toward the global mean 0.5)
//! ```
//!
//! ## LabelEncoder
//! Encodes 1D target labels to class indices. Used to map a binary target to 0/1.
//!
//! # Design Notes
//!
//! Encoders read [`CategoricalFrame`](crate::dataset::CategoricalFrame)s, so
//! integer codes, string labels and missing values all go through one path.
//! [`TargetEncoder`] is configured with a [`Smoothing`] (fixed or automatic).
//! Other shrinkage rules implement [`ShrinkageStrategy`] and are applied with
//! [`EncodingTable::learn`] directly.

mod label;
mod smoothing;
mod table;
mod target;

pub use label::{FittedLabelEncoder, LabelEncoder};
pub use smoothing::{ShrinkageStrategy, Smoothing, TargetStats};
pub use table::EncodingTable;
pub use target::{
    FittedTargetEncoder, TargetEncoder, TargetEncoderConfig, TargetEncoderParams, TargetType,
    MAX_TARGET_MAGNITUDE,
};
