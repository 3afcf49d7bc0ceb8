//! In-memory categorical data.
//!
//! # Core Concepts
//!
//! - [`Category`]: one label of a categorical column: an integer code, a
//!   string, or the missing-value sentinel.
//! - [`CategoricalFrame`]: a column-major table of equally long categorical
//!   columns, optionally named. It is the input type of every encoder in
//!   [`crate::preprocessing`].
//!
//! # Example
//!
//! ```rust
//! use crossfit_encoders::dataset::{CategoricalFrame, Category};
//! use ndarray::array;
//!
//! // Numeric codes: NaN is a missing label
//! let codes = array![[0.0, 3.0], [1.0, f64::NAN], [0.0, 3.0]];
//! let frame = CategoricalFrame::from_codes(codes.view()).unwrap();
//! assert_eq!(frame.shape(), (3, 2));
//! assert_eq!(frame.column(1)[1], Category::Missing);
//!
//! // String labels
//! let cities = vec![Some("paris"), None, Some("oslo")];
//! let frame = CategoricalFrame::from_str_columns(&[cities]).unwrap();
//! assert_eq!(frame.n_rows(), 3);
//! ```

mod category;

pub use self::category::Category;

use crate::preprocessing::PreprocessingError;
use ndarray::ArrayView2;

/// Column-major table of categorical columns.
///
/// All columns have the same number of rows; this is checked on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoricalFrame {
    columns: Vec<Vec<Category>>,
    names: Option<Vec<String>>,
    n_rows: usize,
}

impl CategoricalFrame {
    /// Build a frame from columns of categories.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::DimensionMismatch`] if the columns do not
    /// all have the same length.
    pub fn new(columns: Vec<Vec<Category>>) -> Result<Self, PreprocessingError> {
        let n_rows = columns.first().map_or(0, Vec::len);
        for column in &columns {
            if column.len() != n_rows {
                return Err(PreprocessingError::DimensionMismatch {
                    expected_rows: n_rows,
                    got_rows: column.len(),
                });
            }
        }
        Ok(Self {
            columns,
            names: None,
            n_rows,
        })
    }

    /// Build a frame from a `(rows, cols)` matrix of numeric codes.
    ///
    /// `NaN` entries become [`Category::Missing`]; finite codes are rounded.
    /// Infinite codes and codes beyond 2^53 in magnitude are rejected.
    pub fn from_codes(codes: ArrayView2<'_, f64>) -> Result<Self, PreprocessingError> {
        let (rows, cols) = codes.dim();
        let mut columns = Vec::with_capacity(cols);
        for column in codes.columns() {
            let mut cats = Vec::with_capacity(rows);
            for &value in column.iter() {
                cats.push(Category::from_code(value)?);
            }
            columns.push(cats);
        }
        Ok(Self {
            columns,
            names: None,
            n_rows: rows,
        })
    }

    /// Build a frame from columns of optional string labels (`None` is missing).
    pub fn from_str_columns<S: AsRef<str>>(
        columns: &[Vec<Option<S>>],
    ) -> Result<Self, PreprocessingError> {
        let columns = columns
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|value| match value {
                        Some(label) => Category::Label(label.as_ref().to_string()),
                        None => Category::Missing,
                    })
                    .collect()
            })
            .collect();
        Self::new(columns)
    }

    /// Attach column names.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::FeatureMismatch`] if the number of names
    /// differs from the number of columns.
    pub fn with_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, PreprocessingError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.columns.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.columns.len(),
                got_features: names.len(),
            });
        }
        self.names = Some(names);
        Ok(self)
    }

    /// Number of rows (samples).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of categorical columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Returns `true` if the frame has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    /// Borrow one column.
    ///
    /// # Panics
    /// If `idx >= n_columns()`.
    pub fn column(&self, idx: usize) -> &[Category] {
        &self.columns[idx]
    }

    /// Iterate over the columns in order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &[Category]> + '_ {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Column names, if any were attached.
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }
}
