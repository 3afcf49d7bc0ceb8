//! Category labels.

use crate::preprocessing::PreprocessingError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Largest magnitude below which every integer is exactly representable in f64.
const MAX_EXACT_CODE: f64 = 9_007_199_254_740_992.0;

/// A single label of a categorical column.
///
/// Labels are compared by identity only; the derived ordering exists so that
/// learned categories can be reported in a stable order (integer codes first,
/// then string labels, then [`Category::Missing`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Integer-coded label.
    Code(i64),
    /// String label.
    Label(String),
    /// Missing value. Treated as a category of its own, never dropped.
    Missing,
}

impl Category {
    /// Convert a numeric code to a category.
    ///
    /// `NaN` becomes [`Category::Missing`]; finite values are rounded to the
    /// nearest integer code.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::InvalidParameter`] for infinite values
    /// and for magnitudes above 2^53, where distinct codes would collide.
    pub fn from_code(value: f64) -> Result<Self, PreprocessingError> {
        if value.is_nan() {
            return Ok(Category::Missing);
        }
        if !value.is_finite() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "categorical codes must be finite or NaN, got {}",
                value
            )));
        }
        if value.abs() > MAX_EXACT_CODE {
            return Err(PreprocessingError::InvalidParameter(format!(
                "categorical codes must not exceed 2^53 in magnitude, got {}",
                value
            )));
        }
        Ok(Category::Code(value.round() as i64))
    }

    /// Returns `true` for the missing-value sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Category::Missing)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Code(code) => write!(f, "{}", code),
            Category::Label(label) => write!(f, "{}", label),
            Category::Missing => write!(f, "<missing>"),
        }
    }
}

impl From<i64> for Category {
    fn from(code: i64) -> Self {
        Category::Code(code)
    }
}

impl From<i32> for Category {
    fn from(code: i32) -> Self {
        Category::Code(code as i64)
    }
}

impl From<usize> for Category {
    fn from(code: usize) -> Self {
        Category::Code(code as i64)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::Label(label.to_string())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::Label(label)
    }
}

impl<T: Into<Category>> From<Option<T>> for Category {
    fn from(value: Option<T>) -> Self {
        value.map_or(Category::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_rounds() {
        assert_eq!(Category::from_code(2.0).unwrap(), Category::Code(2));
        assert_eq!(Category::from_code(2.6).unwrap(), Category::Code(3));
        assert_eq!(Category::from_code(-1.0).unwrap(), Category::Code(-1));
    }

    #[test]
    fn test_from_code_nan_is_missing() {
        let cat = Category::from_code(f64::NAN).unwrap();
        assert!(cat.is_missing());
    }

    #[test]
    fn test_from_code_rejects_infinity() {
        assert!(matches!(
            Category::from_code(f64::INFINITY),
            Err(PreprocessingError::InvalidParameter(_))
        ));
        assert!(Category::from_code(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_from_code_rejects_codes_beyond_exact_range() {
        assert!(matches!(
            Category::from_code(1e19),
            Err(PreprocessingError::InvalidParameter(_))
        ));
        assert!(Category::from_code(-5e19).is_err());
        assert!(Category::from_code(9_007_199_254_740_994.0).is_err());
        assert_eq!(
            Category::from_code(9_007_199_254_740_992.0).unwrap(),
            Category::Code(9_007_199_254_740_992)
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Category::from(Some("red")), Category::Label("red".into()));
        assert_eq!(Category::from(None::<&str>), Category::Missing);
        assert_eq!(Category::from(Some(4i64)), Category::Code(4));
    }

    #[test]
    fn test_ordering_puts_missing_last() {
        let mut cats = vec![
            Category::Missing,
            Category::from("b"),
            Category::from(3i64),
            Category::from("a"),
            Category::from(1i64),
        ];
        cats.sort();
        assert_eq!(
            cats,
            vec![
                Category::Code(1),
                Category::Code(3),
                Category::Label("a".into()),
                Category::Label("b".into()),
                Category::Missing,
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::Code(7).to_string(), "7");
        assert_eq!(Category::from("x").to_string(), "x");
        assert_eq!(Category::Missing.to_string(), "<missing>");
    }
}
