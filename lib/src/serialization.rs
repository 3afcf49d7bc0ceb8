//! Serialization of fitted encoder parameters.
//!
//! Fitted state is flattened into plain parameter structs (vectors of
//! categories and encoded values) before it is written out, so the on-disk
//! form never depends on in-memory lookup structures.

use std::error::Error;

/// A trait for parameter representations that can be serialized to and from bytes.
///
/// Implementors should contain only plain data (e.g., `Vec<f64>`, scalars,
/// category labels), not lookup maps or other derived structures.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Table {
        keys: Vec<String>,
        values: Vec<f64>,
    }

    #[test]
    fn test_params_bytes_roundtrip() {
        let table = Table {
            keys: vec!["a".to_string(), "b".to_string()],
            values: vec![0.25, -1.5],
        };
        let bytes = table.to_bytes().unwrap();
        let restored = Table::from_bytes(&bytes).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_params_from_truncated_bytes_fails() {
        let table = Table {
            keys: vec!["a".to_string()],
            values: vec![1.0],
        };
        let bytes = table.to_bytes().unwrap();
        assert!(Table::from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
