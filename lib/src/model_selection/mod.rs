//! Row partitioning for cross fitting.
//!
//! - [`KFold`] shuffles row indices (optionally) and cuts them into `k`
//!   contiguous groups.
//! - [`StratifiedKFold`] does the same per class so each fold keeps the class
//!   balance of the whole set.
//!
//! Both return a [`FoldAssignment`], which records which fold each row
//! belongs to. The random source is always supplied by the caller.
//!
//! # Example
//!
//! ```rust
//! use crossfit_encoders::model_selection::KFold;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let folds = KFold::new(3).split(10, &mut rng).unwrap();
//!
//! assert_eq!(folds.n_folds(), 3);
//! let sizes: Vec<usize> = folds.iter().map(|f| f.len()).collect();
//! assert_eq!(sizes, vec![4, 3, 3]);
//! ```

mod kfold;

pub use self::kfold::{FoldAssignment, KFold, StratifiedKFold};
