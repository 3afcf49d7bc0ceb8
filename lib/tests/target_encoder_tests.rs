//! Integration tests for the cross-fitted target encoder.
//!
//! ## Test Organization
//!
//! 1. **Cross fitting** - rows are encoded from the other folds only
//! 2. **Leakage** - cross-fitted output differs from naive fit + transform
//! 3. **Fitted state** - unseen categories, idempotence, re-fit replacement
//! 4. **Binary targets** - class mapping and stratified folds
//! 5. **Concurrency** - shared fitted state across threads

use approx::assert_abs_diff_eq;
use crossfit_encoders::dataset::{CategoricalFrame, Category};
use crossfit_encoders::model_selection::{KFold, StratifiedKFold};
use crossfit_encoders::preprocessing::{
    EncodingTable, FittedTransformer, LabelEncoder, PreprocessingError, Smoothing,
    SupervisedTransformer, TargetEncoder, TargetType,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn str_frame(values: &[&str]) -> CategoricalFrame {
    CategoricalFrame::from_str_columns(&[values.iter().map(|&v| Some(v)).collect()]).unwrap()
}

/// Seeded uniform values in [0, 1).
fn noise(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

/// Two columns: a 4-level informative column and a near-unique identifier.
fn mixed_frame(n: usize) -> (CategoricalFrame, Vec<f64>) {
    let informative: Vec<Category> = (0..n).map(|i| Category::from((i % 4) as i64)).collect();
    let near_unique: Vec<Category> = (0..n).map(|i| Category::from((i / 2) as i64)).collect();
    let jitter = noise(n, 1);
    let y = (0..n).map(|i| (i % 4) as f64 + jitter[i]).collect();
    (
        CategoricalFrame::new(vec![informative, near_unique]).unwrap(),
        y,
    )
}

fn mse(encoded: &[f64], y: &[f64]) -> f64 {
    encoded
        .iter()
        .zip(y)
        .map(|(e, t)| (e - t) * (e - t))
        .sum::<f64>()
        / y.len() as f64
}

// ============================================================================
// Cross fitting
// ============================================================================

#[test]
fn test_each_row_is_encoded_from_complementary_folds() {
    let (x, y) = mixed_frame(60);
    let seed = 17;
    let mut encoder = TargetEncoder::new()
        .with_n_folds(5)
        .with_random_seed(seed)
        .with_target_type(TargetType::Continuous);
    let encoded = encoder.fit_transform(&x, &y).unwrap();

    // Replay the same split and learn each fold's tables by hand.
    let folds = KFold::new(5)
        .split(60, &mut StdRng::seed_from_u64(seed))
        .unwrap();
    for (fold_idx, rows) in folds.iter().enumerate() {
        let train = folds.complement(fold_idx);
        for col in 0..x.n_columns() {
            let table =
                EncodingTable::learn(x.column(col), &y, train.iter().copied(), &Smoothing::Auto);
            for &row in rows {
                assert_eq!(
                    encoded[[row, col]],
                    table.encode(&x.column(col)[row]),
                    "row {} col {}",
                    row,
                    col
                );
            }
        }
    }
}

#[test]
fn test_two_fold_two_category_no_smoothing() {
    // Rows 0-4 are "a" with target 1, rows 5-9 are "b" with target 0.
    let x = str_frame(&["a", "a", "a", "a", "a", "b", "b", "b", "b", "b"]);
    let y = [1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];

    // Binary target: folds are stratified, so both categories appear in
    // every complementary fold.
    let mut encoder = TargetEncoder::new()
        .with_n_folds(2)
        .with_smoothing(Smoothing::Fixed(0.0));
    let encoded = encoder.fit_transform(&x, &y).unwrap();
    for row in 0..10 {
        assert_eq!(encoded[[row, 0]], y[row]);
    }

    // Without shuffling, fold A = rows 0-4 and fold B = rows 5-9; each half
    // only sees the other category and falls back to the other half's mean.
    let mut encoder = TargetEncoder::new()
        .with_n_folds(2)
        .with_smoothing(Smoothing::Fixed(0.0))
        .with_shuffle(false)
        .with_target_type(TargetType::Continuous);
    let encoded = encoder.fit_transform(&x, &y).unwrap();
    for row in 0..5 {
        assert_eq!(encoded[[row, 0]], 0.0);
    }
    for row in 5..10 {
        assert_eq!(encoded[[row, 0]], 1.0);
    }
}

#[test]
fn test_fit_transform_state_equals_fit_state() {
    let (x, y) = mixed_frame(40);
    let mut a = TargetEncoder::new().with_random_seed(1);
    let mut b = TargetEncoder::new().with_random_seed(1);
    a.fit_transform(&x, &y).unwrap();
    b.fit(&x, &y).unwrap();

    let x_new = CategoricalFrame::new(vec![
        vec![Category::from(0i64), Category::from(3i64), Category::Missing],
        vec![Category::from(1i64), Category::from(999i64), Category::from(5i64)],
    ])
    .unwrap();
    assert_eq!(a.transform(&x_new).unwrap(), b.transform(&x_new).unwrap());
}

// ============================================================================
// Leakage
// ============================================================================

#[test]
fn test_cross_fitting_differs_from_naive_encoding() {
    let n = 200;
    // Every category appears twice; the target is pure noise.
    let ids: Vec<Category> = (0..n).map(|i| Category::from((i / 2) as i64)).collect();
    let x = CategoricalFrame::new(vec![ids]).unwrap();
    let y = noise(n, 3);

    let mut encoder = TargetEncoder::new()
        .with_smoothing(Smoothing::Fixed(1.0))
        .with_random_seed(0);
    let cross_fitted = encoder.fit_transform(&x, &y).unwrap();
    let naive = encoder.transform(&x).unwrap();

    assert_ne!(cross_fitted, naive);

    // The naive encoding has seen each row's own target and fits it better.
    let cf: Vec<f64> = cross_fitted.column(0).to_vec();
    let nv: Vec<f64> = naive.column(0).to_vec();
    assert!(
        mse(&nv, &y) < mse(&cf, &y),
        "naive mse {} should be below cross-fitted mse {}",
        mse(&nv, &y),
        mse(&cf, &y)
    );
}

// ============================================================================
// Fitted state
// ============================================================================

#[test]
fn test_unseen_category_is_exactly_global_mean() {
    let (x, y) = mixed_frame(30);
    let mut encoder = TargetEncoder::new();
    encoder.fit(&x, &y).unwrap();
    let fitted = encoder.fitted().unwrap();

    let expected_mean = y.iter().sum::<f64>() / y.len() as f64;
    assert_abs_diff_eq!(fitted.target_mean(), expected_mean, epsilon = 1e-12);

    let unseen = CategoricalFrame::new(vec![
        vec![Category::from("never"), Category::Missing],
        vec![Category::from(-1i64), Category::from(10_000i64)],
    ])
    .unwrap();
    let out = encoder.transform(&unseen).unwrap();
    for value in out.iter() {
        assert_eq!(*value, fitted.target_mean());
    }
}

#[test]
fn test_transform_is_idempotent() {
    let (x, y) = mixed_frame(50);
    let mut encoder = TargetEncoder::new();
    encoder.fit_transform(&x, &y).unwrap();
    let before = encoder.fitted().unwrap().clone();

    let first = encoder.transform(&x).unwrap();
    let second = encoder.transform(&x).unwrap();
    assert_eq!(first, second);
    assert_eq!(encoder.fitted().unwrap(), &before);
}

#[test]
fn test_refit_replaces_state() {
    let mut encoder = TargetEncoder::new().with_smoothing(Smoothing::Fixed(0.0));
    encoder
        .fit(&str_frame(&["a", "a", "b", "b"]), &[10.0, 12.0, 0.0, 1.0])
        .unwrap();
    assert_eq!(
        encoder.fitted().unwrap().encoding_for(0, &"a".into()),
        Some(11.0)
    );

    encoder
        .fit(&str_frame(&["c", "d", "c", "d"]), &[1.0, 2.0, 3.0, 5.0])
        .unwrap();
    let fitted = encoder.fitted().unwrap();
    assert_eq!(fitted.encoding_for(0, &"a".into()), None);
    assert_eq!(fitted.target_mean(), 2.75);

    let out = encoder.transform(&str_frame(&["a", "b", "c"])).unwrap();
    assert_eq!(out[[0, 0]], 2.75);
    assert_eq!(out[[1, 0]], 2.75);
    assert_eq!(out[[2, 0]], 2.0);
}

#[test]
fn test_more_smoothing_moves_toward_global_mean() {
    let x = str_frame(&["a", "a", "a", "b", "c", "c"]);
    let y = [4.0, 5.0, 6.0, 0.0, 1.0, 2.0];
    let global = y.iter().sum::<f64>() / y.len() as f64;

    let mut previous: Option<Vec<f64>> = None;
    for m in [0.0, 0.5, 1.0, 5.0, 50.0] {
        let mut encoder = TargetEncoder::new().with_smoothing(Smoothing::Fixed(m));
        encoder.fit(&x, &y).unwrap();
        let current = encoder.fitted().unwrap().encodings(0).unwrap();
        if let Some(prev) = &previous {
            for (p, c) in prev.iter().zip(&current) {
                assert!((c - global).abs() <= (p - global).abs() + 1e-12);
                assert!((c - global) * (p - global) >= 0.0);
            }
        }
        previous = Some(current);
    }
}

#[test]
fn test_integer_codes_and_missing_values() {
    let codes = ndarray::array![[0.0], [1.0], [f64::NAN], [0.0], [f64::NAN], [1.0]];
    let x = CategoricalFrame::from_codes(codes.view()).unwrap();
    let y = [1.0, 2.0, 7.0, 3.0, 9.0, 4.0];

    let mut encoder = TargetEncoder::new().with_smoothing(Smoothing::Fixed(0.0));
    encoder.fit(&x, &y).unwrap();
    let fitted = encoder.fitted().unwrap();
    assert_eq!(fitted.encoding_for(0, &Category::Code(0)), Some(2.0));
    assert_eq!(fitted.encoding_for(0, &Category::Code(1)), Some(3.0));
    assert_eq!(fitted.encoding_for(0, &Category::Missing), Some(8.0));
}

#[test]
fn test_errors_are_reported() {
    let mut encoder = TargetEncoder::new();
    let x = str_frame(&["a", "b", "c"]);

    assert!(matches!(
        encoder.transform(&x),
        Err(PreprocessingError::NotFitted(_))
    ));
    assert!(matches!(
        encoder.fit(&x, &[1.0, 2.0]),
        Err(PreprocessingError::DimensionMismatch {
            expected_rows: 3,
            got_rows: 2
        })
    ));
    let empty = CategoricalFrame::from_str_columns::<&str>(&[vec![]]).unwrap();
    assert!(matches!(
        encoder.fit_transform(&empty, &[]),
        Err(PreprocessingError::EmptyInput(_))
    ));
    assert!(!encoder.is_fitted());
}

// ============================================================================
// Binary targets
// ============================================================================

#[test]
fn test_binary_target_is_mapped_to_zero_one() {
    let x = str_frame(&["a", "a", "b", "b", "b", "a"]);
    let y = [7.0, 7.0, 3.0, 3.0, 7.0, 3.0];

    let mut encoder = TargetEncoder::new()
        .with_n_folds(2)
        .with_smoothing(Smoothing::Fixed(0.0));
    encoder.fit(&x, &y).unwrap();
    let fitted = encoder.fitted().unwrap();

    assert_eq!(fitted.target_type(), TargetType::Binary);
    assert_eq!(fitted.classes(), Some(&[3.0, 7.0][..]));
    assert_abs_diff_eq!(fitted.target_mean(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(
        fitted.encoding_for(0, &"a".into()).unwrap(),
        2.0 / 3.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        fitted.encoding_for(0, &"b".into()).unwrap(),
        1.0 / 3.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_two_valued_regression_target_stays_continuous() {
    let x = str_frame(&["a", "a", "b", "b", "a", "b"]);
    let y = [2.5, 2.5, 3.5, 2.5, 2.5, 3.5];

    let mut encoder = TargetEncoder::new()
        .with_n_folds(2)
        .with_smoothing(Smoothing::Fixed(0.0));
    let encoded = encoder.fit_transform(&x, &y).unwrap();
    let fitted = encoder.fitted().unwrap();

    assert_eq!(fitted.target_type(), TargetType::Continuous);
    assert_abs_diff_eq!(fitted.target_mean(), 17.0 / 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(fitted.encoding_for(0, &"a".into()).unwrap(), 2.5, epsilon = 1e-12);
    assert_abs_diff_eq!(
        fitted.encoding_for(0, &"b".into()).unwrap(),
        19.0 / 6.0,
        epsilon = 1e-12
    );
    // Encodings live on the target's scale, not in [0, 1].
    assert!(encoded.iter().all(|&v| (2.5..=3.5).contains(&v)));
}

#[test]
fn test_binary_fit_transform_uses_stratified_folds() {
    let x = str_frame(&["a", "b", "c", "a", "b", "c", "a", "b", "c", "a"]);
    let y = [1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0];
    let seed = 4;

    let mut encoder = TargetEncoder::new().with_n_folds(3).with_random_seed(seed);
    let encoded = encoder.fit_transform(&x, &y).unwrap();

    let classes = LabelEncoder::new().fit_transform(&y).unwrap();
    let folds = StratifiedKFold::new(3)
        .split(&classes, &mut StdRng::seed_from_u64(seed))
        .unwrap();
    for (fold_idx, rows) in folds.iter().enumerate() {
        let train = folds.complement(fold_idx);
        let table = EncodingTable::learn(x.column(0), &y, train.iter().copied(), &Smoothing::Auto);
        for &row in rows {
            assert_eq!(encoded[[row, 0]], table.encode(&x.column(0)[row]));
        }
    }
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_transforms_share_fitted_state() {
    let (x, y) = mixed_frame(80);
    let mut encoder = TargetEncoder::new();
    encoder.fit(&x, &y).unwrap();
    let fitted = encoder.fitted().unwrap();
    let expected = fitted.transform(&x).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| fitted.transform(&x).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
