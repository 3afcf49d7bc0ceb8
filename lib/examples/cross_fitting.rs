//! Cross-fitted vs naive target encoding
//!
//! A small rental-price dataset with a low-cardinality `district` column and a
//! high-cardinality `listing_host` column. Encoding the training rows with
//! `fit` + `transform` lets every row see its own price, which is most visible
//! on hosts with a single listing. `fit_transform` encodes each row from the
//! other folds only.
//!
//! Run with: cargo run --example cross_fitting

use crossfit_encoders::{
    CategoricalFrame, FittedTargetEncoder, FittedTransformer, Smoothing, SupervisedTransformer,
    TargetEncoder,
};
use std::error::Error;

/// Rental listings: (district, host, monthly price in hundreds).
fn get_listings() -> (CategoricalFrame, Vec<f64>) {
    let rows: [(&str, Option<&str>, f64); 16] = [
        ("north", Some("host_a"), 12.0),
        ("north", Some("host_b"), 13.5),
        ("north", Some("host_a"), 12.5),
        ("north", Some("host_c"), 14.0),
        ("south", Some("host_d"), 8.0),
        ("south", Some("host_e"), 7.5),
        ("south", Some("host_d"), 8.5),
        ("south", None, 9.0),
        ("east", Some("host_f"), 10.0),
        ("east", Some("host_g"), 11.0),
        ("east", Some("host_h"), 10.5),
        ("east", None, 9.5),
        ("west", Some("host_i"), 15.0),
        ("west", Some("host_j"), 16.5),
        ("west", Some("host_i"), 15.5),
        ("west", Some("host_k"), 17.0),
    ];

    let districts = rows.iter().map(|r| Some(r.0)).collect();
    let hosts = rows.iter().map(|r| r.1).collect();
    let prices = rows.iter().map(|r| r.2).collect();

    let frame = CategoricalFrame::from_str_columns(&[districts, hosts])
        .and_then(|f| f.with_names(["district", "listing_host"]));
    (frame.unwrap_or_else(|e| panic!("invalid example data: {}", e)), prices)
}

fn print_encodings(title: &str, x: &CategoricalFrame, y: &[f64], cross: &[f64], naive: &[f64]) {
    println!("{}", title);
    println!("{:>4}  {:<12} {:>7} {:>12} {:>12}", "row", "host", "price", "cross-fit", "naive");
    for row in 0..x.n_rows() {
        println!(
            "{:>4}  {:<12} {:>7.2} {:>12.3} {:>12.3}",
            row,
            x.column(1)[row].to_string(),
            y[row],
            cross[row],
            naive[row]
        );
    }
    println!();
}

fn mse(encoded: &[f64], y: &[f64]) -> f64 {
    encoded
        .iter()
        .zip(y)
        .map(|(e, t)| (e - t).powi(2))
        .sum::<f64>()
        / y.len() as f64
}

fn main() -> Result<(), Box<dyn Error>> {
    let (x, y) = get_listings();
    println!("Training rows: {}, columns: {}\n", x.n_rows(), x.n_columns());

    let mut encoder = TargetEncoder::new()
        .with_n_folds(4)
        .with_smoothing(Smoothing::Auto)
        .with_random_seed(42);

    // Training features: cross-fitted
    let cross_fitted = encoder.fit_transform(&x, &y)?;

    // What naive encoding of the same rows would look like
    let naive = encoder.transform(&x)?;

    let cross_host = cross_fitted.column(1).to_vec();
    let naive_host = naive.column(1).to_vec();
    print_encodings("listing_host encodings", &x, &y, &cross_host, &naive_host);

    println!("MSE of host encoding against price:");
    println!("  cross-fit: {:.4}", mse(&cross_host, &y));
    println!("  naive:     {:.4}  (optimistic: rows saw their own price)\n", mse(&naive_host, &y));

    let fitted: &FittedTargetEncoder = encoder.fitted()?;
    println!("Global mean price: {:.3}", fitted.target_mean());
    for name in fitted.feature_names_out() {
        println!("Output feature: {}", name);
    }
    if let (Some(categories), Some(values)) = (fitted.categories(0), fitted.encodings(0)) {
        for (category, value) in categories.iter().zip(values) {
            println!("  district {:<6} -> {:.3}", category.to_string(), value);
        }
    }

    // New listings: one known district/host and one unseen of each
    let test = CategoricalFrame::from_str_columns(&[
        vec![Some("west"), Some("harbour")],
        vec![Some("host_i"), Some("host_new")],
    ])?;
    let encoded = fitted.transform(&test)?;
    println!("\nTest encodings:\n{:.3}", encoded);

    // Persist and reload the fitted state
    let path = std::env::temp_dir().join("cross_fitting_example.bin");
    fitted.save_to_file(&path)?;
    let restored = FittedTargetEncoder::load_from_file(&path)?;
    assert_eq!(restored.transform(&test)?, encoded);
    std::fs::remove_file(&path)?;
    println!("Saved and restored encoder from {}", path.display());

    Ok(())
}
