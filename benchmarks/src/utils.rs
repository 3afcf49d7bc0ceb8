use std::time::{Duration, Instant};

/// Run a function and measure its execution time.
///
/// Returns a tuple of (result, elapsed_time).
pub fn time_fn<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}

/// Run a function `warmup + iterations` times and summarize the timed runs.
///
/// Results of the warmup runs are discarded.
pub fn benchmark_with_warmup<F, R>(
    warmup: usize,
    iterations: usize,
    mut f: F,
) -> (Vec<R>, BenchmarkStats)
where
    F: FnMut() -> R,
{
    for _ in 0..warmup {
        let _ = f();
    }

    let mut results = Vec::with_capacity(iterations);
    let mut times = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let (result, elapsed) = time_fn(&mut f);
        results.push(result);
        times.push(elapsed.as_secs_f64() * 1000.0);
    }

    (results, BenchmarkStats::from_times(times))
}

/// Statistics for benchmarking results, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkStats {
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
}

impl BenchmarkStats {
    /// Calculate statistics from a list of times in milliseconds.
    pub fn from_times(mut times: Vec<f64>) -> Self {
        let n = times.len();
        if n == 0 {
            return Self {
                mean_ms: 0.0,
                std_dev_ms: 0.0,
                min_ms: 0.0,
                max_ms: 0.0,
                median_ms: 0.0,
                p95_ms: 0.0,
            };
        }
        times.sort_by(f64::total_cmp);

        let mean = times.iter().sum::<f64>() / n as f64;
        let variance = times.iter().map(|&t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (times[n / 2 - 1] + times[n / 2]) / 2.0
        } else {
            times[n / 2]
        };
        let p95_idx = ((n as f64 * 0.95) as usize).min(n - 1);

        Self {
            mean_ms: mean,
            std_dev_ms: variance.sqrt(),
            min_ms: times[0],
            max_ms: times[n - 1],
            median_ms: median,
            p95_ms: times[p95_idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_fn_returns_result() {
        let (value, elapsed) = time_fn(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(elapsed >= Duration::ZERO);
    }

    #[test]
    fn test_benchmark_with_warmup() {
        let mut calls = 0;
        let (results, stats) = benchmark_with_warmup(3, 10, || {
            calls += 1;
            calls
        });
        assert_eq!(results.len(), 10);
        assert_eq!(results[0], 4);
        assert!(stats.min_ms <= stats.median_ms && stats.median_ms <= stats.max_ms);
    }

    #[test]
    fn test_stats_from_times() {
        let stats = BenchmarkStats::from_times(vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.min_ms, 1.0);
        assert_eq!(stats.max_ms, 4.0);
        assert_eq!(stats.median_ms, 2.5);
        assert!((stats.mean_ms - 2.5).abs() < 1e-12);
        assert_eq!(stats.p95_ms, 4.0);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(BenchmarkStats::from_times(Vec::new()).mean_ms, 0.0);
    }
}
