//! Statistical functions for summarising timing samples
//!
//! Samples are per-call durations in seconds. The margin of error uses the
//! Student's t-distribution so small sample counts are not overstated.

use serde::{Deserialize, Serialize};

/// Two-tailed 95% critical values of Student's t, indexed by degrees of freedom - 1
const T_TABLE: [f64; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.16,
    2.145, 2.131, 2.12, 2.11, 2.101, 2.093, 2.086, 2.08, 2.074, 2.069, 2.064, 2.06, 2.056, 2.052,
    2.048, 2.045, 2.042,
];

/// Critical value used once degrees of freedom exceed the table
const T_INFINITY: f64 = 1.96;

/// Summary of one benchmark's timing samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Calls to the benchmark function per sample
    pub iterations: usize,
    /// Per-call time of every sample, in seconds
    pub sample: Vec<f64>,
    /// Mean per-call time in seconds
    pub mean: f64,
    /// Sample variance
    pub variance: f64,
    /// Sample standard deviation
    pub deviation: f64,
    /// Standard error of the mean
    pub sem: f64,
    /// Margin of error at 95% confidence
    pub moe: f64,
    /// Relative margin of error, as a percentage of the mean
    pub rme: f64,
    /// Calls per second
    pub hz: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

impl Stats {
    pub fn from_samples(iterations: usize, sample: Vec<f64>) -> Self {
        let mean = mean(&sample);
        let variance = variance(&sample);
        let deviation = standard_deviation(&sample);
        let sem = if sample.is_empty() {
            0.0
        } else {
            deviation / (sample.len() as f64).sqrt()
        };
        let moe = sem * t_critical(sample.len().saturating_sub(1));
        let rme = if mean > 0.0 { (moe / mean) * 100.0 } else { 0.0 };
        let hz = if mean > 0.0 { 1.0 / mean } else { 0.0 };
        let (p50, p90, p99) = percentiles(&sample);

        Self {
            iterations,
            sample,
            mean,
            variance,
            deviation,
            sem,
            moe,
            rme,
            hz,
            p50,
            p90,
            p99,
        }
    }
}

/// Calculate the arithmetic mean of a slice of values
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the sample (n - 1) variance of a slice of values
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let m = mean(values);
    values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Calculate the sample standard deviation of a slice of values
pub fn standard_deviation(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Critical t value for the given degrees of freedom
///
/// Zero degrees of freedom (a single sample) is treated as one.
pub fn t_critical(degrees_of_freedom: usize) -> f64 {
    let df = degrees_of_freedom.max(1);
    T_TABLE.get(df - 1).copied().unwrap_or(T_INFINITY)
}

/// Returns (p50, p90, p99) using nearest-rank on the sorted values
pub fn percentiles(values: &[f64]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let len = sorted.len();
    let at = |pct: usize| sorted[((len * pct) / 100).min(len - 1)];
    (at(50), at(90), at(99))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&values), 3.0);

        let empty: Vec<f64> = vec![];
        assert_eq!(mean(&empty), 0.0);
    }

    #[test]
    fn test_variance() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Sum of squared deviations is 32 over 7 degrees of freedom
        let var = variance(&values);
        assert!((var - 32.0 / 7.0).abs() < 1e-9);

        assert_eq!(variance(&[3.0]), 0.0);
    }

    #[test]
    fn test_standard_deviation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = standard_deviation(&values);
        assert!((std - 2.138).abs() < 0.01);
    }

    #[test]
    fn test_t_critical() {
        assert_eq!(t_critical(0), 12.706);
        assert_eq!(t_critical(1), 12.706);
        assert_eq!(t_critical(9), 2.262);
        assert_eq!(t_critical(30), 2.042);
        assert_eq!(t_critical(31), 1.96);
        assert_eq!(t_critical(1000), 1.96);
    }

    #[test]
    fn test_percentiles() {
        let values: Vec<f64> = (1..=10).rev().map(|v| v as f64).collect();
        let (p50, p90, p99) = percentiles(&values);

        // For 10 values: p50 at index 5, p90 and p99 at index 9
        assert_eq!(p50, 6.0);
        assert_eq!(p90, 10.0);
        assert_eq!(p99, 10.0);

        assert_eq!(percentiles(&[5.0]), (5.0, 5.0, 5.0));
        assert_eq!(percentiles(&[]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_stats_from_samples() {
        let stats = Stats::from_samples(100, vec![0.002, 0.002, 0.002, 0.002]);

        assert_eq!(stats.iterations, 100);
        assert_eq!(stats.sample.len(), 4);
        assert!((stats.mean - 0.002).abs() < 1e-12);
        assert!((stats.hz - 500.0).abs() < 1e-6);
        assert!(stats.deviation.abs() < 1e-12);
        assert!(stats.rme.abs() < 1e-9);
    }

    #[test]
    fn test_stats_margin_of_error() {
        let stats = Stats::from_samples(1, vec![1.0, 2.0, 3.0]);

        // deviation 1, sem 1/sqrt(3), df 2 -> t 4.303
        let expected_moe = 4.303 / 3f64.sqrt();
        assert!((stats.moe - expected_moe).abs() < 1e-9);
        assert!((stats.rme - expected_moe / 2.0 * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_stats_empty() {
        let stats = Stats::from_samples(1, vec![]);
        assert_eq!(stats.hz, 0.0);
        assert_eq!(stats.rme, 0.0);
    }
}
