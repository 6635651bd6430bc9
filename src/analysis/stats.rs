//! Descriptive statistics over a slice of measurements.

use crate::models::SummaryStats;

impl SummaryStats {
    /// Summarize `values`, skipping missing (`NaN`) entries.
    ///
    /// `std` is the sample standard deviation (divisor N-1) and is `NaN`
    /// when fewer than two values remain. Every statistic except `count`
    /// is `NaN` for an all-missing slice.
    pub fn from_values(values: &[f64]) -> Self {
        let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let count = present.len();

        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        let n = count as f64;
        let mean = present.iter().sum::<f64>() / n;
        let std = if count < 2 {
            f64::NAN
        } else {
            let variance = present.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        };
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            mean,
            std,
            min,
            max,
        }
    }
}
