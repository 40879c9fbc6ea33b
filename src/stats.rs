//! Descriptive statistics engine
//!
//! Computes the summary figures the reporting screens show for an arbitrary
//! numeric sample. Variance is the population variance (divide by n).

use serde::Serialize;

use crate::error::FarmError;

/// Descriptive statistics for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleStats {
    /// Number of observations.
    pub n: usize,

    pub mean: f64,

    /// Population variance: sum of squared deviations divided by n (not
    /// n - 1).
    pub variance: f64,

    pub std_dev: f64,

    /// Middle element for odd n, average of the two central elements for
    /// even n.
    pub median: f64,

    pub min: f64,

    pub max: f64,

    /// max - min.
    pub range: f64,

    /// Standard deviation as a percentage of the mean; 0 when the mean is 0.
    pub coefficient_of_variation: f64,
}

/// Compute descriptive statistics over a sample.
///
/// The slice is read only; ordering work happens on a copy. An empty sample
/// fails with `EmptySample`, and any non-finite observation fails with
/// `InvalidInput` rather than poisoning every downstream figure.
pub fn descriptive_stats(values: &[f64]) -> Result<SampleStats, FarmError> {
    if values.is_empty() {
        return Err(FarmError::EmptySample);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(FarmError::invalid(
            "sample",
            "every observation must be a finite number",
        ));
    }

    let n = values.len();
    let count = n as f64;

    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let min = sorted[0];
    let max = sorted[n - 1];
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let coefficient_of_variation = if mean != 0.0 {
        (std_dev / mean) * 100.0
    } else {
        0.0
    };

    Ok(SampleStats {
        n,
        mean,
        variance,
        std_dev,
        median,
        min,
        max,
        range: max - min,
        coefficient_of_variation,
    })
}
