//! Numeric demo sequences
//!
//! The two small numeric demos: an inclusive range scan with parity split,
//! and named series summaries over the sample farm figures.

use serde::{Deserialize, Serialize};

use crate::error::FarmError;

/// Result of scanning an inclusive integer range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeScan {
    pub start: i64,
    pub end: i64,
    pub step: i64,

    /// Every visited value, in visit order.
    pub sequence: Vec<i64>,

    pub evens: Vec<i64>,

    pub odds: Vec<i64>,

    pub sum: i64,
}

impl RangeScan {
    pub fn count(&self) -> usize {
        self.sequence.len()
    }
}

/// Walk start, start+step, ... while within `end`, splitting by parity.
///
/// An end below start yields an empty scan. A step of zero or less would
/// never terminate, so it is rejected.
pub fn scan_range(start: i64, end: i64, step: i64) -> Result<RangeScan, FarmError> {
    if step <= 0 {
        return Err(FarmError::invalid("step", "must be greater than zero"));
    }

    let mut sequence = Vec::new();
    let mut evens = Vec::new();
    let mut odds = Vec::new();
    let mut sum: i64 = 0;

    let mut i = start;
    while i <= end {
        sequence.push(i);
        sum += i;
        if i % 2 == 0 {
            evens.push(i);
        } else {
            odds.push(i);
        }
        // Stop instead of wrapping at the extreme of the integer range.
        match i.checked_add(step) {
            Some(next) => i = next,
            None => break,
        }
    }

    Ok(RangeScan {
        start,
        end,
        step,
        sequence,
        evens,
        odds,
        sum,
    })
}

// ============================================================================
// Named series
// ============================================================================

/// The four named series of the vector demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Production,
    Costs,
    Areas,
    Temperatures,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Production,
        SeriesKind::Costs,
        SeriesKind::Areas,
        SeriesKind::Temperatures,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SeriesKind::Production => "Production",
            SeriesKind::Costs => "Costs",
            SeriesKind::Areas => "Areas",
            SeriesKind::Temperatures => "Temperatures",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SeriesKind::Production => "t",
            SeriesKind::Costs => "R$",
            SeriesKind::Areas => "ha",
            SeriesKind::Temperatures => "°C",
        }
    }
}

/// Summary of one collected series: the values, their count, and their sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub kind: SeriesKind,
    pub values: Vec<f64>,
    pub sum: f64,
}

impl SeriesSummary {
    pub fn new(kind: SeriesKind, values: Vec<f64>) -> Self {
        let sum = values.iter().sum();
        SeriesSummary { kind, values, sum }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Built-in sample values for one series (eight monthly observations from
/// the demo farms).
pub fn sample_series(kind: SeriesKind) -> &'static [f64] {
    match kind {
        SeriesKind::Production => &[
            1200.0, 1350.0, 1180.0, 1420.0, 1290.0, 1380.0, 1150.0, 1340.0,
        ],
        SeriesKind::Costs => &[
            45000.0, 52000.0, 43000.0, 58000.0, 49000.0, 55000.0, 41000.0, 53000.0,
        ],
        SeriesKind::Areas => &[12.5, 15.2, 11.8, 16.7, 13.9, 15.8, 10.9, 14.6],
        SeriesKind::Temperatures => &[23.5, 25.2, 22.8, 26.1, 24.3, 25.7, 21.9, 24.8],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_through_ten() {
        let scan = scan_range(1, 10, 1).unwrap();
        assert_eq!(scan.sequence, (1..=10).collect::<Vec<i64>>());
        assert_eq!(scan.evens, vec![2, 4, 6, 8, 10]);
        assert_eq!(scan.odds, vec![1, 3, 5, 7, 9]);
        assert_eq!(scan.sum, 55);
        assert_eq!(scan.count(), 10);
    }

    #[test]
    fn test_step_larger_than_one() {
        let scan = scan_range(1, 10, 3).unwrap();
        assert_eq!(scan.sequence, vec![1, 4, 7, 10]);
        assert_eq!(scan.evens, vec![4, 10]);
        assert_eq!(scan.odds, vec![1, 7]);
        assert_eq!(scan.sum, 22);
    }

    #[test]
    fn test_negative_values_split_by_parity() {
        let scan = scan_range(-3, 1, 1).unwrap();
        assert_eq!(scan.sequence, vec![-3, -2, -1, 0, 1]);
        assert_eq!(scan.evens, vec![-2, 0]);
        assert_eq!(scan.odds, vec![-3, -1, 1]);
        assert_eq!(scan.sum, -5);
    }

    #[test]
    fn test_end_below_start_is_empty() {
        let scan = scan_range(10, 1, 1).unwrap();
        assert!(scan.sequence.is_empty());
        assert_eq!(scan.sum, 0);
        assert_eq!(scan.count(), 0);
    }

    #[test]
    fn test_non_positive_step_is_rejected() {
        for bad in [0, -1, -10] {
            let err = scan_range(1, 10, bad).unwrap_err();
            assert!(matches!(err, FarmError::InvalidInput { field: "step", .. }));
        }
    }

    #[test]
    fn test_series_summary_sums_values() {
        let summary = SeriesSummary::new(
            SeriesKind::Production,
            sample_series(SeriesKind::Production).to_vec(),
        );
        assert_eq!(summary.len(), 8);
        assert_relative_eq!(summary.sum, 10_310.0);
    }

    #[test]
    fn test_every_sample_series_has_eight_observations() {
        for kind in SeriesKind::ALL {
            assert_eq!(sample_series(kind).len(), 8, "{}", kind.display_name());
        }
    }
}
