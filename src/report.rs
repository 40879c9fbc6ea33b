//! Report builders
//!
//! Aggregates the ledger's records into three report shapes: plantings by
//! crop, inputs by kind, and a combined overview with banded cost and size
//! ratings. Groupings use `BTreeMap` so report output has a stable order.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::types::{InputKind, InputRecord, PlantingRecord};

// ============================================================================
// Rating bands
// ============================================================================

/// Cost-efficiency rating derived from cost per hectare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostEfficiency {
    Excellent,
    Good,
    NeedsImprovement,
}

impl CostEfficiency {
    /// Band a cost-per-hectare figure (R$/ha).
    pub fn from_cost_per_hectare(cost_per_hectare: f64) -> Self {
        if cost_per_hectare < 500.0 {
            CostEfficiency::Excellent
        } else if cost_per_hectare < 1000.0 {
            CostEfficiency::Good
        } else {
            CostEfficiency::NeedsImprovement
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            CostEfficiency::Excellent => "excellent",
            CostEfficiency::Good => "good",
            CostEfficiency::NeedsImprovement => "needs improvement",
        }
    }
}

/// Operation-size rating derived from the average planting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBand {
    Small,
    Medium,
    Large,
}

impl SizeBand {
    /// Band an average planting area (hectares).
    pub fn from_average_area(average_hectares: f64) -> Self {
        if average_hectares < 1.0 {
            SizeBand::Small
        } else if average_hectares < 3.0 {
            SizeBand::Medium
        } else {
            SizeBand::Large
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            SizeBand::Small => "small",
            SizeBand::Medium => "medium",
            SizeBand::Large => "large",
        }
    }
}

// ============================================================================
// Report shapes
// ============================================================================

/// Per-crop slice of the planting report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropBreakdown {
    pub record_count: usize,
    pub area_hectares: f64,
    pub percent_of_total_area: f64,
}

/// Planting records grouped by crop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingReport {
    pub total_records: usize,
    pub total_area_hectares: f64,
    pub average_area_hectares: f64,
    pub by_crop: BTreeMap<String, CropBreakdown>,
}

/// Per-kind slice of the input report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindBreakdown {
    pub record_count: usize,
    pub quantity: f64,
    pub cost: f64,
    pub percent_of_total_cost: f64,
}

/// Input records grouped by input kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputReport {
    pub total_records: usize,
    pub total_cost: f64,
    pub average_cost: f64,
    pub by_kind: BTreeMap<InputKind, KindBreakdown>,
}

/// Combined overview across both collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallReport {
    pub planting_count: usize,
    pub input_count: usize,
    pub total_area_hectares: f64,
    pub total_cost: f64,
    pub cost_per_hectare: f64,
    pub average_area_per_planting: f64,
    pub efficiency_band: CostEfficiency,
    pub size_band: SizeBand,
    pub distinct_crop_count: usize,
}

// ============================================================================
// Builders
// ============================================================================

/// Share of `total` that `value` represents, as a percentage. Zero when the
/// total is zero, so empty collections report 0% instead of NaN.
fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// Group planting records by crop with area totals and shares.
pub fn planting_report(records: &[PlantingRecord]) -> PlantingReport {
    let total_records = records.len();
    let total_area_hectares: f64 = records.iter().map(|r| r.area_hectares).sum();
    let average_area_hectares = if total_records > 0 {
        total_area_hectares / total_records as f64
    } else {
        0.0
    };

    let mut by_crop: BTreeMap<String, CropBreakdown> = BTreeMap::new();
    for record in records {
        let entry = by_crop
            .entry(record.crop.clone())
            .or_insert_with(|| CropBreakdown {
                record_count: 0,
                area_hectares: 0.0,
                percent_of_total_area: 0.0,
            });
        entry.record_count += 1;
        entry.area_hectares += record.area_hectares;
    }
    for breakdown in by_crop.values_mut() {
        breakdown.percent_of_total_area = percent_of(breakdown.area_hectares, total_area_hectares);
    }

    PlantingReport {
        total_records,
        total_area_hectares,
        average_area_hectares,
        by_crop,
    }
}

/// Group input records by kind with cost totals and shares.
pub fn input_report(records: &[InputRecord]) -> InputReport {
    let total_records = records.len();
    let total_cost: f64 = records.iter().map(|r| r.cost).sum();
    let average_cost = if total_records > 0 {
        total_cost / total_records as f64
    } else {
        0.0
    };

    let mut by_kind: BTreeMap<InputKind, KindBreakdown> = BTreeMap::new();
    for record in records {
        let entry = by_kind
            .entry(record.input_kind)
            .or_insert_with(|| KindBreakdown {
                record_count: 0,
                quantity: 0.0,
                cost: 0.0,
                percent_of_total_cost: 0.0,
            });
        entry.record_count += 1;
        entry.quantity += record.quantity;
        entry.cost += record.cost;
    }
    for breakdown in by_kind.values_mut() {
        breakdown.percent_of_total_cost = percent_of(breakdown.cost, total_cost);
    }

    InputReport {
        total_records,
        total_cost,
        average_cost,
        by_kind,
    }
}

/// Combine both collections into the overview with banded ratings.
pub fn overall_report(plantings: &[PlantingRecord], inputs: &[InputRecord]) -> OverallReport {
    let total_area_hectares: f64 = plantings.iter().map(|r| r.area_hectares).sum();
    let total_cost: f64 = inputs.iter().map(|r| r.cost).sum();

    let cost_per_hectare = if total_area_hectares > 0.0 {
        total_cost / total_area_hectares
    } else {
        0.0
    };
    let average_area_per_planting = if plantings.is_empty() {
        0.0
    } else {
        total_area_hectares / plantings.len() as f64
    };

    let distinct_crops: FxHashSet<&str> =
        plantings.iter().map(|r| r.crop.as_str()).collect();

    OverallReport {
        planting_count: plantings.len(),
        input_count: inputs.len(),
        total_area_hectares,
        total_cost,
        cost_per_hectare,
        average_area_per_planting,
        efficiency_band: CostEfficiency::from_cost_per_hectare(cost_per_hectare),
        size_band: SizeBand::from_average_area(average_area_per_planting),
        distinct_crop_count: distinct_crops.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FarmLedger;
    use approx::assert_relative_eq;

    #[test]
    fn test_planting_report_on_the_sample_ledger() {
        let ledger = FarmLedger::with_sample_records();
        let report = planting_report(ledger.plantings());

        assert_eq!(report.total_records, 2);
        assert_relative_eq!(report.total_area_hectares, 4.3);
        assert_relative_eq!(report.average_area_hectares, 2.15);

        let orange = &report.by_crop["Orange"];
        assert_eq!(orange.record_count, 1);
        assert_relative_eq!(orange.area_hectares, 2.5);
        assert_relative_eq!(orange.percent_of_total_area, 58.139534883720934);

        let sugarcane = &report.by_crop["Sugarcane"];
        assert_relative_eq!(sugarcane.percent_of_total_area, 41.86046511627907);
    }

    #[test]
    fn test_planting_report_merges_repeated_crops() {
        let mut ledger = FarmLedger::with_sample_records();
        ledger
            .create_planting(crate::store::PlantingDraft {
                farm: "Fazenda Arcanjo Miguel".to_string(),
                crop: "Orange".to_string(),
                area_hectares: 1.5,
                shape: crate::types::ShapeKind::Square,
                dimensions: None,
            })
            .unwrap();

        let report = planting_report(ledger.plantings());
        let orange = &report.by_crop["Orange"];
        assert_eq!(orange.record_count, 2);
        assert_relative_eq!(orange.area_hectares, 4.0);
        assert_eq!(report.by_crop.len(), 2);
    }

    #[test]
    fn test_group_percentages_sum_to_one_hundred() {
        let mut ledger = FarmLedger::with_sample_records();
        for (crop, area) in [("Coffee", 0.7), ("Soybean", 3.3), ("Orange", 1.1)] {
            ledger
                .create_planting(crate::store::PlantingDraft {
                    farm: "Fazenda Barra Grande".to_string(),
                    crop: crop.to_string(),
                    area_hectares: area,
                    shape: crate::types::ShapeKind::Square,
                    dimensions: None,
                })
                .unwrap();
        }

        let plantings = planting_report(ledger.plantings());
        let area_percent_sum: f64 = plantings
            .by_crop
            .values()
            .map(|b| b.percent_of_total_area)
            .sum();
        assert_relative_eq!(area_percent_sum, 100.0, epsilon = 1e-9);

        let inputs = input_report(ledger.inputs());
        let cost_percent_sum: f64 = inputs
            .by_kind
            .values()
            .map(|b| b.percent_of_total_cost)
            .sum();
        assert_relative_eq!(cost_percent_sum, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_input_report_on_the_sample_ledger() {
        let ledger = FarmLedger::with_sample_records();
        let report = input_report(ledger.inputs());

        assert_eq!(report.total_records, 2);
        assert_relative_eq!(report.total_cost, 1531.5);
        assert_relative_eq!(report.average_cost, 765.75);

        let corrective = &report.by_kind[&InputKind::Corrective];
        assert_eq!(corrective.record_count, 1);
        assert_relative_eq!(corrective.quantity, 5.0);
        assert_relative_eq!(corrective.cost, 600.0);
        assert_relative_eq!(corrective.percent_of_total_cost, 39.177277178583084);

        let fertilizer = &report.by_kind[&InputKind::Fertilizer];
        assert_relative_eq!(fertilizer.percent_of_total_cost, 60.822722821416916);
    }

    #[test]
    fn test_overall_report_on_the_sample_ledger() {
        let ledger = FarmLedger::with_sample_records();
        let report = overall_report(ledger.plantings(), ledger.inputs());

        assert_eq!(report.planting_count, 2);
        assert_eq!(report.input_count, 2);
        assert_relative_eq!(report.cost_per_hectare, 1531.5 / 4.3);
        assert_relative_eq!(report.average_area_per_planting, 2.15);
        assert_eq!(report.efficiency_band, CostEfficiency::Excellent);
        assert_eq!(report.size_band, SizeBand::Medium);
        assert_eq!(report.distinct_crop_count, 2);
    }

    #[test]
    fn test_efficiency_band_thresholds() {
        assert_eq!(
            CostEfficiency::from_cost_per_hectare(499.99),
            CostEfficiency::Excellent
        );
        assert_eq!(
            CostEfficiency::from_cost_per_hectare(500.0),
            CostEfficiency::Good
        );
        assert_eq!(
            CostEfficiency::from_cost_per_hectare(999.99),
            CostEfficiency::Good
        );
        assert_eq!(
            CostEfficiency::from_cost_per_hectare(1000.0),
            CostEfficiency::NeedsImprovement
        );
    }

    #[test]
    fn test_size_band_thresholds() {
        assert_eq!(SizeBand::from_average_area(0.99), SizeBand::Small);
        assert_eq!(SizeBand::from_average_area(1.0), SizeBand::Medium);
        assert_eq!(SizeBand::from_average_area(2.99), SizeBand::Medium);
        assert_eq!(SizeBand::from_average_area(3.0), SizeBand::Large);
    }

    #[test]
    fn test_empty_collections_report_zeros() {
        let planting = planting_report(&[]);
        assert_eq!(planting.total_records, 0);
        assert_eq!(planting.average_area_hectares, 0.0);
        assert!(planting.by_crop.is_empty());

        let inputs = input_report(&[]);
        assert_eq!(inputs.total_cost, 0.0);
        assert_eq!(inputs.average_cost, 0.0);

        let overall = overall_report(&[], &[]);
        assert_eq!(overall.cost_per_hectare, 0.0);
        assert_eq!(overall.distinct_crop_count, 0);
        assert_eq!(overall.size_band, SizeBand::Small);
    }

    #[test]
    fn test_report_serializes_with_camel_case_keys() {
        let ledger = FarmLedger::with_sample_records();
        let report = overall_report(ledger.plantings(), ledger.inputs());
        let value = serde_json::to_value(&report).unwrap();

        assert!(value.get("costPerHectare").is_some());
        assert!(value.get("efficiencyBand").is_some());
        assert_eq!(value["efficiencyBand"], "excellent");
        assert_eq!(value["sizeBand"], "medium");
    }
}
