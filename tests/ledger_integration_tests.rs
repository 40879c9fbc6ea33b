//! Ledger Integration Tests
//!
//! Drives the whole pipeline end to end: seed the demo ledger, run both
//! calculators and save their results, edit records, build every report,
//! and export the JSON snapshot.

use approx::assert_relative_eq;
use farm_manager_rust::catalog::ProductCatalog;
use farm_manager_rust::dosage::compute_dosage;
use farm_manager_rust::export::{ExportDocument, ReportKind};
use farm_manager_rust::geometry::compute_area;
use farm_manager_rust::report::{
    input_report, overall_report, planting_report, CostEfficiency, SizeBand,
};
use farm_manager_rust::sequences::{sample_series, scan_range, SeriesKind};
use farm_manager_rust::stats::descriptive_stats;
use farm_manager_rust::store::{FarmLedger, PlantingDraft, PlantingPatch, PLACEHOLDER_FARM};
use farm_manager_rust::types::{InputKind, Intensity, ShapeKind};

#[test]
fn test_seeded_reports_match_known_figures() {
    let ledger = FarmLedger::with_sample_records();

    let plantings = planting_report(ledger.plantings());
    assert_eq!(plantings.total_records, 2);
    assert_relative_eq!(plantings.total_area_hectares, 4.3);
    assert_relative_eq!(plantings.average_area_hectares, 2.15);
    assert_relative_eq!(
        plantings.by_crop["Orange"].percent_of_total_area,
        58.139534883720934
    );

    let inputs = input_report(ledger.inputs());
    assert_relative_eq!(inputs.total_cost, 1531.5);
    assert_relative_eq!(inputs.average_cost, 765.75);

    let overall = overall_report(ledger.plantings(), ledger.inputs());
    assert_relative_eq!(overall.cost_per_hectare, 1531.5 / 4.3);
    assert_eq!(overall.efficiency_band, CostEfficiency::Excellent);
    assert_eq!(overall.size_band, SizeBand::Medium);
    assert_eq!(overall.distinct_crop_count, 2);
}

#[test]
fn test_full_session_from_calculators_to_export() {
    let catalog = ProductCatalog::builtin();
    let mut ledger = FarmLedger::with_sample_records();

    // Same rectangle the first seed record was measured from.
    let plot = compute_area(ShapeKind::Rectangle, 100.0, Some(250.0))
        .expect("Failed to compute rectangle area");
    assert_relative_eq!(plot.area_hectares, 2.5);
    let planting_id = ledger.save_plot(&plot).id;
    assert_eq!(planting_id, 3);
    assert_eq!(ledger.find_planting(3).unwrap().farm, PLACEHOLDER_FARM);

    // Same estimate the second seed input was taken from.
    let estimate = compute_dosage(
        &catalog,
        InputKind::Fertilizer,
        "phosphorus",
        1.8,
        Intensity::Mid,
    )
    .expect("Failed to compute dosage");
    assert_relative_eq!(estimate.quantity, 207.0);
    assert_relative_eq!(estimate.cost, 931.5);
    let input_id = ledger.save_dosage(&estimate).id;
    assert_eq!(input_id, 3);

    // Fill in the placeholder fields the way the console edit screen would.
    ledger
        .update_planting(
            planting_id,
            PlantingPatch {
                farm: Some("Fazenda Arcanjo Miguel".to_string()),
                crop: Some("Coffee".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to update saved planting");

    let overall = overall_report(ledger.plantings(), ledger.inputs());
    assert_eq!(overall.planting_count, 3);
    assert_eq!(overall.input_count, 3);
    assert_relative_eq!(overall.total_area_hectares, 6.8);
    assert_relative_eq!(overall.total_cost, 2463.0);
    assert_eq!(overall.efficiency_band, CostEfficiency::Excellent);
    assert_eq!(overall.distinct_crop_count, 3);

    let document = ExportDocument::new(&ledger, ReportKind::Overall);
    let json = document.to_json_string().expect("Failed to serialize export");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Export is not valid JSON");
    assert_eq!(value["plantingRecords"].as_array().unwrap().len(), 3);
    assert_eq!(value["inputRecords"].as_array().unwrap().len(), 3);
    assert_eq!(value["reportKind"], "overall");
    assert_eq!(value["plantingRecords"][2]["crop"], "Coffee");
}

#[test]
fn test_export_file_round_trip() {
    let ledger = FarmLedger::with_sample_records();
    let document = ExportDocument::new(&ledger, ReportKind::Inputs);

    let output_path = std::env::temp_dir().join(format!(
        "farm_manager_export_test_{}.json",
        std::process::id()
    ));
    document
        .write_to_file(&output_path)
        .expect("Failed to write export file");

    let content = std::fs::read_to_string(&output_path).expect("Failed to read export back");
    let value: serde_json::Value =
        serde_json::from_str(&content).expect("Exported file is not valid JSON");
    assert_eq!(value["reportKind"], "inputs");
    assert_eq!(value["inputRecords"][0]["product"], "Limestone");

    std::fs::remove_file(&output_path).expect("Failed to remove export file");
}

#[test]
fn test_crud_lifecycle_keeps_ids_stable() {
    let mut ledger = FarmLedger::new();
    for (crop, area) in [("Orange", 1.2), ("Sugarcane", 2.4), ("Coffee", 0.9)] {
        ledger
            .create_planting(PlantingDraft {
                farm: "Fazenda Barra Grande".to_string(),
                crop: crop.to_string(),
                area_hectares: area,
                shape: ShapeKind::Square,
                dimensions: None,
            })
            .expect("Failed to create planting");
    }

    ledger.delete_planting(2).expect("Failed to delete planting");
    assert!(ledger.find_planting(2).is_none());

    let replacement = ledger
        .create_planting(PlantingDraft {
            farm: "Fazenda Barra Grande".to_string(),
            crop: "Sugarcane".to_string(),
            area_hectares: 2.4,
            shape: ShapeKind::Square,
            dimensions: None,
        })
        .expect("Failed to create replacement planting")
        .id;
    assert_eq!(replacement, 4);

    // A rejected patch must leave the record exactly as it was.
    let before = ledger.find_planting(4).unwrap().clone();
    assert!(ledger
        .update_planting(
            4,
            PlantingPatch {
                area_hectares: Some(0.0),
                ..Default::default()
            },
        )
        .is_err());
    assert_eq!(ledger.find_planting(4), Some(&before));

    let report = planting_report(ledger.plantings());
    assert_eq!(report.total_records, 3);
}

#[test]
fn test_demo_series_feed_the_statistics() {
    let stats = descriptive_stats(sample_series(SeriesKind::Production))
        .expect("Failed to compute statistics");
    assert_eq!(stats.n, 8);
    assert_relative_eq!(stats.mean, 1288.75);
    assert_relative_eq!(stats.median, 1315.0);

    let scan = scan_range(1, 100, 1).expect("Failed to scan range");
    assert_eq!(scan.sum, 5050);
    assert_eq!(scan.evens.len(), 50);
}
