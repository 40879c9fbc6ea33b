//! Generate Sample Reports
//!
//! Seeds the demo ledger, runs both calculators, prints every report and
//! demo screen, and exports all three report snapshots as JSON to the
//! reports folder.
//! Run with: cargo run --bin generate_sample_reports

use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farm_manager_rust::advisory::{sample_readings, WeatherAdvisory};
use farm_manager_rust::catalog::ProductCatalog;
use farm_manager_rust::dosage::compute_dosage;
use farm_manager_rust::export::{ExportDocument, ReportKind};
use farm_manager_rust::geometry::compute_area;
use farm_manager_rust::report::{input_report, overall_report, planting_report};
use farm_manager_rust::sequences::{sample_series, scan_range, SeriesKind};
use farm_manager_rust::stats::descriptive_stats;
use farm_manager_rust::store::FarmLedger;
use farm_manager_rust::types::{InputKind, Intensity, ShapeKind};

fn main() -> Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_manager_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Generating sample farm reports...\n");

    // Default report dir for local development
    let report_dir = std::env::var("REPORT_DIR").unwrap_or_else(|_| "reports".to_string());
    fs::create_dir_all(&report_dir)?;

    let catalog = ProductCatalog::builtin();
    let mut ledger = FarmLedger::with_sample_records();
    println!(
        "Seeded ledger: {} plantings, {} inputs",
        ledger.plantings().len(),
        ledger.inputs().len()
    );

    // One pass through each calculator, saved like the console's save button
    let plot = compute_area(ShapeKind::Rectangle, 75.0, Some(120.0))?;
    let planting = ledger.save_plot(&plot);
    println!(
        "Saved {} plot ({:.2} m2, {:.4} ha) as planting record #{}",
        plot.shape.key(),
        plot.area_square_meters,
        plot.area_hectares,
        planting.id
    );

    let estimate = compute_dosage(
        &catalog,
        InputKind::Pesticide,
        "insecticide",
        3.5,
        Intensity::High,
    )?;
    let input = ledger.save_dosage(&estimate);
    println!(
        "Saved {} estimate ({:.2} {}, R$ {:.2}) as input record #{}",
        estimate.display_name, estimate.quantity, estimate.unit, estimate.cost, input.id
    );

    println!("\n{}", "=".repeat(60));
    println!("Planting report");
    println!("{}", "=".repeat(60));
    let plantings = planting_report(ledger.plantings());
    println!(
        "Records: {}  Total: {:.2} ha  Average: {:.2} ha",
        plantings.total_records, plantings.total_area_hectares, plantings.average_area_hectares
    );
    for (crop, breakdown) in &plantings.by_crop {
        println!(
            "  {}: {} record(s), {:.2} ha ({:.1}%)",
            crop, breakdown.record_count, breakdown.area_hectares, breakdown.percent_of_total_area
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Input report");
    println!("{}", "=".repeat(60));
    let inputs = input_report(ledger.inputs());
    println!(
        "Records: {}  Total: R$ {:.2}  Average: R$ {:.2}",
        inputs.total_records, inputs.total_cost, inputs.average_cost
    );
    for (kind, breakdown) in &inputs.by_kind {
        println!(
            "  {}: {} record(s), R$ {:.2} ({:.1}%)",
            kind.display_name(),
            breakdown.record_count,
            breakdown.cost,
            breakdown.percent_of_total_cost
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Overall report");
    println!("{}", "=".repeat(60));
    let overall = overall_report(ledger.plantings(), ledger.inputs());
    println!(
        "{:.2} ha, R$ {:.2} total, R$ {:.2}/ha ({}), {} distinct crop(s), {:.2} average ha ({})",
        overall.total_area_hectares,
        overall.total_cost,
        overall.cost_per_hectare,
        overall.efficiency_band.display_text(),
        overall.distinct_crop_count,
        overall.average_area_per_planting,
        overall.size_band.display_text()
    );

    println!("\n{}", "=".repeat(60));
    println!("Data demos");
    println!("{}", "=".repeat(60));
    let scan = scan_range(1, 10, 1)?;
    println!(
        "Range 1..=10: {} values, sum {}, {} even / {} odd",
        scan.count(),
        scan.sum,
        scan.evens.len(),
        scan.odds.len()
    );
    let stats = descriptive_stats(sample_series(SeriesKind::Production))?;
    println!(
        "Production series: mean {:.2} t, median {:.2} t, CoV {:.1}%",
        stats.mean, stats.median, stats.coefficient_of_variation
    );

    println!("\n{}", "=".repeat(60));
    println!("Weather advisories");
    println!("{}", "=".repeat(60));
    for reading in sample_readings() {
        let advisory = WeatherAdvisory::assess(&reading);
        println!(
            "{} ({:.1} C, {:.0}%, {:.1} km/h): {} / {} / {}",
            reading.city,
            reading.temperature_c,
            reading.humidity_pct,
            reading.wind_kmh,
            advisory.temperature.display_text(),
            advisory.humidity.display_text(),
            advisory.wind.display_text()
        );
    }

    println!("\nExporting report snapshots:");
    for kind in ReportKind::ALL {
        let document = ExportDocument::new(&ledger, kind);
        let output_path = Path::new(&report_dir).join(document.suggested_file_name());
        document.write_to_file(&output_path)?;
        println!("  Saved: {}", output_path.display());
    }

    println!("\nDone! Exported {} report files.", ReportKind::ALL.len());
    Ok(())
}
