//! Farm Management Console
//!
//! Interactive menu over the full library surface: farm profiles, the two
//! calculators, record CRUD, reports with JSON export, data-analysis demos,
//! and the weather advisory.
//! Run with: cargo run --bin farm_console

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farm_manager_rust::advisory::{sample_readings, WeatherAdvisory};
use farm_manager_rust::catalog::ProductCatalog;
use farm_manager_rust::dosage::compute_dosage;
use farm_manager_rust::export::{ExportDocument, ReportKind};
use farm_manager_rust::farms::FarmDirectory;
use farm_manager_rust::geometry::compute_area;
use farm_manager_rust::report::{input_report, overall_report, planting_report};
use farm_manager_rust::sequences::{sample_series, scan_range, SeriesKind, SeriesSummary};
use farm_manager_rust::stats::descriptive_stats;
use farm_manager_rust::store::{FarmLedger, InputDraft, InputPatch, PlantingDraft, PlantingPatch};
use farm_manager_rust::types::{InputKind, Intensity, ShapeKind};

// ============================================================================
// Input helpers
// ============================================================================

/// Read one trimmed line. `None` means the input stream closed.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let bytes = io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_f64(input: &str, label: &str) -> Option<f64> {
    match input.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("  {label} must be a number, got {input:?}.");
            None
        }
    }
}

fn parse_id(input: &str) -> Option<u64> {
    match input.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("  Record id must be a whole number, got {input:?}.");
            None
        }
    }
}

// ============================================================================
// Menu actions
// ============================================================================

fn show_farms(farms: &FarmDirectory) {
    println!("\nRegistered farms");
    println!("{}", "-".repeat(60));
    for farm in farms.iter() {
        println!("{} ({})", farm.name, farm.location);
        println!("  Primary crop: {}", farm.primary_crop);
        println!(
            "  Coordinates: {:.4}, {:.4}  Total area: {:.1} ha",
            farm.latitude, farm.longitude, farm.total_area_hectares
        );
        println!(
            "  Cycle: {}  Harvest: {}",
            farm.agronomy.cycle, farm.agronomy.harvest_window
        );
        println!(
            "  Irrigation: {}  Ideal pH: {:.1}-{:.1}",
            farm.agronomy.irrigation.display_text(),
            farm.agronomy.ideal_ph.min,
            farm.agronomy.ideal_ph.max
        );
        println!(
            "  Temperature: {:.0}-{:.0} C  Rainfall: {:.0}-{:.0} mm/year",
            farm.agronomy.ideal_temperature_c.min,
            farm.agronomy.ideal_temperature_c.max,
            farm.agronomy.annual_rainfall_mm.min,
            farm.agronomy.annual_rainfall_mm.max
        );
        println!();
    }
}

fn area_calculator(ledger: &mut FarmLedger) -> Result<()> {
    let Some(shape_input) = prompt("Shape (square/rectangle): ")? else {
        return Ok(());
    };
    let Some(shape) = ShapeKind::from_key(&shape_input) else {
        println!("  Unknown shape {shape_input:?}.");
        return Ok(());
    };

    let side_label = match shape {
        ShapeKind::Square => "Side (m): ",
        ShapeKind::Rectangle => "Width (m): ",
    };
    let Some(side_input) = prompt(side_label)? else {
        return Ok(());
    };
    let Some(side) = parse_f64(&side_input, "Measurement") else {
        return Ok(());
    };

    let height = match shape {
        ShapeKind::Square => None,
        ShapeKind::Rectangle => {
            let Some(height_input) = prompt("Height (m): ")? else {
                return Ok(());
            };
            let Some(height) = parse_f64(&height_input, "Measurement") else {
                return Ok(());
            };
            Some(height)
        }
    };

    let plot = match compute_area(shape, side, height) {
        Ok(plot) => plot,
        Err(e) => {
            println!("  {e}");
            return Ok(());
        }
    };

    println!("\n  {} plot", shape.display_name());
    println!("  Area: {:.2} m2 ({:.4} ha)", plot.area_square_meters, plot.area_hectares);
    println!("  Perimeter: {:.2} m", plot.perimeter_meters);

    if let Some(answer) = prompt("Save as planting record? (y/n): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let record = ledger.save_plot(&plot);
            println!("  Saved as planting record #{}.", record.id);
        }
    }
    Ok(())
}

fn dosage_calculator(catalog: &ProductCatalog, ledger: &mut FarmLedger) -> Result<()> {
    let Some(kind_input) = prompt("Input kind (corrective/fertilizer/pesticide): ")? else {
        return Ok(());
    };
    let Some(kind) = InputKind::from_key(&kind_input) else {
        println!("  Unknown input kind {kind_input:?}.");
        return Ok(());
    };

    println!("  Products:");
    for product in catalog.products_for(kind) {
        println!(
            "    {} - {} ({}/ha at R$ {:.2})",
            product.key, product.display_name, product.unit, product.unit_price
        );
    }

    let Some(product_key) = prompt("Product key: ")? else {
        return Ok(());
    };
    let Some(area_input) = prompt("Treated area (ha): ")? else {
        return Ok(());
    };
    let Some(area) = parse_f64(&area_input, "Area") else {
        return Ok(());
    };
    let Some(intensity_input) = prompt("Intensity (low/mid/high): ")? else {
        return Ok(());
    };
    let Some(intensity) = Intensity::from_key(&intensity_input) else {
        println!("  Unknown intensity {intensity_input:?}.");
        return Ok(());
    };

    let estimate = match compute_dosage(catalog, kind, &product_key, area, intensity) {
        Ok(estimate) => estimate,
        Err(e) => {
            println!("  {e}");
            return Ok(());
        }
    };

    println!("\n  {} on {:.2} ha ({} intensity)", estimate.display_name, area, intensity.key());
    println!(
        "  Dosage: {:.2} {}/ha  Total: {:.2} {}",
        estimate.dosage_per_hectare, estimate.unit, estimate.quantity, estimate.unit
    );
    println!("  Estimated cost: R$ {:.2}", estimate.cost);
    if let Some(plan) = &estimate.applications {
        println!(
            "  Applications: {} of {:.2} {} each",
            plan.count, plan.per_application, estimate.unit
        );
    }

    if let Some(answer) = prompt("Save as input record? (y/n): ")? {
        if answer.eq_ignore_ascii_case("y") {
            let record = ledger.save_dosage(&estimate);
            println!("  Saved as input record #{}.", record.id);
        }
    }
    Ok(())
}

fn list_plantings(ledger: &FarmLedger) {
    if ledger.plantings().is_empty() {
        println!("  No planting records.");
        return;
    }
    for record in ledger.plantings() {
        println!(
            "  #{} {} at {} - {:.2} ha ({}), created {}",
            record.id,
            record.crop,
            record.farm,
            record.area_hectares,
            record.area_shape_kind.key(),
            record.created_at.format("%Y-%m-%d %H:%M")
        );
    }
}

fn manage_plantings(ledger: &mut FarmLedger) -> Result<()> {
    println!("\nPlanting records");
    list_plantings(ledger);
    let Some(choice) = prompt("Action (create/update/delete/back): ")? else {
        return Ok(());
    };

    match choice.as_str() {
        "create" => {
            let Some(farm) = prompt("Farm: ")? else { return Ok(()) };
            let Some(crop) = prompt("Crop: ")? else { return Ok(()) };
            let Some(area_input) = prompt("Area (ha): ")? else { return Ok(()) };
            let Some(area) = parse_f64(&area_input, "Area") else {
                return Ok(());
            };
            let Some(shape_input) = prompt("Shape (square/rectangle): ")? else {
                return Ok(());
            };
            let Some(shape) = ShapeKind::from_key(&shape_input) else {
                println!("  Unknown shape {shape_input:?}.");
                return Ok(());
            };

            match ledger.create_planting(PlantingDraft {
                farm,
                crop,
                area_hectares: area,
                shape,
                dimensions: None,
            }) {
                Ok(record) => println!("  Created planting record #{}.", record.id),
                Err(e) => println!("  {e}"),
            }
        }
        "update" => {
            let Some(id_input) = prompt("Record id: ")? else { return Ok(()) };
            let Some(id) = parse_id(&id_input) else {
                return Ok(());
            };

            println!("  Leave a field blank to keep its current value.");
            let Some(crop) = prompt("New crop: ")? else { return Ok(()) };
            let Some(area_input) = prompt("New area (ha): ")? else {
                return Ok(());
            };

            let mut patch = PlantingPatch::default();
            if !crop.is_empty() {
                patch.crop = Some(crop);
            }
            if !area_input.is_empty() {
                let Some(area) = parse_f64(&area_input, "Area") else {
                    return Ok(());
                };
                patch.area_hectares = Some(area);
            }

            match ledger.update_planting(id, patch) {
                Ok(record) => println!("  Updated planting record #{}.", record.id),
                Err(e) => println!("  {e}"),
            }
        }
        "delete" => {
            let Some(id_input) = prompt("Record id: ")? else { return Ok(()) };
            let Some(id) = parse_id(&id_input) else {
                return Ok(());
            };
            match ledger.delete_planting(id) {
                Ok(record) => println!("  Deleted planting record #{} ({}).", record.id, record.crop),
                Err(e) => println!("  {e}"),
            }
        }
        _ => {}
    }
    Ok(())
}

fn list_inputs(ledger: &FarmLedger) {
    if ledger.inputs().is_empty() {
        println!("  No input records.");
        return;
    }
    for record in ledger.inputs() {
        println!(
            "  #{} {} ({}) at {} - {:.2} units, R$ {:.2}",
            record.id,
            record.product,
            record.input_kind.key(),
            record.farm,
            record.quantity,
            record.cost
        );
    }
}

fn manage_inputs(ledger: &mut FarmLedger) -> Result<()> {
    println!("\nInput records");
    list_inputs(ledger);
    let Some(choice) = prompt("Action (create/update/delete/back): ")? else {
        return Ok(());
    };

    match choice.as_str() {
        "create" => {
            let Some(farm) = prompt("Farm: ")? else { return Ok(()) };
            let Some(kind_input) = prompt("Kind (corrective/fertilizer/pesticide): ")? else {
                return Ok(());
            };
            let Some(kind) = InputKind::from_key(&kind_input) else {
                println!("  Unknown input kind {kind_input:?}.");
                return Ok(());
            };
            let Some(product) = prompt("Product: ")? else { return Ok(()) };
            let Some(quantity_input) = prompt("Quantity: ")? else { return Ok(()) };
            let Some(quantity) = parse_f64(&quantity_input, "Quantity") else {
                return Ok(());
            };
            let Some(cost_input) = prompt("Cost (R$): ")? else { return Ok(()) };
            let Some(cost) = parse_f64(&cost_input, "Cost") else {
                return Ok(());
            };

            match ledger.create_input(InputDraft {
                farm,
                kind,
                product,
                quantity,
                cost,
            }) {
                Ok(record) => println!("  Created input record #{}.", record.id),
                Err(e) => println!("  {e}"),
            }
        }
        "update" => {
            let Some(id_input) = prompt("Record id: ")? else { return Ok(()) };
            let Some(id) = parse_id(&id_input) else {
                return Ok(());
            };

            println!("  Leave a field blank to keep its current value.");
            let Some(product) = prompt("New product: ")? else { return Ok(()) };
            let Some(cost_input) = prompt("New cost (R$): ")? else {
                return Ok(());
            };

            let mut patch = InputPatch::default();
            if !product.is_empty() {
                patch.product = Some(product);
            }
            if !cost_input.is_empty() {
                let Some(cost) = parse_f64(&cost_input, "Cost") else {
                    return Ok(());
                };
                patch.cost = Some(cost);
            }

            match ledger.update_input(id, patch) {
                Ok(record) => println!("  Updated input record #{}.", record.id),
                Err(e) => println!("  {e}"),
            }
        }
        "delete" => {
            let Some(id_input) = prompt("Record id: ")? else { return Ok(()) };
            let Some(id) = parse_id(&id_input) else {
                return Ok(());
            };
            match ledger.delete_input(id) {
                Ok(record) => println!("  Deleted input record #{} ({}).", record.id, record.product),
                Err(e) => println!("  {e}"),
            }
        }
        _ => {}
    }
    Ok(())
}

fn show_reports(ledger: &FarmLedger) -> Result<()> {
    let plantings = planting_report(ledger.plantings());
    let inputs = input_report(ledger.inputs());
    let overall = overall_report(ledger.plantings(), ledger.inputs());

    println!("\nPlanting report");
    println!("{}", "-".repeat(60));
    println!(
        "  Records: {}  Total area: {:.2} ha  Average: {:.2} ha",
        plantings.total_records, plantings.total_area_hectares, plantings.average_area_hectares
    );
    for (crop, breakdown) in &plantings.by_crop {
        println!(
            "    {}: {} record(s), {:.2} ha ({:.1}%)",
            crop, breakdown.record_count, breakdown.area_hectares, breakdown.percent_of_total_area
        );
    }

    println!("\nInput report");
    println!("{}", "-".repeat(60));
    println!(
        "  Records: {}  Total cost: R$ {:.2}  Average: R$ {:.2}",
        inputs.total_records, inputs.total_cost, inputs.average_cost
    );
    for (kind, breakdown) in &inputs.by_kind {
        println!(
            "    {}: {} record(s), R$ {:.2} ({:.1}%)",
            kind.display_name(),
            breakdown.record_count,
            breakdown.cost,
            breakdown.percent_of_total_cost
        );
    }

    println!("\nOverall report");
    println!("{}", "-".repeat(60));
    println!(
        "  Total area: {:.2} ha  Total cost: R$ {:.2}",
        overall.total_area_hectares, overall.total_cost
    );
    println!(
        "  Cost per hectare: R$ {:.2} ({})",
        overall.cost_per_hectare,
        overall.efficiency_band.display_text()
    );
    println!(
        "  Average planting: {:.2} ha ({})  Distinct crops: {}",
        overall.average_area_per_planting,
        overall.size_band.display_text(),
        overall.distinct_crop_count
    );

    if let Some(answer) = prompt("\nExport a report? (planting/inputs/overall/none): ")? {
        let kind = match answer.as_str() {
            "planting" => Some(ReportKind::Planting),
            "inputs" => Some(ReportKind::Inputs),
            "overall" => Some(ReportKind::Overall),
            _ => None,
        };
        if let Some(kind) = kind {
            let document = ExportDocument::new(ledger, kind);
            let file_name = document.suggested_file_name();
            document.write_to_file(&file_name)?;
            println!("  Wrote {file_name}");
        }
    }
    Ok(())
}

fn data_demos() -> Result<()> {
    println!("\nRange scans");
    println!("{}", "-".repeat(60));
    let scan = scan_range(1, 10, 1)?;
    println!("  1..=10 step 1: {} values, sum {}", scan.count(), scan.sum);
    println!("    evens: {:?}", scan.evens);
    println!("    odds:  {:?}", scan.odds);
    let tens = scan_range(0, 100, 10)?;
    println!("  0..=100 step 10: {:?} (sum {})", tens.sequence, tens.sum);

    println!("\nSeason series");
    println!("{}", "-".repeat(60));
    for kind in SeriesKind::ALL {
        let summary = SeriesSummary::new(kind, sample_series(kind).to_vec());
        println!(
            "  {}: {} points, total {:.1} {}",
            kind.display_name(),
            summary.len(),
            summary.sum,
            kind.unit()
        );
    }

    println!("\nProduction statistics");
    println!("{}", "-".repeat(60));
    let stats = descriptive_stats(sample_series(SeriesKind::Production))?;
    println!("  Mean: {:.2}  Median: {:.2}", stats.mean, stats.median);
    println!(
        "  Std dev: {:.2}  Coefficient of variation: {:.1}%",
        stats.std_dev, stats.coefficient_of_variation
    );
    println!(
        "  Min: {:.1}  Max: {:.1}  Range: {:.1}",
        stats.min, stats.max, stats.range
    );
    Ok(())
}

fn weather_advisory() {
    println!("\nWeather advisory");
    println!("{}", "-".repeat(60));
    for reading in sample_readings() {
        let advisory = WeatherAdvisory::assess(&reading);
        println!("{} - {}", reading.city, reading.condition);
        println!(
            "  {:.1} C, {:.0}% humidity, {:.1} hPa, wind {:.1} km/h",
            reading.temperature_c, reading.humidity_pct, reading.pressure_hpa, reading.wind_kmh
        );
        println!("  {}", advisory.temperature.display_text());
        println!("  {}", advisory.humidity.display_text());
        println!("  {}", advisory.wind.display_text());
        println!();
    }
}

fn main() -> Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_manager_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = ProductCatalog::builtin();
    let farms = FarmDirectory::builtin();
    let mut ledger = FarmLedger::with_sample_records();

    println!("{}", "=".repeat(60));
    println!("Farm Management Console");
    println!("{}", "=".repeat(60));

    loop {
        println!("\n1. Farm profiles");
        println!("2. Area calculator");
        println!("3. Dosage calculator");
        println!("4. Planting records");
        println!("5. Input records");
        println!("6. Reports");
        println!("7. Data analysis demos");
        println!("8. Weather advisory");
        println!("0. Exit");

        let Some(choice) = prompt("Option: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => show_farms(&farms),
            "2" => area_calculator(&mut ledger)?,
            "3" => dosage_calculator(&catalog, &mut ledger)?,
            "4" => manage_plantings(&mut ledger)?,
            "5" => manage_inputs(&mut ledger)?,
            "6" => show_reports(&ledger)?,
            "7" => data_demos()?,
            "8" => weather_advisory(),
            "0" | "q" | "exit" => break,
            "" => {}
            other => println!("Unknown option {other:?}."),
        }
    }

    println!("Goodbye!");
    Ok(())
}
