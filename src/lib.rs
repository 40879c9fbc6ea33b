//! Farm Management Core
//!
//! Computational core of a farm management tool: plot geometry, input
//! dosage estimates, record keeping, aggregate reports, and weather advice.
//!
//! Module map:
//! - `types` / `error`: record types and the error taxonomy
//! - `geometry`, `dosage`, `stats`, `sequences`: pure calculators
//! - `store`: the mutable record ledger, every CRUD path goes through it
//! - `report` / `export`: aggregation and pretty-printed JSON export
//! - `catalog` / `farms` / `advisory`: reference data and weather advice

pub mod advisory;
pub mod catalog;
pub mod dosage;
pub mod error;
pub mod export;
pub mod farms;
pub mod geometry;
pub mod report;
pub mod sequences;
pub mod stats;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use advisory::{WeatherAdvisory, WeatherReading};
pub use catalog::ProductCatalog;
pub use dosage::{compute_dosage, DosageEstimate};
pub use error::FarmError;
pub use export::{ExportDocument, ReportKind};
pub use farms::FarmDirectory;
pub use geometry::{compute_area, PlotComputation};
pub use report::{input_report, overall_report, planting_report, OverallReport};
pub use stats::{descriptive_stats, SampleStats};
pub use store::{FarmLedger, InputDraft, InputPatch, PlantingDraft, PlantingPatch};
pub use types::{
    InputKind, InputRecord, Intensity, PlantingRecord, PlotDimensions, RecordId, ShapeKind,
};
