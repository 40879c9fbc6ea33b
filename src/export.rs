//! Report export
//!
//! Serializes a snapshot of both record collections as pretty-printed JSON,
//! stamped with the export time and the report the user was looking at.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::FarmLedger;
use crate::types::{InputRecord, PlantingRecord};

/// Which report screen an export snapshot was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Planting,
    Inputs,
    Overall,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Planting,
        ReportKind::Inputs,
        ReportKind::Overall,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ReportKind::Planting => "Plantings",
            ReportKind::Inputs => "Inputs",
            ReportKind::Overall => "Overall",
        }
    }

    /// Lowercase token used in export file names.
    pub fn file_slug(&self) -> &'static str {
        match self {
            ReportKind::Planting => "planting",
            ReportKind::Inputs => "inputs",
            ReportKind::Overall => "overall",
        }
    }
}

/// Export payload: both collections in full, plus provenance fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub planting_records: &'a [PlantingRecord],
    pub input_records: &'a [InputRecord],
    pub exported_at: DateTime<Utc>,
    pub report_kind: ReportKind,
}

impl<'a> ExportDocument<'a> {
    /// Snapshot the ledger right now.
    pub fn new(ledger: &'a FarmLedger, kind: ReportKind) -> Self {
        ExportDocument {
            planting_records: ledger.plantings(),
            input_records: ledger.inputs(),
            exported_at: Utc::now(),
            report_kind: kind,
        }
    }

    /// Pretty-printed JSON, two-space indent.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize export document")
    }

    /// `farm_report_{kind}_{YYYY-MM-DD}.json`, dated from the export stamp.
    pub fn suggested_file_name(&self) -> String {
        format!(
            "farm_report_{}_{}.json",
            self.report_kind.file_slug(),
            self.exported_at.format("%Y-%m-%d")
        )
    }

    /// Write the document to `path` as JSON.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write export file: {:?}", path))?;
        tracing::info!(
            "Exported {} report ({} plantings, {} inputs) to {:?}",
            self.report_kind.display_name(),
            self.planting_records.len(),
            self.input_records.len(),
            path
        );
        Ok(())
    }
}
