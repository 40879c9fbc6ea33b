//! Core record types
//!
//! The two mutable collections (plantings, inputs) are built from these
//! structs, and every calculator result that can be saved turns into one of
//! them. Wire format is camelCase JSON for records and snake_case strings
//! for enums, matching the export document layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by a record store. Unique within one collection,
/// never reused after deletion.
pub type RecordId = u64;

// ============================================================================
// Planting geometry
// ============================================================================

/// Shape of a measured plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Square,
    Rectangle,
}

impl ShapeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Square => "Square",
            ShapeKind::Rectangle => "Rectangle",
        }
    }

    /// Stable lowercase key, identical to the serde wire name.
    pub fn key(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Rectangle => "rectangle",
        }
    }

    /// Parse a lowercase key (e.g. from a console menu or a config file).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "square" => Some(ShapeKind::Square),
            "rectangle" => Some(ShapeKind::Rectangle),
            _ => None,
        }
    }
}

/// Linear measurements behind a plot's area, in meters.
///
/// Serialized untagged: `{"side": ..}` for squares,
/// `{"width": .., "height": ..}` for rectangles. The record's `ShapeKind`
/// field carries the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlotDimensions {
    Rectangle { width: f64, height: f64 },
    Square { side: f64 },
}

impl PlotDimensions {
    /// The shape these measurements describe.
    pub fn shape(&self) -> ShapeKind {
        match self {
            PlotDimensions::Square { .. } => ShapeKind::Square,
            PlotDimensions::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }
}

// ============================================================================
// Input classification
// ============================================================================

/// Category of agricultural input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Corrective,
    Fertilizer,
    Pesticide,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [
        InputKind::Corrective,
        InputKind::Fertilizer,
        InputKind::Pesticide,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            InputKind::Corrective => "Corrective",
            InputKind::Fertilizer => "Fertilizer",
            InputKind::Pesticide => "Pesticide",
        }
    }

    /// Stable lowercase key, identical to the serde wire name.
    pub fn key(&self) -> &'static str {
        match self {
            InputKind::Corrective => "corrective",
            InputKind::Fertilizer => "fertilizer",
            InputKind::Pesticide => "pesticide",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "corrective" => Some(InputKind::Corrective),
            "fertilizer" => Some(InputKind::Fertilizer),
            "pesticide" => Some(InputKind::Pesticide),
            _ => None,
        }
    }
}

/// Dosage intensity band selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Mid,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Mid, Intensity::High];

    pub fn display_name(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Mid => "Mid",
            Intensity::High => "High",
        }
    }

    /// Stable lowercase key, identical to the serde wire name.
    pub fn key(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Mid => "mid",
            Intensity::High => "high",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "low" => Some(Intensity::Low),
            "mid" => Some(Intensity::Mid),
            "high" => Some(Intensity::High),
            _ => None,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// One crop-area entry tied to a farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingRecord {
    pub id: RecordId,

    pub farm: String,

    pub crop: String,

    /// Planted area, strictly positive.
    pub area_hectares: f64,

    pub area_shape_kind: ShapeKind,

    /// Present when the record came from the geometry calculator; records
    /// created directly from an area figure carry no measurements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<PlotDimensions>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One agricultural-input application entry with cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    pub id: RecordId,

    pub farm: String,

    pub input_kind: InputKind,

    /// Product display name (e.g. "Limestone").
    pub product: String,

    /// Amount in the product's unit, strictly positive.
    pub quantity: f64,

    /// Total cost, strictly positive.
    pub cost: f64,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
