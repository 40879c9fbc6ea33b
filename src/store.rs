//! Record ledger
//!
//! Owns the two mutable collections and every CRUD path into them. Ids come
//! from a per-collection monotonic counter that survives deletions, so a
//! delete followed by a create can never mint an id that is still in use.

use chrono::{DateTime, TimeZone, Utc};

use crate::dosage::DosageEstimate;
use crate::error::FarmError;
use crate::geometry::PlotComputation;
use crate::types::{InputKind, InputRecord, PlantingRecord, PlotDimensions, RecordId, ShapeKind};

/// Farm name stamped on records saved straight from a calculator, which has
/// no notion of an active farm.
pub const PLACEHOLDER_FARM: &str = "Unassigned farm";

/// Crop name stamped on planting records saved straight from the geometry
/// calculator.
pub const PLACEHOLDER_CROP: &str = "To be decided";

// ============================================================================
// Generic record store
// ============================================================================

/// Behavior a record needs to live in a [`RecordStore`].
pub trait LedgerRecord {
    /// Collection name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    /// Stamp the update timestamp.
    fn touch(&mut self, at: DateTime<Utc>);
}

impl LedgerRecord for PlantingRecord {
    const KIND: &'static str = "planting";

    fn id(&self) -> RecordId {
        self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

impl LedgerRecord for InputRecord {
    const KIND: &'static str = "input";

    fn id(&self) -> RecordId {
        self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

/// One collection plus its id counter.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    last_id: RecordId,
}

impl<T> RecordStore<T> {
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
            last_id: 0,
        }
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LedgerRecord> RecordStore<T> {
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Insert a record built around the next counter value. Ids start at 1.
    fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> &T {
        self.last_id += 1;
        self.records.push(build(self.last_id));
        &self.records[self.records.len() - 1]
    }

    /// Apply a mutation to one record and stamp its update timestamp.
    fn update_with(&mut self, id: RecordId, apply: impl FnOnce(&mut T)) -> Result<&T, FarmError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(FarmError::NotFound { kind: T::KIND, id })?;
        apply(record);
        record.touch(Utc::now());
        Ok(&*record)
    }

    /// Remove one record, preserving the order of the rest.
    fn remove(&mut self, id: RecordId) -> Result<T, FarmError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(FarmError::NotFound { kind: T::KIND, id })?;
        Ok(self.records.remove(index))
    }
}

// ============================================================================
// Create / update payloads
// ============================================================================

/// Payload for creating a planting record.
#[derive(Debug, Clone)]
pub struct PlantingDraft {
    pub farm: String,
    pub crop: String,
    pub area_hectares: f64,
    pub shape: ShapeKind,
    pub dimensions: Option<PlotDimensions>,
}

impl PlantingDraft {
    fn validate(&self) -> Result<(), FarmError> {
        require_positive(self.area_hectares, "area")
    }
}

/// Payload for creating an input record.
#[derive(Debug, Clone)]
pub struct InputDraft {
    pub farm: String,
    pub kind: InputKind,
    pub product: String,
    pub quantity: f64,
    pub cost: f64,
}

impl InputDraft {
    fn validate(&self) -> Result<(), FarmError> {
        if self.product.trim().is_empty() {
            return Err(FarmError::invalid("product", "a product name is required"));
        }
        require_positive(self.quantity, "quantity")?;
        require_positive(self.cost, "cost")
    }
}

/// Field-by-field planting update; `None` leaves the current value alone.
#[derive(Debug, Clone, Default)]
pub struct PlantingPatch {
    pub farm: Option<String>,
    pub crop: Option<String>,
    pub area_hectares: Option<f64>,
    pub shape: Option<ShapeKind>,
}

impl PlantingPatch {
    fn validate(&self) -> Result<(), FarmError> {
        if let Some(area) = self.area_hectares {
            require_positive(area, "area")?;
        }
        Ok(())
    }
}

/// Field-by-field input update; `None` leaves the current value alone.
#[derive(Debug, Clone, Default)]
pub struct InputPatch {
    pub farm: Option<String>,
    pub kind: Option<InputKind>,
    pub product: Option<String>,
    pub quantity: Option<f64>,
    pub cost: Option<f64>,
}

impl InputPatch {
    fn validate(&self) -> Result<(), FarmError> {
        if let Some(product) = &self.product {
            if product.trim().is_empty() {
                return Err(FarmError::invalid("product", "a product name is required"));
            }
        }
        if let Some(quantity) = self.quantity {
            require_positive(quantity, "quantity")?;
        }
        if let Some(cost) = self.cost {
            require_positive(cost, "cost")?;
        }
        Ok(())
    }
}

fn require_positive(value: f64, field: &'static str) -> Result<(), FarmError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FarmError::invalid(
            field,
            "must be a finite number greater than zero",
        ))
    }
}

// ============================================================================
// Ledger
// ============================================================================

/// Owner of the two record collections. Every calculator and report function
/// takes what it needs from here by reference; nothing else holds state.
#[derive(Debug, Clone, Default)]
pub struct FarmLedger {
    plantings: RecordStore<PlantingRecord>,
    inputs: RecordStore<InputRecord>,
}

impl FarmLedger {
    pub fn new() -> Self {
        FarmLedger {
            plantings: RecordStore::new(),
            inputs: RecordStore::new(),
        }
    }

    /// Ledger pre-loaded with the demo records (two plantings, two inputs,
    /// all created 2024-01-15).
    pub fn with_sample_records() -> Self {
        let mut ledger = FarmLedger::new();

        ledger.plantings.insert_with(|id| PlantingRecord {
            id,
            farm: "Fazenda Arcanjo Miguel".to_string(),
            crop: "Orange".to_string(),
            area_hectares: 2.5,
            area_shape_kind: ShapeKind::Rectangle,
            dimensions: Some(PlotDimensions::Rectangle {
                width: 100.0,
                height: 250.0,
            }),
            created_at: seed_timestamp(10, 30),
            updated_at: None,
        });
        ledger.plantings.insert_with(|id| PlantingRecord {
            id,
            farm: "Fazenda Barra Grande".to_string(),
            crop: "Sugarcane".to_string(),
            area_hectares: 1.8,
            area_shape_kind: ShapeKind::Square,
            dimensions: Some(PlotDimensions::Square { side: 134.16 }),
            created_at: seed_timestamp(11, 15),
            updated_at: None,
        });

        ledger.inputs.insert_with(|id| InputRecord {
            id,
            farm: "Fazenda Arcanjo Miguel".to_string(),
            input_kind: InputKind::Corrective,
            product: "Limestone".to_string(),
            quantity: 5.0,
            cost: 600.0,
            created_at: seed_timestamp(14, 20),
            updated_at: None,
        });
        ledger.inputs.insert_with(|id| InputRecord {
            id,
            farm: "Fazenda Barra Grande".to_string(),
            input_kind: InputKind::Fertilizer,
            product: "Phosphorus (P2O5)".to_string(),
            quantity: 207.0,
            cost: 931.5,
            created_at: seed_timestamp(15, 45),
            updated_at: None,
        });

        ledger
    }

    pub fn plantings(&self) -> &[PlantingRecord] {
        self.plantings.records()
    }

    pub fn inputs(&self) -> &[InputRecord] {
        self.inputs.records()
    }

    pub fn find_planting(&self, id: RecordId) -> Option<&PlantingRecord> {
        self.plantings.get(id)
    }

    pub fn find_input(&self, id: RecordId) -> Option<&InputRecord> {
        self.inputs.get(id)
    }

    // ------------------------------------------------------------------
    // Planting CRUD
    // ------------------------------------------------------------------

    pub fn create_planting(&mut self, draft: PlantingDraft) -> Result<&PlantingRecord, FarmError> {
        draft.validate()?;
        let record = self.plantings.insert_with(|id| PlantingRecord {
            id,
            farm: draft.farm,
            crop: draft.crop,
            area_hectares: draft.area_hectares,
            area_shape_kind: draft.shape,
            dimensions: draft.dimensions,
            created_at: Utc::now(),
            updated_at: None,
        });
        tracing::debug!("Created planting record {}", record.id);
        Ok(record)
    }

    pub fn update_planting(
        &mut self,
        id: RecordId,
        patch: PlantingPatch,
    ) -> Result<&PlantingRecord, FarmError> {
        patch.validate()?;
        let record = self.plantings.update_with(id, |record| {
            if let Some(farm) = patch.farm {
                record.farm = farm;
            }
            if let Some(crop) = patch.crop {
                record.crop = crop;
            }
            if let Some(area) = patch.area_hectares {
                record.area_hectares = area;
            }
            if let Some(shape) = patch.shape {
                // Measurements from the old shape no longer describe the
                // plot; drop them rather than keep a lying pair.
                if record.dimensions.map(|d| d.shape()) != Some(shape) {
                    record.dimensions = None;
                }
                record.area_shape_kind = shape;
            }
        })?;
        tracing::debug!("Updated planting record {}", id);
        Ok(record)
    }

    pub fn delete_planting(&mut self, id: RecordId) -> Result<PlantingRecord, FarmError> {
        let record = self.plantings.remove(id)?;
        tracing::debug!("Deleted planting record {}", id);
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Input CRUD
    // ------------------------------------------------------------------

    pub fn create_input(&mut self, draft: InputDraft) -> Result<&InputRecord, FarmError> {
        draft.validate()?;
        let record = self.inputs.insert_with(|id| InputRecord {
            id,
            farm: draft.farm,
            input_kind: draft.kind,
            product: draft.product,
            quantity: draft.quantity,
            cost: draft.cost,
            created_at: Utc::now(),
            updated_at: None,
        });
        tracing::debug!("Created input record {}", record.id);
        Ok(record)
    }

    pub fn update_input(
        &mut self,
        id: RecordId,
        patch: InputPatch,
    ) -> Result<&InputRecord, FarmError> {
        patch.validate()?;
        let record = self.inputs.update_with(id, |record| {
            if let Some(farm) = patch.farm {
                record.farm = farm;
            }
            if let Some(kind) = patch.kind {
                record.input_kind = kind;
            }
            if let Some(product) = patch.product {
                record.product = product;
            }
            if let Some(quantity) = patch.quantity {
                record.quantity = quantity;
            }
            if let Some(cost) = patch.cost {
                record.cost = cost;
            }
        })?;
        tracing::debug!("Updated input record {}", id);
        Ok(record)
    }

    pub fn delete_input(&mut self, id: RecordId) -> Result<InputRecord, FarmError> {
        let record = self.inputs.remove(id)?;
        tracing::debug!("Deleted input record {}", id);
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Save-calculation actions
    // ------------------------------------------------------------------

    /// Turn a geometry result into a planting record with placeholder
    /// farm/crop values. The computation was validated when it was made.
    pub fn save_plot(&mut self, plot: &PlotComputation) -> &PlantingRecord {
        let record = self.plantings.insert_with(|id| PlantingRecord {
            id,
            farm: PLACEHOLDER_FARM.to_string(),
            crop: PLACEHOLDER_CROP.to_string(),
            area_hectares: plot.area_hectares,
            area_shape_kind: plot.shape,
            dimensions: Some(plot.dimensions),
            created_at: Utc::now(),
            updated_at: None,
        });
        tracing::info!(
            "Saved {} plot as planting record {}",
            plot.shape.key(),
            record.id
        );
        record
    }

    /// Turn a dosage estimate into an input record. Stores the product's
    /// display name, like the save button on the calculator screen.
    pub fn save_dosage(&mut self, estimate: &DosageEstimate) -> &InputRecord {
        let record = self.inputs.insert_with(|id| InputRecord {
            id,
            farm: PLACEHOLDER_FARM.to_string(),
            input_kind: estimate.input_kind,
            product: estimate.display_name.clone(),
            quantity: estimate.quantity,
            cost: estimate.cost,
            created_at: Utc::now(),
            updated_at: None,
        });
        tracing::info!(
            "Saved {} dosage estimate as input record {}",
            estimate.product_key,
            record.id
        );
        record
    }
}

fn seed_timestamp(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
