//! Input dosage calculator
//!
//! Turns an (input kind, product, intensity) selection plus a planted area
//! into required quantity, total cost, and - for products applied in several
//! passes - a per-application split. Pure computation against the catalog.

use serde::Serialize;

use crate::catalog::ProductCatalog;
use crate::error::FarmError;
use crate::types::{InputKind, Intensity};

/// How a repeatedly-applied product's quantity splits across passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPlan {
    /// Number of applications for the chosen intensity.
    pub count: u32,

    /// Quantity per application, in the product's unit.
    pub per_application: f64,
}

/// Result of one dosage calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DosageEstimate {
    pub input_kind: InputKind,

    pub product_key: String,

    pub display_name: String,

    /// Unit of `quantity` and `per_application` (e.g. "kg/ha" dosages yield
    /// kg quantities).
    pub unit: String,

    pub intensity: Intensity,

    pub area_hectares: f64,

    pub dosage_per_hectare: f64,

    /// Total quantity: dosage per hectare times area.
    pub quantity: f64,

    pub unit_price: f64,

    /// Total cost: quantity times unit price.
    pub cost: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub applications: Option<ApplicationPlan>,
}

/// Estimate quantity and cost for one product over one planted area.
///
/// The (kind, product) pair must exist in the catalog; a miss is a
/// `Configuration` failure because menus are built from the same catalog and
/// can only submit enumerated keys.
pub fn compute_dosage(
    catalog: &ProductCatalog,
    kind: InputKind,
    product_key: &str,
    area_hectares: f64,
    intensity: Intensity,
) -> Result<DosageEstimate, FarmError> {
    if !(area_hectares.is_finite() && area_hectares > 0.0) {
        return Err(FarmError::invalid(
            "area",
            "a positive area in hectares is required",
        ));
    }

    let spec = catalog.resolve(kind, product_key)?;

    let dosage_per_hectare = spec.dosage_per_hectare.value_for(intensity);
    let quantity = dosage_per_hectare * area_hectares;
    let cost = quantity * spec.unit_price;

    // Application counts are validated positive when the catalog is built.
    let applications = spec.applications.map(|band| {
        let count = band.count_for(intensity);
        ApplicationPlan {
            count,
            per_application: quantity / f64::from(count),
        }
    });

    Ok(DosageEstimate {
        input_kind: kind,
        product_key: spec.key.clone(),
        display_name: spec.display_name.clone(),
        unit: spec.unit.clone(),
        intensity,
        area_hectares,
        dosage_per_hectare,
        quantity,
        unit_price: spec.unit_price,
        cost,
        applications,
    })
}
