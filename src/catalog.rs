//! Dosage product catalog
//!
//! Static lookup table mapping (input kind, product key) to per-hectare
//! dosage bands, unit prices, and optional application schedules. The
//! built-in catalog covers the six demo products; deployments can swap it
//! for a JSON file with the same entry layout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::FarmError;
use crate::types::{InputKind, Intensity};

/// Per-hectare dosage values for the three intensity bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosageBand {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl DosageBand {
    pub fn value_for(&self, intensity: Intensity) -> f64 {
        match intensity {
            Intensity::Low => self.low,
            Intensity::Mid => self.mid,
            Intensity::High => self.high,
        }
    }

    fn is_valid(&self) -> bool {
        [self.low, self.mid, self.high]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Application counts per intensity band. Only pesticide entries carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationBand {
    pub low: u32,
    pub mid: u32,
    pub high: u32,
}

impl ApplicationBand {
    pub fn count_for(&self, intensity: Intensity) -> u32 {
        match intensity {
            Intensity::Low => self.low,
            Intensity::Mid => self.mid,
            Intensity::High => self.high,
        }
    }

    fn is_valid(&self) -> bool {
        self.low > 0 && self.mid > 0 && self.high > 0
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub kind: InputKind,

    /// Stable lookup key (e.g. "limestone").
    pub key: String,

    /// Human-readable name (e.g. "Limestone").
    pub display_name: String,

    /// Unit of the dosage values (e.g. "t/ha", "kg/ha", "L/ha").
    pub unit: String,

    pub dosage_per_hectare: DosageBand,

    /// How many applications the quantity is split across, when the product
    /// is applied repeatedly rather than all at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<ApplicationBand>,

    /// Price per dosage unit.
    pub unit_price: f64,
}

impl ProductSpec {
    /// Reject entries that would make dosage math meaningless. An
    /// application count of zero would divide by zero downstream.
    fn validate(&self) -> Result<(), FarmError> {
        if self.key.is_empty() || self.display_name.is_empty() || self.unit.is_empty() {
            return Err(FarmError::configuration(format!(
                "{} entry '{}' has an empty key, name, or unit",
                self.kind.key(),
                self.key
            )));
        }
        if !self.dosage_per_hectare.is_valid() {
            return Err(FarmError::configuration(format!(
                "product '{}' has a non-positive dosage band",
                self.key
            )));
        }
        if !(self.unit_price.is_finite() && self.unit_price > 0.0) {
            return Err(FarmError::configuration(format!(
                "product '{}' has a non-positive unit price",
                self.key
            )));
        }
        if let Some(apps) = &self.applications {
            if !apps.is_valid() {
                return Err(FarmError::configuration(format!(
                    "product '{}' has an application count of zero",
                    self.key
                )));
            }
        }
        Ok(())
    }
}

/// The full dosage catalog, keyed by input kind then product key.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: FxHashMap<InputKind, FxHashMap<String, ProductSpec>>,
}

impl ProductCatalog {
    /// The six built-in demo products.
    pub fn builtin() -> Self {
        let mut catalog = ProductCatalog {
            products: FxHashMap::default(),
        };
        for spec in builtin_entries() {
            catalog
                .products
                .entry(spec.kind)
                .or_default()
                .insert(spec.key.clone(), spec);
        }
        catalog
    }

    /// Build a catalog from externally supplied entries, validating each one
    /// and rejecting duplicate (kind, key) pairs.
    pub fn from_entries(entries: Vec<ProductSpec>) -> Result<Self, FarmError> {
        let mut products: FxHashMap<InputKind, FxHashMap<String, ProductSpec>> =
            FxHashMap::default();
        for spec in entries {
            spec.validate()?;
            let kind = spec.kind;
            let by_key = products.entry(kind).or_default();
            if by_key.contains_key(&spec.key) {
                return Err(FarmError::configuration(format!(
                    "duplicate {} product '{}'",
                    kind.key(),
                    spec.key
                )));
            }
            by_key.insert(spec.key.clone(), spec);
        }
        Ok(ProductCatalog { products })
    }

    /// Load a catalog from a JSON file holding an array of entries.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let entries: Vec<ProductSpec> =
            serde_json::from_str(&contents).with_context(|| "Failed to parse catalog JSON")?;

        let catalog = Self::from_entries(entries)?;
        tracing::info!("Loaded dosage catalog ({} products)", catalog.len());
        Ok(catalog)
    }

    /// Look up one product. Unknown pairs are a data-integrity defect, not a
    /// user mistake, so they fail rather than fall back to a default entry.
    pub fn resolve(&self, kind: InputKind, product_key: &str) -> Result<&ProductSpec, FarmError> {
        self.products
            .get(&kind)
            .and_then(|by_key| by_key.get(product_key))
            .ok_or_else(|| {
                FarmError::configuration(format!(
                    "no {} product '{}' in the dosage catalog",
                    kind.key(),
                    product_key
                ))
            })
    }

    /// All products of one kind, sorted by key for stable menus.
    pub fn products_for(&self, kind: InputKind) -> Vec<&ProductSpec> {
        let mut specs: Vec<&ProductSpec> = self
            .products
            .get(&kind)
            .map(|by_key| by_key.values().collect())
            .unwrap_or_default();
        specs.sort_by(|a, b| a.key.cmp(&b.key));
        specs
    }

    pub fn len(&self) -> usize {
        self.products.values().map(|by_key| by_key.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Built-in catalog data
// ============================================================================

fn builtin_entries() -> Vec<ProductSpec> {
    vec![
        ProductSpec {
            kind: InputKind::Corrective,
            key: "limestone".to_string(),
            display_name: "Limestone".to_string(),
            unit: "t/ha".to_string(),
            dosage_per_hectare: DosageBand {
                low: 1.5,
                mid: 2.0,
                high: 3.0,
            },
            applications: None,
            unit_price: 120.0,
        },
        ProductSpec {
            kind: InputKind::Corrective,
            key: "gypsum".to_string(),
            display_name: "Agricultural Gypsum".to_string(),
            unit: "t/ha".to_string(),
            dosage_per_hectare: DosageBand {
                low: 1.0,
                mid: 1.5,
                high: 2.0,
            },
            applications: None,
            unit_price: 180.0,
        },
        ProductSpec {
            kind: InputKind::Fertilizer,
            key: "phosphorus".to_string(),
            display_name: "Phosphorus (P2O5)".to_string(),
            unit: "kg/ha".to_string(),
            dosage_per_hectare: DosageBand {
                low: 80.0,
                mid: 115.0,
                high: 150.0,
            },
            applications: None,
            unit_price: 4.50,
        },
        ProductSpec {
            kind: InputKind::Fertilizer,
            key: "potassium".to_string(),
            display_name: "Potassium (K2O)".to_string(),
            unit: "kg/ha".to_string(),
            dosage_per_hectare: DosageBand {
                low: 150.0,
                mid: 200.0,
                high: 250.0,
            },
            applications: None,
            unit_price: 3.20,
        },
        ProductSpec {
            kind: InputKind::Pesticide,
            key: "insecticide".to_string(),
            display_name: "Insecticide".to_string(),
            unit: "L/ha".to_string(),
            dosage_per_hectare: DosageBand {
                low: 1.5,
                mid: 2.0,
                high: 2.5,
            },
            applications: Some(ApplicationBand {
                low: 4,
                mid: 6,
                high: 8,
            }),
            unit_price: 85.0,
        },
        ProductSpec {
            kind: InputKind::Pesticide,
            key: "fungicide".to_string(),
            display_name: "Fungicide".to_string(),
            unit: "L/ha".to_string(),
            dosage_per_hectare: DosageBand {
                low: 1.0,
                mid: 1.5,
                high: 2.0,
            },
            applications: Some(ApplicationBand {
                low: 3,
                mid: 5,
                high: 7,
            }),
            unit_price: 95.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_six_products() {
        let catalog = ProductCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        for kind in InputKind::ALL {
            assert_eq!(catalog.products_for(kind).len(), 2);
        }
    }

    #[test]
    fn test_resolve_known_product() {
        let catalog = ProductCatalog::builtin();
        let limestone = catalog.resolve(InputKind::Corrective, "limestone").unwrap();
        assert_eq!(limestone.display_name, "Limestone");
        assert_eq!(limestone.dosage_per_hectare.value_for(Intensity::Mid), 2.0);
        assert_eq!(limestone.unit_price, 120.0);
        assert!(limestone.applications.is_none());
    }

    #[test]
    fn test_resolve_unknown_product_is_a_configuration_error() {
        let catalog = ProductCatalog::builtin();
        let err = catalog
            .resolve(InputKind::Corrective, "dolomite")
            .unwrap_err();
        assert!(matches!(err, FarmError::Configuration { .. }));

        // Wrong kind for a real key fails the same way.
        let err = catalog
            .resolve(InputKind::Fertilizer, "limestone")
            .unwrap_err();
        assert!(matches!(err, FarmError::Configuration { .. }));
    }

    #[test]
    fn test_pesticides_carry_application_bands() {
        let catalog = ProductCatalog::builtin();
        let insecticide = catalog
            .resolve(InputKind::Pesticide, "insecticide")
            .unwrap();
        let apps = insecticide.applications.unwrap();
        assert_eq!(apps.count_for(Intensity::Low), 4);
        assert_eq!(apps.count_for(Intensity::Mid), 6);
        assert_eq!(apps.count_for(Intensity::High), 8);
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let mut entries = builtin_entries();
        entries.push(entries[0].clone());
        let err = ProductCatalog::from_entries(entries).unwrap_err();
        assert!(matches!(err, FarmError::Configuration { .. }));
    }

    #[test]
    fn test_from_entries_rejects_zero_application_count() {
        let mut entries = builtin_entries();
        entries[4].applications = Some(ApplicationBand {
            low: 0,
            mid: 6,
            high: 8,
        });
        let err = ProductCatalog::from_entries(entries).unwrap_err();
        assert!(matches!(err, FarmError::Configuration { .. }));
    }

    #[test]
    fn test_from_entries_rejects_non_positive_price() {
        let mut entries = builtin_entries();
        entries[0].unit_price = 0.0;
        assert!(ProductCatalog::from_entries(entries).is_err());
    }

    #[test]
    fn test_entries_parse_from_json() {
        let json = r#"[
            {
                "kind": "corrective",
                "key": "limestone",
                "display_name": "Limestone",
                "unit": "t/ha",
                "dosage_per_hectare": { "low": 1.5, "mid": 2.0, "high": 3.0 },
                "unit_price": 120.0
            }
        ]"#;
        let entries: Vec<ProductSpec> = serde_json::from_str(json).unwrap();
        let catalog = ProductCatalog::from_entries(entries).unwrap();
        assert!(catalog.resolve(InputKind::Corrective, "limestone").is_ok());
    }
}
