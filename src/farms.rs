//! Farm directory
//!
//! Read-only reference profiles for the demo farms, plus the directory type
//! that owns them. Profiles describe where a farm is and what it grows;
//! nothing in the core ever mutates them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Inclusive value range for agronomic targets (pH, temperature, rainfall).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Whether a farm can get by without irrigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationNeed {
    Required,
    Optional,
}

impl IrrigationNeed {
    pub fn display_text(&self) -> &'static str {
        match self {
            IrrigationNeed::Required => "Required",
            IrrigationNeed::Optional => "Optional",
        }
    }
}

/// Agronomic targets for a farm's primary crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgronomicProfile {
    /// Crop cycle description (e.g. "Perennial", "12-18 months").
    pub cycle: String,

    /// Harvest window description (e.g. "May to September").
    pub harvest_window: String,

    pub irrigation: IrrigationNeed,

    pub ideal_ph: ValueRange,

    pub ideal_temperature_c: ValueRange,

    pub annual_rainfall_mm: ValueRange,
}

/// Descriptive metadata for one farm. Reference data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
    /// Stable lookup key (e.g. "arcanjo").
    pub key: String,

    /// Full display name (e.g. "Fazenda Arcanjo Miguel").
    pub name: String,

    /// Municipality and state.
    pub location: String,

    pub primary_crop: String,

    pub latitude: f64,

    pub longitude: f64,

    pub total_area_hectares: f64,

    pub agronomy: AgronomicProfile,
}

// ============================================================================
// Built-in farm profiles
// ============================================================================

/// Fazenda Arcanjo Miguel - perennial orange grove in São Miguel Arcanjo, SP.
pub fn arcanjo() -> FarmProfile {
    FarmProfile {
        key: "arcanjo".to_string(),
        name: "Fazenda Arcanjo Miguel".to_string(),
        location: "São Miguel Arcanjo, SP".to_string(),
        primary_crop: "Orange".to_string(),
        latitude: -23.8775,
        longitude: -47.9969,
        total_area_hectares: 150.5,
        agronomy: AgronomicProfile {
            cycle: "Perennial".to_string(),
            harvest_window: "May to September".to_string(),
            irrigation: IrrigationNeed::Required,
            ideal_ph: ValueRange { min: 6.0, max: 7.0 },
            ideal_temperature_c: ValueRange {
                min: 18.0,
                max: 30.0,
            },
            annual_rainfall_mm: ValueRange {
                min: 1200.0,
                max: 1500.0,
            },
        },
    }
}

/// Fazenda Barra Grande - sugarcane operation in Itirapuã, SP.
pub fn barra() -> FarmProfile {
    FarmProfile {
        key: "barra".to_string(),
        name: "Fazenda Barra Grande".to_string(),
        location: "Itirapuã, SP".to_string(),
        primary_crop: "Sugarcane".to_string(),
        latitude: -23.7234,
        longitude: -47.8456,
        total_area_hectares: 280.3,
        agronomy: AgronomicProfile {
            cycle: "12-18 months".to_string(),
            harvest_window: "April to November".to_string(),
            irrigation: IrrigationNeed::Optional,
            ideal_ph: ValueRange { min: 5.5, max: 6.5 },
            ideal_temperature_c: ValueRange {
                min: 20.0,
                max: 35.0,
            },
            annual_rainfall_mm: ValueRange {
                min: 1000.0,
                max: 1500.0,
            },
        },
    }
}

/// The directory of known farms.
#[derive(Debug, Clone)]
pub struct FarmDirectory {
    farms: Vec<FarmProfile>,
}

impl FarmDirectory {
    /// Directory holding the two built-in demo farms.
    pub fn builtin() -> Self {
        FarmDirectory {
            farms: vec![arcanjo(), barra()],
        }
    }

    /// Load a directory from a JSON file holding an array of profiles.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read farm directory file: {:?}", path))?;

        let farms: Vec<FarmProfile> = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse farm directory JSON")?;

        tracing::info!("Loaded farm directory ({} farms)", farms.len());
        Ok(FarmDirectory { farms })
    }

    pub fn get(&self, key: &str) -> Option<&FarmProfile> {
        self.farms.iter().find(|farm| farm.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FarmProfile> {
        self.farms.iter()
    }

    pub fn len(&self) -> usize {
        self.farms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.farms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directory() {
        let directory = FarmDirectory::builtin();
        assert_eq!(directory.len(), 2);

        let arcanjo = directory.get("arcanjo").unwrap();
        assert_eq!(arcanjo.name, "Fazenda Arcanjo Miguel");
        assert_eq!(arcanjo.primary_crop, "Orange");
        assert_eq!(arcanjo.agronomy.irrigation, IrrigationNeed::Required);

        let barra = directory.get("barra").unwrap();
        assert_eq!(barra.total_area_hectares, 280.3);
        assert_eq!(barra.agronomy.irrigation, IrrigationNeed::Optional);

        assert!(directory.get("mystery").is_none());
    }

    #[test]
    fn test_value_range_contains() {
        let ph = arcanjo().agronomy.ideal_ph;
        assert!(ph.contains(6.5));
        assert!(ph.contains(6.0));
        assert!(ph.contains(7.0));
        assert!(!ph.contains(7.1));
    }

    #[test]
    fn test_profiles_round_trip_through_json() {
        let directory = FarmDirectory::builtin();
        let json = serde_json::to_string(&directory.farms).unwrap();
        let parsed: Vec<FarmProfile> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, directory.farms);
    }
}
