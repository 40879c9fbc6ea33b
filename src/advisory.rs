//! Weather advisory
//!
//! Turns a weather reading into field-work advice along three axes:
//! temperature, humidity, and wind. Thresholds follow common agronomic
//! rules of thumb for Brazilian row crops.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One city's current conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub wind_kmh: f64,
    pub condition: String,
}

/// Temperature advice band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureAdvice {
    /// Below 15 °C.
    ColdRisk,
    /// 15 °C to 35 °C inclusive.
    Adequate,
    /// Above 35 °C.
    HeatStress,
}

impl TemperatureAdvice {
    pub fn from_temperature(celsius: f64) -> Self {
        if celsius < 15.0 {
            TemperatureAdvice::ColdRisk
        } else if celsius > 35.0 {
            TemperatureAdvice::HeatStress
        } else {
            TemperatureAdvice::Adequate
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            TemperatureAdvice::ColdRisk => "Low temperature - risk for cold-sensitive crops",
            TemperatureAdvice::Adequate => "Temperature adequate for most crops",
            TemperatureAdvice::HeatStress => "High temperature - additional irrigation needed",
        }
    }
}

/// Humidity advice band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityAdvice {
    /// Below 40%.
    Dry,
    /// 40% to 80% inclusive.
    Adequate,
    /// Above 80%.
    FungalRisk,
}

impl HumidityAdvice {
    pub fn from_humidity(percent: f64) -> Self {
        if percent < 40.0 {
            HumidityAdvice::Dry
        } else if percent > 80.0 {
            HumidityAdvice::FungalRisk
        } else {
            HumidityAdvice::Adequate
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            HumidityAdvice::Dry => "Low humidity - consider irrigation",
            HumidityAdvice::Adequate => "Humidity adequate",
            HumidityAdvice::FungalRisk => "High humidity - watch for fungi and pests",
        }
    }
}

/// Wind advice band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindAdvice {
    /// Up to 25 km/h inclusive.
    Adequate,
    /// Above 25 km/h.
    Strong,
}

impl WindAdvice {
    pub fn from_wind_speed(kmh: f64) -> Self {
        if kmh > 25.0 {
            WindAdvice::Strong
        } else {
            WindAdvice::Adequate
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            WindAdvice::Adequate => "Wind adequate for field operations",
            WindAdvice::Strong => "Strong wind - hold off on spraying",
        }
    }
}

/// Combined advice for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAdvisory {
    pub temperature: TemperatureAdvice,
    pub humidity: HumidityAdvice,
    pub wind: WindAdvice,
}

impl WeatherAdvisory {
    pub fn assess(reading: &WeatherReading) -> Self {
        WeatherAdvisory {
            temperature: TemperatureAdvice::from_temperature(reading.temperature_c),
            humidity: HumidityAdvice::from_humidity(reading.humidity_pct),
            wind: WindAdvice::from_wind_speed(reading.wind_kmh),
        }
    }
}

/// Demo readings for five Brazilian state capitals.
pub fn sample_readings() -> Vec<WeatherReading> {
    vec![
        WeatherReading {
            city: "São Paulo".to_string(),
            temperature_c: 23.5,
            humidity_pct: 65.0,
            pressure_hpa: 1013.2,
            wind_kmh: 12.3,
            condition: "Partly cloudy".to_string(),
        },
        WeatherReading {
            city: "Rio de Janeiro".to_string(),
            temperature_c: 28.2,
            humidity_pct: 72.0,
            pressure_hpa: 1015.8,
            wind_kmh: 8.7,
            condition: "Sunny".to_string(),
        },
        WeatherReading {
            city: "Brasília".to_string(),
            temperature_c: 25.1,
            humidity_pct: 45.0,
            pressure_hpa: 1012.5,
            wind_kmh: 15.2,
            condition: "Clear sky".to_string(),
        },
        WeatherReading {
            city: "Salvador".to_string(),
            temperature_c: 29.8,
            humidity_pct: 78.0,
            pressure_hpa: 1016.3,
            wind_kmh: 18.5,
            condition: "Partly cloudy".to_string(),
        },
        WeatherReading {
            city: "Belo Horizonte".to_string(),
            temperature_c: 22.7,
            humidity_pct: 58.0,
            pressure_hpa: 1014.1,
            wind_kmh: 9.8,
            condition: "Overcast".to_string(),
        },
    ]
}

/// Load readings from a JSON file (an array of reading objects).
pub fn load_readings(path: &Path) -> Result<Vec<WeatherReading>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read weather readings file: {:?}", path))?;
    let readings: Vec<WeatherReading> = serde_json::from_str(&content)
        .with_context(|| "Failed to parse weather readings JSON")?;
    if readings.is_empty() {
        anyhow::bail!("Weather readings file {:?} contains no readings", path);
    }
    tracing::info!("Loaded {} weather readings", readings.len());
    Ok(readings)
}
