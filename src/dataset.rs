//! # Dataset Store
//!
//! Crop records loaded once from a bundled JSON file at startup and shared
//! read-only by every request (`Arc<CropStore>` in the app state).
//!
//! - Every field is optional per record; absence stays `None` here and is
//!   resolved to "Unknown" where results are built.
//! - `YIELD` accepts a number or a numeric string; anything else counts as 0.
//! - A missing or malformed file is logged and yields an empty store, so every
//!   query degrades to "no results" instead of failing.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::error::{CropError, Result};

/// One row of the dataset. Identity is positional; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CropRecord {
    #[serde(rename = "CROP NAME", default)]
    pub crop_name: Option<String>,
    #[serde(rename = "SOIL TYPE", default)]
    pub soil_type: Option<String>,
    #[serde(rename = "MONTH", default)]
    pub month: Option<String>,
    #[serde(rename = "SEASON", default)]
    pub season: Option<String>,
    #[serde(rename = "LAND TYPE", default)]
    pub land_type: Option<String>,
    #[serde(rename = "YIELD", default, deserialize_with = "deserialize_yield")]
    pub yield_per_area: f64,
    #[serde(rename = "REMEDIAL MEASURES - DROUGHT", default)]
    pub drought_measures: Option<String>,
    #[serde(rename = "REMEDIAL MEASURE - FLOOD", default)]
    pub flood_measures: Option<String>,
}

/// Filterable categorical columns, named by their dataset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropField {
    SoilType,
    Month,
    Season,
    LandType,
}

impl CropField {
    pub const ALL: [CropField; 4] = [
        CropField::SoilType,
        CropField::Month,
        CropField::Season,
        CropField::LandType,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CropField::SoilType => "SOIL TYPE",
            CropField::Month => "MONTH",
            CropField::Season => "SEASON",
            CropField::LandType => "LAND TYPE",
        }
    }

    /// Exact, case-sensitive match on the dataset key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Stand-in for an absent categorical value.
pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_CROP: &str = "Unknown Crop";

impl CropRecord {
    pub fn field(&self, field: CropField) -> Option<&str> {
        match field {
            CropField::SoilType => self.soil_type.as_deref(),
            CropField::Month => self.month.as_deref(),
            CropField::Season => self.season.as_deref(),
            CropField::LandType => self.land_type.as_deref(),
        }
    }

    /// Field value with absent/blank resolved to [`UNKNOWN`].
    pub fn resolved(&self, field: CropField) -> &str {
        resolve(self.field(field), UNKNOWN)
    }

    pub fn display_name(&self) -> &str {
        resolve(self.crop_name.as_deref(), UNKNOWN_CROP)
    }
}

fn resolve<'a>(value: Option<&'a str>, fallback: &'static str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

/// Accepts `12`, `12.5`, `"12.5"`, `null`. Unparsable strings become 0.
fn deserialize_yield<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YieldValue {
        Number(f64),
        Text(String),
        Missing,
    }

    Ok(match YieldValue::deserialize(deserializer)? {
        YieldValue::Number(n) if n.is_finite() => n,
        YieldValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    })
}

#[derive(Debug, Clone, Default)]
pub struct CropStore {
    records: Vec<CropRecord>,
}

impl CropStore {
    pub fn from_records(records: Vec<CropRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset, logging and swallowing DataUnavailable.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(store) => {
                info!(path = %path.display(), records = store.len(), "crop dataset loaded");
                store
            }
            Err(e) => {
                error!(error = %e, "error loading crop data; serving empty dataset");
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        let unavailable = |reason: String| CropError::DataUnavailable {
            path: path.display().to_string(),
            reason,
        };
        let raw = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        Self::from_json(&raw).map_err(|e| unavailable(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let records: Vec<CropRecord> = serde_json::from_str(raw)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[CropRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
