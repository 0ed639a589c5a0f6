//! # Recommendation Matcher
//! Pure filter over the dataset: each provided criterion is an exact-equality
//! constraint; absent criteria do not constrain. Filters commute, and the
//! result keeps dataset order.

use serde::Serialize;
use tracing::debug;

use crate::dataset::{CropField, CropRecord, CropStore};
use crate::measures::split_measures;

/// Converts the dataset's per-hectare yield to per-acre.
pub const HECTARE_TO_ACRE: f64 = 2.471;
/// kg → tonnes.
pub const YIELD_UNIT_DIVISOR: f64 = 1000.0;
pub const DEFAULT_LAND_SIZE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub soil_type: Option<String>,
    pub month: Option<String>,
    pub season: Option<String>,
    pub land_type: Option<String>,
    /// Acres.
    pub land_size: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            soil_type: None,
            month: None,
            season: None,
            land_type: None,
            land_size: DEFAULT_LAND_SIZE,
        }
    }
}

impl FilterCriteria {
    fn constraints(&self) -> [(CropField, Option<&str>); 4] {
        [
            (CropField::SoilType, self.soil_type.as_deref()),
            (CropField::Month, self.month.as_deref()),
            (CropField::Season, self.season.as_deref()),
            (CropField::LandType, self.land_type.as_deref()),
        ]
    }

    pub fn matches(&self, record: &CropRecord) -> bool {
        self.constraints()
            .into_iter()
            .all(|(field, want)| want.map_or(true, |w| record.resolved(field) == w))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub crop_name: String,
    pub soil_type: String,
    pub month: String,
    pub season: String,
    pub land_type: String,
    /// Tonnes for the requested land size, 2 decimals.
    pub expected_yield: f64,
    pub drought_measures: Vec<String>,
    pub flood_measures: Vec<String>,
}

impl RecommendationResult {
    pub fn from_record(record: &CropRecord, land_size: f64) -> Self {
        Self {
            crop_name: record.display_name().to_string(),
            soil_type: record.resolved(CropField::SoilType).to_string(),
            month: record.resolved(CropField::Month).to_string(),
            season: record.resolved(CropField::Season).to_string(),
            land_type: record.resolved(CropField::LandType).to_string(),
            expected_yield: expected_yield(record.yield_per_area, land_size),
            drought_measures: split_measures(record.drought_measures.as_deref()),
            flood_measures: split_measures(record.flood_measures.as_deref()),
        }
    }
}

pub fn expected_yield(yield_per_area: f64, land_size: f64) -> f64 {
    round2(yield_per_area * land_size * HECTARE_TO_ACRE / YIELD_UNIT_DIVISOR)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn find_recommendations(
    store: &CropStore,
    criteria: &FilterCriteria,
) -> Vec<RecommendationResult> {
    debug!(
        soil = ?criteria.soil_type,
        month = ?criteria.month,
        season = ?criteria.season,
        land_type = ?criteria.land_type,
        land_size = criteria.land_size,
        "finding crops"
    );

    store
        .records()
        .iter()
        .filter(|r| criteria.matches(r))
        .map(|r| RecommendationResult::from_record(r, criteria.land_size))
        .collect()
}
