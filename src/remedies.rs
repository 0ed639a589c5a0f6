use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Built-in remedies per climate condition, keyed by [`ClimateCondition::title`].
static CATALOG: Lazy<HashMap<String, Vec<String>>> = Lazy::new(|| {
    let raw = include_str!("../data/climate_remedies.json");
    serde_json::from_str::<HashMap<String, Vec<String>>>(raw).expect("valid climate remedy catalog")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateCondition {
    Drought,
    Flood,
    ExtremeHeat,
    Frost,
    ErraticRainfall,
}

impl ClimateCondition {
    pub const ALL: [ClimateCondition; 5] = [
        ClimateCondition::Drought,
        ClimateCondition::Flood,
        ClimateCondition::ExtremeHeat,
        ClimateCondition::Frost,
        ClimateCondition::ErraticRainfall,
    ];

    /// Case-insensitive keyword match ("Flooding" → Flood, "heat wave" → ExtremeHeat).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        if s.contains("drought") {
            Some(Self::Drought)
        } else if s.contains("flood") {
            Some(Self::Flood)
        } else if s.contains("heat") {
            Some(Self::ExtremeHeat)
        } else if s.contains("frost") {
            Some(Self::Frost)
        } else if s.contains("erratic") || s.contains("rainfall") {
            Some(Self::ErraticRainfall)
        } else {
            None
        }
    }

    /// Lower-case name used inside sentences.
    pub fn label(self) -> &'static str {
        match self {
            Self::Drought => "drought",
            Self::Flood => "flood",
            Self::ExtremeHeat => "extreme heat",
            Self::Frost => "frost",
            Self::ErraticRainfall => "erratic rainfall",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Drought => "Drought",
            Self::Flood => "Flood",
            Self::ExtremeHeat => "Extreme Heat",
            Self::Frost => "Frost",
            Self::ErraticRainfall => "Erratic Rainfall",
        }
    }

    /// Whether the dataset carries per-crop measures for this condition.
    pub fn has_dataset_measures(self) -> bool {
        matches!(self, Self::Drought | Self::Flood)
    }

    pub fn catalog_remedies(self) -> &'static [String] {
        CATALOG
            .get(self.title())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
