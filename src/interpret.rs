//! Query Interpreter: keyword matching over the chat message.
//!
//! Structured filters win over anything derived from the text, except land
//! size: a size written in the message beats the form's value. Climate
//! questions ignore season and month.

use serde::{Deserialize, Deserializer};

use crate::config::AppConfig;
use crate::matcher::FilterCriteria;
use crate::remedies::ClimateCondition;

const CLIMATE_KEYWORDS: [&str; 4] = ["climate", "remedy", "drought", "flood"];

/// Dropdown values sent along with a chat message. Blank strings mean "any".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StructuredFilters {
    #[serde(deserialize_with = "blank_as_none")]
    pub soil: Option<String>,
    #[serde(deserialize_with = "selection")]
    pub land_type: Selection,
    #[serde(deserialize_with = "blank_as_none")]
    pub season: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub month: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub climate_condition: Option<String>,
    #[serde(deserialize_with = "lenient_land_size")]
    pub land_size: Option<f64>,
}

/// A dropdown value where "not sent" and "sent blank" differ: the first
/// takes the configured default, the second means no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Missing,
    Any,
    Value(String),
}

impl Selection {
    pub fn from_raw(raw: Option<Option<String>>) -> Self {
        match raw {
            None => Selection::Missing,
            Some(v) => match v.map(|s| s.trim().to_string()) {
                Some(s) if !s.is_empty() => Selection::Value(s),
                _ => Selection::Any,
            },
        }
    }

    pub fn resolve(&self, default: &str) -> Option<String> {
        match self {
            Selection::Missing => Some(default.to_string()),
            Selection::Any => None,
            Selection::Value(v) => Some(v.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpretDefaults {
    pub land_type: String,
    pub land_size: f64,
}

impl Default for InterpretDefaults {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for InterpretDefaults {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            land_type: cfg.default_land_type.clone(),
            land_size: cfg.default_land_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Recommend,
    Climate(ClimateCondition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub criteria: FilterCriteria,
    pub intent: Intent,
}

pub fn interpret(
    text: &str,
    filters: &StructuredFilters,
    defaults: &InterpretDefaults,
) -> Interpretation {
    let lower = text.to_lowercase();

    let land_size = extract_land_size(&lower)
        .or_else(|| filters.land_size.filter(|v| valid_land_size(*v)))
        .unwrap_or(defaults.land_size);

    let intent = if CLIMATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        let from_text = if lower.contains("flood") {
            ClimateCondition::Flood
        } else {
            ClimateCondition::Drought
        };
        let condition = filters
            .climate_condition
            .as_deref()
            .and_then(ClimateCondition::parse)
            .unwrap_or(from_text);
        Intent::Climate(condition)
    } else {
        Intent::Recommend
    };

    let (month, season) = match intent {
        Intent::Climate(_) => (None, None),
        Intent::Recommend => (
            filters.month.clone(),
            filters.season.clone().or_else(|| extract_season(&lower)),
        ),
    };

    let criteria = FilterCriteria {
        soil_type: filters.soil.clone(),
        month,
        season,
        land_type: filters.land_type.resolve(&defaults.land_type),
        land_size,
    };

    Interpretation { criteria, intent }
}

/// Number right before "acre"/"acres"; the last parsable mention wins.
pub fn extract_land_size(lower: &str) -> Option<f64> {
    let words: Vec<&str> = lower.split_whitespace().collect();
    words
        .windows(2)
        .filter(|pair| matches!(pair[1], "acre" | "acres"))
        .filter_map(|pair| pair[0].parse::<f64>().ok())
        .filter(|v| valid_land_size(*v))
        .last()
}

pub fn extract_season(lower: &str) -> Option<String> {
    let season = if lower.contains("summer") {
        "Summer"
    } else if lower.contains("winter") {
        "Winter"
    } else if lower.contains("rainy") || lower.contains("monsoon") {
        "Rainy"
    } else {
        return None;
    };
    Some(season.to_string())
}

fn valid_land_size(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<String> = Option::deserialize(deserializer)?;
    Ok(v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn selection<'de, D>(deserializer: D) -> Result<Selection, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<String> = Option::deserialize(deserializer)?;
    Ok(Selection::from_raw(Some(v)))
}

/// Accepts a number, a numeric string, blank or null. Anything else is "absent".
fn lenient_land_size<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
