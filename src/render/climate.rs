//! Climate-remedy replies.
//!
//! Drought/flood advice comes from the matched crops' own measures, or from a
//! sample at the head of the dataset when nothing matched. The static
//! catalog covers the remaining conditions and any case where the dataset has
//! nothing to say.

use crate::config::AppConfig;
use crate::dataset::{CropRecord, CropStore};
use crate::matcher::RecommendationResult;
use crate::measures::dedup_measures;
use crate::remedies::ClimateCondition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateLimits {
    /// Records scanned at the head of the dataset for general advice.
    pub sample_limit: usize,
    pub max_general: usize,
    pub max_specific: usize,
}

impl Default for ClimateLimits {
    fn default() -> Self {
        Self {
            sample_limit: 20,
            max_general: 5,
            max_specific: 7,
        }
    }
}

impl From<&AppConfig> for ClimateLimits {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            sample_limit: cfg.climate_sample_limit,
            max_general: cfg.climate_max_general,
            max_specific: cfg.climate_max_specific,
        }
    }
}

pub fn render_climate(
    condition: ClimateCondition,
    results: &[RecommendationResult],
    store: &CropStore,
    limits: ClimateLimits,
) -> String {
    if condition.has_dataset_measures() {
        let (header, measures) = if results.is_empty() {
            (
                format!(
                    "Here are general remedial measures for {} conditions:",
                    condition.label()
                ),
                sample_dataset_measures(condition, store, limits),
            )
        } else {
            (
                format!("Remedial measures for {} conditions:", condition.label()),
                measures_from_results(condition, results, limits.max_specific),
            )
        };
        if !measures.is_empty() {
            return numbered(header, &measures);
        }
    }
    render_catalog(condition)
}

fn measures_from_results(
    condition: ClimateCondition,
    results: &[RecommendationResult],
    limit: usize,
) -> Vec<String> {
    let all = results.iter().flat_map(|r| match condition {
        ClimateCondition::Flood => r.flood_measures.iter(),
        _ => r.drought_measures.iter(),
    });
    dedup_measures(all, limit)
}

/// Distinct raw measure texts from the first `sample_limit` records.
fn sample_dataset_measures(
    condition: ClimateCondition,
    store: &CropStore,
    limits: ClimateLimits,
) -> Vec<String> {
    let raw = |r: &CropRecord| match condition {
        ClimateCondition::Flood => r.flood_measures.clone(),
        _ => r.drought_measures.clone(),
    };

    let mut out: Vec<String> = Vec::new();
    for record in store.records().iter().take(limits.sample_limit) {
        if out.len() >= limits.max_general {
            break;
        }
        if let Some(text) = raw(record) {
            let text = text.trim().to_string();
            if !text.is_empty() && !out.contains(&text) {
                out.push(text);
            }
        }
    }
    out
}

fn render_catalog(condition: ClimateCondition) -> String {
    let mut lines = vec![
        format!("Remedial measures for {}:", condition.title()),
        String::new(),
    ];
    lines.extend(condition.catalog_remedies().iter().map(|r| format!("• {r}")));
    lines.join("\n")
}

fn numbered(header: String, items: &[String]) -> String {
    let mut lines = vec![header, String::new()];
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{}. {item}", i + 1));
        lines.push(String::new());
    }
    lines.join("\n")
}
