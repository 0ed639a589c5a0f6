use crate::config::AppConfig;
use crate::matcher::RecommendationResult;
use crate::render::fmt_num;

pub const NO_MATCHES_MESSAGE: &str = "I couldn't find any crop recommendations matching your criteria. Please try with different parameters.";

const DIVIDER_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLimits {
    pub max_results: usize,
    pub max_measures: usize,
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self {
            max_results: 5,
            max_measures: 3,
        }
    }
}

impl From<&AppConfig> for ChatLimits {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            max_results: cfg.chat_max_results,
            max_measures: cfg.chat_max_measures,
        }
    }
}

pub fn render_chat(results: &[RecommendationResult], land_size: f64) -> String {
    render_chat_with(results, land_size, ChatLimits::default())
}

/// `_land_size` is already folded into each result's expected yield.
pub fn render_chat_with(
    results: &[RecommendationResult],
    _land_size: f64,
    limits: ChatLimits,
) -> String {
    if results.is_empty() {
        return NO_MATCHES_MESSAGE.to_string();
    }

    let mut lines: Vec<String> = vec![
        format!(
            "Based on your criteria, here are {} crop recommendations:",
            results.len()
        ),
        String::new(),
    ];

    for rec in results.iter().take(limits.max_results) {
        lines.push(format!("🌾 **{}**", rec.crop_name));
        lines.push(format!("   - Soil: {}", rec.soil_type));
        lines.push(format!("   - Planting Month: {}", rec.month));
        lines.push(format!("   - Season: {}", rec.season));
        lines.push(format!("   - Land Type: {}", rec.land_type));
        lines.push(format!(
            "   - Expected Yield: {} tons/year",
            fmt_num(rec.expected_yield)
        ));
        lines.push(String::new());

        lines.push("🏜️ **Drought Measures**:".to_string());
        push_bullets(&mut lines, &rec.drought_measures, limits.max_measures);
        lines.push(String::new());

        lines.push("🌊 **Flood Measures**:".to_string());
        push_bullets(&mut lines, &rec.flood_measures, limits.max_measures);
        lines.push(String::new());

        lines.push("-".repeat(DIVIDER_WIDTH));
        lines.push(String::new());
    }

    let hidden = results.len().saturating_sub(limits.max_results);
    if hidden > 0 {
        lines.push(String::new());
        lines.push(format!(
            "There are {hidden} more recommendations matching your criteria."
        ));
    }

    lines.join("\n")
}

fn push_bullets(lines: &mut Vec<String>, items: &[String], max: usize) {
    lines.extend(items.iter().take(max).map(|m| format!("   - {m}")));
}
