use serde::Serialize;
use std::cmp::Ordering;

use crate::matcher::RecommendationResult;

pub const NO_MATCHING_CROPS: &str = "No matching crops";
pub const DEFAULT_CHART_TOP_N: usize = 8;

/// Chart series: crop names and yields scaled to 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    fn placeholder() -> Self {
        Self {
            labels: vec![NO_MATCHING_CROPS.to_string()],
            values: vec![0.0],
        }
    }
}

pub fn render_chart(results: &[RecommendationResult]) -> ChartData {
    render_chart_top(results, DEFAULT_CHART_TOP_N)
}

/// Highest `top_n` yields (stable on ties), each as a percentage of the best.
/// All-zero (or non-positive) yields produce all-zero values.
pub fn render_chart_top(results: &[RecommendationResult], top_n: usize) -> ChartData {
    if results.is_empty() {
        return ChartData::placeholder();
    }

    let mut sorted: Vec<&RecommendationResult> = results.iter().collect();
    sorted.sort_by(|a, b| {
        b.expected_yield
            .partial_cmp(&a.expected_yield)
            .unwrap_or(Ordering::Equal)
    });
    sorted.truncate(top_n.max(1));

    let max = sorted
        .iter()
        .map(|r| r.expected_yield)
        .fold(f64::NEG_INFINITY, f64::max);

    let values = sorted
        .iter()
        .map(|r| {
            if max > 0.0 {
                r.expected_yield * 100.0 / max
            } else {
                0.0
            }
        })
        .collect();

    ChartData {
        labels: sorted.iter().map(|r| r.crop_name.clone()).collect(),
        values,
    }
}
