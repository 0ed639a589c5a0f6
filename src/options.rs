//! Option Catalog: distinct values per categorical field for the UI dropdowns.
//!
//! Months sort by the Tamil calendar cycle; everything else sorts
//! lexicographically.

use std::collections::BTreeSet;

use crate::dataset::{CropField, CropStore};
use crate::error::{CropError, Result};

/// Canonical month cycle, Chithirai (mid April) first.
pub const MONTH_ORDER: [&str; 12] = [
    "Chithirai",
    "Vaikasi",
    "Aani",
    "Aadi",
    "Aavani",
    "Purattasi",
    "Aippasi",
    "Karthigai",
    "Margazhi",
    "Thai",
    "Maasi",
    "Panguni",
];

/// Position in [`MONTH_ORDER`] of the name before any "(...)" suffix.
pub fn month_rank(value: &str) -> Option<usize> {
    let name = value.split('(').next().unwrap_or_default().trim();
    MONTH_ORDER.iter().position(|m| *m == name)
}

/// Resolve the `type` query string and list its options.
pub fn list_options_by_key(store: &CropStore, key: &str) -> Result<Vec<String>> {
    let field =
        CropField::from_key(key).ok_or_else(|| CropError::UnrecognizedOption(key.to_string()))?;
    Ok(list_options(store, field))
}

pub fn list_options(store: &CropStore, field: CropField) -> Vec<String> {
    match field {
        CropField::Month => sort_months(store.records().iter().map(|r| r.resolved(field))),
        _ => store
            .records()
            .iter()
            .map(|r| r.resolved(field).to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}

/// Dedup in first-seen order, then stable-sort by calendar rank.
/// Unrecognized names go last and keep their first-seen order.
fn sort_months<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out: Vec<String> = values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect();
    out.sort_by_key(|m| month_rank(m).unwrap_or(usize::MAX));
    out
}
