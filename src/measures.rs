//! Measure Formatter: turns free-text remedial measures into itemized points.
//!
//! Splitting is purely textual: every '.' closes a point, so abbreviations
//! such as "e.g." are split too.

pub const NOT_AVAILABLE: &str = "Information not available";

pub fn split_measures(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return vec![NOT_AVAILABLE.to_string()];
    };

    let mut parts = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if ch == '.' {
            let clause = current.trim();
            if !clause.is_empty() {
                parts.push(clause.to_string());
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }

    if parts.is_empty() {
        parts.push(NOT_AVAILABLE.to_string());
    }
    parts
}

/// First-seen order, placeholder dropped, at most `limit` items.
pub fn dedup_measures<'a, I>(measures: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: Vec<String> = Vec::new();
    for m in measures {
        if out.len() >= limit {
            break;
        }
        if m != NOT_AVAILABLE && !out.contains(m) {
            out.push(m.clone());
        }
    }
    out
}
