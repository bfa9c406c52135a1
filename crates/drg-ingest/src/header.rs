//! Header and cell text normalization.

use std::collections::BTreeMap;

/// Normalizes a header: strips BOM, trims, collapses internal whitespace and
/// folds full-width parentheses to ASCII.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
        .chars()
        .map(|ch| match ch {
            '（' => '(',
            '）' => ')',
            other => other,
        })
        .collect()
}

/// Trims a cell, mapping blank text to `None`.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Makes header names unique and non-empty.
///
/// Blank headers become `Unnamed: <index>`; repeats get a `.1`, `.2`, ...
/// suffix in order of appearance.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                header
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base.clone()
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}
