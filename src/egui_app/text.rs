#![cfg(feature = "egui")]

use egui::text::LayoutJob;
use eframe::egui::{self, Color32};

/// Case-insensitive highlighter that builds a LayoutJob for `text`,
/// highlighting every occurrence of each space-separated sub-term of `query`.
pub fn highlight_query_job(text: &str, query: &str) -> LayoutJob {
    let mut job = LayoutJob::default();
    let ranges = match_ranges(text, query);
    let mut i = 0;
    for (start, end) in ranges {
        if start > i {
            job.append(&text[i..start], 0.0, egui::TextFormat::default());
        }
        let mut fmt = egui::TextFormat::default();
        fmt.background = Color32::YELLOW.into();
        job.append(&text[start..end], 0.0, fmt);
        i = end;
    }
    if i < text.len() || text.is_empty() {
        job.append(&text[i..], 0.0, egui::TextFormat::default());
    }
    job
}

/// Byte ranges of `text` matched by the sub-terms of `query`, merged and sorted.
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let tl = text.to_lowercase();
    // Lowercasing may change byte lengths for non-ASCII text; skip highlighting then.
    if tl.len() != text.len() {
        return Vec::new();
    }
    let ql = query.to_lowercase();
    if ql.starts_with(' ') {
        return Vec::new();
    }
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in ql.split(' ').filter(|t| !t.is_empty()) {
        let mut i = 0;
        while let Some(pos) = tl[i..].find(term) {
            let start = i + pos;
            let end = start + term.len();
            ranges.push((start, end));
            i = end;
        }
    }
    ranges.sort();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
