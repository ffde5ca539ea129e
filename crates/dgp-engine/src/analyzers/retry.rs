//! Retry pressure — uncertainty phrases and placeholder markers
//!
//! An uncertainty phrase contributes once no matter how often it occurs;
//! every placeholder match contributes. The emitted signals are the surface
//! forms from the output, deduplicated, in order of first occurrence.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::catalog::{
    PLACEHOLDER_PATTERN, PLACEHOLDER_WEIGHT, UNCERTAINTY_PHRASES, UNCERTAINTY_WEIGHT,
};
use crate::rounding::round_half_up;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PLACEHOLDER_PATTERN).expect("PLACEHOLDER_PATTERN regex should compile")
});

/// Result of a retry-pressure scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryScan {
    /// Number of distinct uncertainty phrases present
    pub uncertainty_count: i64,
    /// Number of placeholder matches with multiplicity
    pub todo_count: i64,
    /// Matched surface forms, deduplicated, by first occurrence
    pub signals: Vec<String>,
    /// Saturated pressure in [0, 1], unrounded
    pub normalized: f64,
}

/// Scan the output for uncertainty phrases and placeholder markers
pub fn scan_retry_pressure(output: &str) -> RetryScan {
    let lower = output.to_lowercase();
    let mut hits: Vec<(usize, String)> = Vec::new();

    let mut uncertainty_count = 0i64;
    for phrase in UNCERTAINTY_PHRASES {
        let mut present = false;
        let mut from = 0usize;
        while let Some(offset) = lower[from..].find(phrase) {
            let at = from + offset;
            hits.push((at, surface_form(output, at, phrase)));
            present = true;
            from = at + char_width(&lower, at);
        }
        if present {
            uncertainty_count += 1;
        }
    }

    let mut todo_count = 0i64;
    for m in PLACEHOLDER_RE.find_iter(output) {
        hits.push((m.start(), m.as_str().to_string()));
        todo_count += 1;
    }

    hits.sort_by_key(|(at, _)| *at);
    let mut signals: Vec<String> = Vec::new();
    for (_, surface) in hits {
        if !signals.contains(&surface) {
            signals.push(surface);
        }
    }

    let normalized = (UNCERTAINTY_WEIGHT * uncertainty_count as f64
        + PLACEHOLDER_WEIGHT * todo_count as f64)
        .min(1.0);

    RetryScan {
        uncertainty_count,
        todo_count,
        signals,
        normalized,
    }
}

/// Retry component score from the saturated pressure
pub fn retry_score(normalized: f64) -> i64 {
    (100 - round_half_up(normalized * 100.0)).max(0)
}

/// The matched text as written in the output. The scan runs over
/// lowercase-folded text, so the span is read back from the original; when
/// folding changed byte offsets (non-ASCII text) the phrase itself stands in.
fn surface_form(output: &str, at: usize, phrase: &str) -> String {
    output
        .get(at..at + phrase.len())
        .map(|s| s.to_string())
        .unwrap_or_else(|| phrase.to_string())
}

fn char_width(text: &str, at: usize) -> usize {
    text[at..].chars().next().map(|c| c.len_utf8()).unwrap_or(1)
}
