//! Drift detector — forbidden scope-creep keywords
//!
//! Counts lexicon occurrences with multiplicity. Matching is plain substring
//! search, not word-boundary, and overlapping occurrences of the same
//! keyword are counted by restarting the search one character past the
//! previous match start.

use serde::Serialize;

use crate::catalog::DRIFT_PENALTY_PER_INCIDENT;

/// Options for the drift scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriftOptions {
    /// Whether keyword matching is case sensitive
    pub case_sensitive: bool,
}

/// Result of a drift scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftScan {
    /// Total occurrences with multiplicity
    pub count: i64,
    /// Matched lexicon entries, deduplicated, in lexicon order
    pub matches: Vec<String>,
    /// Match start offsets in document order
    pub positions: Vec<usize>,
}

/// Count occurrences of each lexicon entry in the output
pub fn scan_drift(lexicon: &[String], output: &str, options: &DriftOptions) -> DriftScan {
    let haystack = if options.case_sensitive {
        output.to_string()
    } else {
        output.to_lowercase()
    };

    let mut count = 0i64;
    let mut matches = Vec::new();
    let mut positions = Vec::new();

    for entry in lexicon {
        // Empty lexicon entries match nothing.
        if entry.is_empty() {
            continue;
        }
        let needle = if options.case_sensitive {
            entry.clone()
        } else {
            entry.to_lowercase()
        };

        let mut hits = 0i64;
        let mut from = 0usize;
        while let Some(offset) = haystack[from..].find(&needle) {
            let at = from + offset;
            positions.push(at);
            hits += 1;
            from = at + char_width(&haystack, at);
        }

        if hits > 0 {
            matches.push(entry.clone());
            count += hits;
        }
    }

    positions.sort_unstable();

    DriftScan {
        count,
        matches,
        positions,
    }
}

/// Drift component score: 15 points off per counted incident, floored at 0
pub fn drift_score(count: i64) -> i64 {
    (100 - DRIFT_PENALTY_PER_INCIDENT * count).max(0)
}

/// Width in bytes of the character starting at `at`
fn char_width(text: &str, at: usize) -> usize {
    text[at..].chars().next().map(|c| c.len_utf8()).unwrap_or(1)
}
