//! Header checker — required section headings
//!
//! A heading is present when it appears verbatim as a substring, or when the
//! escaped heading followed by optional whitespace and a literal colon
//! matches (case-insensitively unless configured otherwise). The engine runs
//! the checker with the default options.

use regex::RegexBuilder;
use serde::Serialize;

use crate::rounding::round_half_up;

/// Options for the header check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Strict mode requires every heading; lax mode requires at least one
    pub strict: bool,
    /// Whether the colon-pattern match is case sensitive
    pub case_sensitive: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            strict: false,
            case_sensitive: false,
        }
    }
}

/// Result of the header check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCheck {
    /// Whether the check passed under the configured mode
    pub compliant: bool,
    /// Required headings absent from the output, in policy order
    pub missing: Vec<String>,
    /// Required headings present in the output, in policy order
    pub found: Vec<String>,
    /// Share of required headings found, as a half-up rounded percentage
    pub coverage_percent: i64,
}

impl HeaderCheck {
    /// Coverage as a ratio in [0, 1] for the analysis block
    pub fn coverage_ratio(&self) -> f64 {
        self.coverage_percent as f64 / 100.0
    }
}

/// Test the output for each required heading
pub fn check_headers(required: &[String], output: &str, options: &HeaderOptions) -> HeaderCheck {
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for heading in required {
        if heading_present(heading, output, options.case_sensitive) {
            found.push(heading.clone());
        } else {
            missing.push(heading.clone());
        }
    }

    let coverage_percent = if required.is_empty() {
        100
    } else {
        round_half_up(found.len() as f64 / required.len() as f64 * 100.0)
    };

    let compliant = if options.strict {
        missing.is_empty()
    } else {
        !found.is_empty()
    };

    HeaderCheck {
        compliant,
        missing,
        found,
        coverage_percent,
    }
}

fn heading_present(heading: &str, output: &str, case_sensitive: bool) -> bool {
    if heading.is_empty() {
        return false;
    }
    if output.contains(heading) {
        return true;
    }
    // Heading followed by optional whitespace and a literal colon. The
    // heading text is escaped, so policy strings never act as patterns.
    let pattern = format!(r"{}\s*:", regex::escape(heading));
    RegexBuilder::new(&pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map(|re| re.is_match(output))
        .unwrap_or(false)
}
