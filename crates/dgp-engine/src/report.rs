//! Compliance report — the frozen user-visible verdict shape
//!
//! Field names, field order, enum tags, and optional-field handling are all
//! wire protocol. `deltas`, `escalation.required`, and `escalation.ok` are
//! emitted as `null` when absent; `task.risk`, `violation.evidence`,
//! `action.metadata`, and `metadata.weights` are omitted entirely.
//! Unknown fields encountered on deserialization are ignored.

use serde::{Deserialize, Serialize};

use crate::task::TaskRisk;

/// Violation codes, including members reserved for future minor versions.
///
/// `HEADER_SCHEMA_EXTRA`, `SPS_RISKY_OPERATION`, and `RETRY_PRESSURE_HIGH`
/// are carried in the enum but no v1.0 detector path emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    HeaderSchemaMissing,
    HeaderSchemaExtra,
    SegScopeDrift,
    SpsRiskyOperation,
    FopEscalationMissed,
    FopFalseEscalation,
    RetryPressureHigh,
}

impl ViolationCode {
    /// Canonical wire tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HeaderSchemaMissing => "HEADER_SCHEMA_MISSING",
            Self::HeaderSchemaExtra => "HEADER_SCHEMA_EXTRA",
            Self::SegScopeDrift => "SEG_SCOPE_DRIFT",
            Self::SpsRiskyOperation => "SPS_RISKY_OPERATION",
            Self::FopEscalationMissed => "FOP_ESCALATION_MISSED",
            Self::FopFalseEscalation => "FOP_FALSE_ESCALATION",
            Self::RetryPressureHigh => "RETRY_PRESSURE_HIGH",
        }
    }
}

impl std::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Violation severity, ordered LOW < MEDIUM < HIGH < CRITICAL
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Canonical wire tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended action type, declaration order is the normative ascending order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    Allow,
    Block,
    Escalate,
    Retry,
}

impl ActionType {
    /// Canonical wire tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Block => "BLOCK",
            Self::Escalate => "ESCALATE",
            Self::Retry => "RETRY",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action priority, ordered LOW < MEDIUM < HIGH < URGENT
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Canonical wire tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task identity echoed into the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBlock {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<TaskRisk>,
}

/// Header analysis block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadersAnalysis {
    /// Whether the header check passed
    pub compliant: bool,
    /// Fraction of required headers found, in [0, 1]
    pub coverage: f64,
    /// Required headers absent from the output, in policy order
    pub missing: Vec<String>,
    /// Reserved; always empty in v1.0
    pub extra: Vec<String>,
}

/// Scope-drift analysis block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAnalysis {
    /// Drift component score, integer in [0, 100]
    pub score: i64,
    /// Matched lexicon entries, deduplicated, in lexicon order
    pub signals: Vec<String>,
    /// Total occurrences with multiplicity
    pub incidents: i64,
}

/// Retry-pressure analysis block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryAnalysis {
    /// Retry component score, integer in [0, 100]
    pub score: i64,
    /// Matched surface forms, deduplicated, by first occurrence
    pub signals: Vec<String>,
    /// Saturated pressure in [0, 1], rounded to two decimals
    pub normalized: f64,
}

/// Escalation analysis block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationAnalysis {
    /// Whether the task requires escalation; null when indeterminate
    pub required: Option<bool>,
    /// Whether any trigger phrase matched
    pub detected: bool,
    /// Matched trigger labels, deduplicated, lexicographically sorted
    pub triggers: Vec<String>,
    /// State-based confidence: 1.0 correct, 0.0 incorrect, 0.5 indeterminate
    pub confidence: f64,
    /// Whether detection matched the requirement; null when indeterminate
    pub ok: Option<bool>,
}

/// All four analyzer blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub headers: HeadersAnalysis,
    pub drift: DriftAnalysis,
    pub retry_pressure: RetryAnalysis,
    pub escalation: EscalationAnalysis,
}

/// Percentage reductions against a baseline output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deltas {
    pub drift_reduction: i64,
    pub retry_reduction: i64,
}

/// A single policy violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub code: ViolationCode,
    pub severity: Severity,
    /// Frozen message from the protocol catalog
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<String>>,
}

/// Final score, compliance flag, and violations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Capped weighted score, integer in [0, 100]
    pub score: i64,
    /// Compliance threshold in effect
    pub threshold: i64,
    /// True iff score meets threshold and no CRITICAL violation exists
    pub compliant: bool,
    /// Structural share of the evidence, in [0, 1], two decimals
    pub confidence: f64,
    /// Sorted severity-descending, then code ascending
    pub violations: Vec<Violation>,
}

/// A recommended downstream action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedAction {
    #[serde(rename = "type")]
    pub action: ActionType,
    pub priority: Priority,
    /// Frozen reason from the protocol catalog
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Weights echoed into metadata when custom weights are in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightsBlock {
    pub headers: f64,
    pub drift: f64,
    pub retry: f64,
    pub escalation: f64,
}

/// Provenance of the evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub capsule_version: String,
    pub engine_version: String,
    /// ISO8601 with milliseconds
    pub evaluated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightsBlock>,
}

/// The complete evaluation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub schema_version: String,
    pub task: TaskBlock,
    pub analysis: Analysis,
    /// Null unless a baseline was supplied
    pub deltas: Option<Deltas>,
    pub verdict: Verdict,
    /// Always exactly one action in v1.0, kept as an array on the wire
    pub recommended_actions: Vec<RecommendedAction>,
    pub metadata: ReportMetadata,
}

impl ComplianceReport {
    /// Compact one-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "[{}] score={}/{} confidence={} violations={} action={}",
            if self.verdict.compliant { "PASS" } else { "FAIL" },
            self.verdict.score,
            self.verdict.threshold,
            self.verdict.confidence,
            self.verdict.violations.len(),
            self.recommended_actions
                .first()
                .map(|a| a.action.as_str())
                .unwrap_or("-"),
        )
    }
}
