//! Task descriptor — per-evaluation context
//!
//! Carries the task identity, its risk tier, and the optional per-task
//! overrides (escalation requirement, drift lexicon). Borrowed by the
//! engine, never retained.

use serde::{Deserialize, Serialize};

/// Risk tier assigned to a task by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskRisk {
    Low,
    Medium,
    High,
}

impl TaskRisk {
    /// Canonical wire tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for TaskRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-evaluation task context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    /// Task identity, required and non-empty
    pub id: String,
    /// Risk tier, absent when the caller has not classified the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<TaskRisk>,
    /// Explicit escalation requirement; overrides risk-derived defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_escalation: Option<bool>,
    /// Per-task drift lexicon; overrides the capsule lexicon when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_lexicon: Option<Vec<String>>,
}

impl TaskDescriptor {
    /// Create a task descriptor with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            risk: None,
            requires_escalation: None,
            drift_lexicon: None,
        }
    }

    /// Set the risk tier
    pub fn with_risk(mut self, risk: TaskRisk) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Set the explicit escalation requirement
    pub fn with_requires_escalation(mut self, required: bool) -> Self {
        self.requires_escalation = Some(required);
        self
    }

    /// Override the capsule drift lexicon for this task
    pub fn with_drift_lexicon(mut self, lexicon: Vec<String>) -> Self {
        self.drift_lexicon = Some(lexicon);
        self
    }
}
