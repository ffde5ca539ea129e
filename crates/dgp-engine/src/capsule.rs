//! Capsule — declarative governance policy
//!
//! A capsule is an immutable policy value the engine evaluates outputs
//! against. Loading capsules from disk and validating their semantics is the
//! publisher's concern; the engine only checks structural sanity before the
//! first analysis runs.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Declarative governance policy consumed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capsule {
    /// Policy version string, echoed into report metadata
    pub version: String,
    /// Governance sections by policy dimension
    pub governance: Governance,
}

impl Capsule {
    /// Create a capsule with the given version and empty governance sections
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            governance: Governance::default(),
        }
    }

    /// Structural sanity check, run once at engine construction
    pub fn validate(&self) -> EngineResult<()> {
        if self.version.is_empty() {
            return Err(EngineError::validation("capsule version must be non-empty"));
        }
        Ok(())
    }
}

/// Governance sections, one per policy dimension
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Governance {
    /// Required-header policy (RFE dimension)
    #[serde(rename = "RFE", default)]
    pub rfe: HeaderPolicy,
    /// Scope-drift policy (SEG dimension)
    #[serde(rename = "SEG", default)]
    pub seg: DriftPolicy,
    /// Escalation policy (FOP dimension)
    #[serde(rename = "FOP", default)]
    pub fop: EscalationPolicy,
}

/// Required section headings the output must carry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderPolicy {
    /// Ordered sequence of required heading strings
    #[serde(default)]
    pub required_headers: Vec<String>,
}

/// Default scope-creep lexicon
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftPolicy {
    /// Forbidden keywords; a per-task lexicon overrides these
    #[serde(default)]
    pub drift_keywords: Vec<String>,
}

/// Escalation requirements and capsule-specific trigger phrases
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationPolicy {
    /// Trigger phrases unioned with the frozen default set
    #[serde(default)]
    pub escalation_triggers: Vec<String>,
    /// Whether HIGH-risk tasks must escalate
    #[serde(default)]
    pub required_for_high_risk: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_version_fails_validation() {
        let capsule = Capsule::new("");
        assert!(matches!(
            capsule.validate(),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_capsule_wire_shape() {
        let mut capsule = Capsule::new("2.1.0");
        capsule.governance.rfe.required_headers = vec!["Plan".to_string()];
        capsule.governance.fop.required_for_high_risk = true;

        let json = serde_json::to_value(&capsule).unwrap();
        assert_eq!(json["version"], "2.1.0");
        assert_eq!(json["governance"]["RFE"]["requiredHeaders"][0], "Plan");
        assert_eq!(json["governance"]["FOP"]["requiredForHighRisk"], true);
    }

    #[test]
    fn test_capsule_parses_with_missing_sections() {
        // Publishers may omit sections they do not use.
        let capsule: Capsule = serde_json::from_str(
            r#"{"version":"1.0.0","governance":{"SEG":{"driftKeywords":["DELETE"]}}}"#,
        )
        .unwrap();
        assert_eq!(capsule.governance.seg.drift_keywords, vec!["DELETE"]);
        assert!(capsule.governance.rfe.required_headers.is_empty());
        assert!(!capsule.governance.fop.required_for_high_risk);
        assert!(capsule.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let capsule: Capsule = serde_json::from_str(
            r#"{"version":"1.0.0","governance":{},"futureField":{"x":1}}"#,
        )
        .unwrap();
        assert_eq!(capsule.version, "1.0.0");
    }
}
