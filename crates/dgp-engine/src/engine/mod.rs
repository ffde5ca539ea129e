//! Compliance engine — deterministic evaluation of one output
//!
//! `evaluate` is a pure function of its inputs plus the injected clock and
//! engine version. No state survives a call; concurrent evaluations on
//! disjoint inputs need no synchronization and produce reports identical to
//! serial invocations.

pub(crate) mod aggregator;
pub mod delta;
pub mod ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analyzers::{
    check_headers, scan_drift, scan_escalation, scan_retry_pressure, DriftOptions, HeaderOptions,
};
use crate::capsule::Capsule;
use crate::catalog::{
    DEFAULT_COMPLIANCE_THRESHOLD, DEFAULT_ENGINE_VERSION, DEFAULT_WEIGHT_DRIFT,
    DEFAULT_WEIGHT_ESCALATION, DEFAULT_WEIGHT_HEADERS, DEFAULT_WEIGHT_RETRY, WEIGHT_SUM_TOLERANCE,
};
use crate::engine::aggregator::{aggregate, AggregationContext};
use crate::engine::delta::compute_deltas;
use crate::error::{EngineError, EngineResult};
use crate::report::ComplianceReport;
use crate::task::TaskDescriptor;

pub use delta::compute_reduction;

/// Injectable clock, defaulting to `Utc::now`
pub type Clock = fn() -> DateTime<Utc>;

fn default_now() -> DateTime<Utc> {
    Utc::now()
}

/// Aggregation weights for the four component scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub headers: f64,
    pub drift: f64,
    pub retry: f64,
    pub escalation: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            headers: DEFAULT_WEIGHT_HEADERS,
            drift: DEFAULT_WEIGHT_DRIFT,
            retry: DEFAULT_WEIGHT_RETRY,
            escalation: DEFAULT_WEIGHT_ESCALATION,
        }
    }
}

impl Weights {
    /// Sum of all four weights
    pub fn sum(&self) -> f64 {
        self.headers + self.drift + self.retry + self.escalation
    }

    /// Custom weights must sum to 1.0 within the protocol tolerance
    pub fn validate(&self) -> EngineResult<()> {
        if (self.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::configuration(format!(
                "weights must sum to 1.0 (got {})",
                self.sum()
            )));
        }
        Ok(())
    }
}

/// Optional threshold overrides
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    /// Compliance threshold, integer in [0, 100]; defaults to 80
    pub compliance: Option<i64>,
    /// Custom aggregation weights; their presence is observable in the
    /// report metadata and action selection
    pub weights: Option<Weights>,
}

/// Construction-time engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub capsule: Capsule,
    pub thresholds: Option<Thresholds>,
    /// Accepted for forward compatibility; no observable effect in v1.0
    pub enforce: bool,
    pub now: Option<Clock>,
    pub engine_version: Option<String>,
}

impl EngineConfig {
    /// Configuration with defaults for everything but the capsule
    pub fn new(capsule: Capsule) -> Self {
        Self {
            capsule,
            thresholds: None,
            enforce: false,
            now: None,
            engine_version: None,
        }
    }

    /// Override the compliance threshold
    pub fn with_compliance_threshold(mut self, threshold: i64) -> Self {
        let thresholds = self.thresholds.get_or_insert_with(Thresholds::default);
        thresholds.compliance = Some(threshold);
        self
    }

    /// Supply custom aggregation weights
    pub fn with_weights(mut self, weights: Weights) -> Self {
        let thresholds = self.thresholds.get_or_insert_with(Thresholds::default);
        thresholds.weights = Some(weights);
        self
    }

    /// Set the enforce flag (reserved; no observable effect in v1.0)
    pub fn with_enforce(mut self, enforce: bool) -> Self {
        self.enforce = enforce;
        self
    }

    /// Inject a clock for reproducible timestamps
    pub fn with_clock(mut self, now: Clock) -> Self {
        self.now = Some(now);
        self
    }

    /// Override the engine version echoed into report metadata
    pub fn with_engine_version(mut self, version: impl Into<String>) -> Self {
        self.engine_version = Some(version.into());
        self
    }
}

/// The evaluation engine. Immutable once constructed; cheap to share.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    capsule: Capsule,
    threshold: i64,
    weights: Weights,
    custom_weights: bool,
    #[allow(dead_code)]
    enforce: bool,
    now: Clock,
    engine_version: String,
}

impl ComplianceEngine {
    /// Validate the configuration and build an engine
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.capsule.validate()?;

        let thresholds = config.thresholds.unwrap_or_default();
        let threshold = thresholds.compliance.unwrap_or(DEFAULT_COMPLIANCE_THRESHOLD);
        if !(0..=100).contains(&threshold) {
            return Err(EngineError::configuration(format!(
                "compliance threshold must be in [0, 100] (got {threshold})"
            )));
        }

        let (weights, custom_weights) = match thresholds.weights {
            Some(weights) => {
                weights.validate()?;
                (weights, true)
            }
            None => (Weights::default(), false),
        };

        Ok(Self {
            capsule: config.capsule,
            threshold,
            weights,
            custom_weights,
            enforce: config.enforce,
            now: config.now.unwrap_or(default_now),
            engine_version: config
                .engine_version
                .unwrap_or_else(|| DEFAULT_ENGINE_VERSION.to_string()),
        })
    }

    /// Evaluate one output (and optional baseline) against the capsule
    pub fn evaluate(
        &self,
        task: &TaskDescriptor,
        output: &str,
        baseline: Option<&str>,
    ) -> EngineResult<ComplianceReport> {
        if task.id.is_empty() {
            return Err(EngineError::input("task.id must be a non-empty string"));
        }
        if output.is_empty() {
            return Err(EngineError::input("output must be a non-empty string"));
        }
        if baseline.is_some_and(|b| b.is_empty()) {
            return Err(EngineError::input("baseline must be a non-empty string"));
        }

        let governance = &self.capsule.governance;
        let headers = check_headers(
            &governance.rfe.required_headers,
            output,
            &HeaderOptions::default(),
        );
        let lexicon = task
            .drift_lexicon
            .as_deref()
            .unwrap_or(&governance.seg.drift_keywords);
        let drift = scan_drift(lexicon, output, &DriftOptions::default());
        let retry = scan_retry_pressure(output);
        let escalation = scan_escalation(task, &governance.fop, output);

        debug!(
            task_id = %task.id,
            header_coverage = headers.coverage_percent,
            drift_incidents = drift.count,
            retry_signals = retry.signals.len(),
            escalation_detected = escalation.detected,
            "analyzers complete"
        );

        let deltas = baseline.map(|b| compute_deltas(lexicon, &drift, &retry, b));

        let evaluated_at = (self.now)()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string();

        let report = aggregate(AggregationContext {
            task,
            headers,
            drift,
            retry,
            escalation,
            deltas,
            threshold: self.threshold,
            weights: &self.weights,
            custom_weights: self.custom_weights,
            capsule_version: &self.capsule.version,
            engine_version: &self.engine_version,
            evaluated_at,
        });

        info!(task_id = %task.id, summary = %report.summary(), "evaluation complete");

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskRisk;

    fn capsule() -> Capsule {
        let mut capsule = Capsule::new("1.0.0");
        capsule.governance.rfe.required_headers =
            vec!["Plan".to_string(), "Logs".to_string()];
        capsule
    }

    #[test]
    fn test_empty_task_id_is_an_input_error() {
        let engine = ComplianceEngine::new(EngineConfig::new(capsule())).unwrap();
        let err = engine
            .evaluate(&TaskDescriptor::new(""), "Plan: x", None)
            .unwrap_err();
        assert!(matches!(err, EngineError::Input { .. }));
    }

    #[test]
    fn test_empty_output_is_an_input_error() {
        let engine = ComplianceEngine::new(EngineConfig::new(capsule())).unwrap();
        let err = engine
            .evaluate(&TaskDescriptor::new("t-1"), "", None)
            .unwrap_err();
        assert!(matches!(err, EngineError::Input { .. }));
    }

    #[test]
    fn test_empty_baseline_is_an_input_error() {
        let engine = ComplianceEngine::new(EngineConfig::new(capsule())).unwrap();
        let err = engine
            .evaluate(&TaskDescriptor::new("t-1"), "Plan: x", Some(""))
            .unwrap_err();
        assert!(matches!(err, EngineError::Input { .. }));
    }

    #[test]
    fn test_bad_weights_fail_construction() {
        let config = EngineConfig::new(capsule()).with_weights(Weights {
            headers: 0.5,
            drift: 0.5,
            retry: 0.5,
            escalation: 0.5,
        });
        assert!(matches!(
            ComplianceEngine::new(config),
            Err(EngineError::Configuration { .. })
        ));
    }

    #[test]
    fn test_weights_tolerance_accepts_near_one() {
        let config = EngineConfig::new(capsule()).with_weights(Weights {
            headers: 0.2501,
            drift: 0.2999,
            retry: 0.2,
            escalation: 0.25,
        });
        assert!(ComplianceEngine::new(config).is_ok());
    }

    #[test]
    fn test_threshold_out_of_range_fails_construction() {
        let config = EngineConfig::new(capsule()).with_compliance_threshold(101);
        assert!(matches!(
            ComplianceEngine::new(config),
            Err(EngineError::Configuration { .. })
        ));
    }

    #[test]
    fn test_invalid_capsule_fails_construction() {
        let config = EngineConfig::new(Capsule::new(""));
        assert!(matches!(
            ComplianceEngine::new(config),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_enforce_flag_has_no_observable_effect() {
        let task = TaskDescriptor::new("t-1").with_risk(TaskRisk::Low);
        let output = "Plan: x\nLogs: y";

        fn fixed_now() -> DateTime<Utc> {
            DateTime::parse_from_rfc3339("2025-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc)
        }

        let plain = ComplianceEngine::new(EngineConfig::new(capsule()).with_clock(fixed_now))
            .unwrap()
            .evaluate(&task, output, None)
            .unwrap();
        let enforcing = ComplianceEngine::new(
            EngineConfig::new(capsule()).with_enforce(true).with_clock(fixed_now),
        )
        .unwrap()
        .evaluate(&task, output, None)
        .unwrap();

        assert_eq!(plain, enforcing);
    }

    #[test]
    fn test_task_lexicon_overrides_capsule_lexicon() {
        let mut capsule = capsule();
        capsule.governance.seg.drift_keywords = vec!["DELETE".to_string()];
        let engine = ComplianceEngine::new(EngineConfig::new(capsule)).unwrap();

        let task = TaskDescriptor::new("t-1")
            .with_risk(TaskRisk::Low)
            .with_drift_lexicon(vec!["rollback".to_string()]);
        let report = engine
            .evaluate(&task, "Plan: DELETE then rollback\nLogs: y", None)
            .unwrap();

        assert_eq!(report.analysis.drift.incidents, 1);
        assert_eq!(report.analysis.drift.signals, vec!["rollback"]);
    }

    #[test]
    fn test_timestamp_has_millisecond_precision() {
        fn fixed_now() -> DateTime<Utc> {
            DateTime::parse_from_rfc3339("2025-01-15T10:30:00.123Z")
                .unwrap()
                .with_timezone(&Utc)
        }
        let engine =
            ComplianceEngine::new(EngineConfig::new(capsule()).with_clock(fixed_now)).unwrap();
        let report = engine
            .evaluate(&TaskDescriptor::new("t-1"), "Plan: x\nLogs: y", None)
            .unwrap();
        assert_eq!(report.metadata.evaluated_at, "2025-01-15T10:30:00.123Z");
    }
}
