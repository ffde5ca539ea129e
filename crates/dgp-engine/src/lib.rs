//! DGP Engine — Deterministic governance evaluation (protocol v1.0)
//!
//! Evaluates a single textual artifact against a declarative governance
//! capsule and a task descriptor, producing a structured compliance report
//! that downstream pipelines use to gate execution (allow, retry, escalate,
//! block). All decisions are deterministic — no LLM calls, no I/O, no state
//! between evaluations; the same inputs always produce byte-identical
//! reports.
//!
//! # Components
//!
//! - Four text analyzers: required headers, scope drift, retry pressure,
//!   and escalation detection
//! - A weighted aggregator with severity-based score caps and frozen
//!   violation/action catalogs
//! - A delta computer for percentage reductions against a baseline output
//! - A single ordering stage that enforces the normative array ordering on
//!   the way out
//!
//! # Usage
//!
//! ```
//! use dgp_engine::{Capsule, ComplianceEngine, EngineConfig, TaskDescriptor, TaskRisk};
//!
//! let mut capsule = Capsule::new("1.0.0");
//! capsule.governance.rfe.required_headers =
//!     vec!["Plan".to_string(), "Logs".to_string()];
//!
//! let engine = ComplianceEngine::new(EngineConfig::new(capsule)).unwrap();
//! let task = TaskDescriptor::new("ui-nav-001").with_risk(TaskRisk::Low);
//! let report = engine
//!     .evaluate(&task, "Plan: add aria labels\nLogs: all green", None)
//!     .unwrap();
//!
//! assert!(report.verdict.compliant);
//! ```

pub mod analyzers;
pub mod capsule;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod report;
pub mod rounding;
pub mod task;

// Re-export the policy and task types
pub use capsule::{Capsule, DriftPolicy, EscalationPolicy, Governance, HeaderPolicy};
pub use task::{TaskDescriptor, TaskRisk};

// Re-export the engine surface
pub use engine::{compute_reduction, Clock, ComplianceEngine, EngineConfig, Thresholds, Weights};

// Re-export the error types
pub use error::{EngineError, EngineResult};

// Re-export the report shape
pub use report::{
    ActionType, Analysis, ComplianceReport, Deltas, DriftAnalysis, EscalationAnalysis,
    HeadersAnalysis, Priority, RecommendedAction, ReportMetadata, RetryAnalysis, Severity,
    TaskBlock, Verdict, Violation, ViolationCode, WeightsBlock,
};
