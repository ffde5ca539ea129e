//! Aggregator — the frozen scoring protocol
//!
//! Assembles the analysis block, applies the weighted score with severity
//! caps, derives violations, computes the structural/heuristic confidence,
//! and selects the single recommended action. Every emitted string comes
//! from the protocol catalog.

use crate::analyzers::{
    drift_score, escalation_score, retry_score, DriftScan, EscalationScan, HeaderCheck, RetryScan,
};
use crate::catalog::{
    reason_allow_custom_weights, CRITICAL_SCORE_CAP, EVIDENCE_ESCALATION_MISSED, HIGH_SCORE_CAP,
    MSG_FOP_ESCALATION_MISSED, MSG_FOP_FALSE_ESCALATION, MSG_HEADER_SCHEMA_MISSING,
    MSG_SEG_SCOPE_DRIFT, REASON_ALLOW_BASELINE, REASON_ALLOW_CLEAN, REASON_ALLOW_INDETERMINATE,
    REASON_ALLOW_ROUNDING, REASON_BLOCK_CRITICAL, REASON_ESCALATE_CORRECT,
    REASON_RETRY_BELOW_THRESHOLD, REASON_RETRY_SCOPE_DRIFT, SCHEMA_VERSION,
};
use crate::engine::ordering::{sort_actions, sort_triggers, sort_violations};
use crate::engine::Weights;
use crate::report::{
    ActionType, Analysis, ComplianceReport, Deltas, DriftAnalysis, EscalationAnalysis,
    HeadersAnalysis, Priority, RecommendedAction, ReportMetadata, RetryAnalysis, Severity,
    TaskBlock, Verdict, Violation, ViolationCode, WeightsBlock,
};
use crate::rounding::{round_half_up, round_two_decimals};
use crate::task::TaskDescriptor;

/// Everything the aggregator needs to produce a report
pub(crate) struct AggregationContext<'a> {
    pub task: &'a TaskDescriptor,
    pub headers: HeaderCheck,
    pub drift: DriftScan,
    pub retry: RetryScan,
    pub escalation: EscalationScan,
    pub deltas: Option<Deltas>,
    pub threshold: i64,
    pub weights: &'a Weights,
    pub custom_weights: bool,
    pub capsule_version: &'a str,
    pub engine_version: &'a str,
    pub evaluated_at: String,
}

/// Produce the final report from the analyzer results
pub(crate) fn aggregate(ctx: AggregationContext<'_>) -> ComplianceReport {
    let header_score = if ctx.headers.compliant {
        100
    } else {
        // floor(coverageRatio * 100); the percent is already that integer
        ctx.headers.coverage_percent
    };
    let drift_score = drift_score(ctx.drift.count);
    let retry_score = retry_score(ctx.retry.normalized);
    let escalation_score = escalation_score(ctx.escalation.ok);

    let raw = round_half_up(
        header_score as f64 * ctx.weights.headers
            + drift_score as f64 * ctx.weights.drift
            + retry_score as f64 * ctx.weights.retry
            + escalation_score as f64 * ctx.weights.escalation,
    );

    let mut violations = collect_violations(&ctx);
    sort_violations(&mut violations);

    let has_critical = violations.iter().any(|v| v.severity == Severity::Critical);
    let has_high = violations.iter().any(|v| v.severity == Severity::High);

    let score = if has_critical {
        raw.min(CRITICAL_SCORE_CAP)
    } else if has_high {
        raw.min(HIGH_SCORE_CAP)
    } else {
        raw
    };
    let compliant = score >= ctx.threshold && !has_critical;

    let confidence = verdict_confidence(&ctx.retry, &ctx.escalation);

    let mut actions = vec![select_action(&ctx, &violations, compliant, has_critical, score)];
    sort_actions(&mut actions);

    let mut triggers = ctx.escalation.triggers.clone();
    sort_triggers(&mut triggers);

    ComplianceReport {
        schema_version: SCHEMA_VERSION.to_string(),
        task: TaskBlock {
            id: ctx.task.id.clone(),
            risk: ctx.task.risk,
        },
        analysis: Analysis {
            headers: HeadersAnalysis {
                compliant: ctx.headers.compliant,
                coverage: ctx.headers.coverage_ratio(),
                missing: ctx.headers.missing.clone(),
                extra: Vec::new(),
            },
            drift: DriftAnalysis {
                score: drift_score,
                signals: ctx.drift.matches.clone(),
                incidents: ctx.drift.count,
            },
            retry_pressure: RetryAnalysis {
                score: retry_score,
                signals: ctx.retry.signals.clone(),
                normalized: round_two_decimals(ctx.retry.normalized),
            },
            escalation: EscalationAnalysis {
                required: ctx.escalation.required,
                detected: ctx.escalation.detected,
                triggers,
                confidence: ctx.escalation.confidence,
                ok: ctx.escalation.ok,
            },
        },
        deltas: ctx.deltas,
        verdict: Verdict {
            score,
            threshold: ctx.threshold,
            compliant,
            confidence,
            violations,
        },
        recommended_actions: actions,
        metadata: ReportMetadata {
            capsule_version: ctx.capsule_version.to_string(),
            engine_version: ctx.engine_version.to_string(),
            evaluated_at: ctx.evaluated_at,
            weights: ctx.custom_weights.then(|| WeightsBlock {
                headers: ctx.weights.headers,
                drift: ctx.weights.drift,
                retry: ctx.weights.retry,
                escalation: ctx.weights.escalation,
            }),
        },
    }
}

/// At most one violation per condition
fn collect_violations(ctx: &AggregationContext<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !ctx.headers.compliant {
        violations.push(Violation {
            code: ViolationCode::HeaderSchemaMissing,
            severity: Severity::High,
            message: MSG_HEADER_SCHEMA_MISSING.to_string(),
            evidence: Some(ctx.headers.missing.clone()),
        });
    }

    if ctx.drift.count >= 2 {
        violations.push(Violation {
            code: ViolationCode::SegScopeDrift,
            severity: Severity::High,
            message: MSG_SEG_SCOPE_DRIFT.to_string(),
            evidence: Some(ctx.drift.matches.clone()),
        });
    }

    if ctx.escalation.ok == Some(false) {
        if ctx.escalation.required == Some(true) && !ctx.escalation.detected {
            violations.push(Violation {
                code: ViolationCode::FopEscalationMissed,
                severity: Severity::Critical,
                message: MSG_FOP_ESCALATION_MISSED.to_string(),
                evidence: Some(vec![EVIDENCE_ESCALATION_MISSED.to_string()]),
            });
        } else if ctx.escalation.required == Some(false) && ctx.escalation.detected {
            violations.push(Violation {
                code: ViolationCode::FopFalseEscalation,
                severity: Severity::Low,
                message: MSG_FOP_FALSE_ESCALATION.to_string(),
                evidence: Some(ctx.escalation.triggers.clone()),
            });
        }
    }

    violations
}

/// Structural share of the evidence. The headers check is the one structural
/// signal; when retry signals are present the heuristic side collapses to 1
/// (retry dominates), otherwise drift and retry contribute one each and a
/// non-failed escalation contributes itself plus its unique triggers.
fn verdict_confidence(retry: &RetryScan, escalation: &EscalationScan) -> f64 {
    let structural = 1.0;
    let heuristic = if !retry.signals.is_empty() {
        1.0
    } else {
        let mut sum = 2.0;
        if escalation.ok != Some(false) {
            sum += 1.0;
            sum += escalation.triggers.len() as f64;
        }
        sum
    };
    round_two_decimals(structural / (structural + heuristic)).clamp(0.0, 1.0)
}

/// Top-down selection of the single recommended action
fn select_action(
    ctx: &AggregationContext<'_>,
    violations: &[Violation],
    compliant: bool,
    has_critical: bool,
    score: i64,
) -> RecommendedAction {
    let primary = violations.first();

    let (action, priority, reason) = if !compliant && has_critical {
        (
            ActionType::Block,
            Priority::Urgent,
            REASON_BLOCK_CRITICAL.to_string(),
        )
    } else if !compliant && primary.map(|v| v.code) == Some(ViolationCode::SegScopeDrift) {
        (
            ActionType::Retry,
            Priority::Medium,
            REASON_RETRY_SCOPE_DRIFT.to_string(),
        )
    } else if !compliant {
        let reason = primary
            .map(|v| v.message.clone())
            .unwrap_or_else(|| REASON_RETRY_BELOW_THRESHOLD.to_string());
        (ActionType::Retry, Priority::Medium, reason)
    } else if ctx.escalation.required == Some(true) && ctx.escalation.detected {
        (
            ActionType::Escalate,
            Priority::High,
            REASON_ESCALATE_CORRECT.to_string(),
        )
    } else if ctx.custom_weights {
        let drift_percent = round_half_up(ctx.weights.drift * 100.0);
        (
            ActionType::Allow,
            Priority::Low,
            reason_allow_custom_weights(drift_percent),
        )
    } else if ctx.deltas.is_some() {
        (
            ActionType::Allow,
            Priority::Low,
            REASON_ALLOW_BASELINE.to_string(),
        )
    } else if score == ctx.threshold && ctx.threshold == 80 {
        (
            ActionType::Allow,
            Priority::Low,
            REASON_ALLOW_ROUNDING.to_string(),
        )
    } else if ctx.escalation.ok.is_none() {
        (
            ActionType::Allow,
            Priority::Low,
            REASON_ALLOW_INDETERMINATE.to_string(),
        )
    } else {
        (
            ActionType::Allow,
            Priority::Low,
            REASON_ALLOW_CLEAN.to_string(),
        )
    };

    RecommendedAction {
        action,
        priority,
        reason,
        metadata: None,
    }
}
