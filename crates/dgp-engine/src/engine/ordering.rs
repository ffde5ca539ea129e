//! Normative output ordering
//!
//! Arrays are built in whatever order is natural inside the aggregator and
//! pass through this single stage before report assembly. Nothing else in
//! the crate sorts report arrays.

use crate::report::{RecommendedAction, Violation};

/// Violations: severity descending, then code ascending
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.code.as_str().cmp(b.code.as_str()))
    });
}

/// Actions: priority descending, then type ascending, then reason ascending
pub fn sort_actions(actions: &mut [RecommendedAction]) {
    actions.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.action.cmp(&b.action))
            .then_with(|| a.reason.cmp(&b.reason))
    });
}

/// Trigger labels: lexicographic ascending, deduplicated
pub fn sort_triggers(triggers: &mut Vec<String>) {
    triggers.sort();
    triggers.dedup();
}
