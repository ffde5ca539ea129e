//! Delta computer — percentage reductions against a baseline
//!
//! Reruns the drift and retry analyzers over the baseline with the same
//! active lexicon as the governed output, then reports how much of each
//! signal the governed output removed.

use crate::analyzers::{scan_drift, scan_retry_pressure, DriftOptions, DriftScan, RetryScan};
use crate::report::Deltas;
use crate::rounding::round_half_up;

/// Percentage reduction from a baseline magnitude to a governed magnitude.
///
/// Both zero means nothing to reduce (0). A signal introduced where the
/// baseline had none reads as -100. Otherwise the sign follows the sign of
/// `baseline - governed`.
pub fn compute_reduction(baseline: f64, governed: f64) -> i64 {
    if baseline == 0.0 && governed == 0.0 {
        0
    } else if baseline == 0.0 {
        -100
    } else {
        round_half_up((baseline - governed) / baseline * 100.0)
    }
}

/// Analyze the baseline and compute both reductions
pub(crate) fn compute_deltas(
    lexicon: &[String],
    governed_drift: &DriftScan,
    governed_retry: &RetryScan,
    baseline: &str,
) -> Deltas {
    let baseline_drift = scan_drift(lexicon, baseline, &DriftOptions::default());
    let baseline_retry = scan_retry_pressure(baseline);

    Deltas {
        drift_reduction: compute_reduction(
            baseline_drift.count as f64,
            governed_drift.count as f64,
        ),
        retry_reduction: compute_reduction(baseline_retry.normalized, governed_retry.normalized),
    }
}
