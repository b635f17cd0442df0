//! Diff computation.

use crate::diff::model::{DiffResult, Sentinel};
use crate::snapshot::NodeSnapshot;
use indexmap::IndexMap;

/// Compare `subject` against `baseline`
///
/// A subject entry is kept when its label is missing from the baseline or
/// its value differs structurally. Baseline-only labels are ignored. When
/// nothing is kept the result is `empty_sentinel`.
pub fn compute_diff(
    subject: &NodeSnapshot,
    baseline: &NodeSnapshot,
    empty_sentinel: Sentinel,
) -> DiffResult {
    let entries: IndexMap<_, _> = subject
        .iter()
        .filter(|(label, value)| baseline.get(label) != Some(*value))
        .map(|(label, value)| (label.to_string(), value.clone()))
        .collect();

    tracing::debug!(
        subject_len = subject.len(),
        baseline_len = baseline.len(),
        diff_len = entries.len(),
        "snapshots compared"
    );

    if entries.is_empty() {
        return DiffResult::sentinel(empty_sentinel);
    }
    DiffResult {
        entries,
        sentinel: None,
    }
}
