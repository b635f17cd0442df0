//! Node-vs-node command with boundary logging.
//!
//! Both selected nodes are snapshotted in place over annotation, input and
//! output properties. The subject's differences from the other node are
//! annotated on the subject.

#![allow(clippy::result_large_err)]

use crate::commands::annotate::{write_annotation, AnnotationReport};
use crate::commands::selection::require_selection;
use modval_core::diff::{compute_diff, DiffResult, Sentinel};
use modval_core::errors::{ExError, ModvalError};
use modval_core::resolve::snapshot_node;
use modval_core::snapshot::Collector;
use modval_core::{log_op_end, log_op_error, log_op_start};
use modval_core::{Host, HostGraph, NodeId, PluginConfig, PropertyCategory};
use modval_core_types::InvocationContext;
use serde::{Deserialize, Serialize};

const OP: &str = "compare_selection";

/// Categories compared between two nodes
pub const PAIR_CATEGORIES: [PropertyCategory; 3] = [
    PropertyCategory::Annotation,
    PropertyCategory::Input,
    PropertyCategory::Output,
];

/// Which selected node is the subject
///
/// The host does not preserve click order, so A is simply the first node of
/// the selection as reported for this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    AToB,
    BToA,
}

impl Direction {
    /// (subject, baseline) indices into the two-node selection
    fn indices(self) -> (usize, usize) {
        match self {
            Direction::AToB => (0, 1),
            Direction::BToA => (1, 0),
        }
    }
}

/// Annotate one of two selected nodes with how it differs from the other
///
/// ## Errors
///
/// - `InvalidSelection`: other than two nodes selected
/// - `NotFound`: a selected node vanished from the graph
/// - `Host`: the annotation could not be created
pub fn compare_selection<H: Host>(
    host: &mut H,
    config: &PluginConfig,
    direction: Direction,
    ctx: &InvocationContext,
) -> Result<AnnotationReport, ExError> {
    log_op_start!(OP, ctx, direction = ?direction);
    let start = std::time::Instant::now();

    let report = compare_selection_impl(host, config, direction).map_err(|e| {
        let ex = ExError::from(e).with_op(OP).with_invocation_id(ctx.invocation_id.clone());
        log_op_error!(OP, ctx, start, &ex, direction = ?direction);
        ex
    })?;

    log_op_end!(
        OP,
        ctx,
        start,
        direction = ?direction,
        node_id = report.node_id.as_str(),
        diff_len = report.diff.entries.len()
    );

    Ok(report)
}

fn compare_selection_impl<H: Host>(
    host: &mut H,
    config: &PluginConfig,
    direction: Direction,
) -> Result<AnnotationReport, ModvalError> {
    let selected = require_selection(&*host, 2)?;
    let (subject, baseline) = direction.indices();

    let diff = compare_nodes(&*host, config, &selected[subject], &selected[baseline])?;
    write_annotation(host, &selected[subject], diff, config.comment_offset)
}

/// Diff `subject` against `baseline`, both read as they stand
///
/// Each node is collected under its own label and channel depth.
///
/// # Errors
///
/// Returns `NodeNotFound` when either node is not in the graph.
pub fn compare_nodes<H: HostGraph + ?Sized>(
    host: &H,
    config: &PluginConfig,
    subject: &NodeId,
    baseline: &NodeId,
) -> Result<DiffResult, ModvalError> {
    let collector = Collector::new(config);
    let subject_snapshot = snapshot_node(host, subject, &collector, &PAIR_CATEGORIES)?;
    let baseline_snapshot = snapshot_node(host, baseline, &collector, &PAIR_CATEGORIES)?;

    tracing::debug!(
        subject_len = subject_snapshot.len(),
        baseline_len = baseline_snapshot.len(),
        "snapshot sizes"
    );
    Ok(compute_diff(&subject_snapshot, &baseline_snapshot, Sentinel::NoChanges))
}
