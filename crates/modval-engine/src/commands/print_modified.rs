//! Node-vs-default command with boundary logging.
//!
//! ## Pipeline
//! 1. Exactly one selected node
//! 2. Collection context from the subject (label, channel depth)
//! 3. Subject snapshot over annotation and input properties
//! 4. Factory-default baseline via a transient node
//! 5. Diff; an output-variant marker in the diff overrides it to unsupported
//! 6. Annotation on the subject
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for this operation; `modval-core`
//! only emits `tracing::debug!`/`warn!` details.

#![allow(clippy::result_large_err)]

use crate::commands::annotate::{write_annotation, AnnotationReport};
use crate::commands::selection::require_selection;
use modval_core::diff::{compute_diff, DiffResult, Sentinel};
use modval_core::errors::{ExError, ModvalError};
use modval_core::resolve::{resolve_default_baseline, Baseline};
use modval_core::snapshot::{CollectContext, Collector};
use modval_core::{log_op_end, log_op_error, log_op_start};
use modval_core::{Host, NodeId, PluginConfig, PropertyCategory};
use modval_core_types::InvocationContext;

const OP: &str = "print_modified_values";

/// Categories compared against the factory default
pub const DEFAULT_CATEGORIES: [PropertyCategory; 2] =
    [PropertyCategory::Annotation, PropertyCategory::Input];

/// Annotate the single selected node with its non-default values
///
/// Unsupported node types still get an annotation (`Non: Supported`).
///
/// ## Errors
///
/// - `InvalidSelection`: other than one node selected
/// - `NotFound`: the selected node vanished from the graph
/// - `Host`: the annotation could not be created
pub fn print_modified_values<H: Host>(
    host: &mut H,
    config: &PluginConfig,
    ctx: &InvocationContext,
) -> Result<AnnotationReport, ExError> {
    log_op_start!(OP, ctx);
    let start = std::time::Instant::now();

    let report = print_modified_values_impl(host, config).map_err(|e| {
        let ex = ExError::from(e).with_op(OP).with_invocation_id(ctx.invocation_id.clone());
        log_op_error!(OP, ctx, start, &ex);
        ex
    })?;

    log_op_end!(
        OP,
        ctx,
        start,
        node_id = report.node_id.as_str(),
        diff_len = report.diff.entries.len()
    );

    Ok(report)
}

fn print_modified_values_impl<H: Host>(
    host: &mut H,
    config: &PluginConfig,
) -> Result<AnnotationReport, ModvalError> {
    let selected = require_selection(&*host, 1)?;
    let subject_id = &selected[0];

    let diff = modified_values(host, config, subject_id)?;
    write_annotation(host, subject_id, diff, config.comment_offset)
}

/// Diff one node against its factory default without annotating
///
/// # Errors
///
/// Returns `NodeNotFound` when `node_id` is not in the graph.
pub fn modified_values<H: Host>(
    host: &mut H,
    config: &PluginConfig,
    node_id: &NodeId,
) -> Result<DiffResult, ModvalError> {
    let collector = Collector::new(config);

    let (collect_ctx, subject) = {
        let node = host.node(node_id).ok_or_else(|| ModvalError::NodeNotFound {
            node_id: node_id.to_string(),
        })?;
        let collect_ctx = CollectContext::for_node(&*host, node, config);
        let subject = collector.collect(node, &DEFAULT_CATEGORIES, &collect_ctx);
        (collect_ctx, subject)
    };

    let baseline =
        resolve_default_baseline(host, node_id, &collector, &DEFAULT_CATEGORIES, &collect_ctx)?;

    let diff = match baseline {
        Baseline::Snapshot(baseline) => {
            tracing::debug!(
                subject_len = subject.len(),
                baseline_len = baseline.len(),
                "snapshot sizes"
            );
            compute_diff(&subject, &baseline, Sentinel::AllByDefault)
        }
        Baseline::Unsupported { reason } => {
            tracing::debug!(node_id = %node_id, %reason, "node not supported");
            DiffResult::sentinel(Sentinel::NonSupported)
        }
    };

    // Output variants share their label with the plain node; only they expose this key.
    if diff.contains_label(&config.output_variant_marker) {
        tracing::debug!(marker = %config.output_variant_marker, "output variant detected");
        return Ok(DiffResult::sentinel(Sentinel::NonSupported));
    }
    Ok(diff)
}
