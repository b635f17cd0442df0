//! Writing the diff text back into the graph

use modval_core::diff::{render_human_summary, DiffResult};
use modval_core::errors::ModvalError;
use modval_core::host::CommentId;
use modval_core::{HostGraph, NodeId};
use serde::Serialize;

/// What a command wrote into the graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationReport {
    /// Node the annotation is attached to
    pub node_id: NodeId,
    #[serde(skip)]
    pub comment_id: CommentId,
    /// Annotation body
    pub text: String,
    pub diff: DiffResult,
}

/// Attach `diff` as a new annotation on `node_id`
///
/// The annotation sits half a grid step up-left of the node by default
/// (`comment_offset` grid units on each axis).
///
/// # Errors
///
/// Returns `Host` when the host cannot create the annotation.
pub fn write_annotation<H: HostGraph + ?Sized>(
    host: &mut H,
    node_id: &NodeId,
    diff: DiffResult,
    comment_offset: f32,
) -> Result<AnnotationReport, ModvalError> {
    let text = render_human_summary(&diff);
    let step = host.grid_size() * comment_offset;
    let comment_id = host.new_comment(node_id, [-step, step], &text)?;

    tracing::info!(node_id = %node_id, diff_text = %text, "different values");

    Ok(AnnotationReport {
        node_id: node_id.clone(),
        comment_id,
        text,
        diff,
    })
}
