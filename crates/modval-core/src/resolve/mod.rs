//! Reference resolution: finding the snapshot a node is compared against
//!
//! For node-vs-default the baseline is a freshly created node of the same
//! type. The host offers no "default value" query, so the only way to read
//! factory defaults is to materialize a new node, snapshot it and remove it
//! again. Transient nodes and packages are held by guards from
//! [`crate::host::scoped`] and released on every path.

use crate::errors::{ModvalError, Result};
use crate::host::{Host, HostGraph, NodeId, PropertyCategory, ResourceRef};
use crate::host::{TransientNode, TransientPackage};
use crate::snapshot::{CollectContext, Collector, NodeSnapshot};

/// What a subject node is compared against
#[derive(Debug, Clone, PartialEq)]
pub enum Baseline {
    Snapshot(NodeSnapshot),
    /// The node type has no usable baseline
    Unsupported { reason: String },
}

/// Resolve the factory-default snapshot of a node
///
/// Unsupported node types and failed resolutions come back as
/// [`Baseline::Unsupported`]; they are not errors.
///
/// # Errors
///
/// Returns `NodeNotFound` when `node_id` is not in the graph.
pub fn resolve_default_baseline<H: Host>(
    host: &mut H,
    node_id: &NodeId,
    collector: &Collector<'_>,
    categories: &[PropertyCategory],
    ctx: &CollectContext,
) -> Result<Baseline> {
    let config = collector.config();
    let node = host.node(node_id).ok_or_else(|| ModvalError::NodeNotFound {
        node_id: node_id.to_string(),
    })?;
    let label = node.definition_label().to_string();
    let resource = node.referenced_resource();

    let resolved = match resource {
        Some(_) if config.is_unsupported_instance(&label) => Err(ModvalError::UnsupportedNode {
            label,
            reason: "resource-backed node cannot be re-instantiated".to_string(),
        }),
        Some(resource) => default_instance(host, &resource, collector, categories, ctx),
        None if !config.is_supported_atomic(&label) => Err(ModvalError::UnsupportedNode {
            label,
            reason: "atomic node has no resolvable default".to_string(),
        }),
        None => default_atomic(host, &label, collector, categories, ctx),
    };

    Ok(match resolved {
        Ok(snapshot) => Baseline::Snapshot(snapshot),
        Err(e) => {
            tracing::warn!(node_id = %node_id, error = %e, "no default baseline");
            Baseline::Unsupported {
                reason: e.to_string(),
            }
        }
    })
}

/// Snapshot a fresh instance of the node's sub-graph resource
fn default_instance<H: Host>(
    host: &mut H,
    resource: &ResourceRef,
    collector: &Collector<'_>,
    categories: &[PropertyCategory],
    ctx: &CollectContext,
) -> Result<NodeSnapshot> {
    let mut package = TransientPackage::load(host, &resource.package_path)?;
    let found = package.resource(&resource.identifier)?;
    let reference = TransientNode::instance(&mut *package, &found)?;
    let handle = reference.handle()?;
    Ok(collector.collect(handle, categories, ctx))
}

/// Snapshot a fresh node of the built-in operation carrying `label`
fn default_atomic<H: Host>(
    host: &mut H,
    label: &str,
    collector: &Collector<'_>,
    categories: &[PropertyCategory],
    ctx: &CollectContext,
) -> Result<NodeSnapshot> {
    let module_id = &collector.config().atomic_module_id;
    // Later definitions shadow earlier ones with the same label.
    let definition = host
        .module_definitions(module_id)
        .into_iter()
        .filter(|d| d.label == label)
        .last()
        .ok_or_else(|| ModvalError::DefinitionNotFound {
            module_id: module_id.clone(),
            label: label.to_string(),
        })?;
    let reference = TransientNode::atomic(host, &definition.id)?;
    let handle = reference.handle()?;
    Ok(collector.collect(handle, categories, ctx))
}

/// Snapshot a node as it stands, under its own collection context
///
/// # Errors
///
/// Returns `NodeNotFound` when `node_id` is not in the graph.
pub fn snapshot_node<H: HostGraph + ?Sized>(
    host: &H,
    node_id: &NodeId,
    collector: &Collector<'_>,
    categories: &[PropertyCategory],
) -> Result<NodeSnapshot> {
    let node = host.node(node_id).ok_or_else(|| ModvalError::NodeNotFound {
        node_id: node_id.to_string(),
    })?;
    let ctx = CollectContext::for_node(host, node, collector.config());
    Ok(collector.collect(node, categories, &ctx))
}
