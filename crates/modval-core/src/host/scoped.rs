//! Scoped acquisition of transient host state
//!
//! Resolving a factory default materializes a throwaway node (and, for
//! sub-graph instances, loads its package). Both guards release what they
//! acquired when dropped, so every exit path of a resolution cleans up.
//! Nest a [`TransientNode`] inside a [`TransientPackage`] and the node is
//! deleted before the package is unloaded.

use crate::errors::{ModvalError, Result};
use crate::host::{HostGraph, NodeHandle, NodeId, PackageId, PackageManager, ResourceRef};
use std::ops::{Deref, DerefMut};

/// A user package loaded for the lifetime of the guard
pub struct TransientPackage<'h, H: PackageManager> {
    host: &'h mut H,
    package: PackageId,
    path: String,
}

impl<'h, H: PackageManager> TransientPackage<'h, H> {
    /// # Errors
    ///
    /// Propagates the host's load failure; nothing needs releasing then.
    pub fn load(host: &'h mut H, path: &str) -> Result<Self> {
        let package = host.load_user_package(path)?;
        tracing::debug!(path, "transient package loaded");
        Ok(Self {
            host,
            package,
            path: path.to_string(),
        })
    }

    pub fn id(&self) -> &PackageId {
        &self.package
    }

    /// Look up a resource in the loaded package
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the package has no such resource.
    pub fn resource(&self, identifier: &str) -> Result<ResourceRef> {
        self.host
            .find_resource(&self.package, identifier)
            .ok_or_else(|| ModvalError::ResourceNotFound {
                package_path: self.path.clone(),
                identifier: identifier.to_string(),
            })
    }
}

impl<H: PackageManager> Deref for TransientPackage<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: PackageManager> DerefMut for TransientPackage<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: PackageManager> Drop for TransientPackage<'_, H> {
    fn drop(&mut self) {
        match self.host.unload_user_package(&self.package) {
            Ok(()) => tracing::debug!(path = %self.path, "transient package unloaded"),
            Err(e) => tracing::warn!(path = %self.path, error = %e, "failed to unload transient package"),
        }
    }
}

/// A node created in the working graph for the lifetime of the guard
pub struct TransientNode<'h, H: HostGraph> {
    host: &'h mut H,
    node: NodeId,
}

impl<'h, H: HostGraph> TransientNode<'h, H> {
    /// Create a fresh built-in operation node
    ///
    /// # Errors
    ///
    /// Propagates the host's creation failure.
    pub fn atomic(host: &'h mut H, definition_id: &str) -> Result<Self> {
        let node = host.new_node(definition_id)?;
        tracing::debug!(definition_id, node_id = %node, "transient node created");
        Ok(Self { host, node })
    }

    /// Create a fresh instance of a sub-graph resource
    ///
    /// # Errors
    ///
    /// Propagates the host's instantiation failure.
    pub fn instance(host: &'h mut H, resource: &ResourceRef) -> Result<Self> {
        let node = host.new_instance_node(resource)?;
        tracing::debug!(identifier = %resource.identifier, node_id = %node, "transient instance created");
        Ok(Self { host, node })
    }

    pub fn id(&self) -> &NodeId {
        &self.node
    }

    /// # Errors
    ///
    /// Returns `NodeNotFound` if the host lost the node it just created.
    pub fn handle(&self) -> Result<&dyn NodeHandle> {
        self.host
            .node(&self.node)
            .ok_or_else(|| ModvalError::NodeNotFound {
                node_id: self.node.to_string(),
            })
    }
}

impl<H: HostGraph> Deref for TransientNode<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: HostGraph> Drop for TransientNode<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.host.delete_node(&self.node) {
            tracing::warn!(node_id = %self.node, error = %e, "failed to delete transient node");
        }
    }
}
