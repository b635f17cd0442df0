//! Capability traits over the host application's object model.
//!
//! Everything this crate needs from the material-authoring application goes
//! through these traits. A production adapter wraps the host's scripting
//! API; [`memory::MemoryHost`] implements them in memory for tests.

pub mod memory;
pub mod scoped;

use crate::errors::Result;
use crate::value::RawValue;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use scoped::{TransientNode, TransientPackage};

/// Stable node identity within a graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a package loaded through [`PackageManager`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId(pub String);

/// Handle of an annotation created through [`HostGraph::new_comment`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentId(pub String);

/// Property categories in the order snapshots visit them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyCategory {
    Annotation,
    Input,
    Output,
}

/// A property slot as declared by the node's definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub id: String,
    pub label: String,
    /// Whether an upstream output can be wired into this slot
    pub connectable: bool,
}

impl PropertyDecl {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            connectable: false,
        }
    }

    pub fn connectable(mut self) -> Self {
        self.connectable = true;
        self
    }
}

/// A wire feeding one of the node's input slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub upstream_node: NodeId,
    /// Output property id on the upstream node
    pub upstream_property: String,
}

/// Reference from an instance node to the sub-graph resource it instantiates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// File path of the package owning the resource
    pub package_path: String,
    /// Resource identifier (url) inside that package
    pub identifier: String,
}

/// A built-in operation definition listed by a host module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionInfo {
    pub id: String,
    pub label: String,
}

/// Read-only view of one node
pub trait NodeHandle {
    fn id(&self) -> &NodeId;

    /// Display label of the node's definition (the node title)
    fn definition_label(&self) -> &str;

    /// Declared properties of a category, in host declaration order
    fn properties(&self, category: PropertyCategory) -> Vec<PropertyDecl>;

    /// Current serialized value; `None` when the host reports no value
    fn property_value(&self, property: &PropertyDecl) -> Option<RawValue>;

    /// Resource the node instantiates; `None` for atomic nodes
    fn referenced_resource(&self) -> Option<ResourceRef>;

    /// Wires feeding an input property
    fn connections(&self, property: &PropertyDecl) -> Vec<Connection>;
}

/// The working graph: lookup, mutation and annotation
pub trait HostGraph {
    /// Currently selected nodes, in whatever order the host reports them
    fn selected_nodes(&self) -> Vec<NodeId>;

    fn node(&self, id: &NodeId) -> Option<&dyn NodeHandle>;

    /// Bytes per pixel of the image an output property produces
    fn output_bytes_per_pixel(&self, node: &NodeId, property_id: &str) -> Option<u32>;

    /// Built-in operation definitions of a module
    fn module_definitions(&self, module_id: &str) -> Vec<DefinitionInfo>;

    /// Instantiate a built-in operation
    ///
    /// # Errors
    ///
    /// Returns `Host` when the host rejects the definition id.
    fn new_node(&mut self, definition_id: &str) -> Result<NodeId>;

    /// Instantiate a sub-graph resource
    ///
    /// # Errors
    ///
    /// Returns `Host` when the resource cannot be instantiated.
    fn new_instance_node(&mut self, resource: &ResourceRef) -> Result<NodeId>;

    /// # Errors
    ///
    /// Returns `Host` when the node does not exist or cannot be removed.
    fn delete_node(&mut self, id: &NodeId) -> Result<()>;

    /// Size of the first grid level, used to place annotations
    fn grid_size(&self) -> f32;

    /// Create an annotation as a child of `parent`
    ///
    /// # Errors
    ///
    /// Returns `Host` when the parent is missing.
    fn new_comment(&mut self, parent: &NodeId, position: [f32; 2], description: &str)
        -> Result<CommentId>;
}

/// Transient access to user packages on disk
pub trait PackageManager {
    /// # Errors
    ///
    /// Returns `Host` when the package file cannot be loaded.
    fn load_user_package(&mut self, path: &str) -> Result<PackageId>;

    fn find_resource(&self, package: &PackageId, identifier: &str) -> Option<ResourceRef>;

    /// # Errors
    ///
    /// Returns `Host` when the package is not loaded.
    fn unload_user_package(&mut self, package: &PackageId) -> Result<()>;
}

/// Everything the plugin commands need from the host
pub trait Host: HostGraph + PackageManager {}

impl<T: HostGraph + PackageManager> Host for T {}
