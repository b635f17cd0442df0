//! In-memory host
//!
//! `MemoryHost` implements every host capability trait over plain maps. It
//! records each mutation in a journal so tests can assert that transient
//! nodes and packages were released and in which order.

use crate::errors::{ModvalError, Result};
use crate::host::{
    CommentId, Connection, DefinitionInfo, HostGraph, NodeHandle, NodeId, PackageId,
    PackageManager, PropertyCategory, PropertyDecl, ResourceRef,
};
use crate::value::RawValue;
use indexmap::IndexMap;

/// Blueprint for a node: its definition label, declared properties and values
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTemplate {
    label: String,
    properties: Vec<(PropertyCategory, PropertyDecl, Option<RawValue>)>,
    resource: Option<ResourceRef>,
    output_bpp: IndexMap<String, u32>,
}

impl NodeTemplate {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            properties: Vec::new(),
            resource: None,
            output_bpp: IndexMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn property(
        mut self,
        category: PropertyCategory,
        decl: PropertyDecl,
        value: Option<RawValue>,
    ) -> Self {
        self.properties.push((category, decl, value));
        self
    }

    pub fn annotation(self, id: &str, label: &str, value: RawValue) -> Self {
        self.property(PropertyCategory::Annotation, PropertyDecl::new(id, label), Some(value))
    }

    pub fn input(self, id: &str, label: &str, value: RawValue) -> Self {
        self.property(PropertyCategory::Input, PropertyDecl::new(id, label), Some(value))
    }

    /// An input slot the host reports no value for
    pub fn unset_input(self, id: &str, label: &str) -> Self {
        self.property(PropertyCategory::Input, PropertyDecl::new(id, label), None)
    }

    /// A connectable (image) input slot without a value
    pub fn connectable_input(self, id: &str, label: &str) -> Self {
        self.property(
            PropertyCategory::Input,
            PropertyDecl::new(id, label).connectable(),
            None,
        )
    }

    pub fn output(self, id: &str, label: &str, value: RawValue) -> Self {
        self.property(PropertyCategory::Output, PropertyDecl::new(id, label), Some(value))
    }

    /// Bytes per pixel produced by an output property
    pub fn output_bpp(mut self, property_id: &str, bytes_per_pixel: u32) -> Self {
        self.output_bpp.insert(property_id.to_string(), bytes_per_pixel);
        self
    }

    /// Mark the node as an instance of a packaged sub-graph
    pub fn instance_of(mut self, package_path: &str, identifier: &str) -> Self {
        self.resource = Some(ResourceRef {
            package_path: package_path.to_string(),
            identifier: identifier.to_string(),
        });
        self
    }

    /// Replace the value of an existing property
    pub fn set(mut self, property_id: &str, value: RawValue) -> Self {
        for (_, decl, slot) in self.properties.iter_mut() {
            if decl.id == property_id {
                *slot = Some(value.clone());
            }
        }
        self
    }
}

/// A node living in a [`MemoryHost`] graph
#[derive(Debug, Clone)]
pub struct MemoryNode {
    id: NodeId,
    template: NodeTemplate,
    connections: IndexMap<String, Vec<Connection>>,
}

impl NodeHandle for MemoryNode {
    fn id(&self) -> &NodeId {
        &self.id
    }

    fn definition_label(&self) -> &str {
        &self.template.label
    }

    fn properties(&self, category: PropertyCategory) -> Vec<PropertyDecl> {
        self.template
            .properties
            .iter()
            .filter(|(c, _, _)| *c == category)
            .map(|(_, decl, _)| decl.clone())
            .collect()
    }

    fn property_value(&self, property: &PropertyDecl) -> Option<RawValue> {
        self.template
            .properties
            .iter()
            .find(|(_, decl, _)| decl.id == property.id)
            .and_then(|(_, _, value)| value.clone())
    }

    fn referenced_resource(&self) -> Option<ResourceRef> {
        self.template.resource.clone()
    }

    fn connections(&self, property: &PropertyDecl) -> Vec<Connection> {
        self.connections.get(&property.id).cloned().unwrap_or_default()
    }
}

/// An annotation written into the graph
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryComment {
    pub id: CommentId,
    pub parent: NodeId,
    pub position: [f32; 2],
    pub description: String,
}

/// In-memory implementation of the host capability traits
#[derive(Debug, Clone)]
pub struct MemoryHost {
    nodes: IndexMap<NodeId, MemoryNode>,
    selection: Vec<NodeId>,
    definitions: IndexMap<String, (String, NodeTemplate)>,
    packages: IndexMap<String, IndexMap<String, NodeTemplate>>,
    loaded: IndexMap<PackageId, String>,
    comments: Vec<MemoryComment>,
    deleted: Vec<NodeId>,
    unloaded: Vec<String>,
    journal: Vec<String>,
    failing: Vec<String>,
    grid_size: f32,
    next_id: u64,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            selection: Vec::new(),
            definitions: IndexMap::new(),
            packages: IndexMap::new(),
            loaded: IndexMap::new(),
            comments: Vec::new(),
            deleted: Vec::new(),
            unloaded: Vec::new(),
            journal: Vec::new(),
            failing: Vec::new(),
            grid_size: 16.0,
            next_id: 1,
        }
    }

    pub fn with_grid_size(mut self, grid_size: f32) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Register a built-in operation definition; `id` is `<module>::<name>`
    pub fn register_definition(&mut self, id: &str, label: &str, template: NodeTemplate) {
        self.definitions
            .insert(id.to_string(), (label.to_string(), template));
    }

    /// Make a resource available in a package file
    pub fn register_package(&mut self, path: &str, identifier: &str, template: NodeTemplate) {
        self.packages
            .entry(path.to_string())
            .or_default()
            .insert(identifier.to_string(), template);
    }

    /// Add a node to the working graph
    pub fn add_node(&mut self, template: NodeTemplate) -> NodeId {
        let id = self.allocate_id();
        self.nodes.insert(
            id.clone(),
            MemoryNode {
                id: id.clone(),
                template,
                connections: IndexMap::new(),
            },
        );
        id
    }

    /// Wire `upstream`'s output into `downstream`'s input
    pub fn connect(
        &mut self,
        upstream: &NodeId,
        output_property: &str,
        downstream: &NodeId,
        input_property: &str,
    ) {
        if let Some(node) = self.nodes.get_mut(downstream) {
            node.connections
                .entry(input_property.to_string())
                .or_default()
                .push(Connection {
                    upstream_node: upstream.clone(),
                    upstream_property: output_property.to_string(),
                });
        }
    }

    pub fn select(&mut self, nodes: &[NodeId]) {
        self.selection = nodes.to_vec();
    }

    /// Make the named host call fail from now on (`new_node`, `delete_node`, ...)
    pub fn fail_on(&mut self, call: &str) {
        self.failing.push(call.to_string());
    }

    pub fn comments(&self) -> &[MemoryComment] {
        &self.comments
    }

    pub fn deleted_nodes(&self) -> &[NodeId] {
        &self.deleted
    }

    pub fn unloaded_paths(&self) -> &[String] {
        &self.unloaded
    }

    pub fn loaded_packages(&self) -> Vec<&str> {
        self.loaded.values().map(String::as_str).collect()
    }

    /// Every mutating call in order, e.g. `new_node sbs::compositing::blend`
    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId::new(format!("node-{}", self.next_id));
        self.next_id += 1;
        id
    }

    fn check(&mut self, call: &str, detail: &str) -> Result<()> {
        self.journal.push(format!("{call} {detail}"));
        if self.failing.iter().any(|f| f == call) {
            return Err(ModvalError::host(call, "injected failure"));
        }
        Ok(())
    }
}

impl HostGraph for MemoryHost {
    fn selected_nodes(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn node(&self, id: &NodeId) -> Option<&dyn NodeHandle> {
        self.nodes.get(id).map(|n| n as &dyn NodeHandle)
    }

    fn output_bytes_per_pixel(&self, node: &NodeId, property_id: &str) -> Option<u32> {
        self.nodes
            .get(node)
            .and_then(|n| n.template.output_bpp.get(property_id).copied())
    }

    fn module_definitions(&self, module_id: &str) -> Vec<DefinitionInfo> {
        let prefix = format!("{module_id}::");
        self.definitions
            .iter()
            .filter(|(id, _)| id.starts_with(&prefix))
            .map(|(id, (label, _))| DefinitionInfo {
                id: id.clone(),
                label: label.clone(),
            })
            .collect()
    }

    fn new_node(&mut self, definition_id: &str) -> Result<NodeId> {
        self.check("new_node", definition_id)?;
        let template = self
            .definitions
            .get(definition_id)
            .map(|(_, t)| t.clone())
            .ok_or_else(|| {
                ModvalError::host("new_node", format!("unknown definition {definition_id}"))
            })?;
        Ok(self.add_node(template))
    }

    fn new_instance_node(&mut self, resource: &ResourceRef) -> Result<NodeId> {
        self.check("new_instance_node", &resource.identifier)?;
        if !self.loaded.values().any(|p| *p == resource.package_path) {
            return Err(ModvalError::host(
                "new_instance_node",
                format!("package {} is not loaded", resource.package_path),
            ));
        }
        let template = self
            .packages
            .get(&resource.package_path)
            .and_then(|p| p.get(&resource.identifier))
            .cloned()
            .ok_or_else(|| {
                ModvalError::host(
                    "new_instance_node",
                    format!("no resource {}", resource.identifier),
                )
            })?;
        let template = template.instance_of(&resource.package_path, &resource.identifier);
        Ok(self.add_node(template))
    }

    fn delete_node(&mut self, id: &NodeId) -> Result<()> {
        self.check("delete_node", id.as_str())?;
        self.nodes
            .shift_remove(id)
            .ok_or_else(|| ModvalError::host("delete_node", format!("no node {id}")))?;
        self.selection.retain(|n| n != id);
        self.deleted.push(id.clone());
        Ok(())
    }

    fn grid_size(&self) -> f32 {
        self.grid_size
    }

    fn new_comment(
        &mut self,
        parent: &NodeId,
        position: [f32; 2],
        description: &str,
    ) -> Result<CommentId> {
        self.check("new_comment", parent.as_str())?;
        if !self.nodes.contains_key(parent) {
            return Err(ModvalError::host("new_comment", format!("no node {parent}")));
        }
        let id = CommentId(format!("comment-{}", self.comments.len() + 1));
        self.comments.push(MemoryComment {
            id: id.clone(),
            parent: parent.clone(),
            position,
            description: description.to_string(),
        });
        Ok(id)
    }
}

impl PackageManager for MemoryHost {
    fn load_user_package(&mut self, path: &str) -> Result<PackageId> {
        self.check("load", path)?;
        if !self.packages.contains_key(path) {
            return Err(ModvalError::host("load_user_package", format!("no package at {path}")));
        }
        let id = PackageId(format!("pkg-{}", self.journal.len()));
        self.loaded.insert(id.clone(), path.to_string());
        Ok(id)
    }

    fn find_resource(&self, package: &PackageId, identifier: &str) -> Option<ResourceRef> {
        let path = self.loaded.get(package)?;
        self.packages
            .get(path)
            .filter(|resources| resources.contains_key(identifier))
            .map(|_| ResourceRef {
                package_path: path.clone(),
                identifier: identifier.to_string(),
            })
    }

    fn unload_user_package(&mut self, package: &PackageId) -> Result<()> {
        self.check("unload", &package.0)?;
        let path = self.loaded.shift_remove(package).ok_or_else(|| {
            ModvalError::host("unload_user_package", format!("{} is not loaded", package.0))
        })?;
        self.unloaded.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(v: &str) -> RawValue {
        RawValue::new("SDValueFloat", format!("SDValueFloat(float({v}))"))
    }

    #[test]
    fn test_properties_filtered_by_category() {
        let mut host = MemoryHost::new();
        let id = host.add_node(
            NodeTemplate::new("Blur")
                .annotation("description", "Description", RawValue::new("SDValueString", "SDValueString(string(x))"))
                .input("intensity", "Intensity", float("10"))
                .unset_input("seed", "Seed"),
        );
        let node = host.node(&id).unwrap();
        let inputs = node.properties(PropertyCategory::Input);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].label, "Intensity");
        assert!(node.property_value(&inputs[1]).is_none());
        assert!(node.properties(PropertyCategory::Output).is_empty());
    }

    #[test]
    fn test_module_definitions_by_prefix() {
        let mut host = MemoryHost::new();
        host.register_definition("sbs::compositing::blur", "Blur", NodeTemplate::new("Blur"));
        host.register_definition("sbs::other::thing", "Thing", NodeTemplate::new("Thing"));
        let defs = host.module_definitions("sbs::compositing");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].label, "Blur");
    }

    #[test]
    fn test_injected_failure() {
        let mut host = MemoryHost::new();
        host.register_definition("sbs::compositing::blur", "Blur", NodeTemplate::new("Blur"));
        host.fail_on("new_node");
        let err = host.new_node("sbs::compositing::blur").unwrap_err();
        assert!(matches!(err, ModvalError::Host { .. }));
        assert_eq!(host.node_count(), 0);
    }

    #[test]
    fn test_instance_requires_loaded_package() {
        let mut host = MemoryHost::new();
        host.register_package("/lib/a.sbs", "pkg:///a", NodeTemplate::new("A"));
        let resource = ResourceRef {
            package_path: "/lib/a.sbs".into(),
            identifier: "pkg:///a".into(),
        };
        assert!(host.new_instance_node(&resource).is_err());
        let pkg = host.load_user_package("/lib/a.sbs").unwrap();
        let id = host.new_instance_node(&resource).unwrap();
        assert_eq!(host.node(&id).unwrap().referenced_resource(), Some(resource));
        host.unload_user_package(&pkg).unwrap();
        assert_eq!(host.unloaded_paths(), ["/lib/a.sbs"]);
    }

    #[test]
    fn test_comment_attached_to_parent() {
        let mut host = MemoryHost::new().with_grid_size(32.0);
        let id = host.add_node(NodeTemplate::new("Blur"));
        host.new_comment(&id, [-16.0, 16.0], "Intensity: 12.0").unwrap();
        assert_eq!(host.comments()[0].parent, id);
        assert_eq!(host.grid_size(), 32.0);
    }
}
