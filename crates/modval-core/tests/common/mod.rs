use modval_core::host::memory::{MemoryHost, NodeTemplate};
use modval_core::host::{HostGraph, NodeId, PropertyCategory};
use modval_core::snapshot::{CollectContext, Collector, NodeSnapshot};
use modval_core::value::{Enumerator, RawValue};
use modval_core::PluginConfig;

pub const PACKAGE_PATH: &str = "/library/tile_generator.sbs";
pub const RESOURCE_URL: &str = "pkg:///tile_generator";

#[allow(dead_code)]
pub fn float(v: &str) -> RawValue {
    RawValue::new("SDValueFloat", format!("SDValueFloat(float({v}))"))
}

#[allow(dead_code)]
pub fn float4(v: [&str; 4]) -> RawValue {
    RawValue::new("SDValueFloat4", format!("SDValueFloat4(float4({}))", v.join(",")))
}

#[allow(dead_code)]
pub fn boolean(v: bool) -> RawValue {
    RawValue::new("SDValueBool", format!("SDValueBool(bool({v}))"))
}

#[allow(dead_code)]
pub fn enumeration(index: i64, names: &[&str]) -> RawValue {
    let enumerators = names
        .iter()
        .enumerate()
        .map(|(i, n)| Enumerator::new(*n, i as i64))
        .collect();
    RawValue::enumeration(
        format!("SDValueEnum(\"sbs::compositing::enum2\", {index})"),
        enumerators,
    )
}

/// A Levels node with default-looking controls and one connectable input
#[allow(dead_code)]
pub fn levels(level_in_low: &str) -> NodeTemplate {
    NodeTemplate::new("Levels")
        .connectable_input("input1", "Input")
        .input("levelinlow", "Level In Low", float4([level_in_low, level_in_low, level_in_low, "0"]))
        .input("levelinhigh", "Level In High", float4(["1", "1", "1", "1"]))
}

#[allow(dead_code)]
pub fn blur(intensity: &str) -> NodeTemplate {
    NodeTemplate::new("Blur").input("intensity", "Intensity", float(intensity))
}

#[allow(dead_code)]
pub fn tile_generator(rotation: &str) -> NodeTemplate {
    NodeTemplate::new("Tile Generator")
        .input("rotation", "Rotation", float(rotation))
        .input("tiling", "Tiling Mode", enumeration(0, &["no_tiling", "horizontal_tiling"]))
}

/// A host with the built-in definitions and one sub-graph package registered
#[allow(dead_code)]
pub fn library_host() -> MemoryHost {
    let mut host = MemoryHost::new();
    host.register_definition("sbs::compositing::blur", "Blur", blur("10"));
    host.register_definition("sbs::compositing::levels", "Levels", levels("0"));
    host.register_package(PACKAGE_PATH, RESOURCE_URL, tile_generator("0"));
    host
}

/// Snapshot a node with the default config over annotation and input properties
#[allow(dead_code)]
pub fn snapshot(host: &MemoryHost, id: &NodeId) -> NodeSnapshot {
    let config = PluginConfig::default();
    let node = host.node(id).unwrap();
    let ctx = CollectContext::for_node(host, node, &config);
    Collector::new(&config).collect(
        node,
        &[PropertyCategory::Annotation, PropertyCategory::Input],
        &ctx,
    )
}
