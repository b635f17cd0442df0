#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::*;
use modval_core::host::memory::{MemoryHost, NodeTemplate};
use modval_core::snapshot::{detect_channel_depth, ChannelDepth};
use modval_core::value::PropertyValue;

fn levels_fed_by(bpp: u32) -> (MemoryHost, modval_core::NodeId) {
    let mut host = MemoryHost::new();
    let source = host.add_node(NodeTemplate::new("Perlin Noise").output_bpp("output", bpp));
    let levels = host.add_node(levels("0.25"));
    host.connect(&source, "output", &levels, "input1");
    (host, levels)
}

#[test]
fn test_dual_mode_quad_collapses_on_gray_input() {
    let (host, levels) = levels_fed_by(1);
    assert_eq!(detect_channel_depth(&host, &levels), ChannelDepth::Gray);

    let s = snapshot(&host, &levels);
    assert_eq!(s.get("Level In Low"), Some(&PropertyValue::Float("0.25".into())));
}

#[test]
fn test_dual_mode_quad_kept_on_color_input() {
    let (host, levels) = levels_fed_by(4);
    let s = snapshot(&host, &levels);
    assert_eq!(
        s.get("Level In Low"),
        Some(&PropertyValue::FloatQuad([
            "0.25".into(),
            "0.25".into(),
            "0.25".into(),
            "0.0".into()
        ]))
    );
}

#[test]
fn test_quad_on_other_nodes_never_collapses() {
    let mut host = MemoryHost::new();
    let id = host.add_node(
        NodeTemplate::new("HSL").input("hsl", "Color", float4(["0.5", "0.5", "0.5", "1"])),
    );
    assert!(matches!(
        snapshot(&host, &id).get("Color"),
        Some(PropertyValue::FloatQuad(_))
    ));
}

#[test]
fn test_duplicate_labels_keep_last_value() {
    let mut host = MemoryHost::new();
    let id = host.add_node(
        NodeTemplate::new("Transformation 2D")
            .input("offset", "Offset", float("0.1"))
            .input("rotation", "Rotation", float("0.25"))
            .input("skew", "Angle of Skew", float("0.1"))
            .input("rotation2", "Pattern Rotation", float("0.5")),
    );
    let s = snapshot(&host, &id);
    assert_eq!(
        s.labels().collect::<Vec<_>>(),
        ["Offset", "Rot-Turns", "Angle-Turns"]
    );
    assert_eq!(s.get("Rot-Turns"), Some(&PropertyValue::Float("0.5".into())));
}

#[test]
fn test_blend_label_outside_blend_node_uses_alias_table() {
    let mut host = MemoryHost::new();
    let id = host.add_node(NodeTemplate::new("Tile Sampler").input(
        "blend",
        "Blending Mode",
        enumeration(1, &["add", "max"]),
    ));
    assert_eq!(
        snapshot(&host, &id).get("Blend"),
        Some(&PropertyValue::Enum("Max".into()))
    );
}

#[test]
fn test_out_of_table_blend_index_falls_back() {
    let mut host = MemoryHost::new();
    let mut names = vec!["mode"; 20];
    names[15] = "exclusion";
    let id = host.add_node(NodeTemplate::new("Blend").input(
        "blendingmode",
        "Blending Mode",
        enumeration(15, &names),
    ));
    assert_eq!(
        snapshot(&host, &id).get("Blend"),
        Some(&PropertyValue::Enum("Exclusion".into()))
    );
}
