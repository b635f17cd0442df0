use modval_core::host::memory::{MemoryHost, NodeTemplate};
use modval_core::value::{Enumerator, RawValue};

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
pub fn blend_mode(index: i64) -> RawValue {
    RawValue::enumeration(
        format!("SDValueEnum(\"sbs::compositing::blendingmode\", {index})"),
        Vec::new(),
    )
}

#[allow(dead_code)]
pub fn tiling(index: i64) -> RawValue {
    RawValue::enumeration(
        format!("SDValueEnum(\"sbs::compositing::tiling2\", {index})"),
        vec![
            Enumerator::new("no_tiling", 0),
            Enumerator::new("horizontal_tiling", 1),
            Enumerator::new("vertical_tiling", 2),
        ],
    )
}

#[allow(dead_code)]
pub fn blend(mode: i64, opacity: &str) -> NodeTemplate {
    NodeTemplate::new("Blend")
        .connectable_input("source", "Source")
        .connectable_input("destination", "Destination")
        .input("blendingmode", "Blending Mode", blend_mode(mode))
        .input("opacitymult", "Opacity", float(opacity))
}

#[allow(dead_code)]
pub fn transform(rotation: &str, tiling_mode: i64) -> NodeTemplate {
    NodeTemplate::new("Transformation 2D")
        .input("rotation", "Rotation", float(rotation))
        .input("tiling", "Tiling Mode", tiling(tiling_mode))
        .output("unique_filter_output", "Output", RawValue::new("SDValueTexture", "SDValueTexture(SDTexture(RGBA8))"))
}

#[allow(dead_code)]
pub fn levels(low: &str) -> NodeTemplate {
    NodeTemplate::new("Levels")
        .connectable_input("input1", "Input")
        .input("levelinlow", "Level In Low", float4([low, low, low, "0"]))
}

#[allow(dead_code)]
pub fn normal(intensity: &str) -> NodeTemplate {
    NodeTemplate::new("Normal").input("intensity", "Intensity", float(intensity))
}

#[allow(dead_code)]
pub fn tile_generator(x_amount: &str) -> NodeTemplate {
    NodeTemplate::new("Tile Generator")
        .input("x_amount", "X Amount", RawValue::new("SDValueInt", format!("SDValueInt(int({x_amount}))")))
        .input("gradient", "Gradient", RawValue::new("SDValueArray", "SDValueArray(SDValueStruct(SDValueFloat(float(0)),SDValueColorRGBA(ColorRGBA(0,0,0,1))))"))
}

/// Host with the built-in definitions and one sub-graph package
#[allow(dead_code)]
pub fn library_host() -> MemoryHost {
    let mut host = MemoryHost::new().with_grid_size(16.0);
    host.register_definition("sbs::compositing::blend", "Blend", blend(0, "1"));
    host.register_definition("sbs::compositing::transformation", "Transformation 2D", transform("0", 0));
    host.register_definition("sbs::compositing::levels", "Levels", levels("0"));
    host.register_definition("sbs::compositing::normal", "Normal", normal("1"));
    host.register_package(PACKAGE_PATH, RESOURCE_URL, tile_generator("10"));
    host
}
