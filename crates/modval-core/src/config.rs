//! Plugin configuration
//!
//! Every table the comparison relies on lives here so that a studio can
//! tune precision or extend the allow-list without rebuilding. The defaults
//! reproduce the shipped plugin behaviour exactly.
//!
//! ```
//! use modval_core::config::PluginConfig;
//!
//! let cfg = PluginConfig::from_toml_str("precision = 3").unwrap();
//! assert_eq!(cfg.precision, 3);
//! assert_eq!(cfg.atomic_module_id, "sbs::compositing");
//! ```

use crate::errors::{ModvalError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Decimal places kept for float components
    pub precision: u32,
    /// Annotation offset from the node, in host grid units
    pub comment_offset: f32,
    /// Nodes whose 4-channel controls collapse to a scalar on grayscale input
    pub dual_mode_nodes: Vec<String>,
    /// Module listing the built-in (atomic) operation definitions
    pub atomic_module_id: String,
    /// Atomic node labels with a resolvable factory default
    pub supported_atomic: Vec<String>,
    /// Resource-backed node labels that cannot be re-instantiated
    pub unsupported_instances: Vec<String>,
    /// Property labels shortened for display, matched exactly
    pub label_aliases: IndexMap<String, String>,
    /// Scalar values shortened for display, matched exactly
    pub value_aliases: IndexMap<String, String>,
    /// Node label that triggers the dedicated blend-mode lookup
    pub blend_node_label: String,
    /// Property label carrying the blend mode on that node
    pub blend_property_label: String,
    /// Short label used for the blend mode
    pub blend_short_label: String,
    /// Blend mode names by raw enum index
    pub blend_modes: Vec<String>,
    /// Diff key that only the output variant of a shared-label node carries
    pub output_variant_marker: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            comment_offset: 0.5,
            dual_mode_nodes: strings(&["Levels"]),
            atomic_module_id: "sbs::compositing".to_string(),
            supported_atomic: strings(&[
                "Blend",
                "Blur",
                "Channels Shuffle",
                "Curve",
                "Directional Blur",
                "Directional Warp",
                "Distance",
                "Emboss",
                "Gradient (Dynamic)",
                "Gradient Map",
                "Grayscale Conversion",
                "HSL",
                "Levels",
                "Normal",
                "Sharpen",
                "Text",
                "Transformation 2D",
                "Uniform Color",
                "Warp",
            ]),
            unsupported_instances: strings(&["SVG", "Bitmap", "FX-Map"]),
            label_aliases: pairs(&[
                ("Rotation", "Rot-Turns"),
                ("Angle", "Rot-Turns"),
                ("Output Color", "RGBA"),
                ("Blending Mode", "Blend"),
                ("Tiling Mode", "Tiling"),
                ("Edge Roundness", "Edge Round"),
                ("Vector Map Displacement", "Vector Map Displ"),
                ("Vector Map Multiplier", "Vector Map Multip"),
                ("Mask Map Threshold", "Mask Map Thres"),
                ("Luminance By Number", "Lumi by Number"),
                ("Luminance By Scale", "Lumi by Scale"),
                ("Luminance Random", "Lumi Random"),
                ("Luminance by Ring Number", "Lumi by Ring Number"),
                ("Luminance by Pattern Number", "Lumi by Patt Number"),
                ("Color Parametrization Multiplier", "Color Param Multip"),
                ("Color Parametrization Mode", "Color Param Mode"),
                ("Alpha Channel Content", "Alpha Chan Cont"),
                ("Cropping Area", "Crop"),
                ("Gradient Orientation", "Grad Orient"),
                ("Gradient RGBA", "Grad RGBA"),
                ("Spline Rotation Random", "Spline Rot Rand"),
                ("Warp Angle Input Multiplier", "Warp Ang Inp Multi"),
                ("Spline Distortion Random", "Spline Distr Rand"),
                ("Spline Distortion Frequency", "Spline Distr Freq"),
                ("Spline Width Random", "Spline Width Rand"),
                ("Rotation Random", "Rot Rand"),
                ("Scale Random", "Scale Rand"),
                ("Transform matrix", "Matrix"),
                ("Interstice X/Y", "Inters X/Y"),
                ("Pattern Input Number", "Patt Input Numb"),
            ]),
            value_aliases: pairs(&[
                ("true", "TRUE"),
                ("false", "FALSE"),
                ("No_Tiling", "NO"),
                ("Horizontal_Tiling", "HORIZ"),
                ("Vertical_Tiling", "VERT"),
                ("Image Input", "Img Input"),
            ]),
            blend_node_label: "Blend".to_string(),
            blend_property_label: "Blending Mode".to_string(),
            blend_short_label: "Blend".to_string(),
            blend_modes: strings(&[
                "Copy",
                "Add",
                "Subtract",
                "Multiply",
                "Add Sub",
                "Max",
                "Min",
                "Switch",
                "Divide",
                "Overlay",
                "Screen",
                "Soft Light",
            ]),
            output_variant_marker: "Mipmaps".to_string(),
        }
    }
}

impl PluginConfig {
    /// Parse a configuration from TOML text; omitted keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the text is not valid TOML, names an
    /// unknown key, or fails [`PluginConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: PluginConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file cannot be read, otherwise as
    /// [`PluginConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ModvalError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let cfg = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), precision = cfg.precision, "loaded plugin config");
        Ok(cfg)
    }

    /// Check value ranges that serde cannot express
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a precision above 15 digits or a
    /// non-finite comment offset.
    pub fn validate(&self) -> Result<()> {
        if self.precision > 15 {
            return Err(ModvalError::InvalidConfig {
                message: format!("precision must be at most 15, got {}", self.precision),
            });
        }
        if !self.comment_offset.is_finite() {
            return Err(ModvalError::InvalidConfig {
                message: "comment_offset must be finite".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_dual_mode(&self, node_label: &str) -> bool {
        self.dual_mode_nodes.iter().any(|n| n == node_label)
    }

    pub fn is_supported_atomic(&self, node_label: &str) -> bool {
        self.supported_atomic.iter().any(|n| n == node_label)
    }

    pub fn is_unsupported_instance(&self, node_label: &str) -> bool {
        self.unsupported_instances.iter().any(|n| n == node_label)
    }

    /// Blend mode name for a raw enum index
    pub fn blend_mode(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.blend_modes.get(i))
            .map(String::as_str)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> IndexMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PluginConfig::default();
        assert_eq!(cfg.precision, 2);
        assert!(cfg.is_dual_mode("Levels"));
        assert!(cfg.is_supported_atomic("Gradient (Dynamic)"));
        assert!(cfg.is_unsupported_instance("FX-Map"));
        assert_eq!(cfg.blend_mode(3), Some("Multiply"));
        assert_eq!(cfg.blend_mode(11), Some("Soft Light"));
        assert_eq!(cfg.blend_mode(12), None);
        assert_eq!(cfg.blend_mode(-1), None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let cfg = PluginConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, PluginConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PluginConfig::from_toml_str("rounding = 3").unwrap_err();
        assert!(matches!(err, ModvalError::InvalidConfig { .. }));
    }

    #[test]
    fn test_precision_range() {
        let err = PluginConfig::from_toml_str("precision = 40").unwrap_err();
        assert!(matches!(err, ModvalError::InvalidConfig { .. }));
    }
}
