//! Property collection
//!
//! Walks a node's declared properties category by category and turns each
//! value into a display-ready entry: normalized, relabelled and aliased.

use crate::config::PluginConfig;
use crate::errors::{ExError, ModvalError};
use crate::host::{HostGraph, NodeHandle, PropertyCategory, PropertyDecl};
use crate::snapshot::depth::{detect_channel_depth, ChannelDepth};
use crate::snapshot::NodeSnapshot;
use crate::value::{decode_enum_index, Normalizer, PropertyValue, RawValue};

const ROTATION_WORD: &str = "Rotation";
const ANGLE_WORD: &str = "Angle";
const ROTATION_TURNS: &str = "Rot-Turns";
const ANGLE_TURNS: &str = "Angle-Turns";

/// Facts about the subject node that steer collection
///
/// Built once from the selected node and reused for its reference node, so
/// the baseline is decoded under the same rules as the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectContext {
    pub node_label: String,
    pub depth: ChannelDepth,
}

impl CollectContext {
    pub fn new(node_label: impl Into<String>, depth: ChannelDepth) -> Self {
        Self {
            node_label: node_label.into(),
            depth,
        }
    }

    /// Inspect a node in the graph; depth is only probed for dual-mode nodes
    pub fn for_node<H: HostGraph + ?Sized>(
        host: &H,
        node: &dyn NodeHandle,
        config: &PluginConfig,
    ) -> Self {
        let label = node.definition_label().to_string();
        let depth = if config.is_dual_mode(&label) {
            detect_channel_depth(host, node.id())
        } else {
            ChannelDepth::Color
        };
        Self::new(label, depth)
    }
}

/// Builds [`NodeSnapshot`]s under one configuration
#[derive(Debug, Clone)]
pub struct Collector<'c> {
    config: &'c PluginConfig,
    normalizer: Normalizer,
}

impl<'c> Collector<'c> {
    pub fn new(config: &'c PluginConfig) -> Self {
        Self {
            config,
            normalizer: Normalizer::new(config.precision),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        self.config
    }

    /// Snapshot a node across the given categories, in the order given
    ///
    /// Properties without a value are omitted. A property whose numeric
    /// payload is malformed is skipped and logged; the rest of the node is
    /// still collected.
    pub fn collect(
        &self,
        node: &dyn NodeHandle,
        categories: &[PropertyCategory],
        ctx: &CollectContext,
    ) -> NodeSnapshot {
        let collapse_quad =
            self.config.is_dual_mode(&ctx.node_label) && ctx.depth == ChannelDepth::Gray;
        let mut snapshot = NodeSnapshot::new();

        for &category in categories {
            for decl in node.properties(category) {
                let Some(raw) = node.property_value(&decl) else {
                    continue;
                };
                match self.entry(&decl, &raw, ctx, collapse_quad) {
                    Ok((label, value)) => snapshot.insert(label, value),
                    Err(e) => {
                        let err = skipped_property(e, node, &decl);
                        tracing::warn!(err.code = err.code(), "skipping property: {err}");
                    }
                }
            }
        }

        tracing::debug!(
            node_id = %node.id(),
            node_label = %ctx.node_label,
            snapshot_len = snapshot.len(),
            "snapshot collected"
        );
        snapshot
    }

    fn entry(
        &self,
        decl: &PropertyDecl,
        raw: &RawValue,
        ctx: &CollectContext,
        collapse_quad: bool,
    ) -> Result<(String, PropertyValue), ModvalError> {
        if let Some(mode) = self.blend_mode(decl, raw, ctx) {
            return Ok((
                self.config.blend_short_label.clone(),
                PropertyValue::Enum(mode.to_string()),
            ));
        }

        let value = self.normalizer.normalize(raw, collapse_quad)?;
        Ok((self.display_label(&decl.label), self.display_value(value)))
    }

    /// Dedicated blend-mode table for the blend node's mode property
    fn blend_mode(&self, decl: &PropertyDecl, raw: &RawValue, ctx: &CollectContext) -> Option<&str> {
        if ctx.node_label != self.config.blend_node_label
            || decl.label != self.config.blend_property_label
        {
            return None;
        }
        let index = decode_enum_index(&raw.text)?;
        let mode = self.config.blend_mode(index);
        if mode.is_none() {
            tracing::debug!(index, "blend index outside mode table, using generic decoding");
        }
        mode
    }

    fn display_label(&self, label: &str) -> String {
        if let Some(alias) = self.config.label_aliases.get(label) {
            return alias.clone();
        }
        if label.contains(ROTATION_WORD) {
            ROTATION_TURNS.to_string()
        } else if label.contains(ANGLE_WORD) {
            ANGLE_TURNS.to_string()
        } else {
            label.to_string()
        }
    }

    fn display_value(&self, value: PropertyValue) -> PropertyValue {
        let alias = value
            .scalar_text()
            .and_then(|text| self.config.value_aliases.get(text))
            .cloned();
        match alias {
            Some(alias) => value.with_scalar_text(alias),
            None => value,
        }
    }
}

/// Error for a property left out of a snapshot, tagged with where it came from
fn skipped_property(err: ModvalError, node: &dyn NodeHandle, decl: &PropertyDecl) -> ExError {
    ExError::from(err)
        .with_node_id(node.id().as_str())
        .with_property(decl.label.as_str())
}
