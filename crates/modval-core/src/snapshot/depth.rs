//! Channel-depth detection for dual-mode nodes

use crate::host::{HostGraph, NodeId, PropertyCategory};
use serde::{Deserialize, Serialize};

/// Whether a node is processing colour or single-channel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelDepth {
    #[default]
    Color,
    Gray,
}

/// Inspect the upstream image feeding a node
///
/// The last connection found across the node's connectable inputs decides:
/// more than 2 bytes per pixel is colour, anything else (including no
/// connection or an unreadable format) is grayscale.
pub fn detect_channel_depth<H: HostGraph + ?Sized>(host: &H, node_id: &NodeId) -> ChannelDepth {
    let Some(node) = host.node(node_id) else {
        return ChannelDepth::Gray;
    };

    let last = node
        .properties(PropertyCategory::Input)
        .iter()
        .filter(|p| p.connectable)
        .flat_map(|p| node.connections(p))
        .last();

    let bpp = last.and_then(|c| host.output_bytes_per_pixel(&c.upstream_node, &c.upstream_property));
    let depth = match bpp {
        Some(bpp) if bpp > 2 => ChannelDepth::Color,
        _ => ChannelDepth::Gray,
    };
    tracing::debug!(node_id = %node_id, ?bpp, ?depth, "channel depth detected");
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryHost, NodeTemplate};

    fn levels_fed_by(bpp: Option<u32>) -> (MemoryHost, NodeId) {
        let mut host = MemoryHost::new();
        let levels = host.add_node(NodeTemplate::new("Levels").connectable_input("input1", "Input"));
        if let Some(bpp) = bpp {
            let src = host.add_node(NodeTemplate::new("Noise").output_bpp("output", bpp));
            host.connect(&src, "output", &levels, "input1");
        }
        (host, levels)
    }

    #[test]
    fn test_rgba8_is_color() {
        let (host, levels) = levels_fed_by(Some(4));
        assert_eq!(detect_channel_depth(&host, &levels), ChannelDepth::Color);
    }

    #[test]
    fn test_l16_is_gray() {
        let (host, levels) = levels_fed_by(Some(2));
        assert_eq!(detect_channel_depth(&host, &levels), ChannelDepth::Gray);
    }

    #[test]
    fn test_unconnected_is_gray() {
        let (host, levels) = levels_fed_by(None);
        assert_eq!(detect_channel_depth(&host, &levels), ChannelDepth::Gray);
    }

    #[test]
    fn test_last_connection_wins() {
        let mut host = MemoryHost::new();
        let blend = host.add_node(
            NodeTemplate::new("Levels")
                .connectable_input("source", "Source")
                .connectable_input("mask", "Mask"),
        );
        let color = host.add_node(NodeTemplate::new("Color").output_bpp("output", 4));
        let gray = host.add_node(NodeTemplate::new("Gray").output_bpp("output", 1));
        host.connect(&color, "output", &blend, "source");
        host.connect(&gray, "output", &blend, "mask");
        assert_eq!(detect_channel_depth(&host, &blend), ChannelDepth::Gray);
    }
}
