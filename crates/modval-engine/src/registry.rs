//! Graph views the plugin is attached to.
//!
//! The host creates a toolbar per graph view and destroys it with the view.
//! The registry owns one entry per live view; the host adapter registers on
//! view creation and unregisters on view close.

use crate::commands::engine_command::{run_action_with_context, ActionOutcome, PluginAction};
use indexmap::IndexMap;
use modval_core::{Host, PluginConfig};
use modval_core_types::InvocationContext;
use serde::{Deserialize, Serialize};

/// Which toolbar a view carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginVariant {
    /// One action comparing a node with its factory default
    SingleNode,
    /// Two actions comparing two selected nodes in either direction
    NodePair,
}

impl PluginVariant {
    pub fn actions(&self) -> &'static [PluginAction] {
        match self {
            PluginVariant::SingleNode => &[PluginAction::PrintModifiedValues],
            PluginVariant::NodePair => &[PluginAction::CompareAToB, PluginAction::CompareBToA],
        }
    }
}

/// Live graph views keyed by host view id
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: IndexMap<String, PluginVariant>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a toolbar to a view and return the actions to bind
    ///
    /// Registering a view twice replaces its variant.
    pub fn register(&mut self, view_id: impl Into<String>, variant: PluginVariant) -> &'static [PluginAction] {
        let view_id = view_id.into();
        tracing::debug!(view_id = %view_id, ?variant, "graph view registered");
        self.views.insert(view_id, variant);
        variant.actions()
    }

    /// Drop a closed view; returns its variant if it was registered
    pub fn unregister(&mut self, view_id: &str) -> Option<PluginVariant> {
        let removed = self.views.shift_remove(view_id);
        if removed.is_some() {
            tracing::debug!(view_id, "graph view unregistered");
        }
        removed
    }

    /// Drop every view, on plugin unload
    pub fn clear(&mut self) {
        tracing::debug!(views = self.views.len(), "all graph views unregistered");
        self.views.clear();
    }

    pub fn variant(&self, view_id: &str) -> Option<PluginVariant> {
        self.views.get(view_id).copied()
    }

    /// Action bound to `shortcut` in a view's toolbar
    pub fn action_for_shortcut(&self, view_id: &str, shortcut: &str) -> Option<PluginAction> {
        self.variant(view_id)?
            .actions()
            .iter()
            .copied()
            .find(|a| a.shortcut() == shortcut)
    }

    /// Run the action a view binds to `shortcut`
    ///
    /// The invocation is tagged with the view id. Returns `None` when the
    /// view is not registered or binds nothing to the key.
    pub fn dispatch<H: Host>(
        &self,
        host: &mut H,
        config: &PluginConfig,
        view_id: &str,
        shortcut: &str,
    ) -> Option<ActionOutcome> {
        let action = self.action_for_shortcut(view_id, shortcut)?;
        let ctx = InvocationContext::new().with_graph_view(view_id);
        Some(run_action_with_context(host, config, action, &ctx))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
