//! Plugin actions and their dispatch.
//!
//! Actions are what the graph-view toolbar exposes. Dispatch never fails:
//! user errors become an advisory line for the host console.

#![allow(clippy::result_large_err)]

use crate::commands::annotate::AnnotationReport;
use crate::commands::compare::{compare_selection, Direction};
use crate::commands::print_modified::print_modified_values;
use modval_core::{Host, PluginConfig};
use modval_core_types::InvocationContext;
use serde::{Deserialize, Serialize};

/// A toolbar action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PluginAction {
    /// Selected node against its factory default
    PrintModifiedValues,
    CompareAToB,
    CompareBToA,
}

impl PluginAction {
    /// Keyboard shortcut bound in the graph view
    pub fn shortcut(&self) -> &'static str {
        match self {
            PluginAction::PrintModifiedValues | PluginAction::CompareAToB => "Q",
            PluginAction::CompareBToA => "W",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            PluginAction::PrintModifiedValues => "Print Modified Values",
            PluginAction::CompareAToB => "Print Modified Values from A to B",
            PluginAction::CompareBToA => "Print Modified Values from B to A",
        }
    }

    /// Name of the toolbar icon
    pub fn icon(&self) -> &'static str {
        match self {
            PluginAction::PrintModifiedValues | PluginAction::CompareAToB => {
                "print_modified_values_a"
            }
            PluginAction::CompareBToA => "print_modified_values_b",
        }
    }
}

/// Result of dispatching an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ActionOutcome {
    /// An annotation was written
    Annotated(AnnotationReport),
    /// Nothing was written; the text explains why
    Advisory(String),
}

/// Run an action against the host under a fresh invocation id
pub fn run_action<H: Host>(host: &mut H, config: &PluginConfig, action: PluginAction) -> ActionOutcome {
    run_action_with_context(host, config, action, &InvocationContext::new())
}

/// Run an action under a caller-supplied invocation context
pub fn run_action_with_context<H: Host>(
    host: &mut H,
    config: &PluginConfig,
    action: PluginAction,
    ctx: &InvocationContext,
) -> ActionOutcome {
    let result = match action {
        PluginAction::PrintModifiedValues => print_modified_values(host, config, ctx),
        PluginAction::CompareAToB => compare_selection(host, config, Direction::AToB, ctx),
        PluginAction::CompareBToA => compare_selection(host, config, Direction::BToA, ctx),
    };

    match result {
        Ok(report) => ActionOutcome::Annotated(report),
        Err(e) => {
            tracing::warn!(action = ?action, code = e.code(), "{}", e.message());
            ActionOutcome::Advisory(e.message().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbar_bindings() {
        assert_eq!(PluginAction::PrintModifiedValues.shortcut(), "Q");
        assert_eq!(PluginAction::CompareAToB.shortcut(), "Q");
        assert_eq!(PluginAction::CompareBToA.shortcut(), "W");
        assert_eq!(PluginAction::CompareBToA.icon(), "print_modified_values_b");
        assert!(PluginAction::CompareAToB.tooltip().ends_with("A to B"));
    }
}
