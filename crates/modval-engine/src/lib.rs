//! modval Engine - plugin command layer
//!
//! Provides the two plugin commands (a node against its factory default, and
//! two nodes against each other), the action table bound to the graph-view
//! toolbar, and the registry of views the plugin is attached to.

pub mod commands;
pub mod registry;

pub use commands::annotate::AnnotationReport;
pub use commands::compare::{compare_selection, Direction};
pub use commands::engine_command::{run_action, run_action_with_context, ActionOutcome, PluginAction};
pub use commands::print_modified::print_modified_values;
pub use registry::{PluginVariant, ViewRegistry};
