//! Command orchestration layer.
//!
//! Each command validates the selection, builds the snapshots through
//! `modval-core`, diffs them and writes one annotation back into the graph.

pub mod annotate;
pub mod compare;
pub mod engine_command;
pub mod print_modified;
pub mod selection;
