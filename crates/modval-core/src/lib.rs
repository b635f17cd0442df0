//! modval Core - modified-value detection for procedural node graphs
//!
//! This crate provides everything needed to tell which authored properties of
//! a node differ from a baseline, including:
//! - Decoding of the host's serialized property values into canonical values
//! - Ordered node snapshots with display-label and value aliasing
//! - Baseline resolution against a freshly created node of the same type
//! - Diffing and plain-text rendering of the differences
//! - Capability traits over the host object model, plus an in-memory host
//!
//! The host integration itself (actions, annotation writing) lives in
//! `modval-engine`.

pub mod config;
pub mod diff;
pub mod errors;
pub mod host;
pub mod logging_facility;
pub mod resolve;
pub mod snapshot;
pub mod value;

// Macros expand to `$crate::modval_core_types::schema::*`
pub use modval_core_types;

// Re-export commonly used types
pub use config::PluginConfig;
pub use diff::{compute_diff, render_human_summary, DiffResult, Sentinel};
pub use errors::{ExError, ExErrorKind, ModvalError, Result};
pub use host::{Host, HostGraph, NodeHandle, NodeId, PackageManager, PropertyCategory};
pub use resolve::{resolve_default_baseline, snapshot_node, Baseline};
pub use snapshot::{CollectContext, Collector, NodeSnapshot};
pub use value::{Normalizer, PropertyValue, RawValue};
