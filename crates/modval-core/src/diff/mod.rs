//! Snapshot diff engine.
//!
//! Compares a subject snapshot against a baseline and renders the
//! differences as the annotation text.
//!
//! ## Entry point
//!
//! ```
//! use modval_core::diff::{compute_diff, render_human_summary, Sentinel};
//! use modval_core::snapshot::NodeSnapshot;
//! use modval_core::value::PropertyValue;
//!
//! let subject: NodeSnapshot = [("Rot-Turns", PropertyValue::Float("0.25".into()))]
//!     .into_iter()
//!     .collect();
//! let baseline: NodeSnapshot = [("Rot-Turns", PropertyValue::Float("0.0".into()))]
//!     .into_iter()
//!     .collect();
//!
//! let diff = compute_diff(&subject, &baseline, Sentinel::AllByDefault);
//! assert_eq!(render_human_summary(&diff), "Rot-Turns: 0.25");
//! ```
//!
//! ## Guarantees
//!
//! - **Subject order**: entries appear in subject order; baseline order is irrelevant.
//! - **Never empty**: an empty difference is replaced by the caller's sentinel line.
//! - **Plain text**: rendered output carries no parentheses or quote characters.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{DiffResult, Sentinel};
