//! Diff output types.

use crate::value::PropertyValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fixed single-entry results shown instead of a property list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentinel {
    /// Node-vs-default found nothing modified
    AllByDefault,
    /// Node-vs-node found nothing different
    NoChanges,
    /// The node has no comparison baseline
    NonSupported,
}

impl Sentinel {
    pub fn label(&self) -> &'static str {
        match self {
            Sentinel::AllByDefault => "All by",
            Sentinel::NoChanges => "NO",
            Sentinel::NonSupported => "Non",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Sentinel::AllByDefault => "default",
            Sentinel::NoChanges => "CHANGES",
            Sentinel::NonSupported => "Supported",
        }
    }
}

/// Ordered differences of a subject snapshot against its baseline
///
/// Either `entries` is non-empty and `sentinel` is `None`, or `entries` is
/// empty and `sentinel` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub entries: IndexMap<String, PropertyValue>,
    pub sentinel: Option<Sentinel>,
}

impl DiffResult {
    /// A result carrying only a sentinel line
    pub fn sentinel(sentinel: Sentinel) -> Self {
        Self {
            entries: IndexMap::new(),
            sentinel: Some(sentinel),
        }
    }

    /// Whether any property differs
    pub fn has_changes(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Lines to render, sentinel included
    pub fn lines(&self) -> Vec<(String, String)> {
        match self.sentinel {
            Some(s) => vec![(s.label().to_string(), s.value().to_string())],
            None => self
                .entries
                .iter()
                .map(|(label, value)| (label.clone(), value.to_string()))
                .collect(),
        }
    }
}
