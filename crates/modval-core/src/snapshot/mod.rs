//! Node snapshots: ordered label → value mappings captured from one node

pub mod collect;
pub mod depth;

use crate::value::PropertyValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use collect::{CollectContext, Collector};
pub use depth::{detect_channel_depth, ChannelDepth};

/// Ordered mapping from display label to normalized value
///
/// Order is collection order. Inserting a label that is already present
/// replaces its value and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    entries: IndexMap<String, PropertyValue>,
}

impl NodeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: PropertyValue) {
        self.entries.insert(label.into(), value);
    }

    pub fn get(&self, label: &str) -> Option<&PropertyValue> {
        self.entries.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<L: Into<String>> FromIterator<(L, PropertyValue)> for NodeSnapshot {
    fn from_iter<I: IntoIterator<Item = (L, PropertyValue)>>(iter: I) -> Self {
        let mut snapshot = NodeSnapshot::new();
        for (label, value) in iter {
            snapshot.insert(label, value);
        }
        snapshot
    }
}
