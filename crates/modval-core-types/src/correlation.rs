//! Correlation types for tying log events to a single plugin invocation
//!
//! Every toolbar action runs to completion inside one UI callback. The
//! invocation id lets the start/end events, advisories and errors of that
//! callback be grouped together in the host console or a JSON log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single plugin invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(String);

impl InvocationId {
    /// Generate a new InvocationId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one invocation for correlation
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub invocation_id: InvocationId,
    /// Graph view the triggering toolbar belongs to, if known
    pub graph_view_id: Option<String>,
}

impl InvocationContext {
    /// Create a new context with a fresh InvocationId
    pub fn new() -> Self {
        Self {
            invocation_id: InvocationId::new(),
            graph_view_id: None,
        }
    }

    /// Create a context with an existing InvocationId
    pub fn with_invocation_id(invocation_id: InvocationId) -> Self {
        Self {
            invocation_id,
            graph_view_id: None,
        }
    }

    /// Attach the graph view id
    pub fn with_graph_view(mut self, graph_view_id: impl Into<String>) -> Self {
        self.graph_view_id = Some(graph_view_id.into());
        self
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}
