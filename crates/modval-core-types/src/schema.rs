//! Field keys and event names shared by the boundary log events
//!
//! `tracing` macros need literal field names, so the emitting macros spell
//! these out; readers of the events (the test capture layer, log tooling)
//! go through the constants.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Correlation
pub const FIELD_INVOCATION_ID: &str = "invocation_id";
pub const FIELD_GRAPH_VIEW_ID: &str = "graph_view_id";

// Command results
pub const FIELD_NODE_ID: &str = "node_id";
pub const FIELD_DIFF_LEN: &str = "diff_len";

pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
