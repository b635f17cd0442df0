//! In-memory capture of log events for test assertions
//!
//! The capture layer is installed once as the global subscriber. Tests run
//! in parallel and share the buffer, so queries are keyed by invocation id:
//! give each test its own [`InvocationContext`] id and read back only the
//! events of that invocation.
//!
//! [`InvocationContext`]: modval_core_types::InvocationContext

use modval_core_types::schema::{
    FIELD_COMPONENT, FIELD_DIFF_LEN, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_EVENT, FIELD_GRAPH_VIEW_ID, FIELD_INVOCATION_ID, FIELD_MESSAGE, FIELD_NODE_ID, FIELD_OP,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One log event, with the boundary fields lifted out
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    /// `start`, `end` or `end_error` for boundary events
    pub event: Option<String>,
    pub invocation_id: Option<String>,
    /// Empty when the invocation did not come from a registered view
    pub graph_view_id: Option<String>,
    pub node_id: Option<String>,
    pub diff_len: Option<usize>,
    pub duration_ms: Option<u64>,
    pub err_kind: Option<String>,
    pub err_code: Option<String>,
    pub message: Option<String>,
    /// Every other field, by name
    pub other: BTreeMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, mut fields: BTreeMap<String, String>) -> Self {
        let mut take = |key: &str| fields.remove(key);
        let component = take(FIELD_COMPONENT);
        let op = take(FIELD_OP);
        let event = take(FIELD_EVENT);
        let invocation_id = take(FIELD_INVOCATION_ID);
        let graph_view_id = take(FIELD_GRAPH_VIEW_ID);
        let node_id = take(FIELD_NODE_ID);
        let diff_len = take(FIELD_DIFF_LEN).and_then(|v| v.parse().ok());
        let duration_ms = take(FIELD_DURATION_MS).and_then(|v| v.parse().ok());
        let err_kind = take(FIELD_ERR_KIND);
        let err_code = take(FIELD_ERR_CODE);
        let message = take(FIELD_MESSAGE);

        Self {
            level,
            component,
            op,
            event,
            invocation_id,
            graph_view_id,
            node_id,
            diff_len,
            duration_ms,
            err_kind,
            err_code,
            message,
            other: fields,
        }
    }

    fn is_boundary_of(&self, op: &str, invocation_id: &str) -> bool {
        self.op.as_deref() == Some(op) && self.invocation_id.as_deref() == Some(invocation_id)
    }
}

#[derive(Default)]
struct FieldVisitor(BTreeMap<String, String>);

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), visitor.0);

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Read handle over the shared event buffer
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Boundary event names logged for `op` under one invocation, in order
    ///
    /// A successful command reads `["start", "end"]`.
    pub fn boundary(&self, op: &str, invocation_id: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.is_boundary_of(op, invocation_id))
            .filter_map(|e| e.event)
            .collect()
    }

    /// Last event named `event` logged for `op` under one invocation
    pub fn find(&self, op: &str, event: &str, invocation_id: &str) -> Option<CapturedEvent> {
        self.events()
            .into_iter()
            .rev()
            .find(|e| e.is_boundary_of(op, invocation_id) && e.event.as_deref() == Some(event))
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer (once per process) and return its handle
///
/// ```
/// use modval_core::log_op_start;
/// use modval_core::logging_facility::test_capture::init_test_capture;
/// use modval_core_types::{InvocationContext, InvocationId};
///
/// let capture = init_test_capture();
/// let ctx = InvocationContext::with_invocation_id(InvocationId::from_string("doc-1".into()));
/// log_op_start!("print_modified_values", &ctx);
/// assert_eq!(capture.boundary("print_modified_values", "doc-1"), ["start"]);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { events }
        })
        .clone()
}
