//! Boundary logging for plugin commands
//!
//! Every command logs one `start` event and then exactly one of `end` or
//! `end_error`, all tagged with the invocation's correlation ids. The
//! macros take the [`InvocationContext`] and the command's start
//! [`Instant`] so call sites never compute ids or durations by hand.
//!
//! [`InvocationContext`]: modval_core_types::InvocationContext
//! [`Instant`]: std::time::Instant

/// Log that a command began
///
/// ```
/// # use modval_core::log_op_start;
/// # use modval_core_types::InvocationContext;
/// let ctx = InvocationContext::new().with_graph_view("view-1");
/// log_op_start!("print_modified_values", &ctx);
/// log_op_start!("compare_selection", &ctx, direction = "AToB");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, $ctx:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::modval_core_types::schema::EVENT_START,
            invocation_id = $ctx.invocation_id.as_str(),
            graph_view_id = $ctx.graph_view_id.as_deref().unwrap_or_default(),
            $($($field)+)?
        )
    };
}

/// Log that a command finished, with its duration since `started`
///
/// ```
/// # use modval_core::log_op_end;
/// # use modval_core_types::InvocationContext;
/// let ctx = InvocationContext::new();
/// let started = std::time::Instant::now();
/// log_op_end!("print_modified_values", &ctx, started, node_id = "node-3", diff_len = 2usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $ctx:expr, $started:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::modval_core_types::schema::EVENT_END,
            invocation_id = $ctx.invocation_id.as_str(),
            graph_view_id = $ctx.graph_view_id.as_deref().unwrap_or_default(),
            duration_ms = $started.elapsed().as_millis() as u64,
            $($($field)+)?
        )
    };
}

/// Log that a command failed with `err` (an [`ExError`](crate::errors::ExError))
///
/// The error's message becomes the event message.
///
/// ```
/// # use modval_core::log_op_error;
/// # use modval_core::errors::{ExError, ModvalError};
/// # use modval_core_types::InvocationContext;
/// let ctx = InvocationContext::new();
/// let started = std::time::Instant::now();
/// let err = ExError::from(ModvalError::InvalidSelection { expected: 1, actual: 0 });
/// log_op_error!("print_modified_values", &ctx, started, &err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $ctx:expr, $started:expr, $err:expr $(, $($field:tt)+)?) => {{
        let ex_err: &$crate::errors::ExError = $err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::modval_core_types::schema::EVENT_END_ERROR,
            invocation_id = $ctx.invocation_id.as_str(),
            graph_view_id = $ctx.graph_view_id.as_deref().unwrap_or_default(),
            duration_ms = $started.elapsed().as_millis() as u64,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($($field)+ ,)?
            "{}",
            ex_err.message()
        )
    }};
}
