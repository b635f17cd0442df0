//! Structured logging for modval
//!
//! - `init(profile)` installs the process subscriber once
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` log command
//!   boundaries, tagged with the invocation's correlation ids
//! - `init_test_capture()` collects events in memory for test assertions
//!
//! ```rust
//! use modval_core::logging_facility::{init, Profile};
//!
//! // From the plugin's initialize hook
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{active_profile, init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
