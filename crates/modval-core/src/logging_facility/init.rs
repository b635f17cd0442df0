//! Subscriber installation for the plugin process
//!
//! The plugin lives inside a host process that may be reloaded many times
//! and may already own the global subscriber. Installation therefore happens
//! at most once per process, never panics, and remembers which profile won.

use std::sync::OnceLock;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines for the host's script console
    Development,
    /// JSON lines for log collection
    Production,
    /// Bare registry; tests install [`super::init_test_capture`] instead
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_directives(&self) -> &'static str {
        match self {
            Profile::Development => "modval_core=debug,modval_engine=debug",
            Profile::Production => "modval_core=info,modval_engine=info",
            Profile::Test => "off",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

static ACTIVE: OnceLock<Profile> = OnceLock::new();

/// Install the subscriber for `profile` on first call
///
/// Returns the profile in effect; later calls keep the first profile. If the
/// host already installed a global subscriber, that subscriber is kept and
/// modval's events flow into it.
///
/// ```
/// use modval_core::logging_facility::{init, Profile};
///
/// let active = init(Profile::Development);
/// assert_eq!(init(Profile::Production), active);
/// ```
pub fn init(profile: Profile) -> Profile {
    *ACTIVE.get_or_init(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .try_init()
                .is_ok(),
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
        if !installed {
            tracing::debug!(?profile, "global subscriber already set by host");
        }
        profile
    })
}

/// Profile installed by [`init`], if it has run
pub fn active_profile() -> Option<Profile> {
    ACTIVE.get().copied()
}
