//! Logging initialization
//!
//! A single initialization point that picks the process default handler.

use crate::default::set_default_handler;
use crate::handler::{
    DiscardHandler, HandlerOptions, JsonHandler, SharedHandler, TextHandler, TracingHandler,
};
use crate::level::Level;
use std::sync::{Arc, Once};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Text lines on stderr with call sites, `DEBUG` and up
    Development,
    /// JSON lines on stderr, `INFO` and up
    Production,
    /// Records forwarded to a `tracing` fmt subscriber
    Tracing,
    /// Nothing is emitted
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the default handler.
///
/// Only the first call in a process has any effect. `CTXLOG_LEVEL` and
/// `CTXLOG_ADD_SOURCE` override the profile's level and source settings.
///
/// # Example
///
/// ```
/// use ctxlog::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        if profile == Profile::Tracing {
            // another subscriber may already be installed; records still flow to it
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("ctxlog=debug")),
                )
                .finish()
                .try_init();
        }
        set_default_handler(profile_handler(profile));
    });
}

fn profile_handler(profile: Profile) -> SharedHandler {
    match profile {
        Profile::Development => {
            let options = HandlerOptions::from_env(Level::DEBUG).with_source(true);
            Arc::new(TextHandler::stderr(options))
        }
        Profile::Production => Arc::new(JsonHandler::stderr(HandlerOptions::from_env(Level::INFO))),
        Profile::Tracing => Arc::new(TracingHandler::new(HandlerOptions::from_env(Level::MIN))),
        Profile::Test => Arc::new(DiscardHandler),
    }
}
