//! Process-wide fallback handler
//!
//! Emission through a context with no bound handler goes here. The slot is
//! only read through [`default_handler`].

use crate::handler::{HandlerOptions, SharedHandler, TextHandler};
use crate::level::Level;
use std::sync::{Arc, OnceLock, RwLock};

static DEFAULT_HANDLER: OnceLock<RwLock<SharedHandler>> = OnceLock::new();

fn slot() -> &'static RwLock<SharedHandler> {
    DEFAULT_HANDLER.get_or_init(|| {
        RwLock::new(Arc::new(TextHandler::stderr(HandlerOptions::new(
            Level::INFO,
        ))))
    })
}

/// Current default handler; a text handler on stderr at `INFO` until replaced
pub fn default_handler() -> SharedHandler {
    match slot().read() {
        Ok(handler) => handler.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the default handler for the whole process
pub fn set_default_handler(handler: SharedHandler) {
    match slot().write() {
        Ok(mut slot) => *slot = handler,
        Err(poisoned) => *poisoned.into_inner() = handler,
    }
}
