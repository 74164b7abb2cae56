//! Canonical keys and event names
//!
//! Every record renderer and every helper in this crate agrees on these
//! strings; the harness relies on them to replay expected records.

// Built-in record keys
pub const TIME_KEY: &str = "time";
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "msg";
pub const SOURCE_KEY: &str = "source";

// Attribute keys owned by this crate
pub const ERROR_KEY: &str = "err";
pub const OP_KEY: &str = "op";
pub const BAD_KEY: &str = "!BADKEY";

/// Rendered value of an explicitly logged absent error.
pub const NIL_ERROR: &str = "nil";

// Operation tracker messages
pub const EVENT_START: &str = "start";
pub const EVENT_FINISH: &str = "finish";
pub const EVENT_ERROR: &str = "error";

// Environment configuration
pub const LEVEL_ENV: &str = "CTXLOG_LEVEL";
pub const ADD_SOURCE_ENV: &str = "CTXLOG_ADD_SOURCE";
