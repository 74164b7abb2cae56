//! ctxlog - context-scoped structured logging
//!
//! This crate lets call sites bind a log [`Handler`] to a request-scoped
//! [`Context`] and emit leveled records through it, including:
//! - Immutable enrichment of a context with attrs ([`with`]) and groups ([`with_group`])
//! - Lenient `key, value` argument lists normalized into attrs ([`args!`], [`normalize`])
//! - Start/finish/error records for named operations ([`start`], [`Operation`])
//! - Text, JSON and `tracing` handlers plus a process-wide default
//!
//! # Usage
//!
//! ```rust
//! use ctxlog::{args, HandlerOptions, MemoryWriter, TextHandler, Context};
//! use std::sync::Arc;
//!
//! let out = MemoryWriter::new();
//! let ctx = ctxlog::with_handler(
//!     &Context::new(),
//!     Arc::new(TextHandler::new(out.clone(), HandlerOptions::default())) as ctxlog::SharedHandler,
//! );
//! let ctx = ctxlog::with(&ctx, args!["request_id", 42]);
//!
//! ctxlog::info(&ctx, "user created", args!["user", "alice"]);
//! assert!(out.contents().contains("msg=\"user created\" request_id=42 user=alice"));
//! ```

pub mod args;
pub mod attr;
pub mod context;
pub mod default;
pub mod emit;
pub mod error;
pub mod handler;
pub mod init;
pub mod keys;
pub mod level;
mod macros;
pub mod operation;
pub mod record;
pub mod value;

pub use args::{error_attr, nil_error_attr, normalize, Arg, IntoErrorAttr};
pub use attr::Attr;
pub use context::{handler, with, with_attrs, with_group, with_handler, Context};
pub use default::{default_handler, set_default_handler};
pub use emit::{debug, error, info, log, log_attrs, warn};
pub use error::{Error, Result};
pub use handler::{
    DiscardHandler, Handler, HandlerOptions, JsonHandler, MemoryWriter, ReplaceAttr, Scope,
    ScopeChain, SharedHandler, TextHandler, TracingHandler,
};
pub use init::{init, Profile};
pub use level::Level;
pub use operation::{start, Operation};
pub use record::{Record, Source};
pub use value::{Sensitive, Value};
