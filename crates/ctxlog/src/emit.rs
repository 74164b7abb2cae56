//! Leveled emission through the context's handler
//!
//! Every function here is `#[track_caller]`, so the source recorded for a
//! record is the line that called into this crate, however many wrappers
//! sit in between.

use crate::args::Arg;
use crate::attr::Attr;
use crate::context::{handler, Context};
use crate::handler::SharedHandler;
use crate::level::Level;
use crate::record::{Record, Source};
use chrono::Utc;

#[track_caller]
pub fn debug(ctx: &Context, message: &str, args: impl IntoIterator<Item = Arg>) {
    log(ctx, Level::DEBUG, message, args);
}

#[track_caller]
pub fn info(ctx: &Context, message: &str, args: impl IntoIterator<Item = Arg>) {
    log(ctx, Level::INFO, message, args);
}

#[track_caller]
pub fn warn(ctx: &Context, message: &str, args: impl IntoIterator<Item = Arg>) {
    log(ctx, Level::WARN, message, args);
}

#[track_caller]
pub fn error(ctx: &Context, message: &str, args: impl IntoIterator<Item = Arg>) {
    log(ctx, Level::ERROR, message, args);
}

/// Emit at an arbitrary level.
///
/// Arguments are only normalized when the handler is enabled for `level`.
#[track_caller]
pub fn log(ctx: &Context, level: Level, message: &str, args: impl IntoIterator<Item = Arg>) {
    let source = Source::caller();
    let handler = handler(ctx);
    if !handler.enabled(level) {
        return;
    }
    let mut record = Record::new(Utc::now(), level, message, Some(source));
    record.add_args(args);
    dispatch(&handler, &record);
}

/// Emit pre-built attrs at an arbitrary level
#[track_caller]
pub fn log_attrs(ctx: &Context, level: Level, message: &str, attrs: impl IntoIterator<Item = Attr>) {
    let source = Source::caller();
    let handler = handler(ctx);
    if !handler.enabled(level) {
        return;
    }
    let mut record = Record::new(Utc::now(), level, message, Some(source));
    record.add_attrs(attrs);
    dispatch(&handler, &record);
}

fn dispatch(handler: &SharedHandler, record: &Record) {
    if let Err(err) = handler.handle(record) {
        tracing::debug!(
            target: "ctxlog",
            error = %err,
            level = %record.level,
            dropped = %record.message,
            "log record dropped"
        );
    }
}
