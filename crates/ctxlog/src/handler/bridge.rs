//! Forward records into the `tracing` ecosystem.
//!
//! Each record becomes one `tracing` event on target `ctxlog`. The message is
//! the event message; scoped and record attrs are rendered in the text
//! handler's `key=value` form into a single `attrs` field.

use super::{render_scoped_attrs, Handler, HandlerOptions, ScopeChain, SharedHandler};
use crate::attr::Attr;
use crate::error::Result;
use crate::level::Level;
use crate::record::Record;
use std::sync::Arc;

/// Event target used for bridged records
pub const TARGET: &str = "ctxlog";

macro_rules! bridged_event {
    ($lvl:expr, $record:expr, $attrs:expr, $source:expr) => {
        tracing::event!(
            target: TARGET,
            $lvl,
            ctxlog.level = %$record.level,
            attrs = %$attrs,
            source = %$source,
            "{}",
            $record.message
        )
    };
}

#[derive(Debug, Clone, Default)]
pub struct TracingHandler {
    options: Arc<HandlerOptions>,
    scopes: ScopeChain,
}

impl TracingHandler {
    pub fn new(options: HandlerOptions) -> Self {
        Self {
            options: Arc::new(options),
            scopes: ScopeChain::new(),
        }
    }

    fn scoped(&self, scopes: ScopeChain) -> SharedHandler {
        Arc::new(Self {
            options: self.options.clone(),
            scopes,
        })
    }
}

impl Handler for TracingHandler {
    fn enabled(&self, level: Level) -> bool {
        if level < self.options.level {
            return false;
        }
        match tracing::Level::from(level) {
            tracing::Level::TRACE => tracing::enabled!(target: TARGET, tracing::Level::TRACE),
            tracing::Level::DEBUG => tracing::enabled!(target: TARGET, tracing::Level::DEBUG),
            tracing::Level::INFO => tracing::enabled!(target: TARGET, tracing::Level::INFO),
            tracing::Level::WARN => tracing::enabled!(target: TARGET, tracing::Level::WARN),
            _ => tracing::enabled!(target: TARGET, tracing::Level::ERROR),
        }
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        self.scoped(self.scopes.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        self.scoped(self.scopes.with_group(name))
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut attrs = String::new();
        render_scoped_attrs(&mut attrs, &self.options, &self.scopes, record.attrs());
        let source = match (&record.source, self.options.add_source) {
            (Some(source), true) => source.to_string(),
            _ => String::new(),
        };

        match tracing::Level::from(record.level) {
            tracing::Level::TRACE => bridged_event!(tracing::Level::TRACE, record, attrs, source),
            tracing::Level::DEBUG => bridged_event!(tracing::Level::DEBUG, record, attrs, source),
            tracing::Level::INFO => bridged_event!(tracing::Level::INFO, record, attrs, source),
            tracing::Level::WARN => bridged_event!(tracing::Level::WARN, record, attrs, source),
            _ => bridged_event!(tracing::Level::ERROR, record, attrs, source),
        }
        Ok(())
    }
}
