//! The handler capability and the handlers shipped with the crate
//!
//! A [`Handler`] is the only thing emission talks to. It is immutable from
//! the caller's side: `with_attrs` / `with_group` return a new handler and
//! leave the receiver untouched, so one handler can be shared freely across
//! threads and contexts.

mod bridge;
mod json;
mod memory;
mod text;

pub use bridge::TracingHandler;
pub use json::JsonHandler;
pub use memory::MemoryWriter;
pub use text::TextHandler;

pub(crate) use text::render_scoped_attrs;

use crate::attr::Attr;
use crate::error::{Error, Result};
use crate::keys::{ADD_SOURCE_ENV, LEVEL_ENV};
use crate::level::Level;
use crate::record::Record;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination for records.
pub trait Handler: Send + Sync + 'static {
    /// Whether records at `level` would be handled. Emission skips building
    /// the record entirely when this returns false.
    fn enabled(&self, level: Level) -> bool;

    /// Handler that adds `attrs` to every record it handles
    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler;

    /// Handler that nests every attr added afterwards under `name`
    fn with_group(&self, name: &str) -> SharedHandler;

    /// Handle one record.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be rendered or written.
    fn handle(&self, record: &Record) -> Result<()>;
}

/// Handlers are shared by reference count between contexts.
pub type SharedHandler = Arc<dyn Handler>;

/// Rewrites (or drops, by returning an attr with an empty key) an attr
/// before it is rendered. The slice holds the enclosing group names.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Attr + Send + Sync>;

/// Rendering options shared by the built-in handlers.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Minimum enabled level
    pub level: Level,
    /// Render the call site under `source`
    pub add_source: bool,
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    pub fn with_replace_attr(
        mut self,
        replace: impl Fn(&[String], Attr) -> Attr + Send + Sync + 'static,
    ) -> Self {
        self.replace_attr = Some(Arc::new(replace));
        self
    }

    /// Options read from `CTXLOG_LEVEL` and `CTXLOG_ADD_SOURCE`.
    ///
    /// An unset or unparsable level falls back to `default_level`.
    pub fn from_env(default_level: Level) -> Self {
        let level = std::env::var(LEVEL_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(default_level);
        let add_source = std::env::var(ADD_SOURCE_ENV)
            .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            level,
            add_source,
            replace_attr: None,
        }
    }

    pub(crate) fn replace(&self, groups: &[String], attr: Attr) -> Attr {
        match &self.replace_attr {
            Some(replace) if !attr.value.is_group() => replace(groups, attr),
            _ => attr,
        }
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("replace_attr", &self.replace_attr.is_some())
            .finish()
    }
}

/// One accumulated `with_attrs` or `with_group` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    Attrs(Vec<Attr>),
    Group(String),
}

impl Scope {
    /// Replay this scope onto `handler`
    pub fn apply(&self, handler: SharedHandler) -> SharedHandler {
        match self {
            Scope::Attrs(attrs) => handler.with_attrs(attrs.clone()),
            Scope::Group(name) => handler.with_group(name),
        }
    }
}

/// Ordered, immutable list of scopes; extending it copies, never mutates.
#[derive(Debug, Clone, Default)]
pub struct ScopeChain(Arc<Vec<Scope>>);

impl ScopeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain with `scope` appended; `self` is unchanged
    pub fn with(&self, scope: Scope) -> Self {
        let mut scopes = Vec::with_capacity(self.0.len() + 1);
        scopes.extend(self.0.iter().cloned());
        scopes.push(scope);
        Self(Arc::new(scopes))
    }

    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }
        self.with(Scope::Attrs(attrs))
    }

    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        self.with(Scope::Group(name.to_string()))
    }

    /// Replay every scope, in order, onto `handler`
    pub fn apply(&self, handler: SharedHandler) -> SharedHandler {
        self.0.iter().fold(handler, |handler, scope| scope.apply(handler))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Scope] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

pub(crate) fn shared_writer(writer: impl Write + Send + 'static) -> SharedWriter {
    Arc::new(Mutex::new(Box::new(writer)))
}

/// Write one complete line under the lock so concurrent records never interleave.
pub(crate) fn write_line(writer: &SharedWriter, line: &str) -> Result<()> {
    let mut writer = writer.lock().map_err(|_| Error::Poisoned)?;
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Handler that is enabled for nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardHandler;

impl Handler for DiscardHandler {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn with_attrs(&self, _attrs: Vec<Attr>) -> SharedHandler {
        Arc::new(DiscardHandler)
    }

    fn with_group(&self, _name: &str) -> SharedHandler {
        Arc::new(DiscardHandler)
    }

    fn handle(&self, _record: &Record) -> Result<()> {
        Ok(())
    }
}
