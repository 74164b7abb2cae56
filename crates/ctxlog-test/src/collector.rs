//! Handler that records rendered lines instead of writing them
//!
//! Scopes added through `with_attrs` / `with_group` are only remembered.
//! Each record is rendered by a fresh reference handler with those scopes
//! replayed onto it, and the resulting line is appended to a buffer shared
//! by every handler derived from the same collector.

use crate::time::fixed_time;
use crate::AssertOptions;
use ctxlog::keys::TIME_KEY;
use ctxlog::{
    Attr, Error, Handler, HandlerOptions, Level, MemoryWriter, Record, Result, ScopeChain,
    SharedHandler, TextHandler,
};
use std::sync::{Arc, Mutex};

/// Builds the handler that renders one record into the given writer
pub(crate) type Renderer = Arc<dyn Fn(MemoryWriter) -> SharedHandler + Send + Sync>;

/// Text handler with the fixed clock, enabled for every level
pub(crate) fn reference_handler(writer: MemoryWriter, add_source: bool) -> TextHandler {
    let options = HandlerOptions::new(Level::MIN)
        .with_source(add_source)
        .with_replace_attr(|_, attr| {
            if attr.key == TIME_KEY {
                Attr::time(TIME_KEY, fixed_time())
            } else {
                attr
            }
        });
    TextHandler::new(writer, options)
}

pub(crate) fn reference_renderer(options: AssertOptions) -> Renderer {
    Arc::new(move |writer: MemoryWriter| {
        Arc::new(reference_handler(writer, options.add_source)) as SharedHandler
    })
}

#[derive(Clone)]
pub(crate) struct Collector {
    renderer: Renderer,
    scopes: ScopeChain,
    lines: Arc<Mutex<Vec<String>>>,
}

impl Collector {
    pub(crate) fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            scopes: ScopeChain::new(),
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Copy of the recorded lines, in handle-completion order
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn scoped(&self, scopes: ScopeChain) -> SharedHandler {
        Arc::new(Self {
            renderer: self.renderer.clone(),
            scopes,
            lines: self.lines.clone(),
        })
    }
}

impl Handler for Collector {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        self.scoped(self.scopes.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        self.scoped(self.scopes.with_group(name))
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let out = MemoryWriter::new();
        let handler = self.scopes.apply((self.renderer)(out.clone()));
        handler.handle(record).map_err(Error::handle)?;

        self.lines
            .lock()
            .map_err(|_| Error::Poisoned)?
            .push(out.contents());
        Ok(())
    }
}
