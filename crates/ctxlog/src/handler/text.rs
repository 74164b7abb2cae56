//! `key=value` text renderer
//!
//! One line per record:
//!
//! ```text
//! time=2023-08-08T20:14:06.000Z level=INFO source=src/main.rs:12 msg="user created" user.id=42
//! ```
//!
//! Attrs inside groups get dotted keys. Keys and string values are quoted
//! with Rust string escaping when they are empty or contain whitespace,
//! `=`, `"` or control characters.

use super::{
    shared_writer, write_line, Handler, HandlerOptions, Scope, ScopeChain, SharedHandler,
    SharedWriter,
};
use crate::attr::Attr;
use crate::error::Result;
use crate::keys::{LEVEL_KEY, MESSAGE_KEY, SOURCE_KEY, TIME_KEY};
use crate::level::Level;
use crate::record::Record;
use crate::value::Value;
use chrono::SecondsFormat;
use std::io::Write;
use std::sync::Arc;

/// Reference text handler.
#[derive(Clone)]
pub struct TextHandler {
    writer: SharedWriter,
    options: Arc<HandlerOptions>,
    scopes: ScopeChain,
}

impl TextHandler {
    pub fn new(writer: impl Write + Send + 'static, options: HandlerOptions) -> Self {
        Self {
            writer: shared_writer(writer),
            options: Arc::new(options),
            scopes: ScopeChain::new(),
        }
    }

    pub fn stderr(options: HandlerOptions) -> Self {
        Self::new(std::io::stderr(), options)
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// Render `record` without the trailing newline
    pub fn render(&self, record: &Record) -> String {
        let mut line = String::new();

        let mut builtins = vec![
            Attr::time(TIME_KEY, record.time),
            Attr::string(LEVEL_KEY, record.level.to_string()),
        ];
        if self.options.add_source {
            if let Some(source) = &record.source {
                builtins.push(Attr::string(SOURCE_KEY, source.to_string()));
            }
        }
        builtins.push(Attr::string(MESSAGE_KEY, record.message.as_str()));

        let mut groups = Vec::new();
        for attr in builtins {
            append_attr(&mut line, &self.options, &mut groups, attr);
        }
        render_scoped_attrs(&mut line, &self.options, &self.scopes, record.attrs());

        line
    }

    fn scoped(&self, scopes: ScopeChain) -> SharedHandler {
        Arc::new(Self {
            writer: self.writer.clone(),
            options: self.options.clone(),
            scopes,
        })
    }
}

impl Handler for TextHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.options.level
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
        self.scoped(self.scopes.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> SharedHandler {
        self.scoped(self.scopes.with_group(name))
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut line = self.render(record);
        line.push('\n');
        write_line(&self.writer, &line)
    }
}

/// Render the accumulated scopes followed by the record's own attrs.
pub(crate) fn render_scoped_attrs(
    out: &mut String,
    options: &HandlerOptions,
    scopes: &ScopeChain,
    attrs: &[Attr],
) {
    let mut groups = Vec::new();
    for scope in scopes.iter() {
        match scope {
            Scope::Attrs(scoped) => {
                for attr in scoped {
                    append_attr(out, options, &mut groups, attr.clone());
                }
            }
            Scope::Group(name) => groups.push(name.clone()),
        }
    }
    for attr in attrs {
        append_attr(out, options, &mut groups, attr.clone());
    }
}

fn append_attr(out: &mut String, options: &HandlerOptions, groups: &mut Vec<String>, attr: Attr) {
    let attr = options.replace(groups, attr);
    if attr.is_empty() {
        return;
    }
    match attr.value {
        Value::Group(members) => {
            // empty key inlines the members into the enclosing group
            let named = !attr.key.is_empty();
            if named {
                groups.push(attr.key);
            }
            for member in members {
                append_attr(out, options, groups, member);
            }
            if named {
                groups.pop();
            }
        }
        value => {
            let mut key = String::new();
            for group in groups.iter() {
                key.push_str(group);
                key.push('.');
            }
            key.push_str(&attr.key);

            if !out.is_empty() {
                out.push(' ');
            }
            push_text(out, &key);
            out.push('=');
            push_value(out, &value);
        }
    }
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) | Value::Any(s) => push_text(out, s),
        Value::Time(t) => out.push_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        other => push_text(out, &other.to_string()),
    }
}

fn push_text(out: &mut String, s: &str) {
    if needs_quoting(s) {
        out.push_str(&format!("{s:?}"));
    } else {
        out.push_str(s);
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c == '=' || c == '"' || c.is_whitespace() || c.is_control())
}
