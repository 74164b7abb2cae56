//! One JSON object per record; groups become nested objects.

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
use serde_json::{Map, Number, Value as JsonValue};
use std::io::Write;
use std::sync::Arc;

type Object = Map<String, JsonValue>;

/// Structured JSON handler, used by the production profile.
#[derive(Clone)]
pub struct JsonHandler {
    writer: SharedWriter,
    options: Arc<HandlerOptions>,
    scopes: ScopeChain,
}

impl JsonHandler {
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

    /// Build the JSON object for `record`
    pub fn to_json(&self, record: &Record) -> JsonValue {
        let mut root = Object::new();
        let mut groups = Vec::new();

        let mut builtins = vec![
            Attr::time(TIME_KEY, record.time),
            Attr::string(LEVEL_KEY, record.level.to_string()),
        ];
        if self.options.add_source {
            if let Some(source) = &record.source {
                builtins.push(Attr::group(
                    SOURCE_KEY,
                    [
                        Attr::string("file", source.file),
                        Attr::uint("line", source.line.into()),
                        Attr::uint("column", source.column.into()),
                    ],
                ));
            }
        }
        builtins.push(Attr::string(MESSAGE_KEY, record.message.as_str()));

        for attr in builtins {
            insert_attr(&mut root, &self.options, &mut groups, attr);
        }
        let scoped = scoped_object(
            &self.options,
            self.scopes.as_slice(),
            &mut groups,
            record.attrs(),
        );
        root.extend(scoped);

        JsonValue::Object(root)
    }

    fn scoped(&self, scopes: ScopeChain) -> SharedHandler {
        Arc::new(Self {
            writer: self.writer.clone(),
            options: self.options.clone(),
            scopes,
        })
    }
}

impl Handler for JsonHandler {
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
        let mut line = serde_json::to_string(&self.to_json(record))?;
        line.push('\n');
        write_line(&self.writer, &line)
    }
}

/// Everything after the first group scope nests inside that group's object,
/// which is left out entirely when nothing ends up in it.
fn scoped_object(
    options: &HandlerOptions,
    scopes: &[Scope],
    groups: &mut Vec<String>,
    attrs: &[Attr],
) -> Object {
    let mut object = Object::new();
    for (i, scope) in scopes.iter().enumerate() {
        match scope {
            Scope::Attrs(scoped) => {
                for attr in scoped {
                    insert_attr(&mut object, options, groups, attr.clone());
                }
            }
            Scope::Group(name) => {
                groups.push(name.clone());
                let nested = scoped_object(options, &scopes[i + 1..], groups, attrs);
                groups.pop();
                if !nested.is_empty() {
                    object.insert(name.clone(), JsonValue::Object(nested));
                }
                return object;
            }
        }
    }
    for attr in attrs {
        insert_attr(&mut object, options, groups, attr.clone());
    }
    object
}

fn insert_attr(object: &mut Object, options: &HandlerOptions, groups: &mut Vec<String>, attr: Attr) {
    let attr = options.replace(groups, attr);
    if attr.is_empty() {
        return;
    }
    match attr.value {
        Value::Group(members) if attr.key.is_empty() => {
            for member in members {
                insert_attr(object, options, groups, member);
            }
        }
        Value::Group(members) => {
            groups.push(attr.key.clone());
            let mut nested = Object::new();
            for member in members {
                insert_attr(&mut nested, options, groups, member);
            }
            groups.pop();
            if !nested.is_empty() {
                object.insert(attr.key, JsonValue::Object(nested));
            }
        }
        value => {
            object.insert(attr.key, json_value(value));
        }
    }
}

fn json_value(value: Value) -> JsonValue {
    match value {
        Value::String(s) | Value::Any(s) => JsonValue::String(s),
        Value::Int(v) => JsonValue::from(v),
        Value::Uint(v) => JsonValue::from(v),
        Value::Float(v) => Number::from_f64(v)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(v.to_string())),
        Value::Bool(v) => JsonValue::Bool(v),
        Value::Duration(d) => JsonValue::from(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
        Value::Time(t) => JsonValue::String(t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Group(members) => JsonValue::Object(
            members
                .into_iter()
                .filter(|attr| !attr.is_empty())
                .map(|attr| (attr.key, json_value(attr.value)))
                .collect(),
        ),
        Value::Nil => JsonValue::Null,
    }
}
