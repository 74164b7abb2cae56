use crate::args::{normalize, Arg};
use crate::attr::Attr;
use crate::level::Level;
use chrono::{DateTime, Utc};
use std::fmt;
use std::panic::Location;

/// Call site of an emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Source {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl Source {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self {
            file,
            line,
            column: 0,
        }
    }

    /// Location of the outermost caller along a chain of `#[track_caller]` frames
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for Source {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single logging event.
///
/// Built once per emission, handed to one handler by reference and then
/// dropped; nothing in this crate keeps records around.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub source: Option<Source>,
    attrs: Vec<Attr>,
}

impl Record {
    pub fn new(
        time: DateTime<Utc>,
        level: Level,
        message: impl Into<String>,
        source: Option<Source>,
    ) -> Self {
        Self {
            time,
            level,
            message: message.into(),
            source,
            attrs: Vec::new(),
        }
    }

    /// Append already-built attrs
    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    /// Normalize call-site arguments and append the result
    pub fn add_args(&mut self, args: impl IntoIterator<Item = Arg>) {
        self.attrs.extend(normalize(args));
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }
}
