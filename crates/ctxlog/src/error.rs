use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Failures a handler can report from [`Handler::handle`](crate::Handler::handle).
///
/// None of these ever reach the caller of an emission function; they are
/// dropped at the dispatch boundary and only surface through a
/// `tracing` debug event.
#[derive(Error, Debug)]
pub enum Error {
    /// The destination rejected the rendered line
    #[error("write log record: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding of a record failed
    #[error("encode log record: {0}")]
    Json(#[from] serde_json::Error),

    /// Another thread panicked while holding the writer lock
    #[error("log writer lock poisoned")]
    Poisoned,

    /// Level text did not name a known level
    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),

    /// A wrapped handler failed to handle the record
    #[error("handler.handle: {0}")]
    Handle(#[source] Box<Error>),
}

impl Error {
    /// Wrap a nested handler failure
    pub fn handle(inner: Error) -> Self {
        Error::Handle(Box::new(inner))
    }

    /// Walk through [`Error::Handle`] wrappers to the original failure
    pub fn root(&self) -> &Error {
        match self {
            Error::Handle(inner) => inner.root(),
            other => other,
        }
    }
}
