use ctxlog::{Arg, Level, Source};

/// One expected record: level, message and the arguments it was emitted with.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub level: Level,
    pub message: String,
    pub args: Vec<Arg>,
    /// Expected call site, rendered only when `add_source` is on
    pub source: Option<Source>,
}

impl Operation {
    pub fn new(level: Level, message: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            level,
            message: message.into(),
            args: args.into_iter().collect(),
            source: None,
        }
    }

    pub fn debug(message: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self::new(Level::DEBUG, message, args)
    }

    pub fn info(message: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self::new(Level::INFO, message, args)
    }

    pub fn warn(message: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self::new(Level::WARN, message, args)
    }

    pub fn error(message: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        Self::new(Level::ERROR, message, args)
    }

    /// Expect the record to come from `source`
    pub fn at(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

/// `ops` repeated `times` times, in order; for checking concurrent emitters
pub fn repeated(ops: &[Operation], times: usize) -> Vec<Operation> {
    let mut result = Vec::with_capacity(ops.len() * times);
    for _ in 0..times {
        result.extend(ops.iter().cloned());
    }
    result
}
