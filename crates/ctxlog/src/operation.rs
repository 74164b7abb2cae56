//! Start/finish/error records for a named unit of work

use crate::args::{normalize, Arg, IntoErrorAttr};
use crate::attr::Attr;
use crate::context::{with_attrs, Context};
use crate::emit::{info, log_attrs};
use crate::keys::{EVENT_ERROR, EVENT_FINISH, EVENT_START, OP_KEY};
use crate::level::Level;

/// Handle for one logical operation.
///
/// Its context carries `op=<name>` plus whatever was passed to [`start`],
/// so every record it emits shares those attrs. Calling both
/// [`finish`](Operation::finish) and [`error`](Operation::error) is allowed
/// and emits both records.
#[derive(Debug, Clone)]
#[must_use = "an operation should end with finish() or error()"]
pub struct Operation {
    ctx: Context,
}

/// Bind `name` and `args` to a derived context and emit an `INFO` "start" record.
#[track_caller]
pub fn start(ctx: &Context, name: &str, args: impl IntoIterator<Item = Arg>) -> Operation {
    let mut attrs = vec![Attr::string(OP_KEY, name)];
    attrs.extend(normalize(args));
    let ctx = with_attrs(ctx, attrs);
    info(&ctx, EVENT_START, Vec::new());
    Operation { ctx }
}

impl Operation {
    /// Context carrying the operation attrs, for emitting in between
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Emit an `INFO` "finish" record
    #[track_caller]
    pub fn finish(&self) {
        info(&self.ctx, EVENT_FINISH, Vec::new());
    }

    /// Emit an `ERROR` "error" record led by the error attr for `err`
    #[track_caller]
    pub fn error(&self, err: impl IntoErrorAttr, args: impl IntoIterator<Item = Arg>) {
        let mut attrs = vec![err.into_error_attr()];
        attrs.extend(normalize(args));
        log_attrs(&self.ctx, Level::ERROR, EVENT_ERROR, attrs);
    }
}
