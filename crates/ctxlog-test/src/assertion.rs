use crate::collector::{reference_handler, reference_renderer, Collector};
use crate::mismatch::{compare, Mismatch};
use crate::operation::Operation;
use crate::time::fixed_time;
use ctxlog::{Handler, MemoryWriter, Record, SharedHandler};
use std::sync::Arc;

/// Comparison settings; both off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssertOptions {
    /// Compare position by position instead of sorting both sides first
    pub check_order: bool,
    /// Render the call site of every record
    pub add_source: bool,
}

/// Failure reporting capability of a test framework.
pub trait Tester {
    /// Report a failed assertion. Implementations may panic.
    fn fatal(&self, message: &str);
}

impl<T: Tester + ?Sized> Tester for &T {
    fn fatal(&self, message: &str) {
        (**self).fatal(message)
    }
}

impl<T: Tester + ?Sized> Tester for Arc<T> {
    fn fatal(&self, message: &str) {
        (**self).fatal(message)
    }
}

/// Fails the current test by panicking with the diagnostic dump.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicTester;

impl Tester for PanicTester {
    fn fatal(&self, message: &str) {
        panic!("{message}");
    }
}

/// Collects rendered lines from every handler derived from [`Recorder::handler`].
#[derive(Clone)]
pub struct Recorder {
    options: AssertOptions,
    collector: Collector,
}

impl Recorder {
    pub fn new(options: AssertOptions) -> Self {
        Self {
            options,
            collector: Collector::new(reference_renderer(options)),
        }
    }

    pub fn options(&self) -> AssertOptions {
        self.options
    }

    /// Handler to bind to the code under test
    pub fn handler(&self) -> SharedHandler {
        Arc::new(self.collector.clone())
    }

    /// Lines recorded so far, each with its trailing newline
    pub fn records(&self) -> Vec<String> {
        self.collector.lines()
    }

    /// Compare what was recorded against `ops`.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] describing the first difference.
    pub fn verify(&self, ops: &[Operation]) -> Result<(), Mismatch> {
        let expected = expected_records(ops, self.options.add_source)?;
        compare(expected, self.records(), self.options.check_order)
    }
}

/// Render every expected operation the way the recorder renders real records.
///
/// # Errors
///
/// Returns an error when the reference handler fails to render an operation.
pub fn expected_records(ops: &[Operation], add_source: bool) -> Result<Vec<String>, Mismatch> {
    ops.iter()
        .map(|op| -> Result<String, Mismatch> {
            let out = MemoryWriter::new();
            let mut record = Record::new(fixed_time(), op.level, op.message.as_str(), op.source);
            record.add_args(op.args.iter().cloned());
            reference_handler(out.clone(), add_source).handle(&record)?;
            Ok(out.contents())
        })
        .collect()
}

/// Deferred comparison of recorded lines against expected operations.
///
/// Runs when dropped, unless the thread is already panicking, or earlier
/// through [`Assertion::check`].
#[must_use = "the assertion runs when this guard is dropped"]
pub struct Assertion<T: Tester> {
    tester: T,
    recorder: Recorder,
    ops: Vec<Operation>,
    armed: bool,
}

impl<T: Tester> Assertion<T> {
    /// Run the comparison now
    pub fn check(mut self) {
        self.armed = false;
        self.run();
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    fn run(&self) {
        if let Err(mismatch) = self.recorder.verify(&self.ops) {
            self.tester.fatal(&mismatch.to_string());
        }
    }
}

impl<T: Tester> Drop for Assertion<T> {
    fn drop(&mut self) {
        if self.armed && !std::thread::panicking() {
            self.run();
        }
    }
}

/// Handler that records everything sent to it, and the guard that asserts
/// those records match `ops`.
///
/// # Example
///
/// ```
/// use ctxlog::{args, Context};
/// use ctxlog_test::{new_handler, AssertOptions, Operation, PanicTester};
///
/// let (handler, assertion) = new_handler(
///     PanicTester,
///     AssertOptions::default(),
///     [Operation::info("user created", args!["user", "alice"])],
/// );
/// let ctx = ctxlog::with_handler(&Context::new(), handler);
///
/// ctxlog::info(&ctx, "user created", args!["user", "alice"]);
/// assertion.check();
/// ```
pub fn new_handler<T: Tester>(
    tester: T,
    options: AssertOptions,
    ops: impl IntoIterator<Item = Operation>,
) -> (SharedHandler, Assertion<T>) {
    let recorder = Recorder::new(options);
    let handler = recorder.handler();
    let assertion = Assertion {
        tester,
        recorder,
        ops: ops.into_iter().collect(),
        armed: true,
    };
    (handler, assertion)
}
