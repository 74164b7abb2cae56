//! ctxlog-test - assertions over the records a ctxlog handler receives
//!
//! [`new_handler`] returns a handler to bind to the code under test and a
//! guard holding the expected [`Operation`]s. Records are rendered as text
//! lines with a fixed clock, so expected and actual lines compare exactly.
//! When the guard drops, a mismatch is reported through the [`Tester`] with
//! a dump of both sides.
//!
//! Comparison sorts both sides unless [`AssertOptions::check_order`] is set,
//! which keeps assertions stable when records come from several threads.

mod assertion;
mod collector;
mod mismatch;
mod operation;
mod time;

pub use assertion::{
    expected_records, new_handler, AssertOptions, Assertion, PanicTester, Recorder, Tester,
};
pub use mismatch::{compare, Mismatch};
pub use operation::{repeated, Operation};
pub use time::fixed_time;
