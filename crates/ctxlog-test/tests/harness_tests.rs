use ctxlog::{args, group, Attr, Context};
use ctxlog_test::{new_handler, repeated, AssertOptions, Operation, Tester};
use std::sync::{Arc, Mutex};
use std::thread;

const CLIENTS: usize = 200;

/// Keeps every fatal message instead of failing.
#[derive(Default)]
struct RecordingTester {
    messages: Mutex<Vec<String>>,
}

impl RecordingTester {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Tester for RecordingTester {
    fn fatal(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn expected_operations() -> Vec<Operation> {
    vec![
        Operation::debug(
            "DEBUG MESSAGE",
            args!["key", "value", "integer", 100, Attr::string("alog.String", "value")],
        ),
        Operation::info("INFO MESSAGE", args![]),
        Operation::warn(
            "WARN MESSAGE",
            args!["owner", "amidman", group!("user", "age", 100)],
        ),
        Operation::error(
            "ERROR MESSAGE",
            args![
                "owner",
                "amidman",
                group!("user", "sex", "male", group!("city", "name", "Samara")),
            ],
        ),
        Operation::warn(
            "limit overflow",
            args![
                "owner",
                "amidman",
                group!("user", "sex", "male", group!("city", "budget", "unlimited")),
            ],
        ),
    ]
}

/// Emits exactly what `expected_operations` describes, through scoped contexts.
fn emit_all(ctx: &Context) {
    ctxlog::debug(
        ctx,
        "DEBUG MESSAGE",
        args!["key", "value", "integer", 100, Attr::string("alog.String", "value")],
    );
    ctxlog::info(ctx, "INFO MESSAGE", args![]);

    let ctx = ctxlog::with(ctx, args!["owner", "amidman"]);
    let ctx = ctxlog::with_group(&ctx, "user");
    ctxlog::warn(&ctx, "WARN MESSAGE", args!["age", 100]);

    let ctx = ctxlog::with(&ctx, args!["sex", "male"]);
    let ctx = ctxlog::with_group(&ctx, "city");
    ctxlog::error(&ctx, "ERROR MESSAGE", args!["name", "Samara"]);

    let ctx = ctxlog::with(&ctx, args!["budget", "unlimited"]);
    ctxlog::warn(&ctx, "limit overflow", args![]);
}

fn warn_with_newlines(ctx: &Context) {
    ctxlog::warn(
        ctx,
        "WARN MESSAGE",
        args!["MESSAGE\n", "\nMESSAGE", "MESSAGE\n", "\nMESSAGE", "MESSAGE\n", "\nMESSAGE"],
    );
}

fn debug_operation() -> Operation {
    Operation::debug(
        "DEBUG MESSAGE",
        args!["key", "value", "integer", 100, Attr::string("alog.String", "value")],
    )
}

#[test]
fn test_success_case() {
    let tester = RecordingTester::default();
    let (handler, assertion) = new_handler(&tester, AssertOptions::default(), expected_operations());

    emit_all(&ctxlog::with_handler(&Context::new(), handler));

    assertion.check();
    assert!(tester.messages().is_empty(), "{:?}", tester.messages());
}

#[test]
fn test_invalid_length_dumps_both_sides() {
    const EXPECTED: &str = r#"
INVALID RECORDS
EXPECTED:
[
----
    time=2023-08-08T20:14:06.000Z level=DEBUG msg="DEBUG MESSAGE" key=value integer=100 alog.String=value
----
    time=2023-08-08T20:14:06.000Z level=DEBUG msg="DEBUG MESSAGE" key=value integer=100 alog.String=value
----
    time=2023-08-08T20:14:06.000Z level=DEBUG msg="DEBUG MESSAGE" key=value integer=100 alog.String=value
----
]
ACTUAL:
[
----
    time=2023-08-08T20:14:06.000Z level=WARN msg="WARN MESSAGE" "MESSAGE\n"="\nMESSAGE" "MESSAGE\n"="\nMESSAGE" "MESSAGE\n"="\nMESSAGE"
----
    time=2023-08-08T20:14:06.000Z level=WARN msg="WARN MESSAGE" "MESSAGE\n"="\nMESSAGE" "MESSAGE\n"="\nMESSAGE" "MESSAGE\n"="\nMESSAGE"
----
]
"#;
    let tester = RecordingTester::default();
    let (handler, assertion) = new_handler(
        &tester,
        AssertOptions::default(),
        repeated(&[debug_operation()], 3),
    );
    let ctx = ctxlog::with_handler(&Context::new(), handler);

    warn_with_newlines(&ctx);
    warn_with_newlines(&ctx);

    assertion.check();
    assert_eq!(tester.messages(), vec![EXPECTED.to_string()]);
}

#[test]
fn test_first_differing_record_is_reported() {
    const EXPECTED: &str = r#"
INVALID RECORD BY 2 INDEX
EXPECTED:
----
    time=2023-08-08T20:14:06.000Z level=DEBUG msg="DEBUG MESSAGE" key=value integer=100 alog.String=value
----
ACTUAL:
----
    time=2023-08-08T20:14:06.000Z level=WARN msg="WARN MESSAGE" "MESSAGE\n"="\nMESSAGE" "MESSAGE\n"="\nMESSAGE" "MESSAGE\n"="\nMESSAGE"
----
"#;
    let tester = RecordingTester::default();
    let (handler, assertion) = new_handler(
        &tester,
        AssertOptions::default(),
        repeated(&[debug_operation()], 3),
    );
    let ctx = ctxlog::with_handler(&Context::new(), handler);

    ctxlog::debug(
        &ctx,
        "DEBUG MESSAGE",
        args!["key", "value", "integer", 100, Attr::string("alog.String", "value")],
    );
    ctxlog::debug(
        &ctx,
        "DEBUG MESSAGE",
        args!["key", "value", "integer", 100, Attr::string("alog.String", "value")],
    );
    warn_with_newlines(&ctx);

    assertion.check();
    assert_eq!(tester.messages(), vec![EXPECTED.to_string()]);
}

#[test]
fn test_parallel_emitters_unordered() {
    let tester = Arc::new(RecordingTester::default());
    let (handler, assertion) = new_handler(
        tester.clone(),
        AssertOptions::default(),
        repeated(&expected_operations(), CLIENTS),
    );
    let ctx = ctxlog::with_handler(&Context::new(), handler);

    thread::scope(|scope| {
        for _ in 0..CLIENTS {
            scope.spawn(|| emit_all(&ctx));
        }
    });

    assert_eq!(
        assertion.recorder().records().len(),
        CLIENTS * expected_operations().len()
    );
    assertion.check();
    assert!(tester.messages().is_empty());
}

#[test]
fn test_out_of_order_records_fail_when_order_is_checked() {
    let tester = RecordingTester::default();
    let options = AssertOptions {
        check_order: true,
        ..AssertOptions::default()
    };
    let (handler, assertion) = new_handler(
        &tester,
        options,
        [
            Operation::info("first", args![]),
            Operation::info("second", args![]),
        ],
    );
    let ctx = ctxlog::with_handler(&Context::new(), handler);

    ctxlog::info(&ctx, "second", args![]);
    ctxlog::info(&ctx, "first", args![]);

    assertion.check();
    let messages = tester.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("\nINVALID RECORD BY 0 INDEX\n"));
}

#[test]
fn test_same_records_pass_without_order_check() {
    let tester = RecordingTester::default();
    let (handler, assertion) = new_handler(
        &tester,
        AssertOptions::default(),
        [
            Operation::info("first", args![]),
            Operation::info("second", args![]),
        ],
    );
    let ctx = ctxlog::with_handler(&Context::new(), handler);

    ctxlog::info(&ctx, "second", args![]);
    ctxlog::info(&ctx, "first", args![]);

    assertion.check();
    assert!(tester.messages().is_empty());
}

#[test]
fn test_levels_below_debug_are_recorded() {
    let tester = RecordingTester::default();
    let level = ctxlog::Level::DEBUG.offset(-2);
    let (handler, assertion) = new_handler(
        &tester,
        AssertOptions::default(),
        [Operation::new(level, "trace", args!["n", 1])],
    );
    let ctx = ctxlog::with_handler(&Context::new(), handler);

    ctxlog::log(&ctx, level, "trace", args!["n", 1]);

    assert_eq!(
        assertion.recorder().records(),
        vec!["time=2023-08-08T20:14:06.000Z level=DEBUG-2 msg=trace n=1\n"]
    );
    assertion.check();
    assert!(tester.messages().is_empty());
}
