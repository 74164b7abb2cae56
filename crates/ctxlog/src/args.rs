//! Loosely-typed call-site arguments and their normalization into attrs.
//!
//! Call sites pass a flat list (`"key", value, err, attr, ...`) built with
//! [`args!`](crate::args). [`normalize`] turns that list into attrs left to
//! right:
//!
//! 1. a pre-built [`Attr`] is taken as-is;
//! 2. an error becomes the canonical error attr (`err=<message>`);
//! 3. a string followed by anything is a key, and the next argument is its value;
//! 4. a trailing string with nothing after it is logged under [`BAD_KEY`];
//! 5. any other value in key position is logged under [`BAD_KEY`].
//!
//! Misuse never panics and never drops data; it shows up as `!BADKEY`.

use crate::attr::Attr;
use crate::keys::{BAD_KEY, ERROR_KEY, NIL_ERROR};
use crate::value::{Sensitive, Value};
use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::time::Duration;

/// One call-site argument, classified by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A string; a key when something follows it
    Str(String),
    /// A non-string value
    Value(Value),
    /// A pre-built attribute
    Attr(Attr),
    /// An error's rendered message, or `None` for an explicitly absent error
    Error(Option<String>),
}

impl Arg {
    /// Capture any error by its `Display` message
    pub fn err<E: StdError + ?Sized>(err: &E) -> Self {
        Arg::Error(Some(err.to_string()))
    }

    /// Capture an optional error; `None` logs as `err=nil`
    pub fn opt_err<E: StdError + ?Sized>(err: Option<&E>) -> Self {
        Arg::Error(err.map(ToString::to_string))
    }

    /// Convert an argument found in value position, verbatim. A prebuilt
    /// attr becomes a one-member group (`user.age=10`), not a quoted
    /// `user="age=10"` string as Go's alog prints it.
    pub fn into_value(self) -> Value {
        match self {
            Arg::Str(s) => Value::String(s),
            Arg::Value(v) => v,
            Arg::Attr(attr) => Value::Group(vec![attr]),
            Arg::Error(Some(message)) => Value::String(message),
            Arg::Error(None) => Value::Nil,
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<Attr> for Arg {
    fn from(value: Attr) -> Self {
        Arg::Attr(value)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

macro_rules! value_arg {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Arg::Value(value.into())
            }
        })*
    };
}

value_arg!(
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    Duration,
    DateTime<Utc>
);

impl<T> From<Sensitive<T>> for Arg {
    fn from(value: Sensitive<T>) -> Self {
        Arg::Value(value.into())
    }
}

impl From<&(dyn StdError + 'static)> for Arg {
    fn from(err: &(dyn StdError + 'static)) -> Self {
        Arg::err(err)
    }
}

impl From<&(dyn StdError + Send + Sync + 'static)> for Arg {
    fn from(err: &(dyn StdError + Send + Sync + 'static)) -> Self {
        Arg::err(err)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Arg {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        Arg::err(err.as_ref())
    }
}

impl From<std::io::Error> for Arg {
    fn from(err: std::io::Error) -> Self {
        Arg::err(&err)
    }
}

impl From<&std::io::Error> for Arg {
    fn from(err: &std::io::Error) -> Self {
        Arg::err(err)
    }
}

impl From<Option<&(dyn StdError + 'static)>> for Arg {
    fn from(err: Option<&(dyn StdError + 'static)>) -> Self {
        Arg::opt_err(err)
    }
}

/// Normalize call-site arguments into attrs, in order.
pub fn normalize(args: impl IntoIterator<Item = Arg>) -> Vec<Attr> {
    let mut args = args.into_iter();
    let mut attrs = Vec::with_capacity(args.size_hint().0);

    while let Some(arg) = args.next() {
        let attr = match arg {
            Arg::Attr(attr) => attr,
            Arg::Error(message) => message_attr(message),
            Arg::Str(key) => match args.next() {
                Some(value) => Attr::new(key, value.into_value()),
                None => Attr::string(BAD_KEY, key),
            },
            Arg::Value(value) => Attr::new(BAD_KEY, value),
        };
        attrs.push(attr);
    }

    attrs
}

/// Canonical attr for an error, or for its explicit absence.
///
/// `None` maps to `err=nil`, which is distinct from "no error attr at all".
pub fn error_attr<E: StdError + ?Sized>(err: Option<&E>) -> Attr {
    message_attr(err.map(ToString::to_string))
}

/// Canonical attr for an explicitly absent error
pub fn nil_error_attr() -> Attr {
    Attr::string(ERROR_KEY, NIL_ERROR)
}

fn message_attr(message: Option<String>) -> Attr {
    match message {
        Some(message) => Attr::string(ERROR_KEY, message),
        None => nil_error_attr(),
    }
}

/// Anything [`Operation::error`](crate::Operation::error) accepts as its error.
pub trait IntoErrorAttr {
    fn into_error_attr(self) -> Attr;
}

impl<E: StdError + ?Sized> IntoErrorAttr for &E {
    fn into_error_attr(self) -> Attr {
        error_attr(Some(self))
    }
}

impl<E: StdError + ?Sized> IntoErrorAttr for Option<&E> {
    fn into_error_attr(self) -> Attr {
        error_attr(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use proptest::prelude::*;
    use std::io;

    fn eof() -> io::Error {
        io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected EOF")
    }

    #[test]
    fn test_empty_input_yields_no_attrs() {
        assert!(normalize(args![]).is_empty());
    }

    #[test]
    fn test_single_string_is_bad_key() {
        let attrs = normalize(args!["key"]);
        assert_eq!(attrs, vec![Attr::string(BAD_KEY, "key")]);
    }

    #[test]
    fn test_trailing_value_is_bad_key() {
        let attrs = normalize(args!["key", "value", 100]);
        assert_eq!(
            attrs,
            vec![Attr::string("key", "value"), Attr::int(BAD_KEY, 100)]
        );
    }

    #[test]
    fn test_errors_interleave_with_pairs() {
        let closed = io::Error::other("server closed");
        let too_long = io::Error::new(io::ErrorKind::InvalidData, "token too long");
        let ctx_value = Attr::string("ctx", "background");

        let attrs = normalize(args![
            "key",
            "value",
            &closed,
            "int",
            100,
            "err",
            &too_long,
            ctx_value.clone(),
            eof(),
        ]);

        assert_eq!(
            attrs,
            vec![
                Attr::string("key", "value"),
                Attr::string(ERROR_KEY, "server closed"),
                Attr::int("int", 100),
                Attr::string("err", "token too long"),
                ctx_value,
                Attr::string(ERROR_KEY, "unexpected EOF"),
            ]
        );
    }

    #[test]
    fn test_value_after_key_is_taken_verbatim() {
        let nested = Attr::int("age", 10);
        let attrs = normalize(args![
            "user",
            nested.clone(),
            "missing",
            Arg::opt_err::<io::Error>(None),
        ]);
        assert_eq!(
            attrs,
            vec![
                Attr::new("user", Value::Group(vec![nested])),
                Attr::new("missing", Value::Nil),
            ]
        );
    }

    #[test]
    fn test_non_string_key_position() {
        let attrs = normalize(args![true, 1.5, "k", "v"]);
        assert_eq!(
            attrs,
            vec![
                Attr::bool(BAD_KEY, true),
                Attr::float(BAD_KEY, 1.5),
                Attr::string("k", "v"),
            ]
        );
    }

    #[test]
    fn test_error_attr_nil() {
        assert_eq!(error_attr::<io::Error>(None), Attr::string(ERROR_KEY, "nil"));
        assert_eq!(normalize([Arg::opt_err::<io::Error>(None)]), vec![nil_error_attr()]);
    }

    #[test]
    fn test_error_attr_uses_message() {
        let err = eof();
        assert_eq!(
            error_attr(Some(&err)),
            Attr::string(ERROR_KEY, "unexpected EOF")
        );
    }

    #[test]
    fn test_error_attr_wrapped_message() {
        #[derive(Debug, thiserror::Error)]
        #[error("failed to do, {0}")]
        struct Wrapped(#[source] io::Error);

        let err = Wrapped(eof());
        assert_eq!(
            error_attr(Some(&err)),
            Attr::string(ERROR_KEY, "failed to do, unexpected EOF")
        );
    }

    #[test]
    fn test_error_attr_is_idempotent() {
        let err = eof();
        assert_eq!(error_attr(Some(&err)), error_attr(Some(&err)));
        assert_eq!(error_attr::<io::Error>(None), error_attr::<io::Error>(None));
    }

    #[test]
    fn test_into_error_attr_impls() {
        let err = eof();
        assert_eq!((&err).into_error_attr(), error_attr(Some(&err)));
        assert_eq!(None::<&io::Error>.into_error_attr(), nil_error_attr());
    }

    #[derive(Debug, Clone)]
    enum Kind {
        Str,
        Int,
        Attr,
        Err,
    }

    fn arg_for(kind: &Kind, i: usize) -> Arg {
        match kind {
            Kind::Str => Arg::Str(format!("s{i}")),
            Kind::Int => Arg::from(i),
            Kind::Attr => Arg::Attr(Attr::uint("a", i as u64)),
            Kind::Err => Arg::Error(Some(format!("e{i}"))),
        }
    }

    fn kind_strategy() -> impl Strategy<Value = Kind> {
        prop_oneof![
            Just(Kind::Str),
            Just(Kind::Int),
            Just(Kind::Attr),
            Just(Kind::Err),
        ]
    }

    proptest! {
        #[test]
        fn prop_attr_count_follows_consumption_rule(kinds in prop::collection::vec(kind_strategy(), 0..32)) {
            let args: Vec<Arg> = kinds.iter().enumerate().map(|(i, k)| arg_for(k, i)).collect();

            let mut expected = 0;
            let mut i = 0;
            while i < kinds.len() {
                let pair = matches!(kinds[i], Kind::Str) && i + 1 < kinds.len();
                i += if pair { 2 } else { 1 };
                expected += 1;
            }

            let attrs = normalize(args);
            prop_assert_eq!(attrs.len(), expected);
            prop_assert!(attrs.len() <= kinds.len());
            prop_assert!(attrs.len() * 2 >= kinds.len());
        }

        #[test]
        fn prop_bad_key_only_for_misuse(kinds in prop::collection::vec(kind_strategy(), 0..32)) {
            let args: Vec<Arg> = kinds.iter().enumerate().map(|(i, k)| arg_for(k, i)).collect();
            let well_formed = kinds.iter().all(|k| matches!(k, Kind::Attr | Kind::Err));
            let attrs = normalize(args);
            if well_formed {
                prop_assert!(attrs.iter().all(|a| a.key != BAD_KEY));
            }
        }
    }
}
