//! Call-site argument macros

/// Build a call-site argument list, converting each element with `Arg::from`.
///
/// # Example
///
/// ```
/// use ctxlog::{args, Arg};
///
/// let err = std::io::Error::other("disk full");
/// let list = args!["user", "alice", "attempt", 3, &err];
/// assert_eq!(list.len(), 5);
/// assert!(matches!(list[4], Arg::Error(Some(_))));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Build a named group whose members go through the same normalization as
/// emission arguments.
///
/// # Example
///
/// ```
/// use ctxlog::{group, Attr, Value};
///
/// let user = group!("user", "age", 10, group!("city", "name", "Samara"));
/// assert_eq!(user.key, "user");
/// assert!(matches!(user.value, Value::Group(ref members) if members.len() == 2));
/// ```
#[macro_export]
macro_rules! group {
    ($key:expr $(, $arg:expr)* $(,)?) => {
        $crate::Attr::group($key, $crate::normalize($crate::args![$($arg),*]))
    };
}
