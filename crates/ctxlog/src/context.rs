//! Request-scoped carrier for the logging handler
//!
//! A [`Context`] is an immutable, cheaply clonable map keyed by type. Every
//! "with" operation returns a new context; the receiver is never modified,
//! so a context can be handed to any number of threads.

use crate::args::{normalize, Arg};
use crate::attr::Attr;
use crate::default::default_handler;
use crate::handler::SharedHandler;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Context {
    values: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

/// Crate-private key; nothing outside the crate can name it.
struct HandlerSlot(SharedHandler);

impl Context {
    /// Empty context; emission through it uses the default handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with `value` stored under its type, replacing any previous value of that type
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut values = (*self.values).clone();
        values.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            values: Arc::new(values),
        }
    }

    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Whether both contexts share the same storage
    pub fn ptr_eq(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .field("has_handler", &self.value::<HandlerSlot>().is_some())
            .finish()
    }
}

/// Bind `handler` to a derived context.
///
/// `None` leaves the context as it is and returns a clone of it.
pub fn with_handler(ctx: &Context, handler: impl Into<Option<SharedHandler>>) -> Context {
    match handler.into() {
        Some(handler) => ctx.with_value(HandlerSlot(handler)),
        None => ctx.clone(),
    }
}

/// Handler bound to `ctx`, or the process default when none is bound
pub fn handler(ctx: &Context) -> SharedHandler {
    match ctx.value::<HandlerSlot>() {
        Some(HandlerSlot(handler)) => handler.clone(),
        None => default_handler(),
    }
}

/// Derived context whose handler adds the normalized `args` to every record.
///
/// An empty argument list returns a clone of `ctx`.
pub fn with(ctx: &Context, args: impl IntoIterator<Item = Arg>) -> Context {
    with_attrs(ctx, normalize(args))
}

/// Like [`with`], with attrs that are already built
pub fn with_attrs(ctx: &Context, attrs: impl IntoIterator<Item = Attr>) -> Context {
    let attrs: Vec<Attr> = attrs.into_iter().collect();
    if attrs.is_empty() {
        return ctx.clone();
    }
    let scoped = handler(ctx).with_attrs(attrs);
    with_handler(ctx, scoped)
}

/// Derived context whose handler nests later attrs under `name`.
///
/// An empty name returns a clone of `ctx`.
pub fn with_group(ctx: &Context, name: &str) -> Context {
    if name.is_empty() {
        return ctx.clone();
    }
    let scoped = handler(ctx).with_group(name);
    with_handler(ctx, scoped)
}
