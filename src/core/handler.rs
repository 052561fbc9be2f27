//! Transition handlers supplied by the user.
//!
//! A handler either applies regardless of the source state, or is a set of
//! callables keyed by the literal source state they handle. Handlers own the
//! record mutation: they write the new raw value into the state attribute.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type alias for handler callables.
pub type HandlerFn<R, A, O> = Arc<dyn Fn(&mut R, A) -> O + Send + Sync>;

/// Business logic invoked when a transition fires.
pub enum Handler<R, A = (), O = ()> {
    /// One callable for every legal source state.
    Single(HandlerFn<R, A, O>),

    /// One callable per literal source state.
    PerSource(HashMap<String, HandlerFn<R, A, O>>),
}

impl<R, A, O> Handler<R, A, O> {
    pub fn single<F>(handler: F) -> Self
    where
        F: Fn(&mut R, A) -> O + Send + Sync + 'static,
    {
        Handler::Single(Arc::new(handler))
    }

    /// Select the callable for a record currently holding `source`.
    ///
    /// Per-source handlers have no entry for an unset source.
    pub fn resolve(&self, source: Option<&str>) -> Option<&HandlerFn<R, A, O>> {
        match self {
            Handler::Single(handler) => Some(handler),
            Handler::PerSource(handlers) => source.and_then(|label| handlers.get(label)),
        }
    }

    pub fn is_per_source(&self) -> bool {
        matches!(self, Handler::PerSource(_))
    }
}

impl<R, A, O> Clone for Handler<R, A, O> {
    fn clone(&self) -> Self {
        match self {
            Handler::Single(handler) => Handler::Single(Arc::clone(handler)),
            Handler::PerSource(handlers) => Handler::PerSource(handlers.clone()),
        }
    }
}

impl<R, A, O> fmt::Debug for Handler<R, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Single(_) => f.write_str("Handler::Single"),
            Handler::PerSource(handlers) => {
                let mut sources: Vec<&str> = handlers.keys().map(String::as_str).collect();
                sources.sort_unstable();
                f.debug_tuple("Handler::PerSource").field(&sources).finish()
            }
        }
    }
}

/// Builder for handlers that behave differently per source state.
///
/// Entries are validated when the owning transition is built: every label
/// must be admitted by the transition's sources, and no label may be handled
/// twice.
///
/// # Example
///
/// ```rust
/// use statefield::PerSourceHandler;
///
/// struct Door {
///     state: String,
/// }
///
/// let close: PerSourceHandler<Door, (), &'static str> = PerSourceHandler::new()
///     .on("open", |door: &mut Door, ()| {
///         door.state = "closed".to_string();
///         "closed an open door"
///     })
///     .on("ajar", |door: &mut Door, ()| {
///         door.state = "closed".to_string();
///         "pushed an ajar door shut"
///     });
///
/// assert_eq!(close.sources().collect::<Vec<_>>(), vec!["open", "ajar"]);
/// ```
pub struct PerSourceHandler<R, A = (), O = ()> {
    pub(crate) entries: Vec<(String, HandlerFn<R, A, O>)>,
}

impl<R, A, O> PerSourceHandler<R, A, O> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Handle the transition when the record is in `source`.
    pub fn on<F>(mut self, source: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut R, A) -> O + Send + Sync + 'static,
    {
        self.entries.push((source.into(), Arc::new(handler)));
        self
    }

    /// Source labels in the order they were added.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub(crate) fn into_handler(self) -> Handler<R, A, O> {
        Handler::PerSource(self.entries.into_iter().collect())
    }
}

impl<R, A, O> Default for PerSourceHandler<R, A, O> {
    fn default() -> Self {
        Self::new()
    }
}
