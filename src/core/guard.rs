//! Guard conditions for controlling transitions.
//!
//! Conditions are pure boolean functions of the record and the arguments a
//! transition is invoked with. All of a transition's conditions must hold,
//! alongside source-state legality, before its handler may run.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition may execute.
///
/// Conditions are evaluated in declaration order and are assumed to be free of
/// side effects, so evaluation stops at the first one that fails.
///
/// # Example
///
/// ```rust
/// use statefield::Condition;
///
/// struct Order {
///     total: u32,
/// }
///
/// let within_limit = Condition::new(|order: &Order, limit: &u32| order.total <= *limit);
///
/// assert!(within_limit.check(&Order { total: 40 }, &50));
/// assert!(!within_limit.check(&Order { total: 60 }, &50));
/// ```
pub struct Condition<R, A = ()> {
    predicate: Arc<dyn Fn(&R, &A) -> bool + Send + Sync>,
}

impl<R, A> Condition<R, A> {
    /// Create a condition from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&R, &A) -> bool + Send + Sync + 'static,
    {
        Condition {
            predicate: Arc::new(predicate),
        }
    }

    /// Check whether the condition holds for this record and arguments.
    pub fn check(&self, record: &R, args: &A) -> bool {
        (self.predicate)(record, args)
    }
}

impl<R, A> Clone for Condition<R, A> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<R, A> fmt::Debug for Condition<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").finish_non_exhaustive()
    }
}
