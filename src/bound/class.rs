//! Transitions viewed from the record type.

use crate::core::Transition;
use crate::query::{equality_cache, Comparand, Predicate};
use crate::registry::StateMachineRegistry;
use std::sync::Arc;
use tracing::warn;

/// A transition bound to its record type rather than to a record.
///
/// Its only job is building filter predicates over the state attribute:
/// "records already in this transition's target state".
#[derive(Debug, Clone)]
pub struct ClassBoundTransition {
    registry: Arc<StateMachineRegistry>,
    transition: Arc<Transition>,
}

impl ClassBoundTransition {
    pub(crate) fn new(registry: Arc<StateMachineRegistry>, transition: Arc<Transition>) -> Self {
        Self {
            registry,
            transition,
        }
    }

    pub fn registry(&self) -> &Arc<StateMachineRegistry> {
        &self.registry
    }

    pub fn transition(&self) -> &Arc<Transition> {
        &self.transition
    }

    /// Predicate selecting records whose state equals the target.
    ///
    /// Predicates are memoized per (state attribute, target).
    pub fn as_predicate(&self) -> Predicate {
        equality_cache().get_value((
            self.registry.state_attribute(),
            self.transition.target().shared_label(),
        ))
    }

    /// Predicate comparing "in the target state" against `expected`.
    pub fn is(&self, expected: bool) -> Predicate {
        self.as_predicate().is(expected)
    }

    /// Compare this transition against an arbitrary value.
    ///
    /// Booleans behave like [`is`](Self::is). Anything else is logged as a
    /// warning and yields a predicate that matches no record.
    pub fn compare<V: Into<Comparand>>(&self, value: V) -> Predicate {
        match value.into() {
            Comparand::Bool(expected) => self.is(expected),
            Comparand::Unexpected(argument) => {
                warn!(
                    record_type = self.registry.record_type(),
                    transition = self.transition.name(),
                    argument = %argument,
                    "unexpected comparison argument"
                );
                Predicate::never()
            }
        }
    }
}
