//! Transitions viewed from a live record.

use crate::builder::TransitionDeclaration;
use crate::core::Transition;
use crate::record::Record;
use crate::registry::error::describe_raw;
use crate::registry::{FsmError, InstanceView, StateMachineRegistry};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A transition bound to one record.
///
/// Holds the record mutably for its lifetime, so at most one bound
/// transition can execute against a record at a time.
pub struct InstanceBoundTransition<'d, 'r, R, A = (), O = ()> {
    declaration: &'d TransitionDeclaration<R, A, O>,
    registry: Arc<StateMachineRegistry>,
    transition: Arc<Transition>,
    record: &'r mut R,
}

impl<'d, 'r, R: Record, A, O> InstanceBoundTransition<'d, 'r, R, A, O> {
    pub(crate) fn new(
        declaration: &'d TransitionDeclaration<R, A, O>,
        registry: Arc<StateMachineRegistry>,
        transition: Arc<Transition>,
        record: &'r mut R,
    ) -> Self {
        Self {
            declaration,
            registry,
            transition,
            record,
        }
    }

    pub fn transition(&self) -> &Arc<Transition> {
        &self.transition
    }

    pub fn record(&self) -> &R {
        &*self.record
    }

    /// The record seen through its registry.
    pub fn view(&self) -> InstanceView<'_, R> {
        InstanceView::new(Arc::clone(&self.registry), &*self.record)
    }

    fn current_raw_value(&self) -> Option<String> {
        self.record.read_attribute(self.registry.state_attribute())
    }

    /// True when the record is already in this transition's target state.
    ///
    /// A record holding an unregistered or unset value matches nothing.
    pub fn matches_current_state(&self) -> bool {
        self.view()
            .current_state()
            .is_ok_and(|state| state == *self.transition.target())
    }

    /// True when the record's current value is one of the transition's sources.
    pub fn transition_possible(&self) -> bool {
        self.transition
            .sources()
            .contains(self.current_raw_value().as_deref())
    }

    /// True when every condition holds, checked in declaration order.
    pub fn conditions_met(&self, args: &A) -> bool {
        self.declaration
            .conditions()
            .iter()
            .all(|condition| condition.check(&*self.record, args))
    }

    pub fn can_proceed(&self, args: &A) -> bool {
        self.transition_possible() && self.conditions_met(args)
    }

    /// Run the transition's handler against the record.
    ///
    /// Fails without running any handler when the record is in a state the
    /// transition does not leave from, or when a condition does not hold. The
    /// handler is responsible for writing the new state value; its output is
    /// returned unchanged.
    pub fn execute(&mut self, args: A) -> Result<O, FsmError> {
        let current = self.current_raw_value();

        if !self.transition.sources().contains(current.as_deref()) {
            return Err(FsmError::InvalidSourceState {
                current: describe_raw(current.as_deref()),
                transition: self.transition.name().to_string(),
            });
        }

        if !self.conditions_met(&args) {
            return Err(FsmError::Precondition {
                transition: self.transition.name().to_string(),
            });
        }

        let declaration = self.declaration;
        let handler = declaration
            .handler()
            .resolve(current.as_deref())
            .ok_or_else(|| FsmError::NoHandlerForSource {
                current: describe_raw(current.as_deref()),
                transition: self.transition.name().to_string(),
            })?;

        debug!(
            record_type = self.registry.record_type(),
            transition = self.transition.name(),
            from = current.as_deref().unwrap_or_default(),
            to = self.transition.target().label(),
            "executing transition"
        );
        Ok(handler(&mut *self.record, args))
    }
}

impl<R, A, O> fmt::Debug for InstanceBoundTransition<'_, '_, R, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceBoundTransition")
            .field("record_type", &self.registry.record_type())
            .field("transition", &self.transition.name())
            .field("target", &self.transition.target().label())
            .finish_non_exhaustive()
    }
}
