//! A registry bound to one live record.

use crate::core::State;
use crate::record::Record;
use crate::registry::error::FsmError;
use crate::registry::machine::StateMachineRegistry;
use std::fmt;
use std::sync::Arc;

/// Read-only view of a record through its type's registry.
///
/// Views are transient: they borrow the record and hold no resources of
/// their own.
pub struct InstanceView<'r, R> {
    registry: Arc<StateMachineRegistry>,
    record: &'r R,
}

impl<'r, R: Record> InstanceView<'r, R> {
    pub(crate) fn new(registry: Arc<StateMachineRegistry>, record: &'r R) -> Self {
        Self { registry, record }
    }

    pub fn registry(&self) -> &Arc<StateMachineRegistry> {
        &self.registry
    }

    pub fn record(&self) -> &'r R {
        self.record
    }

    /// The raw value stored in the record's state attribute.
    pub fn current_raw_value(&self) -> Option<String> {
        self.record.read_attribute(self.registry.state_attribute())
    }

    /// The registered state matching the record's raw value.
    ///
    /// Fails with [`FsmError::UnknownState`] when the record holds a value no
    /// declared transition references, or no value at all.
    pub fn current_state(&self) -> Result<State, FsmError> {
        let raw = self.current_raw_value();
        let unknown = || FsmError::UnknownState {
            record_type: self.registry.record_type(),
            value: raw.clone(),
        };

        match raw.as_deref() {
            Some(label) => self.registry.state(label).map_err(|_| unknown()),
            None => Err(unknown()),
        }
    }

    /// True when the record currently holds `label`.
    pub fn is_in(&self, label: &str) -> bool {
        self.current_raw_value().as_deref() == Some(label)
    }
}

impl<R> fmt::Debug for InstanceView<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceView")
            .field("record_type", &self.registry.record_type())
            .field("state_attribute", &self.registry.state_attribute())
            .finish_non_exhaustive()
    }
}
