//! Errors raised by registries and transition execution.

use crate::record::SetupError;
use thiserror::Error;

/// Errors that can occur while resolving states or executing transitions.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("Unable to switch from {current} using transition '{transition}'")]
    InvalidSourceState { current: String, transition: String },

    #[error("Preconditions of transition '{transition}' are not satisfied")]
    Precondition { transition: String },

    #[error("State '{label}' is not registered for {record_type}")]
    StateNotFound {
        record_type: &'static str,
        label: String,
    },

    #[error("{record_type} record holds unregistered state value {value:?}")]
    UnknownState {
        record_type: &'static str,
        value: Option<String>,
    },

    #[error("Transition '{transition}' has no handler for the current state {current}")]
    NoHandlerForSource { current: String, transition: String },
}

/// Human-readable form of a record's raw state value.
pub(crate) fn describe_raw(raw: Option<&str>) -> String {
    match raw {
        Some(label) => format!("'{label}'"),
        None => "an unset state".to_string(),
    }
}
