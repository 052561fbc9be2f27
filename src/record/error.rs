//! Setup errors raised while resolving a record type's state attribute.

use thiserror::Error;

/// Errors that prevent a state machine registry from being built.
///
/// These indicate a configuration defect in the record type and are surfaced
/// to whichever caller first accesses one of its transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("no state attribute found in record type {record_type}")]
    NoStateAttribute { record_type: &'static str },

    #[error("more than one state attribute found in record type {record_type} ({attributes:?})")]
    MultipleStateAttributes {
        record_type: &'static str,
        attributes: Vec<&'static str>,
    },
}
