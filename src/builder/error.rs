//! Build errors for transition declarations.

use std::fmt;
use thiserror::Error;

/// Where a label appears in a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Source,
    Target,
    Handler,
}

impl fmt::Display for LabelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LabelRole::Source => "source",
            LabelRole::Target => "target",
            LabelRole::Handler => "handler source",
        })
    }
}

/// A single problem found while validating a declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeclarationViolation {
    #[error("{role} label must not be blank")]
    BlankLabel { role: LabelRole },

    #[error("the wildcard cannot be used as a {role} label")]
    WildcardLabel { role: LabelRole },

    #[error("source list is empty")]
    EmptySources,

    #[error("handler for '{label}' is not compatible with the declared sources")]
    IncompatibleSource { label: String },

    #[error("more than one handler declared for source '{label}'")]
    DuplicateSourceHandler { label: String },

    #[error("no handler declared for source '{label}'")]
    MissingSourceHandler { label: String },
}

/// Errors that can occur when building transition declarations.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition '{name}' target state not specified. Call .target(label)")]
    MissingTarget { name: String },

    #[error("Transition '{name}' handler not specified. Call .handler(fn) or .per_source(handlers)")]
    MissingHandler { name: String },

    #[error("Transition '{name}' is misconfigured: {}", join_violations(.violations))]
    InvalidDeclaration {
        name: String,
        violations: Vec<DeclarationViolation>,
    },
}

fn join_violations(violations: &[DeclarationViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
