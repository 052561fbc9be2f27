//! Core state machine types.
//!
//! This module contains the value objects the registry is built from:
//! - Named states, unique per registry
//! - Transition edges with their source sets
//! - Guard conditions and handlers supplied by the user

mod guard;
mod handler;
mod state;
mod transition;

pub use guard::Condition;
pub use handler::{Handler, HandlerFn, PerSourceHandler};
pub use state::{Owner, State};
pub use transition::{Sources, Transition, TransitionMeta, WILDCARD};
