//! Declared transitions bound to a record type or to a single record.
//!
//! A [`TransitionDeclaration`](crate::builder::TransitionDeclaration) is
//! accessed either through the type, yielding a [`ClassBoundTransition`] for
//! building queries, or through a record, yielding an
//! [`InstanceBoundTransition`] for checking and firing the transition. Both
//! views share the registry's single [`Transition`](crate::core::Transition)
//! entry and are cheap to recreate.

mod class;
mod instance;

pub use class::ClassBoundTransition;
pub use instance::InstanceBoundTransition;
