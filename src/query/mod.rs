//! Query building against the state attribute.
//!
//! Type-level transition views turn into [`Predicate`]s meaning "record is in
//! this transition's target state". Building them goes through a process-wide
//! memo keyed by (attribute, target), since the same predicates are requested
//! on every access.

mod cache;
mod predicate;

pub use cache::{equality_cache, EqualityKey, MemoCache};
pub use predicate::{Comparand, Predicate};
