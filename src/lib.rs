//! Statefield: declarative state machines for persistent record types
//!
//! Statefield attaches finite state machines to record types: plain structs
//! persisted by some storage layer, one of whose attributes holds the
//! record's current state label. Transitions are declared once, as values,
//! and the engine builds the per-type state machine lazily the first time a
//! transition is accessed.
//!
//! # Core Concepts
//!
//! - **Record**: a type with a static attribute schema, exactly one attribute
//!   of which is the state attribute (see [`record_schema!`])
//! - **Declaration**: a named transition with sources, a target, guard
//!   conditions and a handler, built with [`transition`]
//! - **Registry**: the per-type set of states and transitions, created on
//!   first access and shared process-wide
//! - **Bound views**: a declaration accessed through the type yields
//!   filter predicates; accessed through a record it can be checked and
//!   executed
//!
//! The engine never writes the state attribute itself. Handlers do, and
//! whatever a handler returns is handed back to the caller.
//!
//! # Example
//!
//! ```rust
//! use statefield::{transition, FsmError, TransitionDeclaration};
//! use std::sync::LazyLock;
//!
//! struct Article {
//!     title: String,
//!     status: String,
//! }
//!
//! statefield::record_schema! {
//!     Article {
//!         title: Column,
//!         status: State,
//!     }
//! }
//!
//! static SUBMIT: LazyLock<TransitionDeclaration<Article>> = LazyLock::new(|| {
//!     transition("submit")
//!         .source("draft")
//!         .target("review")
//!         .when(|article: &Article, _: &()| !article.title.is_empty())
//!         .handler(|article: &mut Article, ()| article.status = "review".to_string())
//!         .build()
//!         .expect("submit is well-formed")
//! });
//!
//! let mut article = Article {
//!     title: "Release notes".to_string(),
//!     status: "draft".to_string(),
//! };
//!
//! let mut submit = SUBMIT.on(&mut article)?;
//! assert!(submit.can_proceed(&()));
//! submit.execute(())?;
//! assert!(submit.matches_current_state());
//!
//! // Executing again fails: the article is no longer a draft.
//! let again = SUBMIT.on(&mut article)?.execute(());
//! assert!(matches!(again, Err(FsmError::InvalidSourceState { .. })));
//!
//! // Through the type, the declaration builds a query predicate.
//! let in_review = SUBMIT.on_type()?.as_predicate();
//! assert!(in_review.matches(&article));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bound;
pub mod builder;
pub mod core;
pub mod query;
pub mod record;
pub mod registry;
pub mod snapshot;

// Re-export commonly used types
pub use bound::{ClassBoundTransition, InstanceBoundTransition};
pub use builder::{transition, BuildError, TransitionBuilder, TransitionDeclaration};
pub use core::{Condition, PerSourceHandler, Sources, State, WILDCARD};
pub use query::{Comparand, Predicate};
pub use record::{Record, SetupError};
pub use registry::{registry_for, FsmError, InstanceView, StateMachineRegistry, Stateful};
pub use snapshot::{RegistrySnapshot, SnapshotError};
