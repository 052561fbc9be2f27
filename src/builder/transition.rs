//! Builder for declaring transitions.

use crate::builder::declaration::TransitionDeclaration;
use crate::builder::error::{BuildError, DeclarationViolation, LabelRole};
use crate::core::{Condition, Handler, PerSourceHandler, Sources, TransitionMeta, WILDCARD};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

type Check = Validation<(), NonEmptyVec<DeclarationViolation>>;

enum DraftHandler<R, A, O> {
    Single(Handler<R, A, O>),
    PerSource(PerSourceHandler<R, A, O>),
}

/// Builder for transition declarations with a fluent API.
///
/// Sources default to any state and conditions to none; a target and a
/// handler are required.
pub struct TransitionBuilder<R, A = (), O = ()> {
    name: String,
    sources: Sources,
    target: Option<String>,
    conditions: Vec<Condition<R, A>>,
    handler: Option<DraftHandler<R, A, O>>,
}

impl<R, A, O> TransitionBuilder<R, A, O> {
    /// Create a new transition builder. The name appears in errors and logs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Sources::Any,
            target: None,
            conditions: Vec::new(),
            handler: None,
        }
    }

    /// Set the source state(s): a label, a list of labels, or `"*"` for any.
    pub fn source(mut self, sources: impl Into<Sources>) -> Self {
        self.sources = sources.into();
        self
    }

    /// Allow the transition from any current state.
    pub fn from_any(mut self) -> Self {
        self.sources = Sources::Any;
        self
    }

    /// Set the target state (required).
    pub fn target(mut self, label: impl Into<String>) -> Self {
        self.target = Some(label.into());
        self
    }

    /// Add a guard condition. Conditions are checked in the order added.
    pub fn condition(mut self, condition: Condition<R, A>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a guard condition using a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&R, &A) -> bool + Send + Sync + 'static,
    {
        self.condition(Condition::new(predicate))
    }

    /// Set a handler applied for every legal source state.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut R, A) -> O + Send + Sync + 'static,
    {
        self.handler = Some(DraftHandler::Single(Handler::single(handler)));
        self
    }

    /// Set one handler per literal source state.
    ///
    /// With explicit sources, every source needs exactly one handler. Under
    /// [`Sources::Any`] the handlers pick which states they cover, and
    /// executing from any other state fails.
    pub fn per_source(mut self, handlers: PerSourceHandler<R, A, O>) -> Self {
        self.handler = Some(DraftHandler::PerSource(handlers));
        self
    }

    /// Build the declaration.
    ///
    /// Missing pieces fail immediately. Label and handler problems are
    /// collected and reported together.
    ///
    /// Each build produces a new declaration identity. Build declarations
    /// once, typically into a `static` behind a `LazyLock`, and access them
    /// from there.
    pub fn build(self) -> Result<TransitionDeclaration<R, A, O>, BuildError> {
        let name = self.name;
        let target = self.target.ok_or_else(|| BuildError::MissingTarget {
            name: name.clone(),
        })?;
        let handler = self.handler.ok_or_else(|| BuildError::MissingHandler {
            name: name.clone(),
        })?;

        let mut checks: Vec<Check> = vec![check_label(&target, LabelRole::Target)];
        checks.extend(check_sources(&self.sources));
        if let DraftHandler::PerSource(handlers) = &handler {
            checks.extend(check_handler_sources(&self.sources, handlers));
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            return Err(BuildError::InvalidDeclaration {
                name,
                violations: errors.iter().cloned().collect(),
            });
        }

        let handler = match handler {
            DraftHandler::Single(handler) => handler,
            DraftHandler::PerSource(handlers) => handlers.into_handler(),
        };

        Ok(TransitionDeclaration::new(
            TransitionMeta {
                id: Uuid::new_v4(),
                name,
                sources: self.sources,
                target,
            },
            self.conditions,
            handler,
        ))
    }
}

fn check_label(label: &str, role: LabelRole) -> Check {
    if label.trim().is_empty() {
        Validation::fail(DeclarationViolation::BlankLabel { role })
    } else if label == WILDCARD {
        Validation::fail(DeclarationViolation::WildcardLabel { role })
    } else {
        Validation::success(())
    }
}

fn check_sources(sources: &Sources) -> Vec<Check> {
    match sources {
        Sources::Any => Vec::new(),
        Sources::Only(labels) if labels.is_empty() => {
            vec![Validation::fail(DeclarationViolation::EmptySources)]
        }
        Sources::Only(labels) => labels
            .iter()
            .map(|label| check_label(label, LabelRole::Source))
            .collect(),
    }
}

fn check_handler_sources<R, A, O>(
    sources: &Sources,
    handlers: &PerSourceHandler<R, A, O>,
) -> Vec<Check> {
    let mut seen = HashSet::new();
    let mut checks = Vec::new();

    for label in handlers.sources() {
        checks.push(check_label(label, LabelRole::Handler));
        if !seen.insert(label) {
            checks.push(Validation::fail(
                DeclarationViolation::DuplicateSourceHandler {
                    label: label.to_string(),
                },
            ));
        }
        if !sources.admits(label) {
            checks.push(Validation::fail(DeclarationViolation::IncompatibleSource {
                label: label.to_string(),
            }));
        }
    }

    for label in sources.literals() {
        if !seen.contains(label) {
            checks.push(Validation::fail(
                DeclarationViolation::MissingSourceHandler {
                    label: label.to_string(),
                },
            ));
        }
    }

    checks
}

impl<R, A, O> Default for TransitionBuilder<R, A, O> {
    fn default() -> Self {
        Self::new("transition")
    }
}
