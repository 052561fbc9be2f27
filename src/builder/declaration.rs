//! Built transition declarations.

use crate::bound::{ClassBoundTransition, InstanceBoundTransition};
use crate::core::{Condition, Handler, Sources, TransitionMeta};
use crate::record::{Record, SetupError};
use crate::registry::registry_for;
use std::fmt;
use uuid::Uuid;

/// A transition declared on record type `R`.
///
/// A declaration is inert until accessed: [`on_type`](Self::on_type) and
/// [`on`](Self::on) register it with `R`'s registry on first use and return a
/// view bound to the type or to one record.
///
/// `A` is the argument type passed to conditions and the handler, `O` the
/// handler's return type.
pub struct TransitionDeclaration<R, A = (), O = ()> {
    meta: TransitionMeta,
    conditions: Vec<Condition<R, A>>,
    handler: Handler<R, A, O>,
}

impl<R, A, O> TransitionDeclaration<R, A, O> {
    pub(crate) fn new(
        meta: TransitionMeta,
        conditions: Vec<Condition<R, A>>,
        handler: Handler<R, A, O>,
    ) -> Self {
        Self {
            meta,
            conditions,
            handler,
        }
    }

    /// Identity shared by every registration of this declaration.
    pub fn id(&self) -> Uuid {
        self.meta.id()
    }

    pub fn name(&self) -> &str {
        self.meta.name()
    }

    pub fn sources(&self) -> &Sources {
        self.meta.sources()
    }

    pub fn target(&self) -> &str {
        self.meta.target()
    }

    pub fn conditions(&self) -> &[Condition<R, A>] {
        &self.conditions
    }

    pub fn handler(&self) -> &Handler<R, A, O> {
        &self.handler
    }

    pub fn meta(&self) -> &TransitionMeta {
        &self.meta
    }
}

impl<R: Record, A, O> TransitionDeclaration<R, A, O> {
    /// View this transition at the type level, for building queries.
    pub fn on_type(&self) -> Result<ClassBoundTransition, SetupError> {
        let registry = registry_for::<R>()?;
        let transition = registry.register_transition(&self.meta);
        Ok(ClassBoundTransition::new(registry, transition))
    }

    /// View this transition against one record, for checking and executing it.
    pub fn on<'r>(
        &self,
        record: &'r mut R,
    ) -> Result<InstanceBoundTransition<'_, 'r, R, A, O>, SetupError> {
        let registry = registry_for::<R>()?;
        let transition = registry.register_transition(&self.meta);
        Ok(InstanceBoundTransition::new(
            self, registry, transition, record,
        ))
    }
}

impl<R, A, O> fmt::Debug for TransitionDeclaration<R, A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDeclaration")
            .field("name", &self.meta.name())
            .field("sources", self.meta.sources())
            .field("target", &self.meta.target())
            .field("conditions", &self.conditions.len())
            .field("handler", &self.handler)
            .finish()
    }
}
