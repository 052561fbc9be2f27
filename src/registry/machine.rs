//! Per-record-type registry of states and transitions.

use crate::core::{Owner, Sources, State, Transition, TransitionMeta};
use crate::record::{resolve_state_attribute, Record, SetupError};
use crate::registry::error::FsmError;
use crate::snapshot::RegistrySnapshot;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

type Shape = (String, Sources, String);

fn shape_of(meta: &TransitionMeta) -> Shape {
    (
        meta.name().to_string(),
        meta.sources().clone(),
        meta.target().to_string(),
    )
}

#[derive(Debug, Default)]
struct RegistryContents {
    states: HashMap<String, State>,
    transitions: Vec<Arc<Transition>>,
    by_declaration: HashMap<Uuid, usize>,
    by_shape: HashMap<Shape, usize>,
}

/// Container of every state and transition declared for one record type.
///
/// Registries grow lazily: each access to a declared transition registers it
/// (and the states it references) if it is not known yet. Registration only
/// ever adds, so the registry stays valid for the lifetime of the process.
///
/// Registration of states and transitions runs under one lock. Concurrent
/// first-time registration of a label converges on one [`State`], and of a
/// declaration on one [`Transition`] entry.
#[derive(Debug)]
pub struct StateMachineRegistry {
    owner: Owner,
    record_type: &'static str,
    state_attribute: &'static str,
    contents: Mutex<RegistryContents>,
}

impl StateMachineRegistry {
    /// Build an empty registry for `R`, resolving its state attribute.
    pub fn for_record<R: Record>() -> Result<Self, SetupError> {
        let state_attribute = resolve_state_attribute::<R>()?;
        Ok(Self {
            owner: Owner::of::<R>(),
            record_type: R::record_type(),
            state_attribute,
            contents: Mutex::new(RegistryContents::default()),
        })
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn record_type(&self) -> &'static str {
        self.record_type
    }

    /// Name of the record attribute holding the state.
    pub fn state_attribute(&self) -> &'static str {
        self.state_attribute
    }

    // Contents are append-only, so a panic in another thread never leaves
    // them half-written.
    fn contents(&self) -> MutexGuard<'_, RegistryContents> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a registered state by exact label.
    pub fn state(&self, label: &str) -> Result<State, FsmError> {
        self.contents()
            .states
            .get(label)
            .cloned()
            .ok_or_else(|| FsmError::StateNotFound {
                record_type: self.record_type,
                label: label.to_string(),
            })
    }

    /// Ensure a state exists for `label`, returning the registered handle.
    pub fn register_state(&self, label: &str) -> State {
        let mut contents = self.contents();
        self.ensure_state(&mut contents, label)
    }

    fn ensure_state(&self, contents: &mut RegistryContents, label: &str) -> State {
        if let Some(state) = contents.states.get(label) {
            return state.clone();
        }

        debug!(record_type = self.record_type, state = label, "registering state");
        let state = State::new(self.owner, label);
        contents.states.insert(label.to_string(), state.clone());
        state
    }

    /// Register a declared transition and every literal state it references.
    ///
    /// Registering the same declaration again returns the existing entry, and
    /// so does registering a rebuilt declaration with the same name, sources
    /// and target. The entry keeps the identity of the first registration.
    pub fn register_transition(&self, meta: &TransitionMeta) -> Arc<Transition> {
        let mut contents = self.contents();

        if let Some(&index) = contents.by_declaration.get(&meta.id()) {
            return Arc::clone(&contents.transitions[index]);
        }

        let shape = shape_of(meta);
        if let Some(&index) = contents.by_shape.get(&shape) {
            contents.by_declaration.insert(meta.id(), index);
            return Arc::clone(&contents.transitions[index]);
        }

        for label in meta.sources().literals() {
            self.ensure_state(&mut contents, label);
        }
        let target = self.ensure_state(&mut contents, meta.target());

        let transition = Arc::new(Transition::new(self.owner, meta.clone(), target));
        let index = contents.transitions.len();
        contents.by_declaration.insert(meta.id(), index);
        contents.by_shape.insert(shape, index);
        contents.transitions.push(Arc::clone(&transition));

        debug!(
            record_type = self.record_type,
            transition = meta.name(),
            target = meta.target(),
            "registered transition"
        );
        transition
    }

    /// All registered states, sorted by label.
    pub fn states(&self) -> Vec<State> {
        let mut states: Vec<State> = self.contents().states.values().cloned().collect();
        states.sort_by(|a, b| a.label().cmp(b.label()));
        states
    }

    /// All registered transitions, in registration order.
    pub fn transitions(&self) -> Vec<Arc<Transition>> {
        self.contents().transitions.clone()
    }

    /// Serializable description of the registry's current contents.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::capture(self)
    }
}
