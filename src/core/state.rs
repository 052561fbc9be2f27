//! Named states owned by a state machine registry.
//!
//! A [`State`] is a cheap, shared handle. Registries hand out clones of one
//! allocation per label, so two handles for the same label of the same
//! registry are both equal and pointer-identical.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of the record type a registry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Owner {
    type_id: TypeId,
    type_name: &'static str,
}

impl Owner {
    /// Owner identity for the record type `R`.
    pub fn of<R: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<R>(),
            type_name: type_name::<R>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

struct StateData {
    owner: Owner,
    label: Arc<str>,
}

/// A named position in one registry's state space.
///
/// Two states are equal when they share owner and label. States are only
/// created through a registry, which guarantees a single allocation per label.
///
/// # Example
///
/// ```rust
/// use statefield::{record_schema, Stateful};
///
/// struct Ticket {
///     status: String,
/// }
///
/// record_schema! {
///     Ticket {
///         status: State,
///     }
/// }
///
/// let registry = Ticket::state_machine().unwrap();
/// let open = registry.register_state("open");
/// let again = registry.register_state("open");
///
/// assert_eq!(open, again);
/// assert!(open.ptr_eq(&again));
/// assert_eq!(open.label(), "open");
/// ```
#[derive(Clone)]
pub struct State {
    inner: Arc<StateData>,
}

impl State {
    pub(crate) fn new(owner: Owner, label: &str) -> Self {
        Self {
            inner: Arc::new(StateData {
                owner,
                label: Arc::from(label),
            }),
        }
    }

    /// The state's label, as stored in the record's state attribute.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// The record type whose registry owns this state.
    pub fn owner(&self) -> Owner {
        self.inner.owner
    }

    /// True when both handles point at the same registered state object.
    pub fn ptr_eq(&self, other: &State) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn shared_label(&self) -> Arc<str> {
        Arc::clone(&self.inner.label)
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.inner.owner == other.inner.owner && self.inner.label == other.inner.label)
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.owner.hash(state);
        self.inner.label.hash(state);
    }
}

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        self.label() == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        self.label() == *other
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("owner", &self.inner.owner.type_name)
            .field("label", &self.label())
            .finish()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
