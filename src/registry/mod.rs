//! State machine registries, one per record type.
//!
//! Registries live in a process-wide map keyed by record type identity. The
//! first access for a type resolves its state attribute and creates the
//! registry; every later access returns the same one. A type whose state
//! attribute cannot be resolved never gets a registry, and each access reports
//! the [`SetupError`] again.

pub mod error;
mod instance;
mod machine;

pub use error::FsmError;
pub use instance::InstanceView;
pub use machine::StateMachineRegistry;

use crate::record::{Record, SetupError};
use dashmap::{DashMap, Entry};
use std::any::TypeId;
use std::sync::{Arc, OnceLock};
use tracing::debug;

type RegistryMap = DashMap<TypeId, Arc<StateMachineRegistry>, ahash::RandomState>;

fn registries() -> &'static RegistryMap {
    static REGISTRIES: OnceLock<RegistryMap> = OnceLock::new();
    REGISTRIES.get_or_init(DashMap::default)
}

/// The registry for record type `R`, created on first use.
pub fn registry_for<R: Record>() -> Result<Arc<StateMachineRegistry>, SetupError> {
    let key = TypeId::of::<R>();
    if let Some(registry) = registries().get(&key) {
        return Ok(Arc::clone(registry.value()));
    }

    match registries().entry(key) {
        Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
        Entry::Vacant(slot) => {
            let registry = Arc::new(StateMachineRegistry::for_record::<R>()?);
            debug!(
                record_type = registry.record_type(),
                state_attribute = registry.state_attribute(),
                "created state machine registry"
            );
            Ok(Arc::clone(slot.insert(registry).value()))
        }
    }
}

/// State machine access for every [`Record`] type.
pub trait Stateful: Record + Sized {
    /// The registry for this record type.
    fn state_machine() -> Result<Arc<StateMachineRegistry>, SetupError> {
        registry_for::<Self>()
    }

    /// This record viewed through its type's registry.
    fn fsm(&self) -> Result<InstanceView<'_, Self>, SetupError> {
        Ok(InstanceView::new(Self::state_machine()?, self))
    }
}

impl<R: Record> Stateful for R {}
