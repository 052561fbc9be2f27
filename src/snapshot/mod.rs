//! Serializable descriptions of state machine registries.
//!
//! A snapshot records which states and transitions a registry holds at one
//! moment. Handlers and conditions are code and are never captured, so a
//! snapshot documents a machine but cannot rebuild one. Typical uses are
//! diagramming, auditing declared workflows and comparing the machines of two
//! deployments.

use crate::core::Sources;
use crate::registry::StateMachineRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// One registered transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionSnapshot {
    /// Declaration identity
    pub id: Uuid,

    pub name: String,

    pub sources: Sources,

    pub target: String,
}

/// Serializable snapshot of a registry's contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Name of the record type the registry belongs to
    pub record_type: String,

    /// Name of the record attribute holding the state
    pub state_attribute: String,

    /// Registered state labels, sorted
    pub states: Vec<String>,

    /// Registered transitions, in registration order
    pub transitions: Vec<TransitionSnapshot>,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl RegistrySnapshot {
    /// Capture the current contents of `registry`.
    pub fn capture(registry: &StateMachineRegistry) -> Self {
        let transitions = registry
            .transitions()
            .iter()
            .map(|transition| TransitionSnapshot {
                id: transition.id(),
                name: transition.name().to_string(),
                sources: transition.sources().clone(),
                target: transition.target().label().to_string(),
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            record_type: registry.record_type().to_string(),
            state_attribute: registry.state_attribute().to_string(),
            states: registry
                .states()
                .iter()
                .map(|state| state.label().to_string())
                .collect(),
            transitions,
            taken_at: Utc::now(),
        }
    }

    /// Check the version and that every referenced label is a listed state.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let states: BTreeSet<&str> = self.states.iter().map(String::as_str).collect();
        for transition in &self.transitions {
            let referenced = transition
                .sources
                .literals()
                .chain(std::iter::once(transition.target.as_str()));
            for label in referenced {
                if !states.contains(label) {
                    return Err(SnapshotError::UnknownStateReference {
                        transition: transition.name.clone(),
                        label: label.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and validate a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a binary snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionMeta;

    #[allow(dead_code)]
    struct Claim {
        status: String,
    }

    crate::record_schema! {
        Claim {
            status: State,
        }
    }

    fn meta(name: &str, sources: impl Into<Sources>, target: &str) -> TransitionMeta {
        TransitionMeta {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sources: sources.into(),
            target: target.to_string(),
        }
    }

    fn registry() -> StateMachineRegistry {
        let registry = StateMachineRegistry::for_record::<Claim>().unwrap();
        registry.register_transition(&meta("file", "new", "filed"));
        registry.register_transition(&meta("settle", ["filed", "disputed"], "settled"));
        registry.register_transition(&meta("withdraw", "*", "withdrawn"));
        registry
    }

    #[test]
    fn capture_lists_registry_contents() {
        let snapshot = registry().snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.state_attribute, "status");
        assert_eq!(
            snapshot.states,
            vec!["disputed", "filed", "new", "settled", "withdrawn"]
        );
        let names: Vec<&str> = snapshot.transitions.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["file", "settle", "withdraw"]);
        assert_eq!(snapshot.transitions[2].sources, Sources::Any);
    }

    #[test]
    fn json_snapshot_can_be_read_back() {
        let snapshot = registry().snapshot();

        let json = snapshot.to_json().unwrap();
        let restored = RegistrySnapshot::from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert!(json.contains("\"state_attribute\": \"status\""));
    }

    #[test]
    fn binary_snapshot_can_be_read_back() {
        let snapshot = registry().snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        let restored = RegistrySnapshot::from_bytes(&bytes).unwrap();

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = registry().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;

        let json = snapshot.to_json().unwrap();
        let err = RegistrySnapshot::from_json(&json).unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion { found, supported }
                if found == SNAPSHOT_VERSION + 1 && supported == SNAPSHOT_VERSION
        ));
    }

    #[test]
    fn dangling_state_reference_is_rejected() {
        let mut snapshot = registry().snapshot();
        snapshot.states.retain(|label| label != "settled");

        let err = snapshot.validate().unwrap_err();

        assert!(matches!(
            err,
            SnapshotError::UnknownStateReference { ref transition, ref label }
                if transition == "settle" && label == "settled"
        ));
        assert_eq!(
            err.to_string(),
            "transition 'settle' references unknown state 'settled'"
        );
    }

    #[test]
    fn garbage_input_keeps_codec_error() {
        use std::error::Error;

        let json_err = RegistrySnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(json_err, SnapshotError::Json(ref e) if e.is_syntax()));
        assert!(json_err.source().is_some());

        let binary_err = RegistrySnapshot::from_bytes(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(binary_err, SnapshotError::Binary(_)));
        assert!(binary_err.source().is_some());
    }
}
