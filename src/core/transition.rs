//! Transition edges and their source sets.

use super::state::{Owner, State};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Source marker meaning "legal from any current state".
pub const WILDCARD: &str = "*";

/// The states a transition may fire from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sources {
    /// Any current state, including an unset one.
    #[default]
    Any,

    /// Exactly the listed literal labels.
    Only(BTreeSet<String>),
}

impl Sources {
    pub fn any() -> Self {
        Sources::Any
    }

    pub fn only<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Sources::Only(labels.into_iter().map(Into::into).collect())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Sources::Any)
    }

    /// True when a record holding `raw` may take this transition.
    pub fn contains(&self, raw: Option<&str>) -> bool {
        match self {
            Sources::Any => true,
            Sources::Only(labels) => raw.is_some_and(|raw| labels.contains(raw)),
        }
    }

    /// True when a per-source handler for `label` is consistent with these sources.
    pub fn admits(&self, label: &str) -> bool {
        self.contains(Some(label))
    }

    /// Literal labels; empty for [`Sources::Any`].
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        let labels = match self {
            Sources::Any => None,
            Sources::Only(labels) => Some(labels),
        };
        labels.into_iter().flatten().map(String::as_str)
    }
}

impl From<&str> for Sources {
    fn from(label: &str) -> Self {
        if label == WILDCARD {
            Sources::Any
        } else {
            Sources::only([label])
        }
    }
}

impl From<String> for Sources {
    fn from(label: String) -> Self {
        Sources::from(label.as_str())
    }
}

impl<const N: usize> From<[&str; N]> for Sources {
    fn from(labels: [&str; N]) -> Self {
        Sources::only(labels)
    }
}

impl From<&[&str]> for Sources {
    fn from(labels: &[&str]) -> Self {
        Sources::only(labels.iter().copied())
    }
}

impl From<Vec<&str>> for Sources {
    fn from(labels: Vec<&str>) -> Self {
        Sources::only(labels)
    }
}

impl From<Vec<String>> for Sources {
    fn from(labels: Vec<String>) -> Self {
        Sources::only(labels)
    }
}

/// Declaration-side description of a transition, as registered into a registry.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionMeta {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) sources: Sources,
    pub(crate) target: String,
}

impl TransitionMeta {
    /// Identity of the declaration this metadata came from.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// A transition registered in a state machine registry.
///
/// Shared between the type-level and record-level views of the same
/// declaration.
#[derive(Debug)]
pub struct Transition {
    owner: Owner,
    meta: TransitionMeta,
    target: State,
}

impl Transition {
    pub(crate) fn new(owner: Owner, meta: TransitionMeta, target: State) -> Self {
        Self {
            owner,
            meta,
            target,
        }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn id(&self) -> Uuid {
        self.meta.id
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn sources(&self) -> &Sources {
        &self.meta.sources
    }

    /// The registered target state. Always a literal label.
    pub fn target(&self) -> &State {
        &self.target
    }

    pub fn meta(&self) -> &TransitionMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_string_means_any() {
        assert_eq!(Sources::from("*"), Sources::Any);
        assert_eq!(Sources::from(String::from("*")), Sources::Any);
    }

    #[test]
    fn literal_string_is_single_source() {
        let sources = Sources::from("draft");

        assert!(sources.contains(Some("draft")));
        assert!(!sources.contains(Some("review")));
        assert!(!sources.contains(None));
    }

    #[test]
    fn any_contains_every_value() {
        let sources = Sources::Any;

        assert!(sources.contains(Some("draft")));
        assert!(sources.contains(Some("anything")));
        assert!(sources.contains(None));
        assert_eq!(sources.literals().count(), 0);
    }

    #[test]
    fn list_sources_keep_each_label() {
        let sources = Sources::from(["draft", "review"]);

        assert!(sources.contains(Some("draft")));
        assert!(sources.contains(Some("review")));
        assert!(!sources.contains(Some("archived")));
        assert_eq!(sources.literals().collect::<Vec<_>>(), vec!["draft", "review"]);
    }

    #[test]
    fn wildcard_inside_list_stays_literal() {
        let sources = Sources::from(vec!["draft", "*"]);

        assert!(!sources.is_any());
        assert!(sources.literals().any(|label| label == WILDCARD));
    }

    #[test]
    fn sources_serialize_correctly() {
        let sources = Sources::from(["a", "b"]);
        let json = serde_json::to_string(&sources).unwrap();
        let deserialized: Sources = serde_json::from_str(&json).unwrap();

        assert_eq!(sources, deserialized);
    }
}
