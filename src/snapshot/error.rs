//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or validating snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("JSON snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary snapshot encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    /// Snapshot was written by an incompatible format version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A transition names a state the snapshot does not list
    #[error("transition '{transition}' references unknown state '{label}'")]
    UnknownStateReference { transition: String, label: String },
}
