use thiserror::Error;

/// Network-wide error types for CareMesh.
///
/// Gating denials (level 0, not opted in, no contributors) are NOT errors —
/// they are successful responses carrying a reason code. Errors here are
/// reserved for malformed input, missing entities, and store failures.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Malformed caller input (percentage out of range, bad phone digits,
    /// unparseable date, missing required field). Rejected before any
    /// state change.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced entity does not exist (unknown participant id).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage layer error (participant table, record store, event log).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MeshError {
    fn from(e: serde_json::Error) -> Self {
        MeshError::Serialization(e.to_string())
    }
}
