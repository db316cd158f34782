//! Error types for the engine.
//!
//! Unresolvable paths are not errors: they decide what is common and what is
//! skipped. Only whole-call failures and host-side failures are represented here.

use propbake_api_core::PathError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BakerError {
    /// No layers are selected in the active composition.
    #[error("No layers selected")]
    EmptySelection,

    /// A path argument is malformed (as opposed to merely unresolvable).
    #[error(transparent)]
    Path(#[from] PathError),

    /// The host rejected or failed an operation.
    #[error("host operation '{operation}' failed: {reason}")]
    Host { operation: String, reason: String },

    /// A reply could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl BakerError {
    pub fn host(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        BakerError::Host {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for BakerError {
    fn from(e: serde_json::Error) -> Self {
        BakerError::Serialize(e.to_string())
    }
}
