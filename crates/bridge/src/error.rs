//! Bridge error taxonomy.

use thiserror::Error;

/// Failure modes of one engine invocation.
///
/// All variants are recoverable at the tick boundary: the caller treats the
/// tick as "no new standings" and keeps showing the previous result. Nothing
/// here may terminate the host.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The engine library or its entry point could not be resolved, or its
    /// ABI does not match. Resolution is retried on the next invocation.
    #[error("prediction engine unavailable: {reason}")]
    EngineUnavailable {
        /// What failed to resolve.
        reason: String,
    },

    /// The call completed but the engine signaled failure.
    #[error("prediction engine call failed with status {status}")]
    CallFailed {
        /// Engine-reported status code, never zero.
        status: i32,
    },

    /// The call succeeded but produced no response text.
    #[error("prediction engine returned an empty response")]
    EmptyResponse,
}

impl BridgeError {
    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        BridgeError::EngineUnavailable {
            reason: reason.into(),
        }
    }
}
