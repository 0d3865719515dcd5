//! Codec error types.

use thiserror::Error;

/// Request serialization failure.
///
/// Snapshots are plain data, so this only fires on pathological inputs; it
/// still propagates rather than panicking so a bad tick stays recoverable.
#[derive(Debug, Error)]
#[error("request serialization failed: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Response decoding failure.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not parseable JSON at all.
    #[error("malformed JSON response: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// The payload is valid JSON but does not match the response schema:
    /// the standings array is missing, an element is not an object, or a
    /// required field is absent or of the wrong type.
    #[error("response schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl DecodeError {
    pub(crate) fn mismatch(detail: impl Into<String>) -> Self {
        DecodeError::SchemaMismatch(detail.into())
    }
}
