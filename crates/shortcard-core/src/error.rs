use thiserror::Error;

/// Failure to decode a self-contained token back into a record.
///
/// Tokens arrive from untrusted callers, so every variant here is an
/// expected input condition rather than an internal invariant violation.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("identifier does not carry the stateless marker")]
    MissingMarker,
    #[error("token payload is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("token payload is not a valid record: {0}")]
    InvalidPayload(String),
    #[error("token payload lacks a destination url")]
    MissingDestination,
}
