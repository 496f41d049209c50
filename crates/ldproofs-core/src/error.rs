//! Error types for ldproofs core.

use thiserror::Error;

/// Core errors raised by document handling and signature primitives.
///
/// Every variant here is a malformed-input condition. None of them is
/// transient, so callers never retry on them.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid data type: {0}")]
    InvalidDataType(String),

    #[error("document not signed: {0}")]
    NotSigned(String),

    #[error("signature suite not supported: {0}")]
    NotSupportedSignature(String),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid secret key: {0}")]
    InvalidSecret(String),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::EncodingError(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
