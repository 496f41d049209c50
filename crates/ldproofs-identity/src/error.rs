//! Error types for identity operations.

use thiserror::Error;

/// Errors that can occur while resolving identities or checking key ownership.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The input is not a DID.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// The node address is not a URL.
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// No DID document could be resolved.
    #[error("DID not found: {0}")]
    DidNotFound(String),

    /// The resolved DID document failed its integrity check.
    #[error("DID document not verified: {0}")]
    DidNotVerified(String),

    /// The verification method is missing or of an unsupported type.
    #[error("invalid DID method: {0}")]
    InvalidDidMethod(String),

    /// The secret does not control the verification method.
    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] ldproofs_core::CoreError),
}

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;
