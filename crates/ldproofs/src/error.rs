//! Error types for signing, anchoring and verification.

use std::fmt;

use ldproofs_channel::ChannelError;
use ldproofs_core::CoreError;
use ldproofs_identity::IdentityError;
use thiserror::Error;

/// Errors that can occur during Linked Data Proof operations.
#[derive(Debug, Error)]
pub enum LdProofError {
    /// Document or proof error.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Channel error.
    #[error("{0}")]
    Channel(#[from] ChannelError),

    /// Identity error.
    #[error("{0}")]
    Identity(#[from] IdentityError),

    /// RDF canonicalization failed.
    #[error("RDF canonicalization failed: {0}")]
    Canonization(String),
}

impl LdProofError {
    /// The stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LdProofError::Core(e) => core_kind(e),
            LdProofError::Channel(e) => match e {
                ChannelError::AnchorageNotFound(_) => ErrorKind::AnchorageNotFound,
                ChannelError::MsgNotFound(_) => ErrorKind::MsgNotFound,
                ChannelError::ChannelBinding(_) => ErrorKind::ChannelBindingError,
                ChannelError::InvalidNode(_) => ErrorKind::InvalidNode,
                ChannelError::L1MsgNotFound(_) | ChannelError::Other(_) => ErrorKind::Other,
            },
            LdProofError::Identity(e) => match e {
                IdentityError::InvalidDid(_) => ErrorKind::InvalidDid,
                IdentityError::InvalidNode(_) => ErrorKind::InvalidNode,
                IdentityError::DidNotFound(_) => ErrorKind::DidNotFound,
                IdentityError::DidNotVerified(_) => ErrorKind::DidNotVerified,
                IdentityError::InvalidDidMethod(_) => ErrorKind::InvalidDidMethod,
                IdentityError::InvalidSigningKey(_) => ErrorKind::InvalidSigningKey,
                IdentityError::Core(e) => core_kind(e),
            },
            LdProofError::Canonization(_) => ErrorKind::Other,
        }
    }

    /// Whether a chain verification folds this error into a `false` verdict.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, LdProofError::Channel(e) if e.is_verification_failure())
    }
}

fn core_kind(e: &CoreError) -> ErrorKind {
    match e {
        CoreError::InvalidDataType(_) => ErrorKind::InvalidDataType,
        CoreError::NotSigned(_) => ErrorKind::JsonDocNotSigned,
        CoreError::NotSupportedSignature(_) => ErrorKind::NotSupportedSignature,
        CoreError::InvalidSecret(_) => ErrorKind::InvalidSigningKey,
        _ => ErrorKind::Other,
    }
}

/// Stable error kinds, independent of which layer raised the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidDataType,
    JsonDocNotSigned,
    InvalidNode,
    InvalidDid,
    InvalidDidMethod,
    InvalidSigningKey,
    NotSupportedSignature,
    AnchorageNotFound,
    MsgNotFound,
    ChannelBindingError,
    DidNotFound,
    DidNotVerified,
    Other,
}

impl ErrorKind {
    /// The kind name, e.g. `NOT_SUPPORTED_SIGNATURE`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidDataType => "INVALID_DATA_TYPE",
            ErrorKind::JsonDocNotSigned => "JSON_DOC_NOT_SIGNED",
            ErrorKind::InvalidNode => "INVALID_NODE",
            ErrorKind::InvalidDid => "INVALID_DID",
            ErrorKind::InvalidDidMethod => "INVALID_DID_METHOD",
            ErrorKind::InvalidSigningKey => "INVALID_SIGNING_KEY",
            ErrorKind::NotSupportedSignature => "NOT_SUPPORTED_SIGNATURE",
            ErrorKind::AnchorageNotFound => "ANCHORAGE_NOT_FOUND",
            ErrorKind::MsgNotFound => "MSG_NOT_FOUND",
            ErrorKind::ChannelBindingError => "CHANNEL_BINDING_ERROR",
            ErrorKind::DidNotFound => "DID_NOT_FOUND",
            ErrorKind::DidNotVerified => "DID_NOT_VERIFIED",
            ErrorKind::Other => "OTHER_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for Linked Data Proof operations.
pub type Result<T> = std::result::Result<T, LdProofError>;
