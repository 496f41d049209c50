//! Error types for channel operations.

use thiserror::Error;

/// Errors that can occur while binding to, anchoring on, or reading from a channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The anchorage is neither the announce message nor a message on the channel.
    #[error("anchorage not found: {0}")]
    AnchorageNotFound(String),

    /// The requested message is not on the channel.
    #[error("message not found: {0}")]
    MsgNotFound(String),

    /// The channel id is malformed or names no channel.
    #[error("channel binding error: {0}")]
    ChannelBinding(String),

    /// The message has no ledger counterpart.
    #[error("L1 message not found: {0}")]
    L1MsgNotFound(String),

    /// The node address is not a URL.
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// Anything else the transport reports.
    #[error("channel error: {0}")]
    Other(String),
}

impl ChannelError {
    /// Whether this error means "the proof does not check out" rather than
    /// "the check could not be performed".
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            ChannelError::AnchorageNotFound(_)
                | ChannelError::MsgNotFound(_)
                | ChannelError::ChannelBinding(_)
        )
    }
}

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
