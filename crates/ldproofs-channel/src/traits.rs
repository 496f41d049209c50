//! Channel abstraction.
//!
//! A channel is an append-only sequence of messages. Every message is anchored
//! to an earlier one (or to the channel's announce message), and a reader walks
//! the sequence with a cursor that only moves forward.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{ChannelError, Result};

/// A channel identifier of the form `address:announceMsgID`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId {
    pub address: String,
    pub announce_msg_id: String,
}

impl ChannelId {
    pub fn new(address: impl Into<String>, announce_msg_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            announce_msg_id: announce_msg_id.into(),
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.announce_msg_id)
    }
}

impl FromStr for ChannelId {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((address, announce))
                if !address.is_empty() && !announce.is_empty() && !announce.contains(':') =>
            {
                Ok(Self::new(address, announce))
            }
            _ => Err(ChannelError::ChannelBinding(format!(
                "'{s}' is not of the form 'address:announceMsgID'"
            ))),
        }
    }
}

/// Where a payload landed after anchoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoringResult {
    pub anchorage_id: String,
    pub msg_id: String,
}

/// A message read back from a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub msg_id: String,
    /// The anchorage this message was attached to.
    pub anchorage_id: String,
    pub message: Bytes,
    /// Publisher public key (hex).
    pub pk: String,
}

/// Entry point to a channel network.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    type Channel: AnchoringChannel;

    /// Bind to an existing channel, or create a new one when `channel_id` is `None`.
    ///
    /// A malformed or unknown id fails with [`ChannelError::ChannelBinding`].
    async fn bind(&self, channel_id: Option<&str>) -> Result<Self::Channel>;
}

/// A handle bound to one channel.
///
/// Read operations advance the handle's cursor, so they take `&mut self`.
#[async_trait]
pub trait AnchoringChannel: Send {
    /// `address:announceMsgID`.
    fn channel_id(&self) -> &str;

    /// The announce message id, the anchorage of the first message.
    fn first_anchorage_id(&self) -> &str;

    /// Hex public key this handle publishes under.
    fn subscriber_pub_key(&self) -> &str;

    /// Append `payload` to the channel, attached to `anchorage_id`.
    async fn anchor(&mut self, anchorage_id: &str, payload: &[u8]) -> Result<AnchoringResult>;

    /// Read a message attached to `anchorage_id`.
    ///
    /// With `msg_id` the named message is returned; without it, the first
    /// message attached to the anchorage. The cursor moves past the result.
    async fn fetch(&mut self, anchorage_id: &str, msg_id: Option<&str>) -> Result<FetchResult>;

    /// Read the message at the cursor and advance, or `None` at the end.
    async fn fetch_next(&mut self) -> Result<Option<FetchResult>>;

    /// The ledger-level id of a channel message.
    async fn msg_id_l1(&self, msg_id: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_parse() {
        let id: ChannelId = "abcd:ef01".parse().unwrap();
        assert_eq!(id.address, "abcd");
        assert_eq!(id.announce_msg_id, "ef01");
        assert_eq!(id.to_string(), "abcd:ef01");
    }

    #[test]
    fn test_channel_id_malformed() {
        for bad in ["", "abcd", ":ef01", "abcd:", "a:b:c"] {
            assert!(
                matches!(bad.parse::<ChannelId>(), Err(ChannelError::ChannelBinding(_))),
                "{bad} should not parse"
            );
        }
    }
}
