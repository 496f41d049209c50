//! In-memory channel network.
//!
//! This is primarily for testing. Channels live in a shared [`MemoryLedger`];
//! any number of [`MemoryTransport`]s and bound [`MemoryChannel`] handles can
//! point at the same ledger, each handle with its own read cursor.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use ldproofs_core::{is_url, Keypair};

use crate::error::{ChannelError, Result};
use crate::traits::{AnchoringChannel, AnchoringResult, ChannelId, ChannelTransport, FetchResult};

/// Shared state behind every in-memory channel.
pub struct MemoryLedger {
    inner: RwLock<LedgerInner>,
    /// Number of message reads served, across all handles.
    reads: AtomicUsize,
}

struct LedgerInner {
    /// Channels indexed by address.
    channels: HashMap<String, ChannelLog>,

    /// Channels created so far; seeds fresh addresses.
    created: u64,
}

struct ChannelLog {
    announce_msg_id: String,
    messages: Vec<StoredMessage>,
}

#[derive(Clone)]
struct StoredMessage {
    msg_id: String,
    anchorage_id: String,
    payload: Bytes,
    pk: String,
}

impl StoredMessage {
    fn to_fetch_result(&self) -> FetchResult {
        FetchResult {
            msg_id: self.msg_id.clone(),
            anchorage_id: self.anchorage_id.clone(),
            message: self.payload.clone(),
            pk: self.pk.clone(),
        }
    }
}

impl ChannelLog {
    fn has_anchorage(&self, anchorage_id: &str) -> bool {
        anchorage_id == self.announce_msg_id
            || self.messages.iter().any(|m| m.msg_id == anchorage_id)
    }
}

impl MemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a fresh channel and return its id.
    pub fn create_channel(&self) -> Result<ChannelId> {
        let mut inner = self.write()?;
        inner.created += 1;

        let mut hasher = blake3::Hasher::new();
        hasher.update(b"ldproofs:channel:");
        hasher.update(&inner.created.to_le_bytes());
        hasher.update(&rand::random::<[u8; 32]>());
        let digest = hex::encode(hasher.finalize().as_bytes());

        let id = ChannelId::new(&digest[..40], &digest[40..64]);
        inner.channels.insert(
            id.address.clone(),
            ChannelLog {
                announce_msg_id: id.announce_msg_id.clone(),
                messages: Vec::new(),
            },
        );

        tracing::debug!("created channel {}", id);
        Ok(id)
    }

    /// Append a message as an unrelated publisher would.
    ///
    /// Returns the new message id.
    pub fn inject(&self, channel_id: &str, anchorage_id: &str, payload: &[u8]) -> Result<String> {
        let id: ChannelId = channel_id.parse()?;
        let pk = Keypair::generate().public_key().to_hex();
        Ok(self.append(&id, anchorage_id, payload, &pk)?.msg_id)
    }

    /// Number of messages on a channel, announce excluded.
    pub fn message_count(&self, channel_id: &str) -> Result<usize> {
        let id: ChannelId = channel_id.parse()?;
        let inner = self.read()?;
        Ok(Self::log(&inner, &id)?.messages.len())
    }

    /// Number of message reads served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerInner>> {
        self.inner
            .read()
            .map_err(|_| ChannelError::Other("ledger lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerInner>> {
        self.inner
            .write()
            .map_err(|_| ChannelError::Other("ledger lock poisoned".into()))
    }

    fn log<'a>(inner: &'a LedgerInner, id: &ChannelId) -> Result<&'a ChannelLog> {
        inner
            .channels
            .get(&id.address)
            .filter(|log| log.announce_msg_id == id.announce_msg_id)
            .ok_or_else(|| ChannelError::ChannelBinding(format!("channel {id} does not exist")))
    }

    fn contains(&self, id: &ChannelId) -> Result<bool> {
        let inner = self.read()?;
        Ok(Self::log(&inner, id).is_ok())
    }

    fn append(
        &self,
        id: &ChannelId,
        anchorage_id: &str,
        payload: &[u8],
        pk: &str,
    ) -> Result<AnchoringResult> {
        let mut inner = self.write()?;
        let log = inner
            .channels
            .get_mut(&id.address)
            .filter(|log| log.announce_msg_id == id.announce_msg_id)
            .ok_or_else(|| ChannelError::ChannelBinding(format!("channel {id} does not exist")))?;

        if !log.has_anchorage(anchorage_id) {
            return Err(ChannelError::AnchorageNotFound(anchorage_id.to_string()));
        }

        let index = log.messages.len() as u64;
        let mut hasher = blake3::Hasher::new();
        hasher.update(id.address.as_bytes());
        hasher.update(anchorage_id.as_bytes());
        hasher.update(&index.to_le_bytes());
        hasher.update(payload);
        let msg_id = hex::encode(&hasher.finalize().as_bytes()[..12]);

        log.messages.push(StoredMessage {
            msg_id: msg_id.clone(),
            anchorage_id: anchorage_id.to_string(),
            payload: Bytes::copy_from_slice(payload),
            pk: pk.to_string(),
        });

        Ok(AnchoringResult {
            anchorage_id: anchorage_id.to_string(),
            msg_id,
        })
    }

    /// Locate a message attached to `anchorage_id`, by id or as the first one.
    fn locate(
        &self,
        id: &ChannelId,
        anchorage_id: &str,
        msg_id: Option<&str>,
    ) -> Result<(usize, FetchResult)> {
        let inner = self.read()?;
        let log = Self::log(&inner, id)?;

        if !log.has_anchorage(anchorage_id) {
            return Err(ChannelError::AnchorageNotFound(anchorage_id.to_string()));
        }

        let found = log.messages.iter().enumerate().find(|(_, m)| {
            m.anchorage_id == anchorage_id && msg_id.map_or(true, |wanted| m.msg_id == wanted)
        });

        match found {
            Some((index, message)) => {
                self.reads.fetch_add(1, Ordering::Relaxed);
                Ok((index, message.to_fetch_result()))
            }
            None => Err(ChannelError::MsgNotFound(format!(
                "{} on anchorage {anchorage_id}",
                msg_id.unwrap_or("<first>")
            ))),
        }
    }

    fn message_at(&self, id: &ChannelId, index: usize) -> Result<Option<FetchResult>> {
        let inner = self.read()?;
        let log = Self::log(&inner, id)?;
        let message = log.messages.get(index).map(StoredMessage::to_fetch_result);
        if message.is_some() {
            self.reads.fetch_add(1, Ordering::Relaxed);
        }
        Ok(message)
    }

    fn msg_id_l1(&self, id: &ChannelId, msg_id: &str) -> Result<String> {
        let inner = self.read()?;
        let log = Self::log(&inner, id)?;
        if !log.messages.iter().any(|m| m.msg_id == msg_id) {
            return Err(ChannelError::L1MsgNotFound(msg_id.to_string()));
        }

        let mut hasher = blake3::Hasher::new();
        hasher.update(b"ldproofs:l1:");
        hasher.update(id.address.as_bytes());
        hasher.update(msg_id.as_bytes());
        Ok(hex::encode(hasher.finalize().as_bytes()))
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self {
            inner: RwLock::new(LedgerInner {
                channels: HashMap::new(),
                created: 0,
            }),
            reads: AtomicUsize::new(0),
        }
    }
}

/// In-memory transport: binds handles to channels on a [`MemoryLedger`].
#[derive(Clone)]
pub struct MemoryTransport {
    ledger: Arc<MemoryLedger>,
    node: Option<String>,
}

impl MemoryTransport {
    /// Create a transport over the given ledger.
    pub fn new(ledger: Arc<MemoryLedger>) -> Self {
        Self { ledger, node: None }
    }

    /// Create a transport that reports `node` as its endpoint.
    ///
    /// The node must be a URL.
    pub fn with_node(ledger: Arc<MemoryLedger>, node: &str) -> Result<Self> {
        if !is_url(node) {
            return Err(ChannelError::InvalidNode(node.to_string()));
        }
        Ok(Self {
            ledger,
            node: Some(node.to_string()),
        })
    }

    /// The node this transport talks to, if one was configured.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// The ledger behind this transport.
    pub fn ledger(&self) -> &Arc<MemoryLedger> {
        &self.ledger
    }
}

#[async_trait]
impl ChannelTransport for MemoryTransport {
    type Channel = MemoryChannel;

    async fn bind(&self, channel_id: Option<&str>) -> Result<MemoryChannel> {
        let id = match channel_id {
            Some(raw) => {
                let id: ChannelId = raw.parse()?;
                if !self.ledger.contains(&id)? {
                    tracing::warn!("bind to unknown channel {}", id);
                    return Err(ChannelError::ChannelBinding(format!(
                        "channel {id} does not exist"
                    )));
                }
                id
            }
            None => self.ledger.create_channel()?,
        };

        tracing::debug!("bound to channel {}", id);

        Ok(MemoryChannel {
            ledger: Arc::clone(&self.ledger),
            channel_id: id.to_string(),
            id,
            subscriber_pk: Keypair::generate().public_key().to_hex(),
            cursor: 0,
        })
    }
}

/// A handle bound to one in-memory channel.
pub struct MemoryChannel {
    ledger: Arc<MemoryLedger>,
    id: ChannelId,
    channel_id: String,
    subscriber_pk: String,
    /// Index of the next message `fetch_next` returns.
    cursor: usize,
}

impl MemoryChannel {
    /// Index of the next message `fetch_next` returns.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[async_trait]
impl AnchoringChannel for MemoryChannel {
    fn channel_id(&self) -> &str {
        &self.channel_id
    }

    fn first_anchorage_id(&self) -> &str {
        &self.id.announce_msg_id
    }

    fn subscriber_pub_key(&self) -> &str {
        &self.subscriber_pk
    }

    async fn anchor(&mut self, anchorage_id: &str, payload: &[u8]) -> Result<AnchoringResult> {
        let result = self
            .ledger
            .append(&self.id, anchorage_id, payload, &self.subscriber_pk)?;
        tracing::debug!(
            "anchored {} bytes on {} at {} -> {}",
            payload.len(),
            self.channel_id,
            anchorage_id,
            result.msg_id
        );
        Ok(result)
    }

    async fn fetch(&mut self, anchorage_id: &str, msg_id: Option<&str>) -> Result<FetchResult> {
        let (index, result) = self.ledger.locate(&self.id, anchorage_id, msg_id)?;
        self.cursor = self.cursor.max(index + 1);
        Ok(result)
    }

    async fn fetch_next(&mut self) -> Result<Option<FetchResult>> {
        let next = self.ledger.message_at(&self.id, self.cursor)?;
        if next.is_some() {
            self.cursor += 1;
        }
        Ok(next)
    }

    async fn msg_id_l1(&self, msg_id: &str) -> Result<String> {
        self.ledger.msg_id_l1(&self.id, msg_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn bound() -> (MemoryTransport, MemoryChannel) {
        let transport = MemoryTransport::new(MemoryLedger::new());
        let channel = transport.bind(None).await.unwrap();
        (transport, channel)
    }

    #[tokio::test]
    async fn test_bind_new_channel() {
        let (_, channel) = bound().await;
        let id: ChannelId = channel.channel_id().parse().unwrap();
        assert_eq!(id.announce_msg_id, channel.first_anchorage_id());
        assert_eq!(channel.subscriber_pub_key().len(), 64);
    }

    #[tokio::test]
    async fn test_bind_existing_and_unknown() {
        let (transport, channel) = bound().await;

        let again = transport.bind(Some(channel.channel_id())).await.unwrap();
        assert_eq!(again.channel_id(), channel.channel_id());

        let unknown = transport.bind(Some("deadbeef:cafe")).await;
        assert!(matches!(unknown, Err(ChannelError::ChannelBinding(_))));

        let malformed = transport.bind(Some("no-separator")).await;
        assert!(matches!(malformed, Err(ChannelError::ChannelBinding(_))));
    }

    #[tokio::test]
    async fn test_anchor_requires_anchorage() {
        let (_, mut channel) = bound().await;
        let genesis = channel.first_anchorage_id().to_string();

        let first = channel.anchor(&genesis, b"one").await.unwrap();
        assert_eq!(first.anchorage_id, genesis);
        assert_eq!(first.msg_id.len(), 24);

        let second = channel.anchor(&first.msg_id, b"two").await.unwrap();
        assert_eq!(second.anchorage_id, first.msg_id);

        let missing = channel.anchor("ffffffffffffffffffffffff", b"x").await;
        assert!(matches!(missing, Err(ChannelError::AnchorageNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_by_id_and_first() {
        let (transport, mut writer) = bound().await;
        let genesis = writer.first_anchorage_id().to_string();
        let a = writer.anchor(&genesis, b"a").await.unwrap();
        let b = writer.anchor(&a.msg_id, b"b").await.unwrap();

        let mut reader = transport.bind(Some(writer.channel_id())).await.unwrap();

        let fetched = reader.fetch(&a.msg_id, Some(&b.msg_id)).await.unwrap();
        assert_eq!(fetched.message.as_ref(), b"b");
        assert_eq!(fetched.pk, writer.subscriber_pub_key());
        assert_eq!(reader.cursor(), 2);

        let first = reader.fetch(&genesis, None).await.unwrap();
        assert_eq!(first.msg_id, a.msg_id);
        // the cursor never moves backwards
        assert_eq!(reader.cursor(), 2);

        let wrong_anchorage = reader.fetch(&genesis, Some(&b.msg_id)).await;
        assert!(matches!(wrong_anchorage, Err(ChannelError::MsgNotFound(_))));

        let no_anchorage = reader.fetch("000000000000000000000000", None).await;
        assert!(matches!(no_anchorage, Err(ChannelError::AnchorageNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_next_walks_in_order() {
        let (transport, mut writer) = bound().await;
        let mut anchorage = writer.first_anchorage_id().to_string();
        let mut ids = Vec::new();
        for payload in [b"x", b"y", b"z"] {
            let result = writer.anchor(&anchorage, payload).await.unwrap();
            anchorage = result.msg_id.clone();
            ids.push(result.msg_id);
        }

        let mut reader = transport.bind(Some(writer.channel_id())).await.unwrap();
        let mut seen = Vec::new();
        while let Some(message) = reader.fetch_next().await.unwrap() {
            seen.push(message.msg_id);
        }
        assert_eq!(seen, ids);
        assert!(reader.fetch_next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inject_and_counters() {
        let (transport, mut writer) = bound().await;
        let genesis = writer.first_anchorage_id().to_string();
        let a = writer.anchor(&genesis, b"a").await.unwrap();

        let ledger = transport.ledger();
        let injected = ledger.inject(writer.channel_id(), &a.msg_id, b"noise").unwrap();
        assert_eq!(ledger.message_count(writer.channel_id()).unwrap(), 2);

        let mut reader = transport.bind(Some(writer.channel_id())).await.unwrap();
        let before = ledger.reads();
        reader.fetch_next().await.unwrap();
        let noise = reader.fetch_next().await.unwrap().unwrap();
        assert_eq!(noise.msg_id, injected);
        assert_ne!(noise.pk, writer.subscriber_pub_key());
        assert_eq!(ledger.reads(), before + 2);
    }

    #[tokio::test]
    async fn test_msg_id_l1() {
        let (_, mut channel) = bound().await;
        let genesis = channel.first_anchorage_id().to_string();
        let a = channel.anchor(&genesis, b"a").await.unwrap();

        let l1 = channel.msg_id_l1(&a.msg_id).await.unwrap();
        assert_eq!(l1.len(), 64);
        assert_eq!(channel.msg_id_l1(&a.msg_id).await.unwrap(), l1);

        let missing = channel.msg_id_l1("nope").await;
        assert!(matches!(missing, Err(ChannelError::L1MsgNotFound(_))));
    }

    #[test]
    fn test_transport_node_must_be_url() {
        let ledger = MemoryLedger::new();
        assert!(MemoryTransport::with_node(Arc::clone(&ledger), "https://node.example").is_ok());
        assert!(matches!(
            MemoryTransport::with_node(ledger, "node"),
            Err(ChannelError::InvalidNode(_))
        ));
    }
}
