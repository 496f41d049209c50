//! Verification of anchored documents and document chains.
//!
//! An anchored document carries a proof that points at a channel message;
//! that message carries the document's Linked Data Signature. Verification
//! reads the message back and checks the signature against the document.
//!
//! Chains are verified against one channel binding whose cursor only moves
//! forward, so a chain verifies only if its documents were anchored in the
//! declared order. Every verification is all-or-nothing: the first failing
//! document ends the walk and the whole call returns `false`.

use ldproofs_channel::{AnchoringChannel, ChannelTransport, FetchResult};
use ldproofs_core::{
    get_anchored_document, get_anchored_json_ld_document, get_document, get_json_ld_document,
    without_proof, AnchoredDocument, AnchoredProof, CoreError, JsonInput, LinkedDataSignature,
    SignedDocument,
};
use ldproofs_identity::DidResolver;
use serde_json::Value;

use crate::config::VerifierConfig;
use crate::error::{LdProofError, Result};
use crate::verifier::Verifier;

/// Document shape expected by a verification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Json,
    JsonLd,
}

/// Verifies anchored proofs by reading them back from their channel.
pub struct LdProofVerifier<T: ChannelTransport, R: DidResolver> {
    transport: T,
    verifier: Verifier<R>,
    config: VerifierConfig,
}

impl<T: ChannelTransport, R: DidResolver> LdProofVerifier<T, R> {
    /// Create a verifier reading channels through `transport`.
    pub fn new(transport: T, verifier: Verifier<R>, config: VerifierConfig) -> Result<Self> {
        config.validate()?;
        let verifier = verifier.with_node(config.node.as_deref())?;
        Ok(Self {
            transport,
            verifier,
            config,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Single documents
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify one anchored JSON document.
    ///
    /// A document without an anchored proof is a `NotSigned` error.
    pub async fn verify_json<'a>(&self, doc: impl Into<JsonInput<'a>>) -> Result<bool> {
        let doc = get_anchored_document(doc)?;
        self.verify_document(&doc).await
    }

    /// Verify one anchored JSON-LD document.
    pub async fn verify_json_ld<'a>(&self, doc: impl Into<JsonInput<'a>>) -> Result<bool> {
        let doc = get_anchored_json_ld_document(doc)?;
        self.verify_document(&doc).await
    }

    async fn verify_document(&self, doc: &AnchoredDocument) -> Result<bool> {
        let coordinates = &doc.proof.proof_value;

        let Some(mut channel) = self.bind(&coordinates.channel_id).await? else {
            return Ok(false);
        };

        let fetched = channel
            .fetch(&coordinates.anchorage_id, coordinates.msg_id.as_deref())
            .await
            .map_err(LdProofError::from);
        match failure_as_none(fetched)? {
            Some(message) => self.verify_message(&doc.body, &message).await,
            None => Ok(false),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chains of individually anchored documents
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify that `docs` were anchored on one channel in the given order.
    ///
    /// Every document must carry an anchored proof; one that does not is a
    /// `NotSigned` error before any channel is read.
    pub async fn verify_json_chain<'a, I, D>(&self, docs: I) -> Result<bool>
    where
        I: IntoIterator<Item = D>,
        D: Into<JsonInput<'a>>,
    {
        let documents = docs
            .into_iter()
            .map(get_anchored_document)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.verify_chain(&documents).await
    }

    /// Verify that JSON-LD `docs` were anchored on one channel in the given order.
    pub async fn verify_json_ld_chain<'a, I, D>(&self, docs: I) -> Result<bool>
    where
        I: IntoIterator<Item = D>,
        D: Into<JsonInput<'a>>,
    {
        let documents = docs
            .into_iter()
            .map(get_anchored_json_ld_document)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.verify_chain(&documents).await
    }

    async fn verify_chain(&self, documents: &[AnchoredDocument]) -> Result<bool> {
        let Some(first) = documents.first() else {
            return Err(CoreError::InvalidDataType("no documents to verify".into()).into());
        };
        let channel_id = first.proof.channel_id();

        let Some(mut channel) = self.bind(channel_id).await? else {
            return Ok(false);
        };

        for (index, doc) in documents.iter().enumerate() {
            if doc.proof.channel_id() != channel_id {
                tracing::warn!(
                    "document {} is anchored on {}, expected {}",
                    index,
                    doc.proof.channel_id(),
                    channel_id
                );
                return Ok(false);
            }

            let Some(target) = doc.proof.proof_value.msg_id.as_deref() else {
                tracing::warn!("document {} has no message id", index);
                return Ok(false);
            };

            // The first document's offset on the channel is unknown, so it is
            // always located by scanning.
            let lookahead = if index == 0 || !self.config.strict {
                self.config.max_lookahead
            } else {
                1
            };

            let Some(message) = self.next_message(&mut channel, Some(target), lookahead).await?
            else {
                tracing::debug!("document {} not found at its position", index);
                return Ok(false);
            };

            if !self.verify_message(&doc.body, &message).await? {
                tracing::debug!("document {} failed signature verification", index);
                return Ok(false);
            }
        }

        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chains sharing one proof
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify `docs` against consecutive channel messages starting at `proof`.
    ///
    /// The first document's signature is the message `proof` points at; each
    /// following document's signature must be the very next message, anchored
    /// to the previous one.
    pub async fn verify_json_chain_single_proof<'a, I, D>(
        &self,
        docs: I,
        proof: &AnchoredProof,
    ) -> Result<bool>
    where
        I: IntoIterator<Item = D>,
        D: Into<JsonInput<'a>>,
    {
        let documents = collect_bodies(docs, Shape::Json)?;
        self.verify_single_proof_chain(&documents, proof).await
    }

    /// JSON-LD variant of [`verify_json_chain_single_proof`](Self::verify_json_chain_single_proof).
    pub async fn verify_json_ld_chain_single_proof<'a, I, D>(
        &self,
        docs: I,
        proof: &AnchoredProof,
    ) -> Result<bool>
    where
        I: IntoIterator<Item = D>,
        D: Into<JsonInput<'a>>,
    {
        let documents = collect_bodies(docs, Shape::JsonLd)?;
        self.verify_single_proof_chain(&documents, proof).await
    }

    async fn verify_single_proof_chain(
        &self,
        documents: &[Value],
        proof: &AnchoredProof,
    ) -> Result<bool> {
        if documents.is_empty() {
            return Err(CoreError::InvalidDataType("no documents to verify".into()).into());
        }

        let Some(mut channel) = self.bind(proof.channel_id()).await? else {
            return Ok(false);
        };

        let mut coordinates = proof.proof_value.clone();

        for (index, body) in documents.iter().enumerate() {
            let message = if index == 0 {
                let fetched = channel
                    .fetch(&coordinates.anchorage_id, coordinates.msg_id.as_deref())
                    .await
                    .map_err(LdProofError::from);
                failure_as_none(fetched)?
            } else {
                self.next_message(&mut channel, None, 1)
                    .await?
                    .filter(|message| message.anchorage_id == coordinates.anchorage_id)
            };

            let Some(message) = message else {
                tracing::debug!(
                    "no message for document {} at anchorage {}",
                    index,
                    coordinates.anchorage_id
                );
                return Ok(false);
            };

            if !self.verify_message(body, &message).await? {
                tracing::debug!("document {} failed signature verification", index);
                return Ok(false);
            }

            coordinates = coordinates.advance(&message.msg_id);
        }

        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    /// Bind to `channel_id`, or `None` if the channel cannot be bound.
    async fn bind(&self, channel_id: &str) -> Result<Option<T::Channel>> {
        let bound = self
            .transport
            .bind(Some(channel_id))
            .await
            .map_err(LdProofError::from);
        failure_as_none(bound)
    }

    /// Read forward for `target` (or any message), at most `lookahead` reads.
    ///
    /// With a lookahead of one this is the strict "very next message" check.
    async fn next_message(
        &self,
        channel: &mut T::Channel,
        target: Option<&str>,
        lookahead: usize,
    ) -> Result<Option<FetchResult>> {
        for _ in 0..lookahead {
            let next = channel.fetch_next().await.map_err(LdProofError::from);
            let Some(message) = failure_as_none(next)?.flatten() else {
                return Ok(None);
            };

            match target {
                Some(target) if message.msg_id != target => {
                    tracing::debug!("skipping message {}", message.msg_id);
                }
                _ => return Ok(Some(message)),
            }
        }

        if lookahead > 1 {
            tracing::warn!("gave up after reading {} messages", lookahead);
        }
        Ok(None)
    }

    /// Check the signature carried by `message` against `body`.
    async fn verify_message(&self, body: &Value, message: &FetchResult) -> Result<bool> {
        let proof = match LinkedDataSignature::from_slice(&message.message) {
            Ok(proof) => proof,
            Err(e) => {
                tracing::warn!("message {} carries no signature: {}", message.msg_id, e);
                return Ok(false);
            }
        };

        let doc = SignedDocument {
            body: without_proof(body),
            proof,
        };
        self.verifier.verify_signed(&doc).await
    }
}

fn collect_bodies<'a, I, D>(docs: I, shape: Shape) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = D>,
    D: Into<JsonInput<'a>>,
{
    docs.into_iter()
        .map(|doc| {
            let doc = match shape {
                Shape::Json => get_document(doc)?,
                Shape::JsonLd => get_json_ld_document(doc)?,
            };
            Ok(without_proof(&doc))
        })
        .collect()
}

/// Channel failures that mean "does not verify" become `None`.
fn failure_as_none<V>(result: Result<V>) -> Result<Option<V>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_verification_failure() => {
            tracing::warn!("verification failed: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
