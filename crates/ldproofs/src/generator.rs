//! Anchoring signatures on a channel.
//!
//! A proof generator signs a document, anchors the serialized signature on a
//! channel, and returns an anchored proof pointing at the resulting message.

use ldproofs_channel::AnchoringChannel;
use ldproofs_core::{AnchorProofValue, AnchoredProof, JsonInput};
use ldproofs_identity::DidResolver;

use crate::error::Result;
use crate::signer::{Signer, SigningOptions};

/// What to sign with and where to anchor.
#[derive(Debug, Clone)]
pub struct LdProofOptions {
    /// Method fragment (`key-1`) or full DID URL.
    pub verification_method: String,
    /// Base58 secret of the method's key.
    pub secret: String,
    /// The message the signature is attached to.
    pub anchorage_id: String,
}

impl LdProofOptions {
    fn signing_options(&self) -> SigningOptions {
        SigningOptions::new(&self.verification_method, &self.secret)
    }
}

/// Produces anchored proofs with the `JcsEd25519Signature2020` suite.
pub struct ProofGenerator<C: AnchoringChannel, R: DidResolver> {
    channel: C,
    signer: Signer<R>,
}

impl<C: AnchoringChannel, R: DidResolver> ProofGenerator<C, R> {
    /// Create a generator anchoring on `channel` with `signer`.
    pub fn create(channel: C, signer: Signer<R>) -> Self {
        Self { channel, signer }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn signer(&self) -> &Signer<R> {
        &self.signer
    }

    /// Give the channel back.
    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Sign `doc` and anchor the signature at `options.anchorage_id`.
    pub async fn generate<'a>(
        &mut self,
        doc: impl Into<JsonInput<'a>>,
        options: &LdProofOptions,
    ) -> Result<AnchoredProof> {
        let signature = self
            .signer
            .sign_json(doc, &options.signing_options())
            .await?;

        let anchored = self
            .channel
            .anchor(&options.anchorage_id, &signature.to_bytes())
            .await?;
        let msg_id_l1 = self.channel.msg_id_l1(&anchored.msg_id).await?;

        tracing::debug!(
            "anchored proof for {} at {} -> {}",
            self.signer.did(),
            anchored.anchorage_id,
            anchored.msg_id
        );

        Ok(AnchoredProof::new(
            self.signer.did(),
            AnchorProofValue {
                channel_id: self.channel.channel_id().to_string(),
                anchorage_id: anchored.anchorage_id,
                msg_id: Some(anchored.msg_id),
                msg_id_l1: Some(msg_id_l1),
            },
        ))
    }

    /// Generate one proof per document, each anchored to the previous proof's message.
    ///
    /// The first document is anchored at `options.anchorage_id`.
    pub async fn generate_chain<'a, I, D>(
        &mut self,
        docs: I,
        options: &LdProofOptions,
    ) -> Result<Vec<AnchoredProof>>
    where
        I: IntoIterator<Item = D>,
        D: Into<JsonInput<'a>>,
    {
        let mut options = options.clone();
        let mut proofs = Vec::new();

        for doc in docs {
            let proof = self.generate(doc, &options).await?;
            if let Some(msg_id) = &proof.proof_value.msg_id {
                options.anchorage_id = msg_id.clone();
            }
            proofs.push(proof);
        }

        Ok(proofs)
    }
}
