//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: an identity registered with an
//! in-memory resolver, and an in-memory ledger to anchor on.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use ldproofs::{
    CanonizeOptions, LdProofOptions, LdProofVerifier, ProofGenerator, RdfCanonizer, Signer,
    SignerConfig, SigningOptions, Verifier, VerifierConfig,
};
use ldproofs_channel::{ChannelTransport, MemoryChannel, MemoryLedger, MemoryTransport};
use ldproofs_core::{canonicalize, with_proof, AnchoredProof, Ed25519PublicKey, Keypair};
use ldproofs_identity::{DidDocument, MemoryResolver, VerificationMethod};

/// Fragment of the fixture's signing method.
pub const KEY_FRAGMENT: &str = "key-1";

/// A test fixture with an identity, a resolver and a ledger.
pub struct TestFixture {
    pub keypair: Keypair,
    pub did: String,
    pub resolver: Arc<MemoryResolver>,
    pub ledger: Arc<MemoryLedger>,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self::from_keypair(Keypair::generate(), MemoryLedger::new())
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::from_keypair(Keypair::from_seed(&seed), MemoryLedger::new())
    }

    /// Another identity on the same ledger and resolver.
    pub fn peer(&self, seed: [u8; 32]) -> Self {
        let peer = Self::from_keypair(Keypair::from_seed(&seed), Arc::clone(&self.ledger));
        let resolver = Arc::clone(&self.resolver);
        resolver.register(peer.did_document());
        Self { resolver, ..peer }
    }

    fn from_keypair(keypair: Keypair, ledger: Arc<MemoryLedger>) -> Self {
        let did = format!("did:iota:{}", keypair.public_key().to_base58());
        let resolver = Arc::new(MemoryResolver::new());
        let fixture = Self {
            keypair,
            did,
            resolver,
            ledger,
        };
        fixture.resolver.register(fixture.did_document());
        fixture
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// The DID document registered for this fixture.
    pub fn did_document(&self) -> DidDocument {
        DidDocument::new(&self.did).with_method(VerificationMethod::ed25519(
            &self.did,
            KEY_FRAGMENT,
            &self.keypair.public_key(),
        ))
    }

    /// Full DID URL of the signing method.
    pub fn method_url(&self) -> String {
        format!("{}#{}", self.did, KEY_FRAGMENT)
    }

    /// Base58 secret of the signing key.
    pub fn secret(&self) -> String {
        self.keypair.to_base58_secret()
    }

    /// JCS signing options for the fixture's method.
    pub fn signing_options(&self) -> SigningOptions {
        SigningOptions::new(KEY_FRAGMENT, self.secret())
    }

    /// A transport over the fixture's ledger.
    pub fn transport(&self) -> MemoryTransport {
        MemoryTransport::new(Arc::clone(&self.ledger))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Components
    // ─────────────────────────────────────────────────────────────────────────

    /// A signer for the fixture's DID, able to sign both suites.
    pub async fn signer(&self) -> Signer<MemoryResolver> {
        Signer::create(&self.did, Arc::clone(&self.resolver), SignerConfig::default())
            .await
            .expect("fixture identity resolves")
            .with_rdf(Arc::new(JcsRdfCanonizer))
    }

    /// A signature verifier, able to verify both suites.
    pub fn verifier(&self) -> Verifier<MemoryResolver> {
        Verifier::new(Arc::clone(&self.resolver)).with_rdf(Arc::new(JcsRdfCanonizer))
    }

    /// An anchored proof verifier over the fixture's ledger.
    pub fn ld_verifier(
        &self,
        config: VerifierConfig,
    ) -> LdProofVerifier<MemoryTransport, MemoryResolver> {
        LdProofVerifier::new(self.transport(), self.verifier(), config)
            .expect("fixture configuration is valid")
    }

    /// A proof generator on a fresh channel, with options anchoring at its start.
    pub async fn generator(
        &self,
    ) -> (ProofGenerator<MemoryChannel, MemoryResolver>, LdProofOptions) {
        let channel = self
            .transport()
            .bind(None)
            .await
            .expect("channel creation succeeds");
        self.generator_on(channel).await
    }

    /// A proof generator on an already bound channel.
    pub async fn generator_on(
        &self,
        channel: MemoryChannel,
    ) -> (ProofGenerator<MemoryChannel, MemoryResolver>, LdProofOptions) {
        use ldproofs_channel::AnchoringChannel;

        let options = LdProofOptions {
            verification_method: KEY_FRAGMENT.to_string(),
            secret: self.secret(),
            anchorage_id: channel.first_anchorage_id().to_string(),
        };
        (ProofGenerator::create(channel, self.signer().await), options)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach an anchored proof to a document.
pub fn anchor_document(doc: &Value, proof: &AnchoredProof) -> Value {
    with_proof(doc, proof.to_value())
}

/// Stand-in for a JSON-LD processor.
///
/// Deterministic and insensitive to key order, which is all the
/// `Ed25519Signature2018` tests need; it does not produce real N-Quads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JcsRdfCanonizer;

#[async_trait]
impl RdfCanonizer for JcsRdfCanonizer {
    async fn canonize(&self, doc: &Value, options: &CanonizeOptions) -> ldproofs::Result<String> {
        Ok(format!("{}|{}", options.algorithm, canonicalize(doc)))
    }
}
