//! Signing documents with a DID-controlled key.

use std::sync::Arc;

use ldproofs_core::{
    get_document, get_json_ld_document, is_did, now_iso8601, without_proof, CoreError, JsonInput,
    Keypair, LinkedDataSignature, ProofOptions, SignatureSuite,
};
use ldproofs_identity::{prove_ownership, DidDocument, DidResolver, IdentityError};

use crate::config::SignerConfig;
use crate::digest::signing_input;
use crate::error::Result;
use crate::rdf::{NoRdfCanonizer, RdfCanonizer};

/// What to sign with.
#[derive(Debug, Clone)]
pub struct SigningOptions {
    /// Suite name, e.g. `JcsEd25519Signature2020`. `None` signs with the
    /// suite of the method called.
    pub signature_type: Option<String>,
    /// Method fragment (`key-1`) or full DID URL.
    pub verification_method: String,
    /// Base58 secret of the method's key.
    pub secret: String,
}

impl SigningOptions {
    pub fn new(verification_method: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            signature_type: None,
            verification_method: verification_method.into(),
            secret: secret.into(),
        }
    }

    /// Request a suite by name.
    pub fn with_signature_type(mut self, signature_type: impl Into<String>) -> Self {
        self.signature_type = Some(signature_type.into());
        self
    }

    /// The requested suite, which must be `expected`.
    fn suite(&self, expected: SignatureSuite) -> Result<SignatureSuite> {
        let Some(name) = self.signature_type.as_deref() else {
            return Ok(expected);
        };
        let suite = SignatureSuite::parse(name)?;
        if suite != expected {
            return Err(CoreError::NotSupportedSignature(format!(
                "'{suite}' cannot be used here, only '{expected}'"
            ))
            .into());
        }
        Ok(suite)
    }
}

/// A raw signature over a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningResult {
    /// Full DID URL of the method that signed.
    pub verification_method: String,
    /// Base58 Ed25519 signature.
    pub signature_value: String,
    pub created: String,
}

/// Signs messages and documents on behalf of one DID.
pub struct Signer<R: DidResolver> {
    did: String,
    document: DidDocument,
    resolver: Arc<R>,
    rdf: Arc<dyn RdfCanonizer>,
    config: SignerConfig,
}

impl<R: DidResolver> Signer<R> {
    /// Create a signer for `did`, resolving its document once.
    pub async fn create(did: &str, resolver: Arc<R>, config: SignerConfig) -> Result<Self> {
        config.validate()?;

        if !is_did(did) {
            return Err(IdentityError::InvalidDid(did.to_string()).into());
        }

        let document = resolver.resolve(config.node.as_deref(), did).await?;
        document.verify_document()?;

        Ok(Self {
            did: did.to_string(),
            document,
            resolver,
            rdf: Arc::new(NoRdfCanonizer),
            config,
        })
    }

    /// Use `rdf` for `Ed25519Signature2018` proofs.
    pub fn with_rdf(mut self, rdf: Arc<dyn RdfCanonizer>) -> Self {
        self.rdf = rdf;
        self
    }

    /// The DID this signer signs for.
    pub fn did(&self) -> &str {
        &self.did
    }

    /// The resolved DID document.
    pub fn document(&self) -> &DidDocument {
        &self.document
    }

    /// The resolver this signer was created with.
    pub fn resolver(&self) -> &Arc<R> {
        &self.resolver
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signing
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign raw bytes with an Ed25519 method of the DID document.
    ///
    /// The secret must prove ownership of the method before anything is signed.
    pub async fn sign(&self, message: &[u8], options: &SigningOptions) -> Result<SigningResult> {
        let method_url = self.document.method_url(&options.verification_method);
        let method = self
            .document
            .method(&method_url)
            .ok_or_else(|| IdentityError::InvalidDidMethod(method_url.clone()))?;
        method.public_key()?;

        prove_ownership(&self.document, &method_url, &options.secret)?;

        let keypair = Keypair::from_base58(&options.secret)?;
        let signature = keypair.sign(message);

        Ok(SigningResult {
            verification_method: method_url,
            signature_value: signature.to_base58(),
            created: now_iso8601(),
        })
    }

    /// Sign a JSON document with `JcsEd25519Signature2020`.
    ///
    /// Requesting any other suite fails with `NotSupportedSignature`.
    pub async fn sign_json<'a>(
        &self,
        doc: impl Into<JsonInput<'a>>,
        options: &SigningOptions,
    ) -> Result<LinkedDataSignature> {
        let suite = options.suite(SignatureSuite::JcsEd25519Signature2020)?;
        let body = get_document(doc)?;
        self.sign_body(suite, &body, options).await
    }

    /// Sign a JSON-LD document with `Ed25519Signature2018`.
    ///
    /// Requesting any other suite fails with `NotSupportedSignature`.
    pub async fn sign_json_ld<'a>(
        &self,
        doc: impl Into<JsonInput<'a>>,
        options: &SigningOptions,
    ) -> Result<LinkedDataSignature> {
        let suite = options.suite(SignatureSuite::Ed25519Signature2018)?;
        let body = get_json_ld_document(doc)?;
        self.sign_body(suite, &body, options).await
    }

    async fn sign_body(
        &self,
        suite: SignatureSuite,
        doc: &serde_json::Value,
        options: &SigningOptions,
    ) -> Result<LinkedDataSignature> {
        let proof_options = ProofOptions::new(
            suite,
            self.document.method_url(&options.verification_method),
        );

        let body = without_proof(doc);
        let input = signing_input(suite, &body, &proof_options, self.rdf.as_ref()).await?;
        let result = self.sign(&input, options).await?;

        Ok(LinkedDataSignature::from_options(
            proof_options,
            result.signature_value,
        ))
    }
}
