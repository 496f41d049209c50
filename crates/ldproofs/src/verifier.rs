//! Verifying Linked Data Signatures against DID-resolved keys.

use std::sync::Arc;

use ldproofs_core::{
    get_signed_document, get_signed_json_ld_document, is_did, Ed25519PublicKey,
    Ed25519Signature, JsonInput, SignedDocument, ED25519_VERIFICATION_KEY_2018,
};
use ldproofs_identity::{DidResolver, IdentityError};

use crate::config::validate_node;
use crate::digest::signing_input;
use crate::error::Result;
use crate::rdf::{NoRdfCanonizer, RdfCanonizer};

/// Checks signatures produced by a [`Signer`](crate::Signer).
///
/// Malformed input is an error; a signature that does not check out is `Ok(false)`.
pub struct Verifier<R: DidResolver> {
    resolver: Arc<R>,
    rdf: Arc<dyn RdfCanonizer>,
    node: Option<String>,
}

impl<R: DidResolver> Clone for Verifier<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            rdf: Arc::clone(&self.rdf),
            node: self.node.clone(),
        }
    }
}

impl<R: DidResolver> Verifier<R> {
    /// Create a verifier resolving keys through `resolver`.
    pub fn new(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            rdf: Arc::new(NoRdfCanonizer),
            node: None,
        }
    }

    /// Resolve identities against `node`, which must be a URL.
    pub fn with_node(mut self, node: Option<&str>) -> Result<Self> {
        validate_node(node)?;
        self.node = node.map(str::to_string);
        Ok(self)
    }

    /// Use `rdf` for `Ed25519Signature2018` proofs.
    pub fn with_rdf(mut self, rdf: Arc<dyn RdfCanonizer>) -> Self {
        self.rdf = rdf;
        self
    }

    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Check a Base58 signature over `message` made by `verification_method`.
    pub async fn verify(
        &self,
        message: &[u8],
        signature_value: &str,
        verification_method: &str,
    ) -> Result<bool> {
        if !is_did(verification_method) {
            return Err(IdentityError::InvalidDid(verification_method.to_string()).into());
        }

        let method = self
            .resolver
            .resolve_method(self.node.as_deref(), verification_method)
            .await?;

        if method.method_type != ED25519_VERIFICATION_KEY_2018 {
            return Err(IdentityError::InvalidDidMethod(format!(
                "only '{ED25519_VERIFICATION_KEY_2018}' verification methods are allowed"
            ))
            .into());
        }

        let public_key = match Ed25519PublicKey::from_base58(&method.public_key_base58) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("unusable key for {}: {}", verification_method, e);
                return Ok(false);
            }
        };
        let signature = match Ed25519Signature::from_base58(signature_value) {
            Ok(signature) => signature,
            Err(e) => {
                tracing::debug!("undecodable signature: {}", e);
                return Ok(false);
            }
        };

        Ok(public_key.verify(message, &signature).is_ok())
    }

    /// Verify a signed JSON document, dispatching on `proof.type`.
    pub async fn verify_json<'a>(&self, doc: impl Into<JsonInput<'a>>) -> Result<bool> {
        let doc = get_signed_document(doc)?;
        self.verify_signed(&doc).await
    }

    /// Verify a signed JSON-LD document, dispatching on `proof.type`.
    pub async fn verify_json_ld<'a>(&self, doc: impl Into<JsonInput<'a>>) -> Result<bool> {
        let doc = get_signed_json_ld_document(doc)?;
        self.verify_signed(&doc).await
    }

    /// Verify a document already split from its signature.
    pub async fn verify_signed(&self, doc: &SignedDocument) -> Result<bool> {
        let suite = doc.proof.suite;
        if suite.is_rdf() && doc.body.get("@context").is_none() {
            return Err(ldproofs_core::CoreError::InvalidDataType(format!(
                "'{suite}' proofs need a JSON-LD document"
            ))
            .into());
        }

        let options = doc.proof.options();
        let input = signing_input(suite, &doc.body, &options, self.rdf.as_ref()).await?;

        self.verify(&input, &doc.proof.proof_value, &doc.proof.verification_method)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignerConfig;
    use crate::error::ErrorKind;
    use crate::signer::{Signer, SigningOptions};
    use ldproofs_core::{with_proof, Keypair};
    use ldproofs_identity::{DidDocument, MemoryResolver, VerificationMethod};
    use serde_json::{json, Value};

    const DID: &str = "did:iota:HNn8sQ3xK5aP1vTzJ9mYwG2rC7dL4eB6fU8hR3kW1qXs";

    async fn setup() -> (Signer<MemoryResolver>, Verifier<MemoryResolver>, SigningOptions) {
        let keypair = Keypair::from_seed(&[21u8; 32]);
        let resolver = Arc::new(MemoryResolver::new());
        resolver.register(DidDocument::new(DID).with_method(VerificationMethod::ed25519(
            DID,
            "key",
            &keypair.public_key(),
        )));

        let signer = Signer::create(DID, Arc::clone(&resolver), SignerConfig::default())
            .await
            .unwrap();
        let verifier = Verifier::new(resolver);
        (signer, verifier, SigningOptions::new("key", keypair.to_base58_secret()))
    }

    #[tokio::test]
    async fn test_sign_then_verify() {
        let (signer, verifier, options) = setup().await;
        let doc = json!({"name": "Alice", "tags": ["a", "b"]});

        let signature = signer.sign_json(&doc, &options).await.unwrap();
        let signed = with_proof(&doc, signature.to_value());
        assert!(verifier.verify_json(&signed).await.unwrap());
        assert!(verifier.verify_json(&signed.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_tampering_detected() {
        let (signer, verifier, options) = setup().await;
        let doc = json!({"amount": 100});
        let signature = signer.sign_json(&doc, &options).await.unwrap();

        let tampered = with_proof(&json!({"amount": 101}), signature.to_value());
        assert!(!verifier.verify_json(&tampered).await.unwrap());

        let mut bad = signature.clone();
        bad.created = "2000-01-01T00:00:00.000Z".into();
        let signed = with_proof(&doc, bad.to_value());
        assert!(!verifier.verify_json(&signed).await.unwrap());
    }

    #[tokio::test]
    async fn test_flipped_signature_byte() {
        let (signer, verifier, options) = setup().await;
        let doc = json!({"k": "v"});
        let signature = signer.sign_json(&doc, &options).await.unwrap();

        let mut bytes = Ed25519Signature::from_base58(&signature.proof_value)
            .unwrap()
            .0;
        for i in [0usize, 31, 63] {
            bytes[i] ^= 0x01;
            let mut flipped = signature.clone();
            flipped.proof_value = Ed25519Signature::from_bytes(bytes).to_base58();
            let signed = with_proof(&doc, flipped.to_value());
            assert!(!verifier.verify_json(&signed).await.unwrap());
            bytes[i] ^= 0x01;
        }
    }

    #[tokio::test]
    async fn test_undecodable_signature_is_false() {
        let (signer, verifier, options) = setup().await;
        let doc = json!({"k": "v"});
        let mut signature = signer.sign_json(&doc, &options).await.unwrap();
        signature.proof_value = "0OIl".into();
        let signed = with_proof(&doc, signature.to_value());
        assert!(!verifier.verify_json(&signed).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_input_is_error() {
        let (_, verifier, _) = setup().await;

        let err = verifier.verify_json(&json!({"a": 1})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::JsonDocNotSigned);

        let unsupported: Value = json!({
            "a": 1,
            "proof": {
                "type": "Foo2099",
                "verificationMethod": format!("{DID}#key"),
                "proofPurpose": "dataVerification",
                "created": "2021-06-01T10:00:00.000Z",
                "proofValue": "x"
            }
        });
        let err = verifier.verify_json(&unsupported).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSupportedSignature);

        let err = verifier.verify(b"m", "x", "nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDid);
    }

    #[tokio::test]
    async fn test_only_ed25519_methods() {
        let (_, verifier, _) = setup().await;
        let mut doc = DidDocument::new("did:iota:other").with_method(VerificationMethod::ed25519(
            "did:iota:other",
            "key",
            &Keypair::generate().public_key(),
        ));
        doc.verification_method[0].method_type = "EcdsaSecp256k1VerificationKey2019".into();
        verifier.resolver.register(doc);

        let err = verifier
            .verify(b"m", "x", "did:iota:other#key")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDidMethod);
    }

    #[test]
    fn test_node_must_be_url() {
        let verifier = Verifier::new(Arc::new(MemoryResolver::new()));
        let err = verifier.with_node(Some("localhost")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidNode);
    }
}
