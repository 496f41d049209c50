//! The bytes a signature suite signs.

use serde_json::{json, Value};

use ldproofs_core::{
    canonical_bytes, sha256, sha512, with_proof, ProofOptions, SignatureSuite,
    W3C_SECURITY_CONTEXT,
};

use crate::error::Result;
use crate::rdf::{CanonizeOptions, RdfCanonizer};

/// Compute the signing input of `body` under `options`.
///
/// - `JcsEd25519Signature2020`: SHA-256 of the JCS form of `body` with the
///   proof options attached as `proof`.
/// - `Ed25519Signature2018`: SHA-512 of the canonical `body` followed by
///   SHA-512 of the canonical proof options.
///
/// `body` must not carry a proof of its own.
pub async fn signing_input(
    suite: SignatureSuite,
    body: &Value,
    options: &ProofOptions,
    rdf: &dyn RdfCanonizer,
) -> Result<Vec<u8>> {
    match suite {
        SignatureSuite::JcsEd25519Signature2020 => {
            let doc = with_proof(body, options.to_value());
            Ok(sha256(&canonical_bytes(&doc)).to_vec())
        }
        SignatureSuite::Ed25519Signature2018 => {
            let canonize_options = CanonizeOptions::default();

            let doc_canonical = rdf.canonize(body, &canonize_options).await?;

            let proof_options = json!({
                "@context": W3C_SECURITY_CONTEXT,
                "verificationMethod": options.verification_method,
                "created": options.created,
            });
            let proof_canonical = rdf.canonize(&proof_options, &canonize_options).await?;

            let mut input = Vec::with_capacity(128);
            input.extend_from_slice(&sha512(doc_canonical.as_bytes()));
            input.extend_from_slice(&sha512(proof_canonical.as_bytes()));
            Ok(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::NoRdfCanonizer;
    use async_trait::async_trait;
    use ldproofs_core::{canonicalize, PROOF_PURPOSE};

    struct EchoCanonizer;

    #[async_trait]
    impl RdfCanonizer for EchoCanonizer {
        async fn canonize(&self, doc: &Value, _options: &CanonizeOptions) -> Result<String> {
            Ok(canonicalize(doc))
        }
    }

    fn options(suite: SignatureSuite) -> ProofOptions {
        ProofOptions {
            suite,
            verification_method: "did:iota:abc#key".into(),
            proof_purpose: PROOF_PURPOSE.into(),
            created: "2021-06-01T10:00:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn test_jcs_input_covers_proof_options() {
        let body = json!({"b": 2, "a": 1});
        let suite = SignatureSuite::JcsEd25519Signature2020;
        let input = signing_input(suite, &body, &options(suite), &NoRdfCanonizer)
            .await
            .unwrap();
        assert_eq!(input.len(), 32);

        let expected = sha256(
            canonicalize(&json!({
                "a": 1,
                "b": 2,
                "proof": {
                    "type": "JcsEd25519Signature2020",
                    "verificationMethod": "did:iota:abc#key",
                    "proofPurpose": "dataVerification",
                    "created": "2021-06-01T10:00:00.000Z"
                }
            }))
            .as_bytes(),
        );
        assert_eq!(input, expected.to_vec());

        let mut later = options(suite);
        later.created = "2021-06-02T10:00:00.000Z".into();
        let other = signing_input(suite, &body, &later, &NoRdfCanonizer)
            .await
            .unwrap();
        assert_ne!(input, other);
    }

    #[tokio::test]
    async fn test_rdf_input_is_two_digests() {
        let body = json!({"@context": "https://schema.org", "name": "x"});
        let suite = SignatureSuite::Ed25519Signature2018;
        let input = signing_input(suite, &body, &options(suite), &EchoCanonizer)
            .await
            .unwrap();
        assert_eq!(input.len(), 128);
        assert_eq!(&input[..64], &sha512(canonicalize(&body).as_bytes())[..]);
    }

    #[tokio::test]
    async fn test_rdf_without_canonizer_fails() {
        let suite = SignatureSuite::Ed25519Signature2018;
        let result = signing_input(suite, &json!({}), &options(suite), &NoRdfCanonizer).await;
        assert!(matches!(result, Err(crate::LdProofError::Canonization(_))));
    }
}
