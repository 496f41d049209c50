//! RDF dataset canonicalization contract.
//!
//! `Ed25519Signature2018` proofs hash the URDNA2015 canonical form of the
//! document. Producing that form needs a JSON-LD processor and a document
//! loader, which live outside this crate behind [`RdfCanonizer`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{LdProofError, Result};

/// Canonicalization algorithm requested from the canonizer.
pub const URDNA2015: &str = "URDNA2015";

/// Output format requested from the canonizer.
pub const N_QUADS: &str = "application/n-quads";

/// Options passed to [`RdfCanonizer::canonize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonizeOptions {
    pub algorithm: String,
    pub format: String,
}

impl Default for CanonizeOptions {
    fn default() -> Self {
        Self {
            algorithm: URDNA2015.to_string(),
            format: N_QUADS.to_string(),
        }
    }
}

/// Produces the canonical N-Quads form of a JSON-LD document.
#[async_trait]
pub trait RdfCanonizer: Send + Sync {
    async fn canonize(&self, doc: &Value, options: &CanonizeOptions) -> Result<String>;
}

/// Canonizer for deployments that only use the JCS suite.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRdfCanonizer;

#[async_trait]
impl RdfCanonizer for NoRdfCanonizer {
    async fn canonize(&self, _doc: &Value, _options: &CanonizeOptions) -> Result<String> {
        Err(LdProofError::Canonization(
            "no RDF canonicalizer configured".into(),
        ))
    }
}
