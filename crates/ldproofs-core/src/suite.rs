//! Signature suites and well-known identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Proof type of an anchored proof envelope.
pub const ANCHORED_PROOF_TYPE: &str = "IotaLinkedDataProof2021";

/// The only verification method type accepted for signing and verifying.
pub const ED25519_VERIFICATION_KEY_2018: &str = "Ed25519VerificationKey2018";

/// JSON-LD context of the proof options hashed by `Ed25519Signature2018`.
pub const W3C_SECURITY_CONTEXT: &str = "https://w3id.org/security/v2";

/// The closed set of supported signature suites.
///
/// The suite is chosen once from `proof.type` (or the caller's request) and
/// fixes both the canonicalization and the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureSuite {
    /// JSON Canonicalization Scheme + SHA-256 + Ed25519.
    JcsEd25519Signature2020,
    /// RDF Dataset Canonicalization (URDNA2015) + SHA-512 + Ed25519.
    Ed25519Signature2018,
}

impl SignatureSuite {
    /// The suite name as it appears in `proof.type`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SignatureSuite::JcsEd25519Signature2020 => "JcsEd25519Signature2020",
            SignatureSuite::Ed25519Signature2018 => "Ed25519Signature2018",
        }
    }

    /// Parse a suite name, rejecting anything outside the supported set.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "JcsEd25519Signature2020" => Ok(SignatureSuite::JcsEd25519Signature2020),
            "Ed25519Signature2018" => Ok(SignatureSuite::Ed25519Signature2018),
            other => Err(CoreError::NotSupportedSignature(format!(
                "'{other}': only 'JcsEd25519Signature2020' and 'Ed25519Signature2018' are supported"
            ))),
        }
    }

    /// Whether the suite canonicalizes through the RDF collaborator.
    pub const fn is_rdf(&self) -> bool {
        matches!(self, SignatureSuite::Ed25519Signature2018)
    }
}

impl fmt::Display for SignatureSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureSuite {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
