//! DID documents and verification methods.
//!
//! Only the parts of a DID document that signing and verification need are
//! modelled: the subject id and its verification methods.

use serde::{Deserialize, Serialize};

use ldproofs_core::{split_did_url, Ed25519PublicKey, ED25519_VERIFICATION_KEY_2018};

use crate::error::{IdentityError, Result};

/// A named key entry inside a DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Full DID URL: `did:method:id#fragment`.
    pub id: String,

    #[serde(rename = "type")]
    pub method_type: String,

    pub controller: String,

    pub public_key_base58: String,
}

impl VerificationMethod {
    /// An `Ed25519VerificationKey2018` method controlled by `did`.
    pub fn ed25519(did: &str, fragment: &str, public_key: &Ed25519PublicKey) -> Self {
        Self {
            id: format!("{did}#{fragment}"),
            method_type: ED25519_VERIFICATION_KEY_2018.to_string(),
            controller: did.to_string(),
            public_key_base58: public_key.to_base58(),
        }
    }

    /// The fragment part of the method id.
    pub fn fragment(&self) -> Option<&str> {
        split_did_url(&self.id).1
    }

    /// The Ed25519 public key of this method.
    ///
    /// Only `Ed25519VerificationKey2018` methods carry a usable key.
    pub fn public_key(&self) -> Result<Ed25519PublicKey> {
        if self.method_type != ED25519_VERIFICATION_KEY_2018 {
            return Err(IdentityError::InvalidDidMethod(format!(
                "'{}' is of type '{}', only '{}' is supported",
                self.id, self.method_type, ED25519_VERIFICATION_KEY_2018
            )));
        }

        Ok(Ed25519PublicKey::from_base58(&self.public_key_base58)?)
    }
}

/// A resolved DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    pub id: String,

    #[serde(default)]
    pub verification_method: Vec<VerificationMethod>,
}

impl DidDocument {
    /// An empty document for `did`.
    pub fn new(did: impl Into<String>) -> Self {
        Self {
            id: did.into(),
            verification_method: Vec::new(),
        }
    }

    /// Add a verification method.
    pub fn with_method(mut self, method: VerificationMethod) -> Self {
        self.verification_method.push(method);
        self
    }

    /// Find a method by bare fragment (`key-1`), `#key-1` or full DID URL.
    pub fn method(&self, reference: &str) -> Option<&VerificationMethod> {
        let full = self.method_url(reference);
        self.verification_method.iter().find(|m| m.id == full)
    }

    /// The full DID URL a method reference stands for in this document.
    pub fn method_url(&self, reference: &str) -> String {
        if reference.starts_with("did:") {
            reference.to_string()
        } else {
            format!("{}#{}", self.id, reference.trim_start_matches('#'))
        }
    }

    /// Integrity check.
    ///
    /// Every method must belong to this document, be controlled by it, and
    /// carry a decodable key.
    pub fn verify_document(&self) -> Result<()> {
        for method in &self.verification_method {
            let (did, fragment) = split_did_url(&method.id);
            if did != self.id || fragment.map_or(true, str::is_empty) {
                return Err(IdentityError::DidNotVerified(format!(
                    "method '{}' does not belong to '{}'",
                    method.id, self.id
                )));
            }
            if method.controller != self.id {
                return Err(IdentityError::DidNotVerified(format!(
                    "method '{}' is controlled by '{}'",
                    method.id, method.controller
                )));
            }
            if method.method_type == ED25519_VERIFICATION_KEY_2018
                && Ed25519PublicKey::from_base58(&method.public_key_base58).is_err()
            {
                return Err(IdentityError::DidNotVerified(format!(
                    "method '{}' has a malformed key",
                    method.id
                )));
            }
        }
        Ok(())
    }
}
