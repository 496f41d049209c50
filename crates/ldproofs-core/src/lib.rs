//! # ldproofs Core
//!
//! Pure primitives for anchored Linked Data Proofs: canonicalization,
//! signatures, and the proof data model.
//!
//! This crate contains no I/O, no channel access, no identity resolution.
//! It is pure computation over JSON documents and Ed25519 keys.
//!
//! ## Key Types
//!
//! - [`SignatureSuite`] - The closed set of supported signature suites
//! - [`LinkedDataSignature`] - A signature envelope embedded as `proof`
//! - [`AnchoredProof`] - A proof pointing at a position on a channel
//! - [`AnchorProofValue`] - The channel coordinates inside an anchored proof
//! - [`Keypair`] - Ed25519 signing key wrapper
//!
//! ## Canonicalization
//!
//! Documents are serialized with sorted keys and no whitespace before being
//! hashed. See [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod document;
pub mod error;
pub mod proof;
pub mod suite;
pub mod validation;

pub use canonical::{canonical_bytes, canonicalize};
pub use crypto::{sha256, sha512, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use document::{
    get_anchored_document, get_anchored_json_ld_document, get_document, get_json_ld_document,
    get_signed_document, get_signed_json_ld_document, with_proof, without_proof, AnchoredDocument,
    JsonInput, SignedDocument,
};
pub use error::{CoreError, Result};
pub use proof::{
    now_iso8601, AnchorProofValue, AnchoredProof, LinkedDataSignature, ProofOptions, PROOF_PURPOSE,
};
pub use suite::{
    SignatureSuite, ANCHORED_PROOF_TYPE, ED25519_VERIFICATION_KEY_2018, W3C_SECURITY_CONTEXT,
};
pub use validation::{is_did, is_url, split_did_url};
