//! # ldproofs
//!
//! Sign JSON documents with DID-controlled keys, anchor the signatures on an
//! append-only channel, and verify documents and document chains against
//! what was anchored.
//!
//! ## Example
//!
//! ```ignore
//! use ldproofs::{LdProofOptions, LdProofVerifier, ProofGenerator, Signer, Verifier};
//!
//! let signer = Signer::create(did, resolver.clone(), SignerConfig::default()).await?;
//! let mut generator = ProofGenerator::create(channel, signer);
//! let proofs = generator.generate_chain(&docs, &options).await?;
//!
//! let verifier = LdProofVerifier::new(transport, Verifier::new(resolver), VerifierConfig::default())?;
//! assert!(verifier.verify_json_chain(&anchored_docs).await?);
//! ```
//!
//! ## Crates
//!
//! - `ldproofs-core`: canonicalization, keys, proof data model
//! - `ldproofs-channel`: channel contract and in-memory ledger
//! - `ldproofs-identity`: DID documents and resolution

pub mod chain;
pub mod config;
pub mod digest;
pub mod error;
pub mod generator;
pub mod rdf;
pub mod signer;
pub mod verifier;

pub use chain::LdProofVerifier;
pub use config::{SignerConfig, VerifierConfig, DEFAULT_MAX_LOOKAHEAD};
pub use digest::signing_input;
pub use error::{ErrorKind, LdProofError, Result};
pub use generator::{LdProofOptions, ProofGenerator};
pub use rdf::{CanonizeOptions, NoRdfCanonizer, RdfCanonizer, N_QUADS, URDNA2015};
pub use signer::{Signer, SigningOptions, SigningResult};
pub use verifier::Verifier;

// Re-export the pieces callers need alongside the API.
pub use ldproofs_channel::{AnchoringChannel, ChannelTransport};
pub use ldproofs_core::{
    canonicalize, with_proof, AnchorProofValue, AnchoredProof, JsonInput, LinkedDataSignature,
    SignatureSuite, ANCHORED_PROOF_TYPE,
};
pub use ldproofs_identity::{DidDocument, DidResolver, VerificationMethod};
