//! # ldproofs Identity
//!
//! DID documents and the resolver contract used by signers and verifiers.
//!
//! ## Key Types
//!
//! - [`DidDocument`] / [`VerificationMethod`] - The resolved identity and its keys
//! - [`DidResolver`] - Resolution contract, with [`MemoryResolver`] for tests
//! - [`prove_ownership`] - Challenge check that a secret controls a method

pub mod document;
pub mod error;
pub mod ownership;
pub mod resolver;

pub use document::{DidDocument, VerificationMethod};
pub use error::{IdentityError, Result};
pub use ownership::prove_ownership;
pub use resolver::{DidResolver, MemoryResolver};
