//! # ldproofs Testkit
//!
//! Testing utilities for anchored Linked Data Proofs.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Canonical forms every implementation must reproduce
//! - **Generators**: Proptest strategies for JSON documents and keys
//! - **Fixtures**: An identity, a resolver and a ledger wired together
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use ldproofs_testkit::fixtures::{anchor_document, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let (mut generator, options) = fixture.generator().await;
//! let proof = generator.generate(&doc, &options).await?;
//! let anchored = anchor_document(&doc, &proof);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{anchor_document, JcsRdfCanonizer, TestFixture, KEY_FRAGMENT};
pub use generators::{document, json_value, keypair};
pub use vectors::{all_vectors, failing_vectors, GoldenVector};
