//! DID resolution.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use ldproofs_core::{is_did, split_did_url};

use crate::document::{DidDocument, VerificationMethod};
use crate::error::{IdentityError, Result};

/// Resolves DIDs to their documents.
///
/// `node` is the endpoint the caller was configured with; resolvers that do
/// not talk to a node ignore it.
#[async_trait]
pub trait DidResolver: Send + Sync {
    /// Resolve a DID to its document.
    async fn resolve(&self, node: Option<&str>, did: &str) -> Result<DidDocument>;

    /// Resolve a DID URL (`did#fragment`) to its verification method.
    async fn resolve_method(&self, node: Option<&str>, did_url: &str) -> Result<VerificationMethod> {
        let (did, fragment) = split_did_url(did_url);
        if fragment.is_none() {
            return Err(IdentityError::InvalidDidMethod(format!(
                "'{did_url}' names no verification method"
            )));
        }

        let doc = self.resolve(node, did).await?;
        doc.method(did_url)
            .cloned()
            .ok_or_else(|| IdentityError::InvalidDidMethod(did_url.to_string()))
    }
}

/// In-memory resolver over registered documents.
///
/// Counts calls so tests can observe how far a verification got.
#[derive(Default)]
pub struct MemoryResolver {
    documents: RwLock<HashMap<String, DidDocument>>,
    resolves: AtomicUsize,
}

impl MemoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a document under its id.
    pub fn register(&self, doc: DidDocument) {
        let mut documents = self.documents.write().unwrap();
        documents.insert(doc.id.clone(), doc);
    }

    /// Number of `resolve` calls served, including those made by `resolve_method`.
    pub fn resolve_count(&self) -> usize {
        self.resolves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DidResolver for MemoryResolver {
    async fn resolve(&self, _node: Option<&str>, did: &str) -> Result<DidDocument> {
        self.resolves.fetch_add(1, Ordering::Relaxed);

        if !is_did(did) {
            return Err(IdentityError::InvalidDid(did.to_string()));
        }

        let documents = self.documents.read().unwrap();
        documents.get(did).cloned().ok_or_else(|| {
            tracing::debug!("no document registered for {}", did);
            IdentityError::DidNotFound(did.to_string())
        })
    }
}
