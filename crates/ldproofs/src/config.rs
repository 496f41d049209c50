//! Configuration for signers and verifiers.

use ldproofs_core::{is_url, CoreError};
use ldproofs_identity::IdentityError;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Messages a scanning verification reads past before giving up.
pub const DEFAULT_MAX_LOOKAHEAD: usize = 1000;

/// Configuration for anchored proof verification.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifierConfig {
    /// Node used to resolve identities and reach channels.
    pub node: Option<String>,
    /// Whether chained documents after the first must be the very next
    /// message on the channel. When false every step scans forward.
    pub strict: bool,
    /// Upper bound on messages read while scanning for one document.
    pub max_lookahead: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            node: None,
            strict: true,
            max_lookahead: DEFAULT_MAX_LOOKAHEAD,
        }
    }
}

impl VerifierConfig {
    /// Check the configuration before use.
    ///
    /// A zero lookahead could never locate a document.
    pub fn validate(&self) -> Result<()> {
        if self.max_lookahead == 0 {
            return Err(
                CoreError::InvalidDataType("max_lookahead must be at least 1".into()).into(),
            );
        }
        validate_node(self.node.as_deref())
    }
}

/// Configuration for a [`Signer`](crate::Signer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Node used to resolve the signer's identity.
    pub node: Option<String>,
}

impl SignerConfig {
    /// Check the configuration before use.
    pub fn validate(&self) -> Result<()> {
        validate_node(self.node.as_deref())
    }
}

pub(crate) fn validate_node(node: Option<&str>) -> Result<()> {
    match node {
        Some(node) if !is_url(node) => {
            Err(IdentityError::InvalidNode(format!("'{node}' is not a URL")).into())
        }
        _ => Ok(()),
    }
}
