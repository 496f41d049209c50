//! Proof that a secret controls a verification method.

use rand::RngCore;

use ldproofs_core::Keypair;

use crate::document::DidDocument;
use crate::error::{IdentityError, Result};

/// Check that `secret` (Base58) is the private half of `method` in `doc`.
///
/// A random challenge is signed with the secret and verified against the
/// method's public key. Fails with `InvalidSigningKey` on any mismatch.
pub fn prove_ownership(doc: &DidDocument, method: &str, secret: &str) -> Result<()> {
    let vm = doc
        .method(method)
        .ok_or_else(|| IdentityError::InvalidDidMethod(doc.method_url(method)))?;
    let public_key = vm.public_key()?;

    let keypair = Keypair::from_base58(secret)
        .map_err(|e| IdentityError::InvalidSigningKey(format!("unusable secret: {e}")))?;

    let mut challenge = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut challenge);
    let signature = keypair.sign(&challenge);

    public_key.verify(&challenge, &signature).map_err(|_| {
        IdentityError::InvalidSigningKey(format!("secret does not control '{}'", vm.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::VerificationMethod;

    const DID: &str = "did:iota:Fj5mRUa7sQk2dBfy6rDJY6Zq1EqWy6pKQ8kzGmE2wXu8";

    #[test]
    fn test_ownership() {
        let keypair = Keypair::from_seed(&[3u8; 32]);
        let doc = DidDocument::new(DID).with_method(VerificationMethod::ed25519(
            DID,
            "key",
            &keypair.public_key(),
        ));

        assert!(prove_ownership(&doc, "key", &keypair.to_base58_secret()).is_ok());

        let other = Keypair::from_seed(&[4u8; 32]);
        assert!(matches!(
            prove_ownership(&doc, "key", &other.to_base58_secret()),
            Err(IdentityError::InvalidSigningKey(_))
        ));
        assert!(matches!(
            prove_ownership(&doc, "key", "not-base58-0OIl"),
            Err(IdentityError::InvalidSigningKey(_))
        ));
        assert!(matches!(
            prove_ownership(&doc, "missing", &keypair.to_base58_secret()),
            Err(IdentityError::InvalidDidMethod(_))
        ));
    }
}
