//! Proof envelopes: Linked Data Signatures and anchored proofs.
//!
//! Wire format (stable across implementations):
//!
//! ```text
//! { "type": <suite>, "verificationMethod": <did-or-did#fragment>,
//!   "proofPurpose": "dataVerification", "created": <ISO-8601>,
//!   "proofValue": <string> | { "channelID", "anchorageID", "msgID", "msgIDL1"? } }
//! ```
//!
//! A string `proofValue` makes a [`LinkedDataSignature`]; an object makes an
//! [`AnchoredProof`] whose value points at the channel message carrying the
//! signature.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::suite::{SignatureSuite, ANCHORED_PROOF_TYPE};

/// The proof purpose used by every proof this library produces.
pub const PROOF_PURPOSE: &str = "dataVerification";

/// Current time as an ISO-8601 UTC timestamp with millisecond precision.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The signature-less part of a Linked Data Signature.
///
/// For the JCS suite these options are attached to the document as `proof`
/// while the digest is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofOptions {
    #[serde(rename = "type")]
    pub suite: SignatureSuite,
    pub verification_method: String,
    pub proof_purpose: String,
    pub created: String,
}

impl ProofOptions {
    /// Build options stamped with the current time.
    pub fn new(suite: SignatureSuite, verification_method: impl Into<String>) -> Self {
        Self {
            suite,
            verification_method: verification_method.into(),
            proof_purpose: PROOF_PURPOSE.to_string(),
            created: now_iso8601(),
        }
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "type": self.suite.as_str(),
            "verificationMethod": self.verification_method,
            "proofPurpose": self.proof_purpose,
            "created": self.created,
        })
    }
}

/// A Linked Data Signature: proof options plus the Base58 signature value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedDataSignature {
    #[serde(rename = "type")]
    pub suite: SignatureSuite,
    pub verification_method: String,
    pub proof_purpose: String,
    pub created: String,
    pub proof_value: String,
}

impl LinkedDataSignature {
    /// Combine options with a computed signature value.
    pub fn from_options(options: ProofOptions, proof_value: String) -> Self {
        Self {
            suite: options.suite,
            verification_method: options.verification_method,
            proof_purpose: options.proof_purpose,
            created: options.created,
            proof_value,
        }
    }

    /// The options this signature was computed over.
    pub fn options(&self) -> ProofOptions {
        ProofOptions {
            suite: self.suite,
            verification_method: self.verification_method.clone(),
            proof_purpose: self.proof_purpose.clone(),
            created: self.created.clone(),
        }
    }

    /// Parse from a JSON value.
    ///
    /// An unknown `type` is reported as `NotSupportedSignature` before any
    /// other structural problem.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CoreError::InvalidDataType("proof must be a JSON object".into()))?;

        let suite_name = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::InvalidDataType("proof has no 'type'".into()))?;
        SignatureSuite::parse(suite_name)?;

        serde_json::from_value(value.clone())
            .map_err(|e| CoreError::InvalidDataType(format!("malformed proof: {e}")))
    }

    /// Parse from channel message bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::InvalidDataType(format!("payload is not JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> Value {
        let mut value = self.options().to_value();
        value["proofValue"] = Value::String(self.proof_value.clone());
        value
    }

    /// Serialize to the bytes anchored on a channel.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_value().to_string().into_bytes()
    }
}

/// Channel coordinates of an anchored signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorProofValue {
    #[serde(rename = "channelID")]
    pub channel_id: String,
    #[serde(rename = "anchorageID")]
    pub anchorage_id: String,
    #[serde(rename = "msgID", default, skip_serializing_if = "Option::is_none")]
    pub msg_id: Option<String>,
    #[serde(rename = "msgIDL1", default, skip_serializing_if = "Option::is_none")]
    pub msg_id_l1: Option<String>,
}

impl AnchorProofValue {
    /// The coordinates of the message that follows this one on the channel.
    ///
    /// The new anchorage is the previously discovered message; the message id
    /// is unknown until it is fetched, and the ledger id no longer applies.
    pub fn advance(&self, previous_msg_id: &str) -> Self {
        Self {
            channel_id: self.channel_id.clone(),
            anchorage_id: previous_msg_id.to_string(),
            msg_id: None,
            msg_id_l1: None,
        }
    }
}

/// A proof that binds a document to a position on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchoredProof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub verification_method: String,
    pub proof_purpose: String,
    pub created: String,
    pub proof_value: AnchorProofValue,
}

impl AnchoredProof {
    /// Build an anchored proof stamped with the current time.
    pub fn new(verification_method: impl Into<String>, proof_value: AnchorProofValue) -> Self {
        Self {
            proof_type: ANCHORED_PROOF_TYPE.to_string(),
            verification_method: verification_method.into(),
            proof_purpose: PROOF_PURPOSE.to_string(),
            created: now_iso8601(),
            proof_value,
        }
    }

    /// The channel this proof is anchored to.
    pub fn channel_id(&self) -> &str {
        &self.proof_value.channel_id
    }

    /// Parse from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let proof_type = value.get("type").and_then(Value::as_str);
        if proof_type != Some(ANCHORED_PROOF_TYPE) {
            return Err(CoreError::NotSigned(format!(
                "proof is not of type '{ANCHORED_PROOF_TYPE}'"
            )));
        }

        serde_json::from_value(value.clone())
            .map_err(|e| CoreError::NotSigned(format!("malformed anchored proof: {e}")))
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> Value {
        // Plain structs of strings always serialize.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signature_wire_format() {
        let options = ProofOptions {
            suite: SignatureSuite::JcsEd25519Signature2020,
            verification_method: "did:iota:abc#key".into(),
            proof_purpose: PROOF_PURPOSE.into(),
            created: "2021-06-01T10:00:00.000Z".into(),
        };
        let signature = LinkedDataSignature::from_options(options, "3yZe7d".into());

        assert_eq!(
            signature.to_value(),
            json!({
                "type": "JcsEd25519Signature2020",
                "verificationMethod": "did:iota:abc#key",
                "proofPurpose": "dataVerification",
                "created": "2021-06-01T10:00:00.000Z",
                "proofValue": "3yZe7d"
            })
        );

        let parsed = LinkedDataSignature::from_slice(&signature.to_bytes()).unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn test_signature_unknown_type() {
        let value = json!({
            "type": "Foo2099",
            "verificationMethod": "did:iota:abc#key",
            "proofPurpose": "dataVerification",
            "created": "2021-06-01T10:00:00.000Z",
            "proofValue": "x"
        });
        assert!(matches!(
            LinkedDataSignature::from_value(&value),
            Err(CoreError::NotSupportedSignature(_))
        ));
    }

    #[test]
    fn test_signature_missing_value() {
        let value = json!({"type": "JcsEd25519Signature2020", "created": "now"});
        assert!(matches!(
            LinkedDataSignature::from_value(&value),
            Err(CoreError::InvalidDataType(_))
        ));
    }

    #[test]
    fn test_anchored_proof_wire_format() {
        let value = json!({
            "type": ANCHORED_PROOF_TYPE,
            "verificationMethod": "did:iota:abc",
            "proofPurpose": "dataVerification",
            "created": "2021-06-01T10:00:00.000Z",
            "proofValue": {
                "channelID": "addr:announce",
                "anchorageID": "genesis",
                "msgID": "m1"
            }
        });
        let proof = AnchoredProof::from_value(&value).unwrap();
        assert_eq!(proof.channel_id(), "addr:announce");
        assert_eq!(proof.proof_value.msg_id.as_deref(), Some("m1"));
        assert_eq!(proof.proof_value.msg_id_l1, None);
        assert_eq!(proof.to_value(), value);
    }

    #[test]
    fn test_anchored_proof_wrong_type() {
        let value = json!({"type": "JcsEd25519Signature2020", "proofValue": "abc"});
        assert!(matches!(
            AnchoredProof::from_value(&value),
            Err(CoreError::NotSigned(_))
        ));
    }

    #[test]
    fn test_advance_drops_message_ids() {
        let value = AnchorProofValue {
            channel_id: "addr:announce".into(),
            anchorage_id: "genesis".into(),
            msg_id: Some("m1".into()),
            msg_id_l1: Some("l1".into()),
        };
        let next = value.advance("m1");
        assert_eq!(next.channel_id, "addr:announce");
        assert_eq!(next.anchorage_id, "m1");
        assert_eq!(next.msg_id, None);
        assert_eq!(next.msg_id_l1, None);
        // the original is untouched
        assert_eq!(value.msg_id.as_deref(), Some("m1"));
    }
}
