//! Document intake and proof attachment.
//!
//! Documents arrive either as parsed JSON or as JSON text. The `get_*`
//! functions normalize both into an owned object and check the shape each
//! operation needs. Nothing here mutates caller-owned values: proofs are
//! attached and detached by building new values ([`with_proof`],
//! [`without_proof`]).

use serde_json::Value;

use crate::error::CoreError;
use crate::proof::{AnchoredProof, LinkedDataSignature};

/// A document as handed in by a caller.
#[derive(Debug, Clone, Copy)]
pub enum JsonInput<'a> {
    /// An already parsed JSON value.
    Value(&'a Value),
    /// JSON text.
    Text(&'a str),
}

impl<'a> From<&'a Value> for JsonInput<'a> {
    fn from(value: &'a Value) -> Self {
        JsonInput::Value(value)
    }
}

impl<'a> From<&'a str> for JsonInput<'a> {
    fn from(text: &'a str) -> Self {
        JsonInput::Text(text)
    }
}

impl<'a> From<&'a String> for JsonInput<'a> {
    fn from(text: &'a String) -> Self {
        JsonInput::Text(text.as_str())
    }
}

/// A document split from its Linked Data Signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedDocument {
    /// The document without its `proof` member.
    pub body: Value,
    pub proof: LinkedDataSignature,
}

/// A document split from its anchored proof.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchoredDocument {
    /// The document without its `proof` member.
    pub body: Value,
    pub proof: AnchoredProof,
}

/// Get an owned JSON object from the input.
pub fn get_document<'a>(input: impl Into<JsonInput<'a>>) -> Result<Value, CoreError> {
    let value = match input.into() {
        JsonInput::Value(value) => value.clone(),
        JsonInput::Text(text) => serde_json::from_str(text)
            .map_err(|_| CoreError::InvalidDataType("Invalid JSON Format".into()))?,
    };

    if !value.is_object() {
        return Err(CoreError::InvalidDataType(
            "please provide a JSON object or a string in JSON format".into(),
        ));
    }

    Ok(value)
}

/// Get an owned JSON-LD object (one carrying `@context`).
pub fn get_json_ld_document<'a>(input: impl Into<JsonInput<'a>>) -> Result<Value, CoreError> {
    let value = get_document(input)?;

    if value.get("@context").is_none() {
        return Err(CoreError::InvalidDataType(
            "not a JSON-LD document, use the JSON variant instead".into(),
        ));
    }

    Ok(value)
}

/// Get a document carrying a Linked Data Signature.
pub fn get_signed_document<'a>(
    input: impl Into<JsonInput<'a>>,
) -> Result<SignedDocument, CoreError> {
    split_signed(get_document(input)?)
}

/// Get a JSON-LD document carrying a Linked Data Signature.
pub fn get_signed_json_ld_document<'a>(
    input: impl Into<JsonInput<'a>>,
) -> Result<SignedDocument, CoreError> {
    split_signed(get_json_ld_document(input)?)
}

/// Get a document carrying an anchored proof.
pub fn get_anchored_document<'a>(
    input: impl Into<JsonInput<'a>>,
) -> Result<AnchoredDocument, CoreError> {
    split_anchored(get_document(input)?)
}

/// Get a JSON-LD document carrying an anchored proof.
pub fn get_anchored_json_ld_document<'a>(
    input: impl Into<JsonInput<'a>>,
) -> Result<AnchoredDocument, CoreError> {
    split_anchored(get_json_ld_document(input)?)
}

/// A copy of `doc` with `proof` set to the given value.
pub fn with_proof(doc: &Value, proof: Value) -> Value {
    let mut copy = doc.clone();
    if let Some(obj) = copy.as_object_mut() {
        obj.insert("proof".to_string(), proof);
    }
    copy
}

/// A copy of `doc` without its `proof` member.
pub fn without_proof(doc: &Value) -> Value {
    let mut copy = doc.clone();
    if let Some(obj) = copy.as_object_mut() {
        obj.remove("proof");
    }
    copy
}

fn split_signed(doc: Value) -> Result<SignedDocument, CoreError> {
    let proof = doc.get("proof").ok_or_else(|| {
        CoreError::NotSigned("the document does not include a Linked Data Signature".into())
    })?;
    let proof = LinkedDataSignature::from_value(proof)?;

    Ok(SignedDocument {
        body: without_proof(&doc),
        proof,
    })
}

fn split_anchored(doc: Value) -> Result<AnchoredDocument, CoreError> {
    let proof = doc
        .get("proof")
        .ok_or_else(|| CoreError::NotSigned("the document does not include a proof".into()))?;
    let proof = AnchoredProof::from_value(proof)?;

    Ok(AnchoredDocument {
        body: without_proof(&doc),
        proof,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::ANCHORED_PROOF_TYPE;
    use serde_json::json;

    #[test]
    fn test_document_from_text_and_value() {
        let value = json!({"a": 1});
        assert_eq!(get_document(&value).unwrap(), value);
        assert_eq!(get_document(r#"{"a": 1}"#).unwrap(), value);
    }

    #[test]
    fn test_document_rejects_non_objects() {
        assert!(matches!(
            get_document(&json!([1, 2])),
            Err(CoreError::InvalidDataType(_))
        ));
        assert!(matches!(
            get_document("[1, 2]"),
            Err(CoreError::InvalidDataType(_))
        ));
        assert!(matches!(
            get_document("{not json"),
            Err(CoreError::InvalidDataType(_))
        ));
        assert!(matches!(
            get_document(&json!("text")),
            Err(CoreError::InvalidDataType(_))
        ));
    }

    #[test]
    fn test_json_ld_requires_context() {
        assert!(get_json_ld_document(&json!({"@context": "https://schema.org"})).is_ok());
        assert!(matches!(
            get_json_ld_document(&json!({"type": "Person"})),
            Err(CoreError::InvalidDataType(_))
        ));
    }

    #[test]
    fn test_signed_requires_proof() {
        assert!(matches!(
            get_signed_document(&json!({"a": 1})),
            Err(CoreError::NotSigned(_))
        ));
    }

    #[test]
    fn test_anchored_requires_anchored_type() {
        let doc = json!({
            "a": 1,
            "proof": {"type": "JcsEd25519Signature2020", "proofValue": "x"}
        });
        assert!(matches!(
            get_anchored_document(&doc),
            Err(CoreError::NotSigned(_))
        ));

        let doc = json!({
            "a": 1,
            "proof": {
                "type": ANCHORED_PROOF_TYPE,
                "verificationMethod": "did:iota:abc",
                "proofPurpose": "dataVerification",
                "created": "2021-06-01T10:00:00.000Z",
                "proofValue": {"channelID": "c:a", "anchorageID": "a", "msgID": "m"}
            }
        });
        let anchored = get_anchored_document(&doc).unwrap();
        assert_eq!(anchored.body, json!({"a": 1}));
        assert_eq!(anchored.proof.channel_id(), "c:a");
    }

    #[test]
    fn test_proof_attachment_is_pure() {
        let doc = json!({"a": 1, "proof": "old"});
        let swapped = with_proof(&doc, json!("new"));
        assert_eq!(swapped["proof"], json!("new"));
        assert_eq!(doc["proof"], json!("old"));

        let stripped = without_proof(&doc);
        assert!(stripped.get("proof").is_none());
        assert!(doc.get("proof").is_some());
    }
}
