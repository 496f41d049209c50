//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

use ldproofs_core::Keypair;

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a JSON scalar.
pub fn json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e15f64..1.0e15f64)
            .prop_filter_map("finite", Number::from_f64)
            .prop_map(Value::Number),
        "\\PC{0,16}".prop_map(Value::String),
    ]
}

/// Generate an arbitrary JSON value, nested up to a few levels.
pub fn json_value() -> impl Strategy<Value = Value> {
    json_scalar().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z0-9_@]{1,12}", inner, 0..8)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate a JSON object, the shape every signable document has.
pub fn document() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z][a-zA-Z0-9]{0,11}", json_value(), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
        .prop_filter("documents carry no proof", |doc| doc.get("proof").is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn documents_are_objects_without_proof(doc in document()) {
            prop_assert!(doc.is_object());
            prop_assert!(doc.get("proof").is_none());
        }
    }
}
