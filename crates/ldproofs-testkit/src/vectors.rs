//! Golden test vectors for deterministic canonicalization.
//!
//! These vectors pin the canonical form byte for byte, so digests and
//! signatures stay portable across implementations.

use ldproofs_core::canonicalize;

/// A golden canonicalization vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// JSON input text.
    pub input: &'static str,
    /// Expected canonical form.
    pub expected: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "sorted keys",
            input: r#"{"b": 2, "a": 1}"#,
            expected: r#"{"a":1,"b":2}"#,
        },
        GoldenVector {
            name: "whitespace removed",
            input: "{ \"a\" : [ 1 , 2 ] ,\n \"b\" : { } }",
            expected: r#"{"a":[1,2],"b":{}}"#,
        },
        GoldenVector {
            name: "nested objects sorted, arrays kept",
            input: r#"{"z": {"y": [3, {"b": true, "a": null}]}, "a": "x"}"#,
            expected: r#"{"a":"x","z":{"y":[3,{"a":null,"b":true}]}}"#,
        },
        GoldenVector {
            name: "number rendering",
            input: r#"{"n": 1.0, "m": -0.5, "e": 1e3, "i": 42}"#,
            expected: r#"{"e":1000,"i":42,"m":-0.5,"n":1}"#,
        },
        GoldenVector {
            name: "code point key order",
            input: r#"{"é": 0, "a": 0, "B": 0, "1": 0}"#,
            expected: r#"{"1":0,"B":0,"a":0,"é":0}"#,
        },
        GoldenVector {
            name: "string escaping",
            input: r#"{"s": "line\nbreak \"quoted\" é"}"#,
            expected: r#"{"s":"line\nbreak \"quoted\" é"}"#,
        },
        GoldenVector {
            name: "empty object",
            input: "{}",
            expected: "{}",
        },
    ]
}

/// Canonicalize a vector's input.
pub fn canonicalize_vector(vector: &GoldenVector) -> String {
    match serde_json::from_str(vector.input) {
        Ok(value) => canonicalize(&value),
        Err(e) => format!("<invalid input: {e}>"),
    }
}

/// Names of the vectors whose canonical form differs from the expected one.
pub fn failing_vectors() -> Vec<&'static str> {
    all_vectors()
        .into_iter()
        .filter(|v| canonicalize_vector(v) != v.expected)
        .map(|v| v.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors() {
        for vector in all_vectors() {
            assert_eq!(canonicalize_vector(&vector), vector.expected, "{}", vector.name);
        }
        assert!(failing_vectors().is_empty());
    }

    #[test]
    fn test_canonical_form_is_a_fixed_point() {
        for vector in all_vectors() {
            let value: serde_json::Value = serde_json::from_str(vector.expected).unwrap();
            assert_eq!(canonicalize(&value), vector.expected, "{}", vector.name);
        }
    }
}
