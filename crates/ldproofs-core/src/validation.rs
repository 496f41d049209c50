//! Input validation for identifiers and node addresses.

use regex::Regex;
use std::sync::OnceLock;

fn did_regex() -> &'static Regex {
    static DID: OnceLock<Regex> = OnceLock::new();
    DID.get_or_init(|| {
        Regex::new(r"^did:[0-9a-z]+:[A-Za-z0-9_.-]+").expect("static regex is valid")
    })
}

/// Whether the input starts with a syntactically valid DID.
///
/// DID URLs (`did:method:id#fragment`) are accepted as well.
pub fn is_did(input: &str) -> bool {
    did_regex().is_match(input)
}

/// Whether the input is an absolute URL.
pub fn is_url(input: &str) -> bool {
    url::Url::parse(input).is_ok()
}

/// Split a DID URL into its DID and optional fragment.
pub fn split_did_url(did_url: &str) -> (&str, Option<&str>) {
    match did_url.split_once('#') {
        Some((did, fragment)) => (did, Some(fragment)),
        None => (did_url, None),
    }
}
