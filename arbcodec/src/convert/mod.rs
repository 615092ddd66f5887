//! The two conversion directions.

use lazy_static::lazy_static;
use regex::Regex;

pub mod arb_to_poe;
pub mod poe_to_arb;

lazy_static! {
    static ref PREFIXED_TERM_RE: Regex = Regex::new(r"^(?:([a-zA-Z]+):)?(.*)$").unwrap();
}

/// Splits a term name into its optional namespace prefix and the bare key.
///
/// A term without a colon-delimited prefix yields an empty prefix.
pub(crate) fn split_prefixed(term: &str) -> (&str, &str) {
    match PREFIXED_TERM_RE.captures(term) {
        Some(caps) => {
            let prefix = caps.get(1).map_or("", |m| m.as_str());
            let key = caps.get(2).map_or("", |m| m.as_str());
            (prefix, key)
        }
        None => ("", term),
    }
}
