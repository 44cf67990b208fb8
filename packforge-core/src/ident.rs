//! Identifier derivation — pack slugs and content-addressed run ids.
//!
//! The run id is computed over a canonical form of the raw spec document:
//! object keys sorted lexicographically at every depth, compact separators.
//! Two specs that differ only in key order therefore share a run id.

use std::fmt;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::SpecError;

/// Number of hex characters kept from the SHA-256 digest.
pub const RUN_ID_LEN: usize = 10;

/// Lower-case `s`, replace every non-alphanumeric char with `_`, then trim
/// leading and trailing underscores.
///
/// Inner runs of underscores are kept as-is (`"a  b"` → `"a__b"`).
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Canonical byte form of a JSON document: sorted keys, compact, UTF-8.
pub fn canonical_json(value: &Value) -> Result<Vec<u8>, SpecError> {
    Ok(serde_json::to_vec(&sort_keys(value))?)
}

/// Short opaque audit tag derived from spec content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    /// Hash the canonical JSON of `raw` and keep the first [`RUN_ID_LEN`]
    /// hex characters.
    pub fn derive(raw: &Value) -> Result<Self, SpecError> {
        let bytes = canonical_json(raw)?;
        let digest = hex::encode(Sha256::digest(&bytes));
        Ok(RunId(digest[..RUN_ID_LEN].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
