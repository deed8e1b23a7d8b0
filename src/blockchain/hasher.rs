//! Canonical encoding and SHA-256 digests.
//!
//! Block hashes must not depend on struct field order or on the iteration
//! order of any map, so values are re-encoded as JSON with object keys sorted
//! at every level before digesting.
//!
//! `serde_json::Map` is only a `BTreeMap` while no crate in the build enables
//! serde_json's `preserve_order` feature; with it, maps keep insertion order.
//! Features unify across the dependency graph, so the sorting is done here
//! explicitly instead of being left to `serde_json::to_string`.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::Block;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Compact JSON encoding of `value` with every object's keys in sorted order.
pub fn canonical_json<T: Serialize>(value: &T) -> String {
    let value = serde_json::to_value(value).expect("ledger values are always serializable");
    let mut out = String::new();
    write_canonical(&value, &mut out);
    out
}

/// SHA-256 of the canonical encoding of a block.
pub fn hash_block(block: &Block) -> String {
    sha256_hex(canonical_json(block).as_bytes())
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // serde_json handles string escaping
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
