//! Canonical signature input.
//!
//! The signature covers `type`, `payload` and the metadata fields except the
//! signature itself. Object keys inside `payload` are emitted in sorted order
//! (`serde_json::Map` is a `BTreeMap` without the `preserve_order` feature),
//! so both sides produce identical bytes for equal messages regardless of the
//! key order the sender used.

use serde::Serialize;
use serde_json::Value;
use shared_types::BridgeMessage;

#[derive(Serialize)]
struct CanonicalEnvelope<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    payload: &'a Value,
    timestamp: Option<u64>,
    source: Option<&'a str>,
    nonce: Option<&'a str>,
}

/// Bytes fed to the MAC for `message`.
pub fn canonical_bytes(message: &BridgeMessage) -> Vec<u8> {
    let meta = message.metadata.as_ref();
    let canonical = CanonicalEnvelope {
        kind: message.kind.as_str(),
        payload: &message.payload,
        timestamp: meta.map(|m| m.timestamp),
        source: meta.map(|m| m.source.as_str()),
        nonce: meta.and_then(|m| m.nonce.as_deref()),
    };
    // Serializing borrowed JSON values into a Vec cannot fail.
    serde_json::to_vec(&canonical).unwrap_or_default()
}
