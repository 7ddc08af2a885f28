//! # `BridgeMessage` Envelope
//!
//! The unit exchanged between browsing contexts.
//!
//! ## Wire Shape
//!
//! ```text
//! { "type": "THEME_UPDATE", "payload": { ... }, "metadata": { "timestamp": 1700000000000, "source": "container" } }
//! ```
//!
//! - `type` and `payload` are always present.
//! - `metadata` is additive. Routing never reads it; only signature checks do.

use crate::kinds::MessageKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Optional envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Milliseconds since the Unix epoch at send time.
    pub timestamp: u64,

    /// Free-form tag naming the sending side (e.g. `"child"`, `"container"`).
    pub source: String,

    /// Hex-encoded message authentication code over the canonical envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Random value mixed into the signature input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl MessageMetadata {
    /// Metadata stamped with the current time.
    pub fn now(source: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp_ms(),
            source: source.into(),
            signature: None,
            nonce: None,
        }
    }
}

/// The message envelope carried over the cross-context channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    /// Semantic kind, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: MessageKind,

    /// Kind-specific payload.
    pub payload: Value,

    /// Optional metadata; omitted from the JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl BridgeMessage {
    /// Creates an envelope without metadata.
    pub fn new(kind: impl Into<MessageKind>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
            metadata: None,
        }
    }

    /// Attaches metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The signature carried in the metadata, if any.
    pub fn signature(&self) -> Option<&str> {
        self.metadata.as_ref()?.signature.as_deref()
    }
}

/// Returns the current Unix timestamp in milliseconds.
///
/// Returns 0 if the system clock is before the epoch.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
