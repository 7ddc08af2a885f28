//! Well-known payload shapes shared by feature modules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Acknowledgement sent back after applying an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckPayload {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AckPayload {
    /// A bare successful acknowledgement (`{ "success": true }`).
    pub fn ok() -> Self {
        Self {
            success: true,
            timestamp: None,
            message: None,
        }
    }

    /// A failed acknowledgement with a reason.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            timestamp: None,
            message: Some(message.into()),
        }
    }
}

/// Error report sent to a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}
