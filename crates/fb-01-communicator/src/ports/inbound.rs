//! Inbound Ports (Driving Ports)

use shared_types::BridgeMessage;

use crate::error::CodecError;

/// Envelope codec used by the bridge.
pub trait MessageCodec: Send + Sync {
    /// Serialize an envelope to wire text, sealing it if a secret is configured.
    fn encode(&self, message: &BridgeMessage) -> Result<String, CodecError>;

    /// Recover an envelope from wire text.
    ///
    /// Fails for malformed JSON, non-envelope JSON and anything that does not
    /// open under the configured secret. Never returns a partially parsed
    /// message.
    fn decode(&self, data: &str) -> Result<BridgeMessage, CodecError>;

    /// Hex MAC over the canonical envelope, `None` without a secret.
    fn sign(&self, message: &BridgeMessage) -> Option<String>;

    /// True only if `signature` is valid for this exact message under the
    /// configured secret.
    fn verify_message_signature(&self, message: &BridgeMessage, signature: &str) -> bool;

    /// Fresh unpredictable nonce.
    fn generate_message_nonce(&self) -> String;

    /// True when envelopes are sealed.
    fn is_sealed(&self) -> bool;
}
