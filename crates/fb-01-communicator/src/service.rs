//! # Communicator Service
//!
//! Implements `MessageCodec` on top of `shared-crypto`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared_crypto::{open, random_nonce_hex, seal, sign_hex, verify_hex};
use shared_types::BridgeMessage;
use tracing::trace;

use crate::domain::{canonical_bytes, CipherMode};
use crate::error::CodecError;
use crate::ports::MessageCodec;

/// Encodes, decodes and signs envelopes under one fixed `CipherMode`.
#[derive(Debug, Clone)]
pub struct Communicator {
    mode: CipherMode,
}

impl Communicator {
    /// Build a communicator; a non-empty secret enables sealing and signing.
    pub fn new(secret: Option<&str>) -> Result<Self, CodecError> {
        Ok(Self {
            mode: CipherMode::from_secret(secret)?,
        })
    }

    /// Communicator without a secret.
    pub fn plain() -> Self {
        Self {
            mode: CipherMode::Plain,
        }
    }

    /// The selected mode.
    pub fn mode(&self) -> &CipherMode {
        &self.mode
    }

    fn parse(text: &str) -> Result<BridgeMessage, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::MalformedEnvelope(e.to_string()))
    }
}

impl MessageCodec for Communicator {
    fn encode(&self, message: &BridgeMessage) -> Result<String, CodecError> {
        let json =
            serde_json::to_string(message).map_err(|e| CodecError::Serialization(e.to_string()))?;

        match &self.mode {
            CipherMode::Plain => Ok(json),
            CipherMode::Sealed(passphrase) => {
                let sealed = seal(passphrase, json.as_bytes())?;
                Ok(STANDARD.encode(sealed))
            }
        }
    }

    fn decode(&self, data: &str) -> Result<BridgeMessage, CodecError> {
        match &self.mode {
            CipherMode::Plain => Self::parse(data),
            CipherMode::Sealed(passphrase) => {
                let sealed = STANDARD
                    .decode(data.trim())
                    .map_err(|e| CodecError::InvalidEncoding(e.to_string()))?;
                let opened = open(passphrase, &sealed)?;
                let text = std::str::from_utf8(&opened).map_err(|_| CodecError::InvalidUtf8)?;
                trace!(bytes = opened.len(), "Opened sealed envelope");
                Self::parse(text)
            }
        }
    }

    fn sign(&self, message: &BridgeMessage) -> Option<String> {
        let passphrase = self.mode.passphrase()?;
        Some(sign_hex(&canonical_bytes(message), passphrase.as_bytes()))
    }

    fn verify_message_signature(&self, message: &BridgeMessage, signature: &str) -> bool {
        match self.mode.passphrase() {
            Some(passphrase) => {
                verify_hex(&canonical_bytes(message), signature, passphrase.as_bytes())
            }
            None => false,
        }
    }

    fn generate_message_nonce(&self) -> String {
        random_nonce_hex()
    }

    fn is_sealed(&self) -> bool {
        self.mode.is_sealed()
    }
}
