//! Error types for the communicator

use shared_crypto::CryptoError;
use thiserror::Error;

/// Per-message encode/decode failure.
///
/// Always recoverable: the caller drops the message and carries on.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Invalid ciphertext encoding: {0}")]
    InvalidEncoding(String),

    #[error("Decrypted body is not UTF-8")]
    InvalidUtf8,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
