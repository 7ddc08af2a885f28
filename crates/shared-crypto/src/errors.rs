//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (wrong key, tampered or truncated input)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Sealed input shorter than salt + nonce + tag
    #[error("Sealed input too short: expected at least {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Minimum sealed length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Empty passphrase
    #[error("Passphrase must not be empty")]
    EmptyPassphrase,
}
