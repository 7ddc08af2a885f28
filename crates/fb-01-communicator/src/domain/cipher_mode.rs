//! Codec mode selection.
//!
//! Chosen once when the communicator is built. A configured secret always
//! yields `Sealed`; there is no code path that falls back to plaintext later.

use shared_crypto::{CryptoError, Passphrase};

/// How envelopes are protected on the wire.
#[derive(Debug, Clone)]
pub enum CipherMode {
    /// Plain JSON text.
    Plain,
    /// JSON sealed under the shared passphrase.
    Sealed(Passphrase),
}

impl CipherMode {
    /// Select a mode from an optional secret. `None` and `Some("")` both mean `Plain`.
    ///
    /// # Errors
    ///
    /// Never fails for the inputs accepted here; the `Result` carries the
    /// passphrase constructor's contract.
    pub fn from_secret(secret: Option<&str>) -> Result<Self, CryptoError> {
        match secret {
            Some(s) if !s.is_empty() => Ok(CipherMode::Sealed(Passphrase::new(s)?)),
            _ => Ok(CipherMode::Plain),
        }
    }

    /// Returns true when envelopes are encrypted.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        matches!(self, CipherMode::Sealed(_))
    }

    /// The passphrase, if sealed.
    pub fn passphrase(&self) -> Option<&Passphrase> {
        match self {
            CipherMode::Plain => None,
            CipherMode::Sealed(p) => Some(p),
        }
    }
}
