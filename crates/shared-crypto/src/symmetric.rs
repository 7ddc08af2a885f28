//! # Symmetric Sealing
//!
//! Seals plaintext under a shared passphrase with XChaCha20-Poly1305.
//!
//! ## Sealed Layout
//!
//! ```text
//! ┌────────────┬─────────────┬──────────────────────────┐
//! │ salt (16)  │ nonce (24)  │ ciphertext + tag (n + 16) │
//! └────────────┴─────────────┴──────────────────────────┘
//! ```
//!
//! The 256-bit key is `HMAC-SHA256(key = salt, data = passphrase)`, so every
//! sealed message uses a fresh key even though both sides only share the
//! passphrase.

use crate::CryptoError;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

/// Salt length in bytes.
pub const SALT_BYTES: usize = 16;

/// XChaCha20 nonce length in bytes.
pub const XNONCE_BYTES: usize = 24;

/// Poly1305 tag length in bytes.
pub const TAG_BYTES: usize = 16;

/// Bytes added to the plaintext length by [`seal`].
pub const SEALED_OVERHEAD: usize = SALT_BYTES + XNONCE_BYTES + TAG_BYTES;

/// Shared secret configured on both sides of a bridge.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(Vec<u8>);

impl Passphrase {
    /// Create from a non-empty secret string.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EmptyPassphrase` for an empty secret.
    pub fn new(secret: &str) -> Result<Self, CryptoError> {
        if secret.is_empty() {
            return Err(CryptoError::EmptyPassphrase);
        }
        Ok(Self(secret.as_bytes().to_vec()))
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn derive_key(&self, salt: &[u8]) -> [u8; 32] {
        let mut mac =
            <HmacSha256 as Mac>::new_from_slice(salt).expect("HMAC can take key of any size");
        mac.update(&self.0);
        let mut key = [0u8; 32];
        key.copy_from_slice(&mac.finalize().into_bytes());
        key
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

/// Seal plaintext under the passphrase.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails.
pub fn seal(passphrase: &Passphrase, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut rng = rand::thread_rng();
    let mut salt = [0u8; SALT_BYTES];
    let mut nonce = [0u8; XNONCE_BYTES];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);

    let mut key = passphrase.derive_key(&salt);
    let cipher = XChaCha20Poly1305::new((&key).into());
    key.zeroize();

    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut sealed = Vec::with_capacity(SALT_BYTES + XNONCE_BYTES + ciphertext.len());
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Open a sealed message.
///
/// # Errors
///
/// - `CryptoError::TruncatedInput` if the input cannot hold salt, nonce and tag
/// - `CryptoError::DecryptionFailed` for a wrong passphrase or tampered input
pub fn open(passphrase: &Passphrase, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < SEALED_OVERHEAD {
        return Err(CryptoError::TruncatedInput {
            expected: SEALED_OVERHEAD,
            actual: sealed.len(),
        });
    }

    let (salt, rest) = sealed.split_at(SALT_BYTES);
    let (nonce, ciphertext) = rest.split_at(XNONCE_BYTES);

    let mut key = passphrase.derive_key(salt);
    let cipher = XChaCha20Poly1305::new((&key).into());
    key.zeroize();

    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}
