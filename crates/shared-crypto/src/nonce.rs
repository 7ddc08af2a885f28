//! Random nonces for signature input.

use rand::RngCore;

/// Nonce length in bytes (hex string is twice as long).
pub const NONCE_BYTES: usize = 16;

/// Fresh random nonce from the thread-local CSPRNG, lowercase hex.
pub fn random_nonce_hex() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
