//! # HMAC-SHA256 Message Authentication
//!
//! Signatures are hex-encoded so they travel inside JSON metadata unchanged.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs `message_bytes` with HMAC-SHA256 and returns the tag as lowercase hex.
pub fn sign_hex(message_bytes: &[u8], shared_secret: &[u8]) -> String {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(shared_secret).expect("HMAC can take key of any size");
    mac.update(message_bytes);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a hex-encoded HMAC-SHA256 tag.
///
/// Returns `false` for malformed hex, a wrong key or altered bytes.
/// Uses constant-time comparison.
pub fn verify_hex(message_bytes: &[u8], signature_hex: &str, shared_secret: &[u8]) -> bool {
    let Ok(tag) = hex::decode(signature_hex) else {
        return false;
    };

    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(shared_secret) else {
        return false;
    };
    mac.update(message_bytes);
    mac.verify_slice(&tag).is_ok()
}
