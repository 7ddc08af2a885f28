//! # Shared Crypto
//!
//! Cryptographic primitives used by the communicator.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | XChaCha20-Poly1305, HMAC-SHA256 key derivation | Envelope confidentiality |
//! | `mac` | HMAC-SHA256 | Envelope authenticity |
//! | `nonce` | OS-seeded CSPRNG | Signature freshness input |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit random nonce per message, authenticated (tampering fails to open)
//! - **Per-message salt**: every sealed message derives a fresh key from the shared passphrase
//! - **Constant-time MAC comparison**

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod mac;
pub mod nonce;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use mac::{sign_hex, verify_hex};
pub use nonce::{random_nonce_hex, NONCE_BYTES};
pub use symmetric::{open, seal, Passphrase, SEALED_OVERHEAD};
