//! Domain Layer - Pure codec logic
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod canonical;
pub mod cipher_mode;

pub use canonical::canonical_bytes;
pub use cipher_mode::CipherMode;
