//! # FB-01 Communicator
//!
//! Turns a `BridgeMessage` into the string placed on the cross-context channel
//! and back.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `CipherMode`: plain JSON or sealed under a shared passphrase
//!   - `canonical_bytes`: deterministic signature input
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MessageCodec`: Driving port used by the bridge
//!
//! - **Service Layer** (`service.rs`):
//!   - `Communicator`: Implements `MessageCodec`
//!
//! ## Wire Format
//!
//! | Mode | Text on the wire |
//! |------|------------------|
//! | Plain | `{"type":..,"payload":..,"metadata":..}` |
//! | Sealed | base64(`salt ‖ nonce ‖ XChaCha20-Poly1305(json)`) |
//!
//! ## Usage Example
//!
//! ```ignore
//! use fb_01_communicator::{Communicator, MessageCodec};
//! use shared_types::BridgeMessage;
//!
//! let communicator = Communicator::new(Some("k1"))?;
//! let wire = communicator.encode(&BridgeMessage::new("X", serde_json::json!({"n": 1})))?;
//! let back = communicator.decode(&wire)?;
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{canonical_bytes, CipherMode};
pub use error::CodecError;
pub use ports::MessageCodec;
pub use service::Communicator;
