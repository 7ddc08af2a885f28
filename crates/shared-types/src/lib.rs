//! # Shared Types Crate
//!
//! This crate contains the `BridgeMessage` envelope exchanged between browsing
//! contexts, the well-known message kinds and payloads, and the error types
//! shared across the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: The wire envelope is defined here and nowhere else.
//! - **Open Dispatch**: Message kinds are a tagged union with a `Custom` fallback,
//!   so unknown tags survive a round trip and are routed like any other string.
//! - **Additive Metadata**: `metadata` is optional and never consulted by routing.

pub mod envelope;
pub mod errors;
pub mod kinds;
pub mod payloads;

pub use envelope::{current_timestamp_ms, BridgeMessage, MessageMetadata};
pub use errors::*;
pub use kinds::MessageKind;
pub use payloads::{AckPayload, ErrorPayload};
