//! Ports Layer
//!
//! Driving port through which the bridge encodes, decodes and signs envelopes.

pub mod inbound;

pub use inbound::MessageCodec;
