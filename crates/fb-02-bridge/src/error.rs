//! Error types for the bridge

use fb_01_communicator::CodecError;
use thiserror::Error;

/// Invalid bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Allowed origin at index {index} is blank")]
    BlankOrigin { index: usize },

    #[error("{flag} requires a non-empty secret key")]
    SigningWithoutSecret { flag: &'static str },

    #[error("Unknown role: {0} (expected \"container\" or \"subApp\")")]
    InvalidRole(String),
}

/// Errors returned when building a bridge.
///
/// Nothing after construction returns an error: inbound failures are
/// dropped and logged, outbound failures are reported per peer.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}
