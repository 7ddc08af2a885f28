//! # Error Types
//!
//! Errors shared by the bridge and the peer implementations it dispatches to.

use thiserror::Error;

/// Failure of a single outbound dispatch to one peer.
///
/// Reported per peer; never aborts a fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The peer context is gone (closed tab, removed frame).
    #[error("Peer context closed: {0}")]
    PeerClosed(String),

    /// The peer refused the message.
    #[error("Peer rejected message: {0}")]
    Rejected(String),

    /// Transport-level failure.
    #[error("Dispatch failed: {0}")]
    Transport(String),
}

/// A payload did not match the type a handler expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Payload for {message_type} does not match expected shape: {reason}")]
pub struct PayloadError {
    pub message_type: String,
    pub reason: String,
}
