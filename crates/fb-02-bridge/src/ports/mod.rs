//! Ports Layer
//!
//! Reference: Hexagonal Architecture
//!
//! Driven ports only: the bridge is driven directly through `Bridge`, and
//! depends on the host through the traits below.

pub mod outbound;

pub use outbound::{
    ListenerId, MessageEvent, MessageHost, MessageListener, PeerWindow, TabSender,
};
