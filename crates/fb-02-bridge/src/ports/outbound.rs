//! Outbound Ports (Driven Ports)
//!
//! The browser surface the bridge depends on: the shared message channel it
//! listens on, windows it can post to, and popup-tab send functions.

use shared_types::DispatchError;
use std::sync::Arc;

/// A cross-context message as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    /// Origin of the sending context, stamped by the host (not by the sender).
    pub origin: String,
    /// Raw message body.
    pub data: String,
}

impl MessageEvent {
    pub fn new(origin: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            data: data.into(),
        }
    }
}

/// Handle returned by [`MessageHost::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Receives every message delivered to the context.
///
/// Called from the host's event dispatch; implementations must not panic.
pub trait MessageListener: Send + Sync {
    fn on_message(&self, event: &MessageEvent);
}

/// The context-wide message channel (the `window` a listener is attached to).
pub trait MessageHost: Send + Sync {
    /// Attach a listener. Every attached listener sees every event.
    fn add_listener(&self, listener: Arc<dyn MessageListener>) -> ListenerId;

    /// Detach a listener. Returns false if `id` was not attached.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// A window the bridge can post to (iframe content window, opener, parent).
pub trait PeerWindow: Send + Sync {
    /// Post `data`; the host delivers it only if the peer's origin matches
    /// `target_origin` (or `target_origin` is `"*"`).
    fn post_message(&self, data: &str, target_origin: &str) -> Result<(), DispatchError>;

    /// Short label for logs.
    fn describe(&self) -> String {
        "window".to_string()
    }
}

/// Send function registered for a popup tab, keyed by tab id.
pub trait TabSender: Send + Sync {
    fn send(&self, tab_id: &str, data: &str) -> Result<(), DispatchError>;
}

impl<F> TabSender for F
where
    F: Fn(&str, &str) -> Result<(), DispatchError> + Send + Sync,
{
    fn send(&self, tab_id: &str, data: &str) -> Result<(), DispatchError> {
        self(tab_id, data)
    }
}
