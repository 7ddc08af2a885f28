//! In-memory browsing contexts
//!
//! Implements the host ports with browser delivery rules so that bridges can
//! talk to each other inside one process:
//!
//! - the receiving side sees the sender's origin, never a value chosen by the
//!   sender's code;
//! - a post whose target origin is neither `"*"` nor the receiver's origin is
//!   silently discarded;
//! - delivery is synchronous, to every attached listener, in attach order.
//!
//! ```ignore
//! let host = BrowsingContext::new("https://host.test");
//! let frame = BrowsingContext::new("https://app.test");
//!
//! // What the host sees as `iframe.contentWindow`
//! let frame_window = frame.window_from(host.origin());
//! // What the frame sees as `window.parent`
//! let parent_window = host.window_from(frame.origin());
//! ```

use crate::domain::ANY_ORIGIN;
use crate::ports::{ListenerId, MessageEvent, MessageHost, MessageListener, PeerWindow, TabSender};
use parking_lot::RwLock;
use shared_types::DispatchError;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::trace;

/// One window or tab with its own origin and message channel.
pub struct BrowsingContext {
    origin: String,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn MessageListener>)>>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl BrowsingContext {
    pub fn new(origin: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            origin: origin.into(),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Dispatch `event` to every listener attached right now.
    ///
    /// Listeners are called without the listener lock held, so they may attach
    /// or detach listeners (or post back into this context) while running.
    /// Returns the number of listeners called.
    pub fn deliver(&self, event: &MessageEvent) -> usize {
        if self.is_closed() {
            return 0;
        }
        let snapshot: Vec<Arc<dyn MessageListener>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &snapshot {
            listener.on_message(event);
        }
        snapshot.len()
    }

    /// Close the context; later posts to it fail with `PeerClosed`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Handle for posting into this context from a context at `sender_origin`.
    pub fn window_from(self: &Arc<Self>, sender_origin: impl Into<String>) -> Arc<WindowProxy> {
        Arc::new(WindowProxy {
            target: Arc::downgrade(self),
            target_label: self.origin.clone(),
            sender_origin: sender_origin.into(),
        })
    }

    /// Tab send function delivering into this context from `sender_origin`.
    pub fn tab_sender(self: &Arc<Self>, sender_origin: impl Into<String>) -> Arc<dyn TabSender> {
        let window = self.window_from(sender_origin);
        Arc::new(move |tab_id: &str, data: &str| {
            trace!(tab_id, "Tab send");
            window.post_message(data, ANY_ORIGIN)
        })
    }
}

impl MessageHost for BrowsingContext {
    fn add_listener(&self, listener: Arc<dyn MessageListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}

impl fmt::Debug for BrowsingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowsingContext")
            .field("origin", &self.origin)
            .field("listeners", &self.listener_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A reference to another context, as held by a sender.
#[derive(Debug, Clone)]
pub struct WindowProxy {
    target: Weak<BrowsingContext>,
    target_label: String,
    sender_origin: String,
}

impl WindowProxy {
    pub fn sender_origin(&self) -> &str {
        &self.sender_origin
    }
}

impl PeerWindow for WindowProxy {
    fn post_message(&self, data: &str, target_origin: &str) -> Result<(), DispatchError> {
        let target = match self.target.upgrade() {
            Some(target) if !target.is_closed() => target,
            _ => return Err(DispatchError::PeerClosed(self.target_label.clone())),
        };

        if target_origin != ANY_ORIGIN && target_origin != target.origin() {
            trace!(
                target_origin,
                actual = target.origin(),
                "Target origin mismatch, message discarded"
            );
            return Ok(());
        }

        target.deliver(&MessageEvent::new(self.sender_origin.clone(), data));
        Ok(())
    }

    fn describe(&self) -> String {
        self.target_label.clone()
    }
}
