//! Scoped ownership of a listener attached to a `MessageHost`.

use crate::ports::{ListenerId, MessageHost, MessageListener};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Detaches its listener on `release()` or when dropped, whichever comes first.
pub struct ListenerGuard {
    host: Arc<dyn MessageHost>,
    id: ListenerId,
    attached: AtomicBool,
}

impl ListenerGuard {
    /// Attach `listener` to `host`.
    pub fn attach(host: Arc<dyn MessageHost>, listener: Arc<dyn MessageListener>) -> Self {
        let id = host.add_listener(listener);
        debug!(listener = id.0, "Listener attached");
        Self {
            host,
            id,
            attached: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Detach now. Returns true only on the call that actually detached.
    pub fn release(&self) -> bool {
        if !self.attached.swap(false, Ordering::AcqRel) {
            return false;
        }
        let removed = self.host.remove_listener(self.id);
        debug!(listener = self.id.0, removed, "Listener detached");
        true
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("attached", &self.is_attached())
            .finish()
    }
}
