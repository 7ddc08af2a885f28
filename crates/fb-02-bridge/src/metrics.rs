//! Counters for the inbound and outbound pipelines
//!
//! ## Usage
//!
//! ```ignore
//! let snapshot = bridge.metrics();
//! println!("handled {} of {} received", snapshot.handled, snapshot.received);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe bridge counters.
#[derive(Debug, Default)]
pub struct BridgeMetrics {
    /// Events seen by the listener while active
    pub received: AtomicU64,
    /// Events dropped by the origin gate
    pub origin_rejected: AtomicU64,
    /// Events that failed to decode
    pub decode_failures: AtomicU64,
    /// Events dropped for a missing or invalid signature
    pub signature_rejected: AtomicU64,
    /// Decoded messages with no registered handler
    pub unroutable: AtomicU64,
    /// Handler invocations that returned normally
    pub handled: AtomicU64,
    /// Handler invocations that panicked
    pub handler_panics: AtomicU64,
    /// Messages encoded by `send` with at least one peer to dispatch to
    pub sent: AtomicU64,
    /// Successful per-peer dispatches
    pub dispatched: AtomicU64,
    /// Failed per-peer dispatches
    pub dispatch_failures: AtomicU64,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        MetricsSnapshot {
            received: load(&self.received),
            origin_rejected: load(&self.origin_rejected),
            decode_failures: load(&self.decode_failures),
            signature_rejected: load(&self.signature_rejected),
            unroutable: load(&self.unroutable),
            handled: load(&self.handled),
            handler_panics: load(&self.handler_panics),
            sent: load(&self.sent),
            dispatched: load(&self.dispatched),
            dispatch_failures: load(&self.dispatch_failures),
        }
    }
}

/// Plain copy of [`BridgeMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub origin_rejected: u64,
    pub decode_failures: u64,
    pub signature_rejected: u64,
    pub unroutable: u64,
    pub handled: u64,
    pub handler_panics: u64,
    pub sent: u64,
    pub dispatched: u64,
    pub dispatch_failures: u64,
}

impl MetricsSnapshot {
    /// Inbound events that never reached a handler.
    pub fn dropped(&self) -> u64 {
        self.origin_rejected + self.decode_failures + self.signature_rejected + self.unroutable
    }
}
