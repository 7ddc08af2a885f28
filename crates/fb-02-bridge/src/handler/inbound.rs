//! Inbound pipeline
//!
//! Every event delivered to the bridge's context passes through, in order:
//!
//! 1. Origin gate: exact membership in the allowlist. Rejected events never
//!    reach the codec or the registry.
//! 2. Decode through the codec.
//! 3. Signature gate, only when signatures are required.
//! 4. Route to the handler registered for the message type.
//!
//! A failure at any stage drops the event and is logged and counted. Nothing
//! propagates out of the listener, and handler panics are caught.

use crate::domain::{HandlerRegistry, OriginAllowlist};
use crate::metrics::BridgeMetrics;
use crate::ports::{MessageEvent, MessageListener};
use fb_01_communicator::MessageCodec;
use parking_lot::RwLock;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// What happened to one inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOutcome {
    /// A handler ran to completion.
    Handled,
    /// Sender origin not in the allowlist.
    OriginRejected,
    /// Body could not be decoded into an envelope.
    DecodeFailed,
    /// Signature required but missing or invalid.
    SignatureRejected,
    /// No handler for the message type.
    Unroutable,
    /// The handler panicked.
    HandlerPanicked,
    /// The bridge has been destroyed.
    Inactive,
}

/// Shared inbound state. The bridge holds it for mutation, the host holds it
/// as the attached listener.
pub struct InboundPipeline {
    origins: RwLock<OriginAllowlist>,
    registry: RwLock<HandlerRegistry>,
    codec: Arc<dyn MessageCodec>,
    metrics: Arc<BridgeMetrics>,
    require_signature: bool,
    active: AtomicBool,
}

impl InboundPipeline {
    pub fn new(
        origins: OriginAllowlist,
        codec: Arc<dyn MessageCodec>,
        metrics: Arc<BridgeMetrics>,
        require_signature: bool,
    ) -> Self {
        Self {
            origins: RwLock::new(origins),
            registry: RwLock::new(HandlerRegistry::new()),
            codec,
            metrics,
            require_signature,
            active: AtomicBool::new(true),
        }
    }

    pub fn origins(&self) -> &RwLock<OriginAllowlist> {
        &self.origins
    }

    pub fn registry(&self) -> &RwLock<HandlerRegistry> {
        &self.registry
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stop processing. Events already being delivered are ignored.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Run one event through the pipeline.
    pub fn process(&self, event: &MessageEvent) -> InboundOutcome {
        if !self.is_active() {
            return InboundOutcome::Inactive;
        }
        BridgeMetrics::incr(&self.metrics.received);

        if !self.origins.read().contains(&event.origin) {
            trace!(origin = %event.origin, "Origin not allowed, message dropped");
            BridgeMetrics::incr(&self.metrics.origin_rejected);
            return InboundOutcome::OriginRejected;
        }

        let message = match self.codec.decode(&event.data) {
            Ok(message) => message,
            Err(e) => {
                warn!(origin = %event.origin, error = %e, "Failed to decode message");
                BridgeMetrics::incr(&self.metrics.decode_failures);
                return InboundOutcome::DecodeFailed;
            }
        };

        if self.require_signature {
            let valid = message
                .signature()
                .is_some_and(|sig| self.codec.verify_message_signature(&message, sig));
            if !valid {
                warn!(
                    origin = %event.origin,
                    message_type = %message.kind,
                    signed = message.signature().is_some(),
                    "Signature check failed, message dropped"
                );
                BridgeMetrics::incr(&self.metrics.signature_rejected);
                return InboundOutcome::SignatureRejected;
            }
        }

        // Clone the handle and release the lock before running user code.
        let handler = self.registry.read().get(message.kind.as_str());
        let Some(handler) = handler else {
            debug!(message_type = %message.kind, "No handler registered, message dropped");
            BridgeMetrics::incr(&self.metrics.unroutable);
            return InboundOutcome::Unroutable;
        };

        match panic::catch_unwind(AssertUnwindSafe(|| handler(&message.payload))) {
            Ok(()) => {
                trace!(message_type = %message.kind, origin = %event.origin, "Message handled");
                BridgeMetrics::incr(&self.metrics.handled);
                InboundOutcome::Handled
            }
            Err(_) => {
                error!(message_type = %message.kind, "Handler panicked");
                BridgeMetrics::incr(&self.metrics.handler_panics);
                InboundOutcome::HandlerPanicked
            }
        }
    }
}

impl MessageListener for InboundPipeline {
    fn on_message(&self, event: &MessageEvent) {
        self.process(event);
    }
}
