//! # Bridge Service
//!
//! Owns the inbound pipeline, the peer contexts and the listener guard, and
//! runs the outbound pipeline:
//!
//! ```text
//! send(type, payload)
//!   -> envelope (+ metadata, + nonce/signature)
//!   -> codec.encode
//!   -> dispatch_plan(role, contexts, origins, override)
//!   -> each peer, independently
//! ```

use crate::adapters::ListenerGuard;
use crate::domain::{
    dispatch_plan, BridgeConfig, BridgeRole, ContextUpdate, OriginAllowlist, PeerContexts,
};
use crate::error::{BridgeError, ConfigError};
use crate::handler::InboundPipeline;
use crate::metrics::{BridgeMetrics, MetricsSnapshot};
use crate::plugin::BridgePlugin;
use crate::ports::{ListenerId, MessageHost};
use fb_01_communicator::{Communicator, MessageCodec};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{BridgeMessage, MessageKind, MessageMetadata, PayloadError};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Lifecycle state of a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    /// Listener attached; inbound messages are processed.
    Listening,
    /// Listener detached. Irreversible.
    Destroyed,
}

/// Per-peer outcome of one `send`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Peers in the dispatch plan.
    pub attempted: usize,
    /// Peers that accepted the message.
    pub delivered: usize,
    /// Peers whose dispatch returned an error.
    pub failed: usize,
}

impl DispatchReport {
    pub fn is_noop(&self) -> bool {
        self.attempted == 0
    }
}

/// Message bridge for one browsing context.
pub struct Bridge {
    role: BridgeRole,
    source: String,
    attach_metadata: bool,
    sign_outbound: bool,
    codec: Arc<dyn MessageCodec>,
    inbound: Arc<InboundPipeline>,
    contexts: RwLock<PeerContexts>,
    plugins: RwLock<Vec<String>>,
    metrics: Arc<BridgeMetrics>,
    listener: ListenerGuard,
}

impl Bridge {
    /// Build a bridge and attach its listener to `host`.
    pub fn new(
        config: BridgeConfig,
        contexts: PeerContexts,
        host: Arc<dyn MessageHost>,
    ) -> Result<Self, BridgeError> {
        config.validate()?;
        let codec = Communicator::new(config.secret_key.as_deref())?;
        Self::with_codec(config, contexts, host, Arc::new(codec))
    }

    /// Build a bridge around an existing codec.
    pub fn with_codec(
        config: BridgeConfig,
        contexts: PeerContexts,
        host: Arc<dyn MessageHost>,
        codec: Arc<dyn MessageCodec>,
    ) -> Result<Self, BridgeError> {
        config.validate()?;
        if !codec.is_sealed() {
            if config.sign_outbound {
                return Err(ConfigError::SigningWithoutSecret {
                    flag: "sign_outbound",
                }
                .into());
            }
            if config.require_signature {
                return Err(ConfigError::SigningWithoutSecret {
                    flag: "require_signature",
                }
                .into());
            }
        }

        let metrics = Arc::new(BridgeMetrics::new());
        let inbound = Arc::new(InboundPipeline::new(
            OriginAllowlist::new(config.allowed_origins.iter().cloned()),
            Arc::clone(&codec),
            Arc::clone(&metrics),
            config.require_signature,
        ));

        // Attach last: nothing after this point can fail.
        let listener = ListenerGuard::attach(host, inbound.clone());

        info!(
            role = %config.role,
            origins = config.allowed_origins.len(),
            sealed = codec.is_sealed(),
            listener = listener.id().0,
            "Bridge listening"
        );

        Ok(Self {
            role: config.role,
            source: config.source_tag().to_string(),
            attach_metadata: config.attach_metadata,
            sign_outbound: config.sign_outbound,
            codec,
            inbound,
            contexts: RwLock::new(contexts),
            plugins: RwLock::new(Vec::new()),
            metrics,
            listener,
        })
    }

    pub fn role(&self) -> BridgeRole {
        self.role
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    /// Route messages of `kind` to `handler`, replacing any previous handler.
    pub fn register_handler<F>(&self, kind: impl Into<MessageKind>, handler: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let kind: MessageKind = kind.into();
        let key = String::from(kind);
        let replaced = self.inbound.registry().write().insert(key.clone(), Arc::new(handler));
        debug!(message_type = %key, replaced, "Handler registered");
    }

    /// Like [`Bridge::register_handler`], deserializing the payload to `T`
    /// first. Payloads that do not match `T` are logged and dropped.
    pub fn register_typed<T, F>(&self, kind: impl Into<MessageKind>, handler: F)
    where
        T: DeserializeOwned + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let kind: MessageKind = kind.into();
        let label = kind.to_string();
        self.register_handler(kind, move |payload: &Value| match T::deserialize(payload) {
            Ok(value) => handler(value),
            Err(e) => {
                let err = PayloadError {
                    message_type: label.clone(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "Message dropped");
            }
        });
    }

    /// Remove the handler for `kind`. Returns true if one was registered.
    pub fn unregister_handler(&self, kind: impl Into<MessageKind>) -> bool {
        let kind: MessageKind = kind.into();
        self.inbound.registry().write().remove(kind.as_str())
    }

    pub fn has_handler(&self, kind: impl Into<MessageKind>) -> bool {
        let kind: MessageKind = kind.into();
        self.inbound.registry().read().contains(kind.as_str())
    }

    // =========================================================================
    // Outbound
    // =========================================================================

    /// Send `payload` as `kind` to the peers selected by this bridge's role.
    pub fn send(&self, kind: impl Into<MessageKind>, payload: Value) -> DispatchReport {
        self.send_inner(kind.into(), payload, None)
    }

    /// Like [`Bridge::send`] with an explicit target origin.
    pub fn send_with_target(
        &self,
        kind: impl Into<MessageKind>,
        payload: Value,
        target_origin: &str,
    ) -> DispatchReport {
        self.send_inner(kind.into(), payload, Some(target_origin))
    }

    fn send_inner(
        &self,
        kind: MessageKind,
        payload: Value,
        target_override: Option<&str>,
    ) -> DispatchReport {
        let message = self.envelope(kind, payload);

        let data = match self.codec.encode(&message) {
            Ok(data) => data,
            Err(e) => {
                warn!(message_type = %message.kind, error = %e, "Failed to encode message");
                return DispatchReport::default();
            }
        };
        // Build the plan under the locks, dispatch after releasing them.
        let plan = {
            let contexts = self.contexts.read();
            let origins = self.inbound.origins().read();
            dispatch_plan(self.role, &contexts, origins.as_slice(), target_override)
        };

        if plan.is_empty() {
            warn!(
                role = %self.role,
                message_type = %message.kind,
                "No peer to send to, message not sent"
            );
            return DispatchReport::default();
        }
        BridgeMetrics::incr(&self.metrics.sent);

        let mut report = DispatchReport {
            attempted: plan.len(),
            ..DispatchReport::default()
        };
        for target in &plan {
            match panic::catch_unwind(AssertUnwindSafe(|| target.dispatch(&data))) {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    BridgeMetrics::incr(&self.metrics.dispatched);
                }
                Ok(Err(e)) => {
                    report.failed += 1;
                    BridgeMetrics::incr(&self.metrics.dispatch_failures);
                    warn!(peer = %target.label(), error = %e, "Dispatch to peer failed");
                }
                Err(_) => {
                    report.failed += 1;
                    BridgeMetrics::incr(&self.metrics.dispatch_failures);
                    error!(peer = %target.label(), "Peer panicked during dispatch");
                }
            }
        }

        debug!(
            message_type = %message.kind,
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed,
            "Message sent"
        );
        report
    }

    fn envelope(&self, kind: MessageKind, payload: Value) -> BridgeMessage {
        let message = BridgeMessage::new(kind, payload);
        if !self.attach_metadata && !self.sign_outbound {
            return message;
        }

        let mut metadata = MessageMetadata::now(self.source.clone());
        if !self.sign_outbound {
            return message.with_metadata(metadata);
        }

        metadata.nonce = Some(self.codec.generate_message_nonce());
        let mut message = message.with_metadata(metadata);
        let signature = self.codec.sign(&message);
        if let Some(metadata) = message.metadata.as_mut() {
            metadata.signature = signature;
        }
        message
    }

    // =========================================================================
    // Origins and peers
    // =========================================================================

    /// Trust `origin` from now on. Returns false if it was already trusted.
    pub fn add_allowed_origin(&self, origin: impl Into<String>) -> bool {
        let origin = origin.into();
        let added = self.inbound.origins().write().add(origin.clone());
        debug!(origin = %origin, added, "Allowed origin added");
        added
    }

    /// Distrust every origin; all inbound traffic is dropped until one is added.
    pub fn clear_allowed_origins(&self) {
        self.inbound.origins().write().clear();
        debug!("Allowed origins cleared");
    }

    /// Owned copy of the allowlist.
    pub fn get_origins(&self) -> Vec<String> {
        self.inbound.origins().read().snapshot()
    }

    /// Replace the frame list or the tab set.
    pub fn update_context(&self, update: ContextUpdate) {
        debug!(update = ?update, "Peer contexts replaced");
        self.contexts.write().apply(update);
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    pub fn verify_message_signature(&self, message: &BridgeMessage, signature: &str) -> bool {
        self.codec.verify_message_signature(message, signature)
    }

    pub fn generate_message_nonce(&self) -> String {
        self.codec.generate_message_nonce()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Detach the listener. Safe to call more than once.
    pub fn destroy(&self) {
        self.inbound.deactivate();
        if self.listener.release() {
            info!(role = %self.role, "Bridge destroyed");
        }
    }

    pub fn status(&self) -> BridgeStatus {
        if self.listener.is_attached() {
            BridgeStatus::Listening
        } else {
            BridgeStatus::Destroyed
        }
    }

    pub fn listener_id(&self) -> ListenerId {
        self.listener.id()
    }

    // =========================================================================
    // Plugins and metrics
    // =========================================================================

    /// Install `plugin` unless a plugin with the same name is installed.
    /// Returns true if installed now.
    pub fn use_plugin(&self, plugin: &dyn BridgePlugin) -> bool {
        let name = plugin.name().to_string();
        {
            let mut plugins = self.plugins.write();
            if plugins.contains(&name) {
                debug!(plugin = %name, "Plugin already installed");
                return false;
            }
            plugins.push(name.clone());
        }
        plugin.install(self);
        info!(plugin = %name, "Plugin installed");
        true
    }

    /// Installed plugin names, in install order.
    pub fn plugins(&self) -> Vec<String> {
        self.plugins.read().clone()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("role", &self.role)
            .field("source", &self.source)
            .field("status", &self.status())
            .field("origins", &self.get_origins())
            .field("contexts", &*self.contexts.read())
            .field("plugins", &*self.plugins.read())
            .finish()
    }
}
