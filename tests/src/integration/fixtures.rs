//! Test fixtures: peers that record what they receive, and bridge builders.

use fb_02_bridge::{
    Bridge, BridgeConfig, BridgeConfigBuilder, BridgeRole, BrowsingContext, PeerContexts,
    PeerWindow, TabSender,
};
use parking_lot::Mutex;
use serde_json::Value;
use shared_types::DispatchError;
use std::sync::Arc;

/// Window that records `(data, target_origin)` for every post.
#[derive(Default)]
pub struct SpyWindow {
    pub label: String,
    pub posts: Mutex<Vec<(String, String)>>,
}

impl SpyWindow {
    pub fn named(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            posts: Mutex::new(Vec::new()),
        })
    }

    pub fn bodies(&self) -> Vec<String> {
        self.posts.lock().iter().map(|(data, _)| data.clone()).collect()
    }

    pub fn targets(&self) -> Vec<String> {
        self.posts.lock().iter().map(|(_, target)| target.clone()).collect()
    }
}

impl PeerWindow for SpyWindow {
    fn post_message(&self, data: &str, target_origin: &str) -> Result<(), DispatchError> {
        self.posts
            .lock()
            .push((data.to_string(), target_origin.to_string()));
        Ok(())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Tab send function that records `(tab_id, data)`.
#[derive(Default)]
pub struct SpyTab {
    pub sends: Mutex<Vec<(String, String)>>,
}

impl SpyTab {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn bodies(&self) -> Vec<String> {
        self.sends.lock().iter().map(|(_, data)| data.clone()).collect()
    }
}

impl TabSender for SpyTab {
    fn send(&self, tab_id: &str, data: &str) -> Result<(), DispatchError> {
        self.sends.lock().push((tab_id.to_string(), data.to_string()));
        Ok(())
    }
}

/// Handler sink: every payload the handler sees, in order.
pub type Calls = Arc<Mutex<Vec<Value>>>;

/// Register a recording handler for `message_type`.
pub fn spy_handler(bridge: &Bridge, message_type: &str) -> Calls {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    bridge.register_handler(message_type, move |payload| sink.lock().push(payload.clone()));
    calls
}

/// A container bridge on a fresh context at `origin`.
pub fn container_on(
    origin: &str,
    allowed: &[&str],
    contexts: PeerContexts,
) -> (Bridge, Arc<BrowsingContext>) {
    let host = BrowsingContext::new(origin);
    let config = BridgeConfigBuilder::new(BridgeRole::Container)
        .allowed_origins(allowed.iter().copied())
        .build()
        .expect("valid container config");
    let bridge = Bridge::new(config, contexts, host.clone()).expect("container bridge");
    (bridge, host)
}

/// Config with an optional shared secret and signing on both directions.
pub fn config(role: BridgeRole, allowed: &[&str], secret: Option<&str>, signed: bool) -> BridgeConfig {
    let mut config = BridgeConfig::new(role, allowed.iter().map(|o| o.to_string()).collect());
    config.secret_key = secret.map(str::to_string);
    config.sign_outbound = signed;
    config.require_signature = signed;
    config
}
