//! # Bridge Runtime
//!
//! In-memory wiring of a complete bridge topology:
//!
//! ```text
//!                    container (https://portal.local)
//!           ┌──────────────┬──────────────┬───────────────┐
//!        frame[0]       frame[1]        tab:reports
//!   https://mail.local  https://docs.local  https://reports.local
//!      (parent)          (parent)          (opener)
//! ```
//!
//! The container broadcasts `THEME_UPDATE`; every sub-app applies it through
//! its `ThemeSyncPlugin` and answers with `THEME_UPDATE_ACK`.

use fb_02_bridge::{
    Bridge, BridgeConfig, BridgePlugin, BridgeRole, BrowsingContext, DispatchReport,
    MetricsSnapshot, PeerContexts,
};
use fb_telemetry::log_bridge_event;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use shared_types::{AckPayload, MessageKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tracing::{info, warn};

pub const CONTAINER_ORIGIN: &str = "https://portal.local";
pub const FRAME_ORIGINS: [&str; 2] = ["https://mail.local", "https://docs.local"];
pub const TAB_ORIGIN: &str = "https://reports.local";
pub const TAB_ID: &str = "reports";

/// Shared bridge settings applied to every context.
#[derive(Debug, Clone, Default)]
pub struct DemoSettings {
    pub secret_key: Option<String>,
    pub sign_outbound: bool,
}

impl DemoSettings {
    /// Take the secret and signing flags from `FB_*` variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = BridgeConfig::from_env()?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            secret_key: config.secret_key.clone(),
            sign_outbound: config.sign_outbound,
        }
    }

    fn config(&self, role: BridgeRole, origins: &[&str]) -> BridgeConfig {
        let mut config = BridgeConfig::new(role, origins.iter().map(|o| o.to_string()).collect());
        config.secret_key = self.secret_key.clone();
        config.sign_outbound = self.sign_outbound;
        config.require_signature = self.sign_outbound;
        config
    }
}

#[derive(Debug, Deserialize)]
struct ThemePayload {
    theme: String,
}

/// Applies theme updates and acknowledges them to the sender.
pub struct ThemeSyncPlugin {
    bridge: Weak<Bridge>,
    applied: Arc<Mutex<Option<String>>>,
}

impl ThemeSyncPlugin {
    pub fn new(bridge: &Arc<Bridge>) -> Self {
        Self {
            bridge: Arc::downgrade(bridge),
            applied: Arc::new(Mutex::new(None)),
        }
    }

    /// Theme applied most recently.
    pub fn applied(&self) -> Option<String> {
        self.applied.lock().clone()
    }
}

impl BridgePlugin for ThemeSyncPlugin {
    fn name(&self) -> &str {
        "theme-sync"
    }

    fn install(&self, bridge: &Bridge) {
        let reply_to = self.bridge.clone();
        let applied = Arc::clone(&self.applied);
        bridge.register_typed(MessageKind::ThemeUpdate, move |payload: ThemePayload| {
            *applied.lock() = Some(payload.theme);
            if let Some(bridge) = reply_to.upgrade() {
                let ack = serde_json::to_value(AckPayload::ok()).unwrap_or_default();
                bridge.send(MessageKind::ThemeUpdateAck, ack);
            }
        });
    }
}

/// Every context and bridge of the demo.
pub struct Topology {
    pub container: Arc<Bridge>,
    pub apps: Vec<(String, Arc<Bridge>, ThemeSyncPlugin)>,
    pub tab_context: Arc<BrowsingContext>,
    acks: Arc<AtomicUsize>,
    _contexts: Vec<Arc<BrowsingContext>>,
}

impl Topology {
    pub fn build(settings: &DemoSettings) -> anyhow::Result<Self> {
        let portal = BrowsingContext::new(CONTAINER_ORIGIN);
        let tab_context = BrowsingContext::new(TAB_ORIGIN);
        let frames: Vec<Arc<BrowsingContext>> =
            FRAME_ORIGINS.iter().map(|o| BrowsingContext::new(*o)).collect();

        let mut contexts = PeerContexts::new();
        for frame in &frames {
            contexts = contexts.with_frame(frame.window_from(CONTAINER_ORIGIN));
        }
        contexts = contexts.with_tab(TAB_ID, tab_context.tab_sender(CONTAINER_ORIGIN));

        let mut trusted: Vec<&str> = FRAME_ORIGINS.to_vec();
        trusted.push(TAB_ORIGIN);
        let container = Arc::new(Bridge::new(
            settings.config(BridgeRole::Container, &trusted),
            contexts,
            portal.clone(),
        )?);

        let acks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&acks);
        container.register_typed(MessageKind::ThemeUpdateAck, move |ack: AckPayload| {
            if ack.success {
                counter.fetch_add(1, Ordering::SeqCst);
            } else {
                warn!(reason = ?ack.message, "Sub-app rejected theme");
            }
        });

        let mut apps = Vec::new();
        for frame in &frames {
            let app = Arc::new(Bridge::new(
                settings.config(BridgeRole::SubApp, &[CONTAINER_ORIGIN]),
                PeerContexts::new().with_parent(portal.window_from(frame.origin())),
                frame.clone(),
            )?);
            apps.push((frame.origin().to_string(), app));
        }
        let tab_app = Arc::new(Bridge::new(
            settings.config(BridgeRole::SubApp, &[CONTAINER_ORIGIN]),
            PeerContexts::new().with_opener(portal.window_from(TAB_ORIGIN)),
            tab_context.clone(),
        )?);
        apps.push((TAB_ORIGIN.to_string(), tab_app));

        let apps = apps
            .into_iter()
            .map(|(origin, app)| {
                let plugin = ThemeSyncPlugin::new(&app);
                app.use_plugin(&plugin);
                (origin, app, plugin)
            })
            .collect();

        let mut all = frames;
        all.push(portal);
        Ok(Self {
            container,
            apps,
            tab_context,
            acks,
            _contexts: all,
        })
    }

    /// Acknowledgements received by the container so far.
    pub fn acks(&self) -> usize {
        self.acks.load(Ordering::SeqCst)
    }

    /// Broadcast a theme from the container.
    pub fn broadcast_theme(&self, theme: &str) -> DispatchReport {
        let report = self
            .container
            .send(MessageKind::ThemeUpdate, json!({ "theme": theme }));
        log_bridge_event!(
            info,
            self.container.role(),
            MessageKind::ThemeUpdate,
            "Theme broadcast",
            delivered = report.delivered,
            failed = report.failed
        );
        report
    }
}

/// Outcome of one demo run.
#[derive(Debug, Clone)]
pub struct DemoSummary {
    pub report: DispatchReport,
    pub acks: usize,
    pub applied: Vec<(String, Option<String>)>,
    pub container_metrics: MetricsSnapshot,
}

/// Build the topology, broadcast one theme and collect the results.
pub fn run_demo(settings: &DemoSettings, theme: &str) -> anyhow::Result<DemoSummary> {
    let topology = Topology::build(settings)?;
    info!(
        apps = topology.apps.len(),
        sealed = settings.secret_key.as_deref().is_some_and(|s| !s.is_empty()),
        "Topology ready"
    );

    let report = topology.broadcast_theme(theme);
    let applied = topology
        .apps
        .iter()
        .map(|(origin, _, plugin)| (origin.clone(), plugin.applied()))
        .collect();

    Ok(DemoSummary {
        report,
        acks: topology.acks(),
        applied,
        container_metrics: topology.container.metrics(),
    })
}
