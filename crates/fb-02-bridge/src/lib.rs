//! # FB-02 Bridge
//!
//! Origin-gated, role-aware message bridge between browsing contexts.
//!
//! A container page, the sub-applications it embeds in frames, and the tabs it
//! opens each run one `Bridge`. The bridge attaches a single listener to its
//! context's message channel, drops anything from an origin it does not trust,
//! decodes the rest through the communicator and hands the payload to the
//! handler registered for the message type. Outbound, it fans a message out
//! according to its role.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BridgeConfig`, `BridgeRole`: configuration and validation
//!   - `OriginAllowlist`: exact-match origin gate
//!   - `HandlerRegistry`: one handler per message type
//!   - `dispatch_plan`: the role-based routing table
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MessageHost`, `PeerWindow`, `TabSender`: the browser surface
//!
//! - **Handler Layer** (`handler/`): `InboundPipeline`
//!
//! - **Adapters Layer** (`adapters/`):
//!   - `BrowsingContext`: in-process contexts with browser delivery rules
//!   - `ListenerGuard`: scoped listener attachment
//!
//! - **Service Layer** (`service.rs`): `Bridge`
//!
//! ## Routing
//!
//! | Role | Sends to | Target origin |
//! |------|----------|---------------|
//! | Container | all frames, then all tabs | override or `"*"` |
//! | SubApp | opener, else parent | override or first allowed origin |
//!
//! ## Usage Example
//!
//! ```ignore
//! use fb_02_bridge::{Bridge, BridgeConfigBuilder, BridgeRole, BrowsingContext, PeerContexts};
//!
//! let host = BrowsingContext::new("https://host.example");
//! let frame = BrowsingContext::new("https://app.example");
//!
//! let config = BridgeConfigBuilder::new(BridgeRole::Container)
//!     .allowed_origin("https://app.example")
//!     .build()?;
//! let contexts = PeerContexts::new().with_frame(frame.window_from(host.origin()));
//! let bridge = Bridge::new(config, contexts, host.clone())?;
//!
//! bridge.register_handler("THEME_UPDATE_ACK", |payload| println!("{payload}"));
//! bridge.send("THEME_UPDATE", serde_json::json!({"theme": "dark"}));
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod plugin;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{BrowsingContext, ListenerGuard, WindowProxy};
pub use domain::{
    dispatch_plan, BridgeConfig, BridgeConfigBuilder, BridgeRole, ContextUpdate, DispatchTarget,
    Handler, OriginAllowlist, PeerContexts, PeerHandle,
};
pub use error::{BridgeError, ConfigError};
pub use handler::{InboundOutcome, InboundPipeline};
pub use metrics::{BridgeMetrics, MetricsSnapshot};
pub use plugin::BridgePlugin;
pub use ports::{ListenerId, MessageEvent, MessageHost, MessageListener, PeerWindow, TabSender};
pub use service::{Bridge, BridgeStatus, DispatchReport};
