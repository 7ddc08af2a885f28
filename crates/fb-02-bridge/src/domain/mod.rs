//! Domain layer: configuration, allowlist, handler registry and the
//! outbound routing policy. No I/O.

pub mod config;
pub mod origins;
pub mod registry;
pub mod routing;

pub use config::{BridgeConfig, BridgeConfigBuilder, BridgeRole};
pub use origins::OriginAllowlist;
pub use registry::{Handler, HandlerRegistry};
pub use routing::{
    dispatch_plan, ContextUpdate, DispatchTarget, PeerContexts, PeerHandle, ANY_ORIGIN,
};
