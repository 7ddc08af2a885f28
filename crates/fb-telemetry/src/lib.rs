//! # Frame Bridge Telemetry
//!
//! Structured logging setup for binaries that host bridges. Library crates
//! only emit `tracing` events; this crate decides where they go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fb_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&TelemetryConfig::for_service("bridge-runtime"))?;
//!     // Bridge events are now visible
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FB_SERVICE_NAME` | `frame-bridge` | Service name |
//! | `FB_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directives |
//! | `FB_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//! | `FB_JSON_LOGS` | `false` | JSON lines output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Log a bridge event with the role and message type as fields.
///
/// ```rust,ignore
/// log_bridge_event!(info, "container", "THEME_UPDATE", "Acknowledged", peers = 3);
/// ```
#[macro_export]
macro_rules! log_bridge_event {
    ($level:ident, $role:expr, $message_type:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            role = %$role,
            message_type = %$message_type,
            $($($field)*,)?
            $msg
        )
    };
}
