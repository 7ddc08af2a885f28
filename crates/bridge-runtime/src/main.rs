//! # Bridge Runtime
//!
//! Runs the in-memory demo topology once and logs the outcome.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging from `FB_LOG_LEVEL` / `FB_JSON_LOGS`
//! 2. Load bridge settings from `FB_SECRET_KEY` / `FB_SIGN_OUTBOUND`
//! 3. Build the topology and broadcast a theme
//! 4. Report acknowledgements and metrics

use anyhow::{Context, Result};
use bridge_runtime::{run_demo, DemoSettings};
use fb_telemetry::{init_logging, TelemetryConfig};
use tracing::{info, warn};

fn main() -> Result<()> {
    init_logging(&TelemetryConfig::for_service("bridge-runtime"))
        .context("Failed to initialize logging")?;

    let settings = DemoSettings::from_env().context("Invalid FB_* bridge configuration")?;
    let theme = std::env::args().nth(1).unwrap_or_else(|| "dark".to_string());

    let summary = run_demo(&settings, &theme).context("Demo run failed")?;

    for (origin, applied) in &summary.applied {
        info!(app = %origin, theme = ?applied, "Sub-app state");
    }
    if summary.acks != summary.report.delivered {
        warn!(
            acks = summary.acks,
            delivered = summary.report.delivered,
            "Not every sub-app acknowledged"
        );
    }
    info!(
        metrics = %serde_json::to_string(&summary.container_metrics)?,
        "Container metrics"
    );

    Ok(())
}
