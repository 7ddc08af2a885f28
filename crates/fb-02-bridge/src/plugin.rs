//! Bridge plugins
//!
//! A plugin bundles handler registrations (and anything else it needs from the
//! bridge) behind a name. Installing the same name twice is a no-op.

use crate::service::Bridge;

pub trait BridgePlugin {
    /// Unique name; the install key.
    fn name(&self) -> &str;

    /// Called once, on first install.
    fn install(&self, bridge: &Bridge);
}
