//! Bridge configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use fb_02_bridge::domain::{BridgeConfigBuilder, BridgeRole};
//!
//! let config = BridgeConfigBuilder::new(BridgeRole::Container)
//!     .allowed_origin("https://app.example")
//!     .secret_key("shared-secret")
//!     .build()
//!     .expect("Valid config");
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which side of the embedding relationship this bridge sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BridgeRole {
    /// Hosts frames and popup tabs; fans out to all of them.
    #[serde(rename = "container")]
    Container,
    /// Embedded or opened application; sends to its opener or parent.
    #[default]
    #[serde(rename = "subApp")]
    SubApp,
}

impl BridgeRole {
    /// Default metadata source tag for the role.
    #[must_use]
    pub fn default_source(&self) -> &'static str {
        match self {
            BridgeRole::Container => "container",
            BridgeRole::SubApp => "subApp",
        }
    }
}

impl FromStr for BridgeRole {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "container" | "parent" => Ok(BridgeRole::Container),
            "subapp" | "sub_app" | "sub-app" | "child" => Ok(BridgeRole::SubApp),
            _ => Err(ConfigError::InvalidRole(s.to_string())),
        }
    }
}

impl fmt::Display for BridgeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_source())
    }
}

/// Bridge configuration.
///
/// Peer contexts are passed to the bridge separately because they are live
/// handles, not configuration values.
#[derive(Clone, Default)]
pub struct BridgeConfig {
    /// Origins whose inbound messages are processed, in priority order.
    /// For a sub-app the first entry is the default target origin.
    pub allowed_origins: Vec<String>,
    /// Shared secret; absent or empty means plain JSON on the wire.
    pub secret_key: Option<String>,
    /// Outbound fan-out policy.
    pub role: BridgeRole,
    /// Metadata source tag; defaults to the role name.
    pub source: Option<String>,
    /// Stamp outbound envelopes with `{timestamp, source}`.
    pub attach_metadata: bool,
    /// Add a nonce and MAC to outbound metadata.
    pub sign_outbound: bool,
    /// Drop inbound messages without a valid MAC.
    pub require_signature: bool,
}

impl BridgeConfig {
    /// Minimal configuration for a role: metadata on, signing off.
    pub fn new(role: BridgeRole, allowed_origins: Vec<String>) -> Self {
        Self {
            allowed_origins,
            role,
            attach_metadata: true,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `FB_ALLOWED_ORIGINS`: comma separated origins (default: none)
    /// - `FB_SECRET_KEY`: shared secret (default: unset)
    /// - `FB_ROLE`: `container` or `subApp` (default: subApp)
    /// - `FB_SOURCE`: metadata source tag (default: role name)
    /// - `FB_ATTACH_METADATA`: (default: true)
    /// - `FB_SIGN_OUTBOUND`: (default: false)
    /// - `FB_REQUIRE_SIGNATURE`: (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`BridgeConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(default)
        };

        let role = match lookup("FB_ROLE") {
            Some(raw) => raw.parse()?,
            None => BridgeRole::default(),
        };

        let allowed_origins = lookup("FB_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            allowed_origins,
            secret_key: lookup("FB_SECRET_KEY").filter(|s| !s.is_empty()),
            role,
            source: lookup("FB_SOURCE").filter(|s| !s.is_empty()),
            attach_metadata: flag("FB_ATTACH_METADATA", true),
            sign_outbound: flag("FB_SIGN_OUTBOUND", false),
            require_signature: flag("FB_REQUIRE_SIGNATURE", false),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.allowed_origins.iter().position(|o| o.trim().is_empty()) {
            return Err(ConfigError::BlankOrigin { index });
        }

        if !self.has_secret() {
            if self.sign_outbound {
                return Err(ConfigError::SigningWithoutSecret {
                    flag: "sign_outbound",
                });
            }
            if self.require_signature {
                return Err(ConfigError::SigningWithoutSecret {
                    flag: "require_signature",
                });
            }
        }

        Ok(())
    }

    /// True when a non-empty secret is configured.
    #[must_use]
    pub fn has_secret(&self) -> bool {
        self.secret_key.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Effective metadata source tag.
    #[must_use]
    pub fn source_tag(&self) -> &str {
        self.source
            .as_deref()
            .unwrap_or_else(|| self.role.default_source())
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("allowed_origins", &self.allowed_origins)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .field("source", &self.source)
            .field("attach_metadata", &self.attach_metadata)
            .field("sign_outbound", &self.sign_outbound)
            .field("require_signature", &self.require_signature)
            .finish()
    }
}

/// Fluent builder for [`BridgeConfig`].
#[derive(Debug, Clone)]
pub struct BridgeConfigBuilder {
    config: BridgeConfig,
}

impl BridgeConfigBuilder {
    pub fn new(role: BridgeRole) -> Self {
        Self {
            config: BridgeConfig::new(role, Vec::new()),
        }
    }

    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.allowed_origins.push(origin.into());
        self
    }

    pub fn allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .allowed_origins
            .extend(origins.into_iter().map(Into::into));
        self
    }

    pub fn secret_key(mut self, secret: impl Into<String>) -> Self {
        self.config.secret_key = Some(secret.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.config.source = Some(source.into());
        self
    }

    pub fn attach_metadata(mut self, enabled: bool) -> Self {
        self.config.attach_metadata = enabled;
        self
    }

    pub fn sign_outbound(mut self, enabled: bool) -> Self {
        self.config.sign_outbound = enabled;
        self
    }

    pub fn require_signature(mut self, enabled: bool) -> Self {
        self.config.require_signature = enabled;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
