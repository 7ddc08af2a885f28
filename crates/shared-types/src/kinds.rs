//! # Message Kinds
//!
//! The `type` tag of an envelope. Well-known tags get their own variant; every
//! other string is carried verbatim in [`MessageKind::Custom`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a bridge message.
///
/// Serialized as the bare tag string, so `MessageKind::ThemeUpdate` and
/// `MessageKind::Custom("THEME_UPDATE".into())` can never both appear on the
/// wire: parsing always yields the well-known variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    /// Theme variables pushed by the container.
    ThemeUpdate,
    /// Sub-app acknowledgement of a theme update.
    ThemeUpdateAck,
    /// Font scale factor change.
    FontScale,
    /// Font configuration pushed by the container.
    FontUpdate,
    /// Sub-app acknowledgement of a font update.
    FontUpdateAck,
    /// User/session information sync.
    UserSync,
    /// Any tag without a dedicated variant.
    Custom(String),
}

impl MessageKind {
    pub const THEME_UPDATE: &'static str = "THEME_UPDATE";
    pub const THEME_UPDATE_ACK: &'static str = "THEME_UPDATE_ACK";
    pub const FONT_SCALE: &'static str = "FONT_SCALE";
    pub const FONT_UPDATE: &'static str = "FONT_UPDATE";
    pub const FONT_UPDATE_ACK: &'static str = "FONT_UPDATE_ACK";
    pub const USER_SYNC: &'static str = "USER_SYNC";

    /// Returns the wire tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::ThemeUpdate => Self::THEME_UPDATE,
            MessageKind::ThemeUpdateAck => Self::THEME_UPDATE_ACK,
            MessageKind::FontScale => Self::FONT_SCALE,
            MessageKind::FontUpdate => Self::FONT_UPDATE,
            MessageKind::FontUpdateAck => Self::FONT_UPDATE_ACK,
            MessageKind::UserSync => Self::USER_SYNC,
            MessageKind::Custom(tag) => tag,
        }
    }

    /// Returns true for tags without a dedicated variant.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, MessageKind::Custom(_))
    }
}

impl From<&str> for MessageKind {
    fn from(tag: &str) -> Self {
        match tag {
            Self::THEME_UPDATE => MessageKind::ThemeUpdate,
            Self::THEME_UPDATE_ACK => MessageKind::ThemeUpdateAck,
            Self::FONT_SCALE => MessageKind::FontScale,
            Self::FONT_UPDATE => MessageKind::FontUpdate,
            Self::FONT_UPDATE_ACK => MessageKind::FontUpdateAck,
            Self::USER_SYNC => MessageKind::UserSync,
            other => MessageKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for MessageKind {
    fn from(tag: String) -> Self {
        match MessageKind::from(tag.as_str()) {
            MessageKind::Custom(_) => MessageKind::Custom(tag),
            known => known,
        }
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Custom(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
