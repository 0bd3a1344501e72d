//! Discord webhook message payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context color of a rendered notification, Discord embed color values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Success,
    Info,
    Warning,
    Danger,
}

impl Color {
    /// Discord embed integer value (the Bootstrap context palette).
    pub fn value(self) -> i32 {
        match self {
            Self::Success => 0x5cb85c,
            Self::Info => 0x5bc0de,
            Self::Warning => 0xf0ad4e,
            Self::Danger => 0xd9534f,
        }
    }
}

/// Channel ping directive for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PingType {
    None,
    Here,
    Everyone,
}

impl PingType {
    pub fn as_mention(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Here => Some("@here"),
            Self::Everyone => Some("@everyone"),
        }
    }

    /// Parse the stored configuration value, defaulting unknown to none.
    pub fn from_config_value(value: &str) -> Self {
        match value {
            "here" => Self::Here,
            "everyone" => Self::Everyone,
            _ => Self::None,
        }
    }
}

/// A single embed within a Discord message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// JSON body POSTed to a Discord webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embeds: Vec<Embed>,
}

impl DiscordMessage {
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().unwrap_or("").is_empty() && self.embeds.is_empty()
    }
}
