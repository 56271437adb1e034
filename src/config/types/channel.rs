//! Chat application types
//!
//! Supported chat backends and their resolved credentials.

use crate::{Error, Result};
use secrecy::SecretString;

/// Port the Slack listener binds when none is configured
pub const DEFAULT_SLACK_LISTENER_PORT: &str = "3000";

/// Supported chat backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatApplication {
    Slack,
    Discord,
    Telegram,
}

impl std::str::FromStr for ChatApplication {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "slack" => Ok(ChatApplication::Slack),
            "discord" => Ok(ChatApplication::Discord),
            "telegram" => Ok(ChatApplication::Telegram),
            _ => Err(Error::Config(format!(
                "Invalid chat application: {}. Valid options: slack, discord, telegram",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ChatApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatApplication::Slack => write!(f, "slack"),
            ChatApplication::Discord => write!(f, "discord"),
            ChatApplication::Telegram => write!(f, "telegram"),
        }
    }
}

/// Resolved Slack settings
#[derive(Debug, Clone)]
pub struct SlackCredentials {
    /// Bot token
    pub token: SecretString,
    /// App-level token for socket mode
    pub app_token: Option<SecretString>,
    /// Signing secret for the events/interactions listener
    pub signing_secret: Option<SecretString>,
    /// Interaction callback path
    pub interactions_callback_path: Option<String>,
    /// Listener port, defaults to [`DEFAULT_SLACK_LISTENER_PORT`]
    pub listener_port: String,
}

/// Resolved Discord settings
#[derive(Debug, Clone)]
pub struct DiscordCredentials {
    /// Bot token
    pub token: SecretString,
    /// Server (guild) ID, if one was configured
    pub server_id: Option<String>,
}

/// Resolved Telegram settings
#[derive(Debug, Clone)]
pub struct TelegramCredentials {
    /// Bot token
    pub token: SecretString,
}

/// Credentials for the chat backend that will run
#[derive(Debug, Clone)]
pub enum ChatCredentials {
    Slack(SlackCredentials),
    Discord(DiscordCredentials),
    Telegram(TelegramCredentials),
}

impl ChatCredentials {
    /// The backend these credentials belong to
    pub fn application(&self) -> ChatApplication {
        match self {
            ChatCredentials::Slack(_) => ChatApplication::Slack,
            ChatCredentials::Discord(_) => ChatApplication::Discord,
            ChatCredentials::Telegram(_) => ChatApplication::Telegram,
        }
    }
}
