//! Configuration types module
//!
//! Raw bot configuration as loaded from file and flags, plus the resolved
//! form handed to the run-loops.

pub mod channel;

use secrecy::SecretString;
use serde::Deserialize;

/// Raw bot configuration
///
/// String fields may hold `${VAR}` placeholders. Nothing here is expanded
/// until [`crate::config::configure`] runs.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Bot name, may embed `${VAR}` placeholders anywhere
    #[serde(default)]
    pub name: String,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
    /// Run the interactive CLI
    #[serde(default)]
    pub cli: bool,
    /// Run the scheduler (requires chat)
    #[serde(default)]
    pub scheduler: bool,
    /// Chat backend: `slack`, `discord` or `telegram`, empty for none
    #[serde(default)]
    pub chat_application: String,

    /// Slack bot token
    #[serde(default = "default_secret")]
    pub slack_token: SecretString,
    /// Slack app-level token (socket mode)
    #[serde(default = "default_secret")]
    pub slack_app_token: SecretString,
    /// Slack signing secret (events API / interactions)
    #[serde(default = "default_secret")]
    pub slack_signing_secret: SecretString,
    /// Path Slack posts interaction callbacks to
    #[serde(default)]
    pub slack_interactions_callback_path: String,
    /// Port for the Slack event/interaction listener
    #[serde(default)]
    pub slack_listener_port: String,

    /// Discord bot token
    #[serde(default = "default_secret")]
    pub discord_token: SecretString,
    /// Discord server (guild) ID
    #[serde(default)]
    pub discord_server_id: String,

    /// Telegram bot token
    #[serde(default = "default_secret")]
    pub telegram_token: SecretString,
}

pub(crate) fn default_secret() -> SecretString {
    SecretString::from(String::new())
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            name: String::new(),
            debug: false,
            cli: false,
            scheduler: false,
            chat_application: String::new(),
            slack_token: default_secret(),
            slack_app_token: default_secret(),
            slack_signing_secret: default_secret(),
            slack_interactions_callback_path: String::new(),
            slack_listener_port: String::new(),
            discord_token: default_secret(),
            discord_server_id: String::new(),
            telegram_token: default_secret(),
        }
    }
}

impl BotConfig {
    /// Whether a chat application was requested at all
    pub fn chat_requested(&self) -> bool {
        !self.chat_application.is_empty()
    }
}

/// Which run-loops may start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunModes {
    /// Interactive CLI
    pub cli: bool,
    /// Chat platform listener
    pub chat: bool,
    /// Scheduler (never without chat)
    pub scheduler: bool,
    /// Slack interaction callbacks
    pub interactive_components: bool,
}

impl RunModes {
    /// At least one of CLI or chat is active
    pub fn any_active(&self) -> bool {
        self.cli || self.chat
    }

    /// Turn chat off along with everything that depends on it
    pub fn without_chat(self) -> Self {
        RunModes {
            cli: self.cli,
            chat: false,
            scheduler: false,
            interactive_components: false,
        }
    }
}

/// Fully resolved configuration, read-only for the run-loops
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Bot name after embedded expansion
    pub name: String,
    /// Debug logging requested
    pub debug: bool,
    /// Derived run-mode flags
    pub run_modes: RunModes,
    /// Resolved credentials, present only when chat will run
    pub chat: Option<channel::ChatCredentials>,
}
