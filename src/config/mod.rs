//! Configuration module - Startup configuration resolution
//!
//! - types/mod.rs: Raw bot config, run-mode flags, resolved config
//! - types/channel.rs: Chat application kinds and resolved credentials
//! - env.rs: `${VAR}` expansion over an injectable environment
//! - run_mode.rs: Which run-loops were requested
//! - chat.rs: Chat backend credential validation
//! - configure.rs: The full pipeline
//! - io.rs: Configuration loading
//! - paths.rs: Configuration file paths

mod chat;
mod configure;
pub mod env;
mod io;
mod paths;
mod run_mode;
mod types;

// Re-export core config types
pub use types::{BotConfig, ResolvedConfig, RunModes};

// Re-export channel types
pub use types::channel::{
    ChatApplication, ChatCredentials, DiscordCredentials, SlackCredentials, TelegramCredentials,
    DEFAULT_SLACK_LISTENER_PORT,
};

// Re-export pipeline stages
pub use chat::{configure_chat_application, ChatDisabled, ChatOutcome};
pub use configure::configure;
pub use env::{EnvLookup, MapEnv, ProcessEnv};
pub use run_mode::resolve_run_modes;

// Re-export IO and utilities
pub use io::{apply_env_overrides, load_config, load_config_from_path};
pub use paths::{config_dir, config_dir_with, config_path, config_path_with, CONFIG_FILE_NAME};
