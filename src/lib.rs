//! # OpenBot
//!
//! Startup configuration for a multi-mode chat bot.
//!
//! ## Features
//!
//! - **Run-mode resolution:** Decides whether the CLI, chat listener and scheduler may start
//! - **Env expansion:** `${VAR}` placeholders in names, tokens and IDs
//! - **Chat validation:** Slack, Discord and Telegram credential checks that degrade instead of crash
//! - **Fail fast:** A typed error when no run mode is left

pub mod config;
pub mod error;
pub mod logging;

pub use config::{configure, BotConfig, ResolvedConfig};
pub use error::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
