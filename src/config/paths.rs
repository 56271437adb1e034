//! Configuration paths
//!
//! Precedence for the config file:
//! `OPENBOT_CONFIG` > `OPENBOT_CONFIG_DIR/bot.toml` > `<user config dir>/openbot/bot.toml`

use std::path::PathBuf;

use super::env::{EnvLookup, ProcessEnv};

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "bot.toml";

fn non_empty(env: &impl EnvLookup, name: &str) -> Option<PathBuf> {
    env.get(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Configuration directory, resolved against `env`
pub fn config_dir_with(env: &impl EnvLookup) -> PathBuf {
    non_empty(env, "OPENBOT_CONFIG_DIR").unwrap_or_else(|| {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|d| d.join("openbot"))
            .unwrap_or_else(|| PathBuf::from(".config").join("openbot"))
    })
}

/// Configuration file path, resolved against `env`
pub fn config_path_with(env: &impl EnvLookup) -> PathBuf {
    non_empty(env, "OPENBOT_CONFIG").unwrap_or_else(|| config_dir_with(env).join(CONFIG_FILE_NAME))
}

/// Get the configuration directory
pub fn config_dir() -> PathBuf {
    config_dir_with(&ProcessEnv)
}

/// Get the main configuration file path
pub fn config_path() -> PathBuf {
    config_path_with(&ProcessEnv)
}
