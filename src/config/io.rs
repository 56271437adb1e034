//! Configuration I/O - Loading configuration
//!
//! Handles reading the bot configuration from files and environment
//! variables. Values read here are still raw; `${VAR}` placeholders are
//! expanded later by [`super::configure`].

use std::path::Path;

use super::env::{EnvLookup, ProcessEnv};
use super::types::BotConfig;
use crate::error::{Error, Result};

/// Load configuration with layered precedence:
/// 1. Config file if it exists, otherwise defaults
/// 2. Environment variable overrides (includes .env)
pub fn load_config() -> Result<BotConfig> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let config_path = super::paths::config_path();

    let mut config = if config_path.exists() {
        load_config_from_path(&config_path)?
    } else {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        BotConfig::default()
    };

    apply_env_overrides(&mut config, &ProcessEnv);

    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<BotConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    // Detect format by extension
    let config: BotConfig = if path.extension().is_some_and(|ext| ext == "json") {
        // Parse as JSON5 (more lenient than strict JSON)
        json5::from_str(&content).map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))?
    } else if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))?
    } else {
        // Try JSON5 first, then TOML
        json5::from_str(&content)
            .or_else(|_| toml::from_str(&content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
    };

    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to an existing config.
///
/// Override values are taken literally and never macro-expanded.
pub fn apply_env_overrides(config: &mut BotConfig, env: &impl EnvLookup) {
    if let Some(name) = env.get("OPENBOT_NAME") {
        config.name = name;
    }
    if let Some(app) = env.get("OPENBOT_CHAT_APPLICATION") {
        config.chat_application = app;
    }

    let flags: [(&str, &mut bool); 3] = [
        ("OPENBOT_DEBUG", &mut config.debug),
        ("OPENBOT_CLI", &mut config.cli),
        ("OPENBOT_SCHEDULER", &mut config.scheduler),
    ];
    for (var, field) in flags {
        if let Some(raw) = env.get(var) {
            match parse_bool(&raw) {
                Some(v) => *field = v,
                None => tracing::warn!("Ignoring {}: '{}' is not a boolean", var, raw),
            }
        }
    }
}
