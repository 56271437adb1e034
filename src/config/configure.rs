//! Startup configuration pipeline
//!
//! name expansion -> run-mode resolution -> chat validation

use super::chat::configure_chat_application;
use super::env::{expand_embedded, EnvLookup};
use super::run_mode::resolve_run_modes;
use super::types::{BotConfig, ResolvedConfig};
use crate::error::{Error, Result};
use tracing::{error, info};

/// Resolve and validate `config` against `env`.
///
/// Returns [`Error::NoRunMode`] when no run-loop could start, either
/// because none was requested or because chat validation removed the only
/// one that was.
pub fn configure(config: &BotConfig, env: &impl EnvLookup) -> Result<ResolvedConfig> {
    // The name is used by the CLI prompt too, so expand it unconditionally
    let name = expand_embedded(&config.name, env);

    let requested = resolve_run_modes(config)?;
    let outcome = configure_chat_application(config, requested, env);

    if !outcome.run_modes.any_active() {
        error!(
            chat_application = %config.chat_application,
            "Chat application is unusable and the CLI is disabled"
        );
        return Err(Error::NoRunMode);
    }

    info!(
        name = %name,
        cli = outcome.run_modes.cli,
        chat = outcome.run_modes.chat,
        scheduler = outcome.run_modes.scheduler,
        interactive_components = outcome.run_modes.interactive_components,
        "Configuration resolved"
    );

    Ok(ResolvedConfig {
        name,
        debug: config.debug,
        run_modes: outcome.run_modes,
        chat: outcome.credentials,
    })
}
