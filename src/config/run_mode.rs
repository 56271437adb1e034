//! Run-mode resolution
//!
//! Decides which run-loops were requested. Credentials are not looked at
//! here; a requested chat backend is only validated later.

use super::types::{BotConfig, RunModes};
use crate::error::{Error, Result};
use tracing::{debug, error, warn};

/// Compute the requested run modes.
///
/// The scheduler is dropped without error when no chat application is set.
/// Fails with [`Error::NoRunMode`] when neither the CLI nor chat is enabled.
pub fn resolve_run_modes(config: &BotConfig) -> Result<RunModes> {
    let chat = config.chat_requested();

    if config.scheduler && !chat {
        warn!("Scheduler requires a chat_application and will not run");
    }

    let modes = RunModes {
        cli: config.cli,
        chat,
        scheduler: config.scheduler && chat,
        interactive_components: false,
    };

    if !modes.any_active() {
        error!("Neither the CLI nor a chat application is enabled");
        return Err(Error::NoRunMode);
    }

    debug!(
        cli = modes.cli,
        chat = modes.chat,
        scheduler = modes.scheduler,
        "Resolved requested run modes"
    );

    Ok(modes)
}
