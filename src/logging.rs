//! Logging setup
//!
//! The only knob the bot config controls is the level of this crate's
//! target: `debug` when the debug flag is set, `info` otherwise. `RUST_LOG`
//! may add directives for other targets but never overrides that one.

use crate::error::{Error, Result};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Log level selected by the bot config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// `debug` when the flag is set, else `info`
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }

    /// Filter directive for this crate
    pub fn directive(&self) -> String {
        format!("{}={}", crate::NAME, self)
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        LevelFilter::from_level(level.into())
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

fn build_filter(level: LogLevel) -> Result<EnvFilter> {
    let directive: Directive = level
        .directive()
        .parse()
        .map_err(|e| Error::Logging(format!("Invalid log directive: {}", e)))?;
    // Added last so it replaces any RUST_LOG directive for the same target
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Level this crate's events are actually emitted at
///
/// Reports `info` when debug events are filtered out, including when no
/// subscriber is installed.
pub fn current_level() -> LogLevel {
    if tracing::enabled!(target: crate::NAME, tracing::Level::DEBUG) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

/// Handle to the installed logger
#[derive(Debug, Clone)]
pub struct LogHandle {
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Change this crate's level
    ///
    /// No-op when another subscriber was installed first.
    pub fn set_level(&self, level: LogLevel) -> Result<()> {
        let Some(reload) = &self.reload else {
            tracing::debug!("Logger not owned by openbot, level left unchanged");
            return Ok(());
        };
        let filter = build_filter(level)?;
        reload
            .reload(filter)
            .map_err(|e| Error::Logging(format!("Failed to set log level: {}", e)))
    }

    /// Level in effect for this crate
    pub fn level(&self) -> LogLevel {
        current_level()
    }
}

/// Install the global subscriber at `level`.
///
/// `json` switches to one JSON object per line. A subscriber installed
/// earlier is left in place and the returned handle cannot change it.
pub fn init_logger(level: LogLevel, json: bool) -> Result<LogHandle> {
    let (filter, handle) = reload::Layer::new(build_filter(level)?);
    let output = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    let reload = match tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
    {
        Ok(()) => Some(handle),
        Err(_) => {
            tracing::debug!("Global subscriber already installed");
            None
        }
    };

    Ok(LogHandle { reload })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_debug_flag() {
        let cases = [
            ("error level set", false, "info"),
            ("debug level set", true, "debug"),
        ];
        for (name, debug, want) in cases {
            assert_eq!(LogLevel::from_debug(debug).to_string(), want, "{}", name);
        }
    }

    // The only test that installs the global subscriber
    #[test]
    fn test_logger_reports_effective_level() {
        let handle = init_logger(LogLevel::Debug, false).unwrap();
        assert_eq!(handle.level(), LogLevel::Debug);
        assert!(tracing::enabled!(target: "openbot", tracing::Level::DEBUG));

        handle.set_level(LogLevel::Info).unwrap();
        assert_eq!(handle.level(), LogLevel::Info);
        assert_eq!(current_level(), LogLevel::Info);

        // A second install is refused; its handle reports what is really active
        let second = init_logger(LogLevel::Debug, true).unwrap();
        assert_eq!(second.level(), LogLevel::Info);
        second.set_level(LogLevel::Debug).unwrap();
        assert_eq!(current_level(), LogLevel::Info);

        handle.set_level(LogLevel::Debug).unwrap();
        assert_eq!(second.level(), LogLevel::Debug);
    }

    #[test]
    fn test_filter_pins_crate_level() {
        let filter = build_filter(LogLevel::Info).unwrap().to_string();
        assert!(filter.contains("openbot=info"), "{}", filter);
    }

    #[test]
    fn test_directive_and_tracing_level() {
        assert_eq!(LogLevel::Debug.directive(), "openbot=debug");
        assert_eq!(tracing::Level::from(LogLevel::Info), tracing::Level::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
    }
}
