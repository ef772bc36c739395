//! # Logging Setup
//!
//! Installs the process-wide `tracing` subscriber. The engine crates only
//! emit events; this module is the one place a subscriber is chosen, and
//! it runs once at startup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{SupportError, SupportResult};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format for development.
    #[default]
    Pretty,
    /// Single-line format for production logs.
    Compact,
}

/// Log output destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Logging configuration, normally loaded from the support config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default maximum level, e.g. `"info"` or `"debug"`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Output destination.
    pub output: LogOutput,
    /// Full filter directives, e.g. `"basalt_object=trace,info"`.
    /// Overrides `level` when set.
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            filter: None,
        }
    }
}

impl LogConfig {
    /// Sets the maximum level.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets full filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// [`SupportError::InvalidFilter`] when the directives do not parse,
/// [`SupportError::LoggingInit`] when a subscriber is already installed
/// (tests installing their own, typically).
pub fn init(config: &LogConfig) -> SupportResult<()> {
    let directives = config.filter.as_deref().unwrap_or(&config.level);
    let filter = EnvFilter::try_new(directives).map_err(|error| SupportError::InvalidFilter {
        directives: directives.to_owned(),
        reason: error.to_string(),
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match (config.format, config.output) {
        (LogFormat::Pretty, LogOutput::Stderr) => builder
            .with_writer(std::io::stderr)
            .pretty()
            .try_init(),
        (LogFormat::Pretty, LogOutput::Stdout) => builder
            .with_writer(std::io::stdout)
            .pretty()
            .try_init(),
        (LogFormat::Compact, LogOutput::Stderr) => builder
            .with_writer(std::io::stderr)
            .compact()
            .try_init(),
        (LogFormat::Compact, LogOutput::Stdout) => builder
            .with_writer(std::io::stdout)
            .compact()
            .try_init(),
    };
    result.map_err(|error| SupportError::LoggingInit(error.to_string()))
}
