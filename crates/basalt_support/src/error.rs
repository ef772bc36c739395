//! # Support Error Types
//!
//! All errors that can occur while setting up the support layer.

use thiserror::Error;

/// Errors raised while loading configuration or installing subscribers.
#[derive(Error, Debug)]
pub enum SupportError {
    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`crate::SupportConfig`].
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A log filter directive did not parse.
    #[error("invalid log filter {directives:?}: {reason}")]
    InvalidFilter {
        /// The rejected directive string.
        directives: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber was already installed.
    #[error("logging already initialized: {0}")]
    LoggingInit(String),
}

/// Result type for support operations.
pub type SupportResult<T> = Result<T, SupportError>;
