//! # Startup Configuration
//!
//! The support layer's settings, loaded once from TOML at startup.
//! A missing file means defaults, not an error; a present-but-broken
//! file is always an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SupportResult;
use crate::logging::LogConfig;
use crate::profiling::ProfilingConfig;

/// Top-level support configuration.
///
/// ```toml
/// [logging]
/// level = "debug"
/// format = "compact"
///
/// [profiling]
/// enabled = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Logging settings.
    pub logging: LogConfig,
    /// Profiling settings.
    pub profiling: ProfilingConfig,
}

impl SupportConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// [`crate::SupportError::ConfigParse`] on invalid TOML or unknown
    /// field values.
    pub fn from_toml(input: &str) -> SupportResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Loads from a file.
    ///
    /// # Errors
    ///
    /// [`crate::SupportError::ConfigIo`] when the file cannot be read,
    /// [`crate::SupportError::ConfigParse`] when it does not parse.
    pub fn from_path(path: &Path) -> SupportResult<Self> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Loads from a file, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Same as [`SupportConfig::from_path`], except a missing file.
    pub fn load_or_default(path: &Path) -> SupportResult<Self> {
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self::default())
        }
    }
}
