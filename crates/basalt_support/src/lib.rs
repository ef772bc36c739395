//! # Basalt Support
//!
//! The thin utility layer under the engine: logging setup, scope
//! profiling, date/time formatting, system introspection and the startup
//! configuration that wires them together.
//!
//! ## Architecture Rules
//!
//! 1. **Thin wrappers only** - std and the logging stack, nothing clever
//! 2. **One subscriber, installed here** - engine crates emit `tracing`
//!    events and never install subscribers themselves
//! 3. **Config is read once** - at startup, from TOML, defaults on absence
//!
//! ## Example
//!
//! ```rust,ignore
//! use basalt_support::{logging, Profiler, SupportConfig};
//!
//! let config = SupportConfig::load_or_default("basalt.toml".as_ref())?;
//! logging::init(&config.logging)?;
//! Profiler::global().configure(&config.profiling);
//!
//! let _frame = Profiler::global().scope("frame");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod profiling;
pub mod sysinfo;

pub use config::SupportConfig;
pub use datetime::{CivilDateTime, Timestamp};
pub use error::{SupportError, SupportResult};
pub use logging::{LogConfig, LogFormat, LogOutput};
pub use profiling::{Profiler, ProfilingConfig, ScopeTimer, ZoneStats};
pub use sysinfo::SystemInfo;
