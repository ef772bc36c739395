//! # System Introspection
//!
//! Captures the facts about the host the engine reports in logs and
//! crash dumps. Std wrappers only; anything deeper belongs in a platform
//! layer.

use std::fmt;

/// A snapshot of the host system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemInfo {
    /// Operating system, e.g. `"linux"`.
    pub os: &'static str,
    /// OS family, e.g. `"unix"`.
    pub family: &'static str,
    /// CPU architecture, e.g. `"x86_64"`.
    pub arch: &'static str,
    /// Logical CPU count; 1 when the query fails.
    pub logical_cpus: usize,
    /// Host name from the environment, when set.
    pub hostname: Option<String>,
}

impl SystemInfo {
    /// Captures the current host.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            os: std::env::consts::OS,
            family: std::env::consts::FAMILY,
            arch: std::env::consts::ARCH,
            logical_cpus: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
            hostname: std::env::var("HOSTNAME").ok().filter(|name| !name.is_empty()),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} cpus)",
            self.os, self.arch, self.logical_cpus
        )?;
        if let Some(hostname) = &self.hostname {
            write!(f, " on {hostname}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_populated() {
        let info = SystemInfo::capture();
        assert!(!info.os.is_empty());
        assert!(!info.arch.is_empty());
        assert!(info.logical_cpus >= 1);
    }

    #[test]
    fn test_display_mentions_os_and_arch() {
        let info = SystemInfo::capture();
        let line = info.to_string();
        assert!(line.contains(info.os));
        assert!(line.contains(info.arch));
    }
}
