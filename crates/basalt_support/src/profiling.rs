//! # Scope Profiling
//!
//! Lightweight wall-clock profiling for named zones. A [`ScopeTimer`]
//! measures one scope and feeds its zone's running statistics on drop;
//! the aggregated report is read at end of run. Overhead per scope is an
//! `Instant` pair and one short map lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Profiling configuration, normally loaded from the support config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    /// Master switch; disabled timers record nothing.
    pub enabled: bool,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Running statistics for one named zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneStats {
    /// Number of completed scopes.
    pub calls: u64,
    /// Accumulated time.
    pub total: Duration,
    /// Fastest scope.
    pub min: Duration,
    /// Slowest scope.
    pub max: Duration,
}

impl ZoneStats {
    fn record(&mut self, elapsed: Duration) {
        self.calls += 1;
        self.total += elapsed;
        self.min = self.min.min(elapsed);
        self.max = self.max.max(elapsed);
    }

    /// Mean scope duration.
    #[must_use]
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            #[allow(clippy::cast_possible_truncation)]
            Duration::from_nanos((self.total.as_nanos() / u128::from(self.calls)) as u64)
        }
    }
}

/// Zone statistics aggregator.
pub struct Profiler {
    /// Per-zone running statistics.
    zones: Mutex<HashMap<&'static str, ZoneStats>>,
    /// Master switch.
    enabled: AtomicBool,
}

static GLOBAL: OnceLock<Profiler> = OnceLock::new();

impl Profiler {
    /// Creates a standalone profiler. Prefer [`Profiler::global`] outside
    /// of tests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zones: Mutex::new(HashMap::new()),
            enabled: AtomicBool::new(true),
        }
    }

    /// The process-global profiler.
    pub fn global() -> &'static Profiler {
        GLOBAL.get_or_init(Profiler::new)
    }

    /// Applies a configuration.
    pub fn configure(&self, config: &ProfilingConfig) {
        self.enabled.store(config.enabled, Ordering::Relaxed);
    }

    /// Returns `true` when timers record.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Starts a timer for `zone`, recorded on drop.
    #[must_use]
    pub fn scope(&self, zone: &'static str) -> ScopeTimer<'_> {
        ScopeTimer {
            profiler: self,
            zone,
            start: Instant::now(),
        }
    }

    /// Statistics for one zone, if it ever completed a scope.
    #[must_use]
    pub fn zone_stats(&self, zone: &str) -> Option<ZoneStats> {
        self.zones.lock().get(zone).copied()
    }

    /// Snapshot of all zones, sorted by accumulated time, slowest first.
    #[must_use]
    pub fn report(&self) -> Vec<(&'static str, ZoneStats)> {
        let mut report: Vec<(&'static str, ZoneStats)> = self
            .zones
            .lock()
            .iter()
            .map(|(&zone, &stats)| (zone, stats))
            .collect();
        report.sort_by_key(|&(_, stats)| std::cmp::Reverse(stats.total));
        report
    }

    /// Clears all statistics.
    pub fn reset(&self) {
        self.zones.lock().clear();
    }

    fn record(&self, zone: &'static str, elapsed: Duration) {
        tracing::trace!(zone, micros = elapsed.as_micros() as u64, "scope complete");
        let mut zones = self.zones.lock();
        zones
            .entry(zone)
            .or_insert(ZoneStats {
                calls: 0,
                total: Duration::ZERO,
                min: Duration::MAX,
                max: Duration::ZERO,
            })
            .record(elapsed);
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard measuring one scope of a named zone.
pub struct ScopeTimer<'a> {
    /// Owning profiler.
    profiler: &'a Profiler,
    /// Zone name.
    zone: &'static str,
    /// Scope entry time.
    start: Instant,
}

impl Drop for ScopeTimer<'_> {
    fn drop(&mut self) {
        if self.profiler.is_enabled() {
            self.profiler.record(self.zone, self.start.elapsed());
        }
    }
}
