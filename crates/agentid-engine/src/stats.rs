//! Classification counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters kept by an engine; cloning shares the same counters
#[derive(Clone, Default)]
pub struct EngineStats {
    inner: Arc<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    classifications: AtomicU64,
    robots: AtomicU64,
    browsers: AtomicU64,
    unknown: AtomicU64,
    reloads: AtomicU64,
    failed_reloads: AtomicU64,
}

impl EngineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classification by outcome
    pub(crate) fn record_classification(&self, outcome: Outcome) {
        self.inner.classifications.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Robot => &self.inner.robots,
            Outcome::Browser => &self.inner.browsers,
            Outcome::Unknown | Outcome::Empty => &self.inner.unknown,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("agentid_classifications_total", "kind" => outcome.as_str()).increment(1);
    }

    /// Record a database replacement attempt
    pub(crate) fn record_reload(&self, success: bool) {
        if success {
            self.inner.reloads.fetch_add(1, Ordering::Relaxed);
        } else {
            self.inner.failed_reloads.fetch_add(1, Ordering::Relaxed);
        }
        let outcome = if success { "ok" } else { "error" };
        metrics::counter!("agentid_database_reloads_total", "outcome" => outcome).increment(1);
    }

    /// Get current counter snapshot
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            classifications: self.inner.classifications.load(Ordering::Relaxed),
            robots: self.inner.robots.load(Ordering::Relaxed),
            browsers: self.inner.browsers.load(Ordering::Relaxed),
            unknown: self.inner.unknown.load(Ordering::Relaxed),
            reloads: self.inner.reloads.load(Ordering::Relaxed),
            failed_reloads: self.inner.failed_reloads.load(Ordering::Relaxed),
        }
    }
}

/// How a classification ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Robot,
    Browser,
    Unknown,
    Empty,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Robot => "robot",
            Self::Browser => "browser",
            Self::Unknown => "unknown",
            Self::Empty => "empty",
        }
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub classifications: u64,
    pub robots: u64,
    pub browsers: u64,
    /// Classifications that resolved neither a robot nor a browser
    pub unknown: u64,
    /// Successful database replacements, excluding the initial build
    pub reloads: u64,
    pub failed_reloads: u64,
}
