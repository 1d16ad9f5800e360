//! Matcher caches
//!
//! A [`Matcher`] owns everything a scan mutates: its own regex scratch pool
//! and a reusable capture-location buffer. The three [`MatcherCache`]
//! strategies differ only in how long matchers live and who may use them:
//!
//! - [`PerCallMatchers`]: fresh matchers for every lookup. No shared state.
//! - [`ExclusiveMatchers`]: one matcher set reused by every call. Meant for
//!   an engine confined to a single caller, e.g. a batch job.
//! - [`PerThreadMatchers`]: one matcher set per thread, built lazily on
//!   that thread's first lookup. A thread that exits hands its slot, set
//!   included, to the next thread that starts.
//!
//! All strategies return the same first match for the same table and input.

use crate::compiler::{CompiledPattern, CompiledTables, RuleTable};
use parking_lot::Mutex;
use regex::{CaptureLocations, Regex};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use thread_local::ThreadLocal;
use tracing::warn;

/// The first rule of a table that matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Id of the entry the rule resolves to
    pub target: u64,

    /// Text of the first capture group, if the rule has one and it took part
    pub version: Option<String>,
}

/// Runtime scanner for a single compiled pattern
#[derive(Debug)]
pub struct Matcher {
    regex: Regex,
    locations: CaptureLocations,
    target: u64,
}

impl Matcher {
    pub fn new(pattern: &CompiledPattern) -> Self {
        // A cloned Regex gets its own scratch pool.
        let regex = pattern.regex().clone();
        let locations = regex.capture_locations();
        Self {
            regex,
            locations,
            target: pattern.target(),
        }
    }

    /// Scan `text`, overwriting the capture state of the previous scan
    pub fn scan(&mut self, text: &str) -> Option<RuleMatch> {
        self.regex.captures_read(&mut self.locations, text)?;

        let version = self
            .locations
            .get(1)
            .map(|(start, end)| text[start..end].to_string());

        Some(RuleMatch {
            target: self.target,
            version,
        })
    }
}

/// One matcher per compiled pattern, for every table
#[derive(Debug)]
pub struct MatcherSet {
    browser: Vec<Matcher>,
    os: Vec<Matcher>,
    device: Vec<Matcher>,
}

impl MatcherSet {
    pub fn new(tables: &CompiledTables) -> Self {
        let build = |table: RuleTable| -> Vec<Matcher> {
            tables.table(table).iter().map(Matcher::new).collect()
        };
        Self {
            browser: build(RuleTable::Browser),
            os: build(RuleTable::Os),
            device: build(RuleTable::Device),
        }
    }

    /// First match of `table`, scanning in priority order
    pub fn first_match(&mut self, table: RuleTable, text: &str) -> Option<RuleMatch> {
        let matchers = match table {
            RuleTable::Browser => &mut self.browser,
            RuleTable::Os => &mut self.os,
            RuleTable::Device => &mut self.device,
        };
        matchers.iter_mut().find_map(|matcher| matcher.scan(text))
    }
}

/// Shared contract of the matcher strategies
pub trait MatcherCache: Send + Sync {
    /// First rule of `table` matching `text`, in table order
    fn first_match(&self, table: RuleTable, text: &str) -> Option<RuleMatch>;

    /// Strategy backing this cache
    fn strategy(&self) -> MatcherStrategy;
}

/// Matcher lifetime policy, chosen per engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherStrategy {
    /// Fresh matchers on every call
    #[default]
    PerCall,

    /// One matcher set reused by all calls; for single-caller engines
    Exclusive,

    /// One matcher set per thread
    PerThread,
}

impl MatcherStrategy {
    /// Build the cache for one generation's compiled tables
    pub fn build(self, tables: Arc<CompiledTables>) -> Box<dyn MatcherCache> {
        match self {
            Self::PerCall => Box::new(PerCallMatchers::new(tables)),
            Self::Exclusive => Box::new(ExclusiveMatchers::new(tables)),
            Self::PerThread => Box::new(PerThreadMatchers::new(tables)),
        }
    }
}

/// Instantiates fresh matchers for every lookup
pub struct PerCallMatchers {
    tables: Arc<CompiledTables>,
}

impl PerCallMatchers {
    pub fn new(tables: Arc<CompiledTables>) -> Self {
        Self { tables }
    }
}

impl MatcherCache for PerCallMatchers {
    fn first_match(&self, table: RuleTable, text: &str) -> Option<RuleMatch> {
        fresh_match(&self.tables, table, text)
    }

    fn strategy(&self) -> MatcherStrategy {
        MatcherStrategy::PerCall
    }
}

/// Reuses a single matcher set across all calls.
///
/// The engine using this cache is expected to serve one caller at a time.
/// A call that finds the set busy does not wait: it scans with fresh
/// matchers instead, so results stay correct but the reuse benefit is lost.
/// The first such collision is logged.
pub struct ExclusiveMatchers {
    tables: Arc<CompiledTables>,
    matchers: Mutex<MatcherSet>,
    contended: AtomicBool,
}

impl ExclusiveMatchers {
    pub fn new(tables: Arc<CompiledTables>) -> Self {
        let matchers = Mutex::new(MatcherSet::new(&tables));
        Self {
            tables,
            matchers,
            contended: AtomicBool::new(false),
        }
    }

    /// Whether a concurrent caller was ever seen
    pub fn was_contended(&self) -> bool {
        self.contended.load(Ordering::Relaxed)
    }
}

impl MatcherCache for ExclusiveMatchers {
    fn first_match(&self, table: RuleTable, text: &str) -> Option<RuleMatch> {
        if let Some(mut matchers) = self.matchers.try_lock() {
            return matchers.first_match(table, text);
        }

        if !self.contended.swap(true, Ordering::Relaxed) {
            warn!("Exclusive matcher set used by concurrent callers; falling back to per-call matchers");
        }
        fresh_match(&self.tables, table, text)
    }

    fn strategy(&self) -> MatcherStrategy {
        MatcherStrategy::Exclusive
    }
}

/// Keeps one matcher set per thread.
///
/// Slots are indexed by thread id, and ids of exited threads are reused, so
/// the number of retained sets is bounded by the peak number of threads
/// that classified concurrently against this generation.
pub struct PerThreadMatchers {
    tables: Arc<CompiledTables>,
    sets: ThreadLocal<RefCell<MatcherSet>>,
    created: AtomicUsize,
}

impl PerThreadMatchers {
    pub fn new(tables: Arc<CompiledTables>) -> Self {
        Self {
            tables,
            sets: ThreadLocal::new(),
            created: AtomicUsize::new(0),
        }
    }

    /// Number of matcher sets built so far. Never exceeds the peak number
    /// of concurrently live threads that used this cache.
    pub fn contexts(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

impl MatcherCache for PerThreadMatchers {
    fn first_match(&self, table: RuleTable, text: &str) -> Option<RuleMatch> {
        let set = self.sets.get_or(|| {
            self.created.fetch_add(1, Ordering::Relaxed);
            RefCell::new(MatcherSet::new(&self.tables))
        });
        set.borrow_mut().first_match(table, text)
    }

    fn strategy(&self) -> MatcherStrategy {
        MatcherStrategy::PerThread
    }
}

fn fresh_match(tables: &CompiledTables, table: RuleTable, text: &str) -> Option<RuleMatch> {
    tables
        .table(table)
        .iter()
        .find_map(|pattern| Matcher::new(pattern).scan(text))
}
