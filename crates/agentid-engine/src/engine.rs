//! Classification engine
//!
//! The engine holds exactly one active generation: a [`RuleDatabase`] paired
//! with the matcher cache built over its compiled tables. Classification
//! takes a lock-free snapshot of the active generation and runs entirely
//! against it. Replacing the database builds a complete new generation first
//! and then publishes it with a single atomic swap, so a call observes either
//! the old tables or the new ones, never a mix.

use crate::compiler::{CompiledTables, RuleTable};
use crate::config::EngineConfig;
use crate::database::RuleDatabase;
use crate::matcher::{MatcherCache, MatcherStrategy};
use crate::result::{ClassificationResult, ROBOT_TYPE, UNKNOWN};
use crate::stats::{EngineStats, Outcome};
use agentid_core::{BuildError, Section};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, trace, warn};

/// Type labels whose devices fall back to "Other"
const OTHER_DEVICE_TYPES: [&str; 3] = ["Other", "Library", "Useragent Anonymizer"];

/// Type labels whose devices fall back to "Smartphone"
const SMARTPHONE_DEVICE_TYPES: [&str; 2] = ["Mobile Browser", "Wap Browser"];

/// One published database together with its matchers
struct Generation {
    number: u64,
    database: Arc<RuleDatabase>,
    matchers: Box<dyn MatcherCache>,
}

impl Generation {
    fn build(number: u64, sections: &[Section], config: &EngineConfig) -> Result<Self, BuildError> {
        let started = Instant::now();

        let database = RuleDatabase::from_sections(sections, config.robot_keys)?;
        let tables = CompiledTables::compile(&database, config.browser_families.as_deref())?;
        let patterns = tables.len();
        let matchers = config.matcher_strategy.build(Arc::new(tables));

        let elapsed = started.elapsed();
        metrics::histogram!("agentid_database_build_seconds").record(elapsed.as_secs_f64());
        info!(
            generation = number,
            robots = database.robot_count(),
            browser_rules = database.browser_rules().len(),
            os_rules = database.os_rules().len(),
            device_rules = database.device_rules().len(),
            devices = database.has_devices(),
            patterns,
            elapsed_ms = elapsed.as_millis() as u64,
            "Built rule database generation"
        );

        Ok(Self {
            number,
            database: Arc::new(database),
            matchers,
        })
    }
}

/// Classifies user-agent strings against the active rule database.
///
/// `classify` may be called from many threads at once when the engine uses
/// the per-call or per-thread matcher strategy. With
/// [`MatcherStrategy::Exclusive`] the engine should serve one caller at a
/// time; concurrent callers still get correct results but lose matcher reuse.
pub struct ClassificationEngine {
    current: ArcSwap<Generation>,
    config: EngineConfig,
    generations: AtomicU64,
    /// Held across build and publish so generations go live in number order
    reload: Mutex<()>,
    stats: EngineStats,
}

impl ClassificationEngine {
    /// Build the first generation from `sections`
    pub fn new(sections: &[Section], config: EngineConfig) -> Result<Self, BuildError> {
        let generation = Generation::build(1, sections, &config)?;

        Ok(Self {
            current: ArcSwap::from_pointee(generation),
            config,
            generations: AtomicU64::new(1),
            reload: Mutex::new(()),
            stats: EngineStats::new(),
        })
    }

    /// Build with the default configuration
    pub fn with_defaults(sections: &[Section]) -> Result<Self, BuildError> {
        Self::new(sections, EngineConfig::default())
    }

    /// Classify a user-agent string.
    ///
    /// Absent, empty or whitespace-only input yields an `unknown` result.
    pub fn classify<'a>(&self, text: impl Into<Option<&'a str>>) -> ClassificationResult {
        let Some(text) = non_empty(text.into()) else {
            self.stats.record_classification(Outcome::Empty);
            return ClassificationResult::unknown();
        };

        let generation = self.current.load();
        let database = &generation.database;
        let mut result = ClassificationResult::unknown();

        if self.match_robot(database, text, &mut result) {
            trace!(generation = generation.number, "Matched robot signature");
            self.stats.record_classification(Outcome::Robot);
            return result;
        }

        let os_resolved = match_browser(&generation, text, &mut result);

        if !os_resolved {
            if let Some(found) = generation.matchers.first_match(RuleTable::Os, text) {
                result.os = database.os(found.target).cloned();
            }
        }

        if database.has_devices() {
            let fallback = self.fallback_device(result.ua_type());
            result.device = generation
                .matchers
                .first_match(RuleTable::Device, text)
                .and_then(|found| database.device(found.target))
                .or_else(|| database.device(fallback))
                .cloned();
        }

        trace!(
            generation = generation.number,
            ua_type = result.ua_type(),
            os = result.os_name(),
            "Classified user agent"
        );

        let outcome = if result.browser.is_some() {
            Outcome::Browser
        } else {
            Outcome::Unknown
        };
        self.stats.record_classification(outcome);

        result
    }

    /// Run only the browser stage: type, version, browser entry and the
    /// browser's pinned OS. No robot, OS-rule or device lookup.
    pub fn classify_browser_only<'a>(&self, text: impl Into<Option<&'a str>>) -> ClassificationResult {
        let mut result = ClassificationResult::unknown();
        if let Some(text) = non_empty(text.into()) {
            let generation = self.current.load();
            match_browser(&generation, text, &mut result);
        }
        result
    }

    /// Family of the first matching browser rule, or `unknown`
    pub fn browser_family(&self, text: &str) -> String {
        let generation = self.current.load();
        generation
            .matchers
            .first_match(RuleTable::Browser, text.trim())
            .and_then(|found| generation.database.browser(found.target))
            .map_or_else(|| UNKNOWN.to_string(), |browser| browser.family.clone())
    }

    /// Replace the active database.
    ///
    /// The new generation is fully built before it is published. On failure
    /// the active generation stays in effect unchanged.
    ///
    /// Concurrent replacements are serialized: each one builds and publishes
    /// in turn, so [`generation`](Self::generation) never goes backwards and
    /// the last call to finish is the one left active. Classification is
    /// never blocked by a replacement.
    pub fn replace_database(&self, sections: &[Section]) -> Result<(), BuildError> {
        let _reload = self.reload.lock();
        let number = self.generations.fetch_add(1, Ordering::Relaxed) + 1;

        match Generation::build(number, sections, &self.config) {
            Ok(generation) => {
                self.current.store(Arc::new(generation));
                self.stats.record_reload(true);
                info!(generation = number, "Published rule database generation");
                Ok(())
            }
            Err(e) => {
                self.stats.record_reload(false);
                warn!(
                    error = %e,
                    active = self.generation(),
                    "Rejected rule database; keeping active generation"
                );
                Err(e)
            }
        }
    }

    /// Number of the active generation; the first build is 1
    pub fn generation(&self) -> u64 {
        self.current.load().number
    }

    /// The active database
    pub fn database(&self) -> Arc<RuleDatabase> {
        Arc::clone(&self.current.load().database)
    }

    pub fn strategy(&self) -> MatcherStrategy {
        self.current.load().matchers.strategy()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    fn match_robot(
        &self,
        database: &RuleDatabase,
        text: &str,
        result: &mut ClassificationResult,
    ) -> bool {
        let Some(robot) = database.robot(text) else {
            return false;
        };

        result.ua_type = Some(ROBOT_TYPE.to_string());
        result.os = robot.os_id.and_then(|id| database.os(id)).cloned();
        if database.has_devices() {
            result.device = database.device(self.config.device_fallback.other).cloned();
        }
        result.robot = Some(Arc::clone(robot));
        true
    }

    fn fallback_device(&self, ua_type: &str) -> u64 {
        let ids = &self.config.device_fallback;
        if OTHER_DEVICE_TYPES.contains(&ua_type) {
            ids.other
        } else if SMARTPHONE_DEVICE_TYPES.contains(&ua_type) {
            ids.smartphone
        } else {
            ids.desktop
        }
    }
}

/// Browser stage. Returns whether the OS was resolved from the browser's
/// pinned OS, in which case the OS rules are skipped.
fn match_browser(generation: &Generation, text: &str, result: &mut ClassificationResult) -> bool {
    let database = &generation.database;
    let Some(found) = generation.matchers.first_match(RuleTable::Browser, text) else {
        return false;
    };

    if let Some(browser) = database.browser(found.target) {
        result.ua_type = database.browser_type(browser.type_id).map(str::to_string);
        result.version = found.version;
        result.browser = Some(Arc::clone(browser));
    }

    match database.default_os(found.target).and_then(|id| database.os(id)) {
        Some(os) => {
            result.os = Some(Arc::clone(os));
            true
        }
        None => false,
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}
