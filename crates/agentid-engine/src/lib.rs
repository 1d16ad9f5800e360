//! agentid Engine
//!
//! Classifies user-agent strings against an ordered, multi-table rule
//! database: exact robot signatures first, then browser, operating system and
//! device regex tables, each resolved first-match-wins in authored order.
//!
//! The database can be replaced at any time while classification continues;
//! a replacement is built completely and published with one atomic swap.
//!
//! ```no_run
//! use agentid_engine::{ClassificationEngine, EngineConfig, MatcherStrategy};
//! # fn sections() -> Vec<agentid_core::Section> { Vec::new() }
//!
//! let config = EngineConfig::default().with_strategy(MatcherStrategy::PerThread);
//! let engine = ClassificationEngine::new(&sections(), config)?;
//!
//! let result = engine.classify("Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Firefox/115.0");
//! println!("{} on {}", result.ua_name(), result.os_name());
//! # Ok::<(), agentid_core::BuildError>(())
//! ```

pub mod compiler;
pub mod config;
pub mod database;
pub mod engine;
pub mod entry;
pub mod matcher;
pub mod result;
pub mod stats;

pub use compiler::{CompiledPattern, CompiledTables, PatternCompiler, RuleTable};
pub use config::{DeviceFallbackIds, EngineConfig, RobotKeyMatching};
pub use database::{PatternRule, RuleDatabase};
pub use engine::ClassificationEngine;
pub use entry::{BrowserEntry, DeviceEntry, OsEntry, RobotEntry};
pub use matcher::{
    ExclusiveMatchers, Matcher, MatcherCache, MatcherSet, MatcherStrategy, PerCallMatchers,
    PerThreadMatchers, RuleMatch,
};
pub use result::{ClassificationResult, UNKNOWN};
pub use stats::{EngineStats, StatsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{EngineConfig, RobotKeyMatching};
    pub use crate::engine::ClassificationEngine;
    pub use crate::matcher::MatcherStrategy;
    pub use crate::result::ClassificationResult;
    pub use agentid_core::{BuildError, Entry, Section};
}
