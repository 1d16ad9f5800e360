//! Pattern compilation
//!
//! Every rule is compiled case-insensitive with `.` matching newlines. This
//! is a fixed policy for the whole rule set, not a per-rule option.

use crate::database::{PatternRule, RuleDatabase};
use agentid_core::{BuildError, SectionKind};
use regex::{Regex, RegexBuilder};

/// A compiled rule, still carrying the id of the entry it resolves to
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    target: u64,
}

impl CompiledPattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Whether the pattern defines at least one capture group
    pub fn has_captures(&self) -> bool {
        self.regex.captures_len() > 1
    }
}

/// Turns ordered rule tables into ordered compiled tables
pub struct PatternCompiler;

impl PatternCompiler {
    /// Compile every rule, preserving order
    pub fn compile(
        kind: SectionKind,
        rules: &[PatternRule],
    ) -> Result<Vec<CompiledPattern>, BuildError> {
        Self::compile_where(kind, rules, |_| true)
    }

    /// Compile the rules accepted by `keep`, preserving order.
    ///
    /// Rejected rules are skipped without being compiled.
    pub fn compile_where(
        kind: SectionKind,
        rules: &[PatternRule],
        mut keep: impl FnMut(&PatternRule) -> bool,
    ) -> Result<Vec<CompiledPattern>, BuildError> {
        let mut compiled = Vec::with_capacity(rules.len());

        for (index, rule) in rules.iter().enumerate() {
            if !keep(rule) {
                continue;
            }

            let regex = RegexBuilder::new(&rule.source)
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
                .map_err(|source| BuildError::InvalidPattern {
                    section: kind.name(),
                    index,
                    pattern: rule.source.clone(),
                    source,
                })?;

            compiled.push(CompiledPattern {
                regex,
                target: rule.target,
            });
        }

        Ok(compiled)
    }
}

/// Which pattern table a lookup scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTable {
    Browser,
    Os,
    Device,
}

/// The compiled pattern tables of one generation
#[derive(Debug, Clone)]
pub struct CompiledTables {
    browser: Vec<CompiledPattern>,
    os: Vec<CompiledPattern>,
    device: Vec<CompiledPattern>,
}

impl CompiledTables {
    /// Compile all tables of `database`.
    ///
    /// With a family allow-list, browser rules whose target is not a listed
    /// family (or not a known browser at all) are dropped.
    pub fn compile(
        database: &RuleDatabase,
        browser_families: Option<&[String]>,
    ) -> Result<Self, BuildError> {
        let browser = match browser_families {
            Some(families) => PatternCompiler::compile_where(
                SectionKind::BrowserReg,
                database.browser_rules(),
                |rule| {
                    database
                        .browser(rule.target)
                        .is_some_and(|browser| families.iter().any(|f| *f == browser.family))
                },
            )?,
            None => PatternCompiler::compile(SectionKind::BrowserReg, database.browser_rules())?,
        };

        Ok(Self {
            browser,
            os: PatternCompiler::compile(SectionKind::OsReg, database.os_rules())?,
            device: PatternCompiler::compile(SectionKind::DeviceReg, database.device_rules())?,
        })
    }

    /// Compiled patterns of one table, in priority order
    pub fn table(&self, table: RuleTable) -> &[CompiledPattern] {
        match table {
            RuleTable::Browser => &self.browser,
            RuleTable::Os => &self.os,
            RuleTable::Device => &self.device,
        }
    }

    /// Total number of compiled patterns
    pub fn len(&self) -> usize {
        self.browser.len() + self.os.len() + self.device.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
