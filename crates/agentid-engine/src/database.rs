//! Immutable rule database generations
//!
//! A [`RuleDatabase`] is built in one pass from a snapshot of structured
//! sections. It is never modified afterwards; reloading data means building a
//! new database and publishing it as a whole.

use crate::config::RobotKeyMatching;
use crate::entry::{parse_id, BrowserEntry, DeviceEntry, OsEntry, RobotEntry};
use agentid_core::{BuildError, Entry, Section, SectionKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One ordered regex rule. Its index in the table is its priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    /// Engine-ready pattern source, delimiters already removed
    pub source: String,

    /// Id of the entry this rule resolves to
    pub target: u64,
}

impl PatternRule {
    pub fn new(source: impl Into<String>, target: u64) -> Self {
        Self {
            source: source.into(),
            target,
        }
    }

    fn from_entry(kind: SectionKind, entry: &Entry) -> Result<Self, BuildError> {
        match (entry.value(0), entry.value(1)) {
            (Some(source), Some(target)) => Ok(Self {
                source: source.to_string(),
                target: parse_id(kind, &entry.key, target)?,
            }),
            _ => Err(BuildError::malformed(
                kind.name(),
                &entry.key,
                "expected a pattern and a target id",
            )),
        }
    }
}

/// All lookup tables of one generation
#[derive(Debug, PartialEq, Eq)]
pub struct RuleDatabase {
    robot_keys: RobotKeyMatching,
    robots: HashMap<String, Arc<RobotEntry>>,
    os: HashMap<u64, Arc<OsEntry>>,
    browsers: HashMap<u64, Arc<BrowserEntry>>,
    browser_types: HashMap<u64, String>,
    browser_rules: Vec<PatternRule>,
    browser_os: HashMap<u64, u64>,
    os_rules: Vec<PatternRule>,
    devices: Option<HashMap<u64, Arc<DeviceEntry>>>,
    device_rules: Vec<PatternRule>,
}

impl RuleDatabase {
    /// Build a database from structured sections.
    ///
    /// Unknown section names are ignored. When a section name repeats, the
    /// last occurrence wins. References to ids that are absent from their
    /// target table are kept and resolve to nothing at lookup time.
    pub fn from_sections(
        sections: &[Section],
        robot_keys: RobotKeyMatching,
    ) -> Result<Self, BuildError> {
        let mut latest: HashMap<SectionKind, &Section> = HashMap::new();
        for section in sections {
            match section.kind() {
                Some(kind) => {
                    latest.insert(kind, section);
                }
                None => debug!(section = %section.name, "Ignoring unknown section"),
            }
        }

        let required = |kind: SectionKind| {
            latest
                .get(&kind)
                .copied()
                .ok_or(BuildError::MissingSection(kind.name()))
        };

        let mut robots = HashMap::new();
        for entry in &required(SectionKind::Robots)?.entries {
            let robot = RobotEntry::from_entry(entry)?;
            let key = robot_keys.normalize(&robot.user_agent).into_owned();
            robots.insert(key, Arc::new(robot));
        }

        let os = id_map(required(SectionKind::Os)?, SectionKind::Os, |entry| {
            OsEntry::from_entry(entry).map(Arc::new)
        })?;

        let browsers = id_map(required(SectionKind::Browser)?, SectionKind::Browser, |entry| {
            BrowserEntry::from_entry(entry).map(Arc::new)
        })?;

        let browser_types = id_map(
            required(SectionKind::BrowserType)?,
            SectionKind::BrowserType,
            |entry| first_value(SectionKind::BrowserType, entry).map(str::to_string),
        )?;

        let browser_rules = rules(required(SectionKind::BrowserReg)?, SectionKind::BrowserReg)?;
        let os_rules = rules(required(SectionKind::OsReg)?, SectionKind::OsReg)?;

        let browser_os = match latest.get(&SectionKind::BrowserOs) {
            Some(section) => id_map(section, SectionKind::BrowserOs, |entry| {
                first_value(SectionKind::BrowserOs, entry)
                    .and_then(|raw| parse_id(SectionKind::BrowserOs, &entry.key, raw))
            })?,
            None => HashMap::new(),
        };

        let devices = latest
            .get(&SectionKind::Device)
            .map(|section| {
                id_map(section, SectionKind::Device, |entry| {
                    DeviceEntry::from_entry(entry).map(Arc::new)
                })
            })
            .transpose()?;

        let device_rules = match (&devices, latest.get(&SectionKind::DeviceReg)) {
            (Some(_), Some(section)) => rules(section, SectionKind::DeviceReg)?,
            _ => Vec::new(),
        };

        let database = Self {
            robot_keys,
            robots,
            os,
            browsers,
            browser_types,
            browser_rules,
            browser_os,
            os_rules,
            devices,
            device_rules,
        };
        database.log_dangling_references();

        Ok(database)
    }

    /// Look up a robot by its exact signature
    pub fn robot(&self, user_agent: &str) -> Option<&Arc<RobotEntry>> {
        let key = self.robot_keys.normalize(user_agent);
        self.robots.get(&*key)
    }

    pub fn os(&self, id: u64) -> Option<&Arc<OsEntry>> {
        self.os.get(&id)
    }

    pub fn browser(&self, id: u64) -> Option<&Arc<BrowserEntry>> {
        self.browsers.get(&id)
    }

    /// Label of a browser type, e.g. `Mobile Browser`
    pub fn browser_type(&self, type_id: u64) -> Option<&str> {
        self.browser_types.get(&type_id).map(String::as_str)
    }

    /// OS id a browser always runs on, if the data pins one
    pub fn default_os(&self, browser_id: u64) -> Option<u64> {
        self.browser_os.get(&browser_id).copied()
    }

    /// Device entry by id. `None` for legacy data without device tables.
    pub fn device(&self, id: u64) -> Option<&Arc<DeviceEntry>> {
        self.devices.as_ref()?.get(&id)
    }

    /// Whether this generation carries device data
    pub fn has_devices(&self) -> bool {
        self.devices.is_some()
    }

    pub fn browser_rules(&self) -> &[PatternRule] {
        &self.browser_rules
    }

    pub fn os_rules(&self) -> &[PatternRule] {
        &self.os_rules
    }

    /// Device rules in authored order; empty without device data
    pub fn device_rules(&self) -> &[PatternRule] {
        &self.device_rules
    }

    pub fn robot_keys(&self) -> RobotKeyMatching {
        self.robot_keys
    }

    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    fn log_dangling_references(&self) {
        for (browser_id, os_id) in &self.browser_os {
            if !self.os.contains_key(os_id) {
                debug!(browser_id, os_id, "Browser default OS is not in the os table");
            }
        }
        for robot in self.robots.values() {
            if let Some(os_id) = robot.os_id.filter(|id| !self.os.contains_key(id)) {
                debug!(robot = %robot.family, os_id, "Robot OS is not in the os table");
            }
        }
    }
}

fn id_map<T>(
    section: &Section,
    kind: SectionKind,
    mut parse: impl FnMut(&Entry) -> Result<T, BuildError>,
) -> Result<HashMap<u64, T>, BuildError> {
    let mut map = HashMap::with_capacity(section.entries.len());
    for entry in &section.entries {
        let id = parse_id(kind, &entry.key, &entry.key)?;
        map.insert(id, parse(entry)?);
    }
    Ok(map)
}

fn rules(section: &Section, kind: SectionKind) -> Result<Vec<PatternRule>, BuildError> {
    section
        .entries
        .iter()
        .map(|entry| PatternRule::from_entry(kind, entry))
        .collect()
}

fn first_value(kind: SectionKind, entry: &Entry) -> Result<&str, BuildError> {
    entry
        .value(0)
        .ok_or_else(|| BuildError::malformed(kind.name(), &entry.key, "entry has no value"))
}
