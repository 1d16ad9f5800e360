//! Identity records referenced by the rule tables

use agentid_core::{BuildError, Entry, SectionKind};

/// One automated-agent signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotEntry {
    /// Exact user-agent string this robot sends
    pub user_agent: String,
    pub family: String,
    pub name: String,
    pub url: String,
    pub company: String,
    pub company_url: String,
    pub icon: String,
    /// Path of the robot's page below the info site
    pub info_path: String,
    /// Operating system the robot is known to run on
    pub os_id: Option<u64>,
}

impl RobotEntry {
    pub(crate) fn from_entry(entry: &Entry) -> Result<Self, BuildError> {
        let fields = Fields::new(SectionKind::Robots, entry, 8)?;
        let os_id = match entry.value(8).map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_id(SectionKind::Robots, &entry.key, raw)?),
        };

        Ok(Self {
            user_agent: fields.get(0),
            family: fields.get(1),
            name: fields.get(2),
            url: fields.get(3),
            company: fields.get(4),
            company_url: fields.get(5),
            icon: fields.get(6),
            info_path: fields.get(7),
            os_id,
        })
    }
}

/// One browser or client family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    /// Key into the browser type labels
    pub type_id: u64,
    pub family: String,
    pub url: String,
    pub company: String,
    pub company_url: String,
    pub icon: String,
    pub info_url: String,
}

impl BrowserEntry {
    pub(crate) fn from_entry(entry: &Entry) -> Result<Self, BuildError> {
        let fields = Fields::new(SectionKind::Browser, entry, 7)?;

        Ok(Self {
            type_id: parse_id(SectionKind::Browser, &entry.key, &entry.values[0])?,
            family: fields.get(1),
            url: fields.get(2),
            company: fields.get(3),
            company_url: fields.get(4),
            icon: fields.get(5),
            info_url: fields.get(6),
        })
    }
}

/// One operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsEntry {
    pub family: String,
    pub name: String,
    pub url: String,
    pub company: String,
    pub company_url: String,
    pub icon: String,
}

impl OsEntry {
    pub(crate) fn from_entry(entry: &Entry) -> Result<Self, BuildError> {
        let fields = Fields::new(SectionKind::Os, entry, 6)?;

        Ok(Self {
            family: fields.get(0),
            name: fields.get(1),
            url: fields.get(2),
            company: fields.get(3),
            company_url: fields.get(4),
            icon: fields.get(5),
        })
    }
}

/// One device class (desktop, tablet, smartphone, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    /// Device type label, e.g. `Tablet`
    pub device_type: String,
    pub icon: String,
    pub info_url: String,
}

impl DeviceEntry {
    pub(crate) fn from_entry(entry: &Entry) -> Result<Self, BuildError> {
        let fields = Fields::new(SectionKind::Device, entry, 3)?;

        Ok(Self {
            device_type: fields.get(0),
            icon: fields.get(1),
            info_url: fields.get(2),
        })
    }
}

/// Parse a numeric table id
pub(crate) fn parse_id(kind: SectionKind, key: &str, raw: &str) -> Result<u64, BuildError> {
    raw.trim().parse().map_err(|_| {
        BuildError::malformed(kind.name(), key, format!("{raw:?} is not a numeric id"))
    })
}

/// Positional access to an entry's values after the length was checked
struct Fields<'a> {
    values: &'a [String],
}

impl<'a> Fields<'a> {
    fn new(kind: SectionKind, entry: &'a Entry, required: usize) -> Result<Self, BuildError> {
        if entry.values.len() < required {
            return Err(BuildError::malformed(
                kind.name(),
                &entry.key,
                format!("expected {required} values, found {}", entry.values.len()),
            ));
        }
        Ok(Self {
            values: &entry.values,
        })
    }

    fn get(&self, index: usize) -> String {
        self.values[index].clone()
    }
}
