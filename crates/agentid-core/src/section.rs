//! Structured rule-data input
//!
//! The rule data ships as an ini-like text file. Parsing that file is the job
//! of an upstream collaborator; the engine only consumes its output: an
//! ordered list of [`Section`]s, each holding ordered [`Entry`] values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One named section of the rule data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section name, e.g. `browser_reg`
    pub name: String,

    /// Entries in authored order
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Section {
    /// Create an empty section
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry, builder style
    pub fn with_entry<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push(Entry::new(key, values));
        self
    }

    /// The known table this section feeds, if any
    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::from_name(&self.name)
    }
}

/// A key and its ordered list of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl Entry {
    /// Create a new entry
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Value at `index`, if present
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// The section names the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Robots,
    Os,
    Browser,
    BrowserType,
    BrowserReg,
    BrowserOs,
    OsReg,
    Device,
    DeviceReg,
}

impl SectionKind {
    /// Every known kind, in the order the data file lists them
    pub const ALL: [SectionKind; 9] = [
        Self::Robots,
        Self::Os,
        Self::Browser,
        Self::BrowserType,
        Self::BrowserReg,
        Self::BrowserOs,
        Self::OsReg,
        Self::Device,
        Self::DeviceReg,
    ];

    /// Section name as it appears in the data file
    pub fn name(self) -> &'static str {
        match self {
            Self::Robots => "robots",
            Self::Os => "os",
            Self::Browser => "browser",
            Self::BrowserType => "browser_type",
            Self::BrowserReg => "browser_reg",
            Self::BrowserOs => "browser_os",
            Self::OsReg => "os_reg",
            Self::Device => "device",
            Self::DeviceReg => "device_reg",
        }
    }

    /// Look up a kind by its section name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether a generation can be built without this section.
    ///
    /// Older datasets carry no device data, so only the device tables and
    /// the browser-to-OS map are optional.
    pub fn is_mandatory(self) -> bool {
        !matches!(self, Self::Device | Self::DeviceReg | Self::BrowserOs)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strip the delimiters and trailing modifiers from a pattern as it is
/// written in the data file, e.g. `/firefox\/([0-9.]+)/si` becomes
/// `firefox\/([0-9.]+)`.
///
/// The first character is taken as the delimiter. Returns `None` when the
/// source has no closing delimiter.
pub fn strip_pattern_delimiters(source: &str) -> Option<&str> {
    let mut chars = source.chars();
    let delimiter = chars.next()?;
    let rest = chars.as_str();
    let end = rest.rfind(delimiter)?;
    Some(&rest[..end])
}
