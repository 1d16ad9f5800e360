//! Engine configuration

use crate::matcher::MatcherStrategy;
use agentid_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;

/// Configuration for a [`ClassificationEngine`](crate::ClassificationEngine)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How matchers are shared between classification calls
    #[serde(default)]
    pub matcher_strategy: MatcherStrategy,

    /// How robot signatures are compared
    #[serde(default)]
    pub robot_keys: RobotKeyMatching,

    /// Only keep browser rules that resolve to one of these families
    #[serde(default)]
    pub browser_families: Option<Vec<String>>,

    /// Device ids used when no device rule matched
    #[serde(default)]
    pub device_fallback: DeviceFallbackIds,
}

/// Comparison used for the exact robot lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotKeyMatching {
    /// Both the stored signature and the lookup key are lower-cased
    #[default]
    CaseInsensitive,

    /// Byte-for-byte comparison
    CaseSensitive,
}

impl RobotKeyMatching {
    /// Normalize a signature for storage or lookup
    pub fn normalize<'a>(self, key: &'a str) -> Cow<'a, str> {
        match self {
            Self::CaseInsensitive => Cow::Owned(key.to_lowercase()),
            Self::CaseSensitive => Cow::Borrowed(key),
        }
    }
}

/// Device table ids for the categories the fallback heuristic assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFallbackIds {
    /// "Other": robots, libraries, anonymizers
    #[serde(default = "default_other")]
    pub other: u64,

    /// "Personal computer"
    #[serde(default = "default_desktop")]
    pub desktop: u64,

    /// "Smartphone": mobile and WAP browsers
    #[serde(default = "default_smartphone")]
    pub smartphone: u64,
}

fn default_other() -> u64 {
    1
}

fn default_desktop() -> u64 {
    2
}

fn default_smartphone() -> u64 {
    3
}

impl Default for DeviceFallbackIds {
    fn default() -> Self {
        Self {
            other: default_other(),
            desktop: default_desktop(),
            smartphone: default_smartphone(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the matcher strategy
    pub fn with_strategy(mut self, strategy: MatcherStrategy) -> Self {
        self.matcher_strategy = strategy;
        self
    }

    /// Set the robot key comparison
    pub fn with_robot_keys(mut self, robot_keys: RobotKeyMatching) -> Self {
        self.robot_keys = robot_keys;
        self
    }

    /// Restrict browser rules to the given families
    pub fn with_browser_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.browser_families = Some(families.into_iter().map(Into::into).collect());
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(families) = &self.browser_families {
            if families.is_empty() {
                return Err(Error::config(
                    "browser_families must list at least one family when set",
                ));
            }
        }
        Ok(())
    }
}
