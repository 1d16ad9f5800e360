//! Classification outcome

use crate::entry::{BrowserEntry, DeviceEntry, OsEntry, RobotEntry};
use std::borrow::Cow;
use std::sync::Arc;

/// Value every unresolved field reads back as
pub const UNKNOWN: &str = "unknown";

/// Type label given to robots
pub const ROBOT_TYPE: &str = "Robot";

/// Site robot info paths are relative to
pub const INFO_URL: &str = "http://user-agent-string.info";

/// Identity resolved for one user-agent string.
///
/// Entries are shared with the generation the result was computed against,
/// so a result stays valid after that generation is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pub(crate) ua_type: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) robot: Option<Arc<RobotEntry>>,
    pub(crate) browser: Option<Arc<BrowserEntry>>,
    pub(crate) os: Option<Arc<OsEntry>>,
    pub(crate) device: Option<Arc<DeviceEntry>>,
}

impl ClassificationResult {
    /// An empty result: type `unknown`, nothing attached
    pub fn unknown() -> Self {
        Self::default()
    }

    /// True iff a robot is attached and no browser is
    pub fn is_robot(&self) -> bool {
        self.robot.is_some() && self.browser.is_none()
    }

    /// Type label, e.g. `Browser`, `Robot`, `Mobile Browser`
    pub fn ua_type(&self) -> &str {
        self.ua_type.as_deref().unwrap_or(UNKNOWN)
    }

    /// First capture group of the matching browser rule
    pub fn browser_version_info(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn ua_family(&self) -> &str {
        self.agent_field(|b| &b.family, |r| &r.family)
    }

    /// Browser family plus version, or the robot's display name
    pub fn ua_name(&self) -> Cow<'_, str> {
        if let Some(browser) = &self.browser {
            return match self.version.as_deref() {
                Some(version) if !version.is_empty() => {
                    Cow::Owned(format!("{} {}", browser.family, version))
                }
                _ => Cow::Borrowed(&browser.family),
            };
        }
        match &self.robot {
            Some(robot) => Cow::Borrowed(&robot.name),
            None => Cow::Borrowed(UNKNOWN),
        }
    }

    pub fn ua_url(&self) -> &str {
        self.agent_field(|b| &b.url, |r| &r.url)
    }

    /// Info page of the browser, or of the robot on the info site
    pub fn ua_info_url(&self) -> Cow<'_, str> {
        if let Some(browser) = &self.browser {
            return Cow::Borrowed(&browser.info_url);
        }
        match &self.robot {
            Some(robot) => Cow::Owned(format!("{INFO_URL}{}", robot.info_path)),
            None => Cow::Borrowed(UNKNOWN),
        }
    }

    pub fn ua_company(&self) -> &str {
        self.agent_field(|b| &b.company, |r| &r.company)
    }

    pub fn ua_company_url(&self) -> &str {
        self.agent_field(|b| &b.company_url, |r| &r.company_url)
    }

    pub fn ua_icon(&self) -> &str {
        self.agent_field(|b| &b.icon, |r| &r.icon)
    }

    pub fn os_family(&self) -> &str {
        self.os_field(|os| &os.family)
    }

    pub fn os_name(&self) -> &str {
        self.os_field(|os| &os.name)
    }

    pub fn os_url(&self) -> &str {
        self.os_field(|os| &os.url)
    }

    pub fn os_company(&self) -> &str {
        self.os_field(|os| &os.company)
    }

    pub fn os_company_url(&self) -> &str {
        self.os_field(|os| &os.company_url)
    }

    pub fn os_icon(&self) -> &str {
        self.os_field(|os| &os.icon)
    }

    /// Device type label; `None` when no device was attached, which is
    /// always the case for data without device tables
    pub fn device_type(&self) -> Option<&str> {
        self.device.as_deref().map(|d| d.device_type.as_str())
    }

    pub fn device_icon(&self) -> Option<&str> {
        self.device.as_deref().map(|d| d.icon.as_str())
    }

    pub fn device_info_url(&self) -> Option<&str> {
        self.device.as_deref().map(|d| d.info_url.as_str())
    }

    pub fn robot(&self) -> Option<&RobotEntry> {
        self.robot.as_deref()
    }

    pub fn browser(&self) -> Option<&BrowserEntry> {
        self.browser.as_deref()
    }

    pub fn os(&self) -> Option<&OsEntry> {
        self.os.as_deref()
    }

    pub fn device(&self) -> Option<&DeviceEntry> {
        self.device.as_deref()
    }

    fn agent_field<'a>(
        &'a self,
        from_browser: impl FnOnce(&'a BrowserEntry) -> &'a String,
        from_robot: impl FnOnce(&'a RobotEntry) -> &'a String,
    ) -> &'a str {
        if let Some(browser) = self.browser.as_deref() {
            return from_browser(browser);
        }
        self.robot.as_deref().map(from_robot).map_or(UNKNOWN, String::as_str)
    }

    fn os_field<'a>(&'a self, field: impl FnOnce(&'a OsEntry) -> &'a String) -> &'a str {
        self.os.as_deref().map(field).map_or(UNKNOWN, String::as_str)
    }
}
