use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DockhandError, Result};

/// Pseudo app name that fans a command out to every installed app.
pub const BROADCAST_TARGET: &str = "installed";

/// A validated app identifier.
///
/// Lowercase ASCII alphanumerics and interior dashes only. The identifier
/// doubles as the app directory name, the data directory name, and the
/// orchestrator project name, so validation happens once at the edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| DockhandError::InvalidAppId {
            id: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if raw == BROADCAST_TARGET {
            return Err(invalid("this name is reserved for the broadcast target"));
        }
        if raw.starts_with('-') || raw.ends_with('-') {
            return Err(invalid("must not start or end with a dash"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid(
                "only lowercase letters, digits and dashes are allowed",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AppId {
    type Err = DockhandError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// The persisted installed-apps registry.
///
/// Serialized as `{"installedApps": ["<id>", ...]}`. The array behaves as a
/// set: insert is union, remove is difference, and entries stay sorted so
/// listings and on-disk diffs are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    #[serde(default)]
    pub installed_apps: Vec<String>,
}

impl Registry {
    pub fn contains(&self, id: &AppId) -> bool {
        self.installed_apps.iter().any(|name| name == id.as_str())
    }

    /// Set-union insert. Returns false when the app was already present.
    pub fn insert(&mut self, id: &AppId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.installed_apps.push(id.to_string());
        self.installed_apps.sort();
        true
    }

    /// Set-difference remove. Returns false when the app was absent.
    pub fn remove(&mut self, id: &AppId) -> bool {
        let before = self.installed_apps.len();
        self.installed_apps.retain(|name| name != id.as_str());
        self.installed_apps.len() != before
    }
}
