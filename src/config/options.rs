//! Operator-supplied charm options

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default repository source; `{distrib_codename}` is expanded at install time
pub const DEFAULT_INSTALL_SOURCES: &str =
    "deb https://repo.infinidat.com/packages/main-stable/apt/linux-ubuntu {distrib_codename} main";

/// Charm options as exposed by `config-get` or the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharmOptions {
    /// Repository source template
    pub install_sources: Option<String>,

    /// ASCII-armored repository key; fetched from the default URL when unset.
    /// Key IDs are not accepted.
    pub install_keys: Option<String>,

    /// Value for `devices/global_filter` in lvm.conf; empty removes our edit
    pub lvm_global_filter: Option<String>,
}

impl Default for CharmOptions {
    fn default() -> Self {
        Self {
            install_sources: Some(DEFAULT_INSTALL_SOURCES.to_string()),
            install_keys: None,
            lvm_global_filter: None,
        }
    }
}

impl CharmOptions {
    /// Parse options from `config-get --format=json` output
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options)
    }

    pub fn install_sources(&self) -> Option<&str> {
        non_empty(self.install_sources.as_deref())
    }

    pub fn install_keys(&self) -> Option<&str> {
        non_empty(self.install_keys.as_deref())
    }

    /// The filter value, or `""` when unset
    pub fn lvm_global_filter(&self) -> &str {
        self.lvm_global_filter.as_deref().unwrap_or_default()
    }

    /// Names of mandatory options that are unset or empty
    pub fn missing_mandatory(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.install_sources().is_none() {
            missing.push("install_sources");
        }
        missing
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
