//! Agent settings file
//!
//! Every section is optional; missing values fall back to the stock
//! Ubuntu locations so a bare `infinidat-tools install` works on a host.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::CharmOptions;
use crate::error::{self, Result};

/// Where the default repository key is downloaded from
pub const DEFAULT_REPO_KEY_URL: &str = "https://repo.infinidat.com/packages/gpg.key";

/// Settings loaded from `--settings` / `INFINIDAT_TOOLS_SETTINGS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Charm options used by the console runtime
    pub options: CharmOptions,

    /// Files and directories on the host
    pub paths: HostPaths,

    /// External binaries
    pub commands: ToolCommands,

    /// URL of the default repository key
    pub key_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            options: CharmOptions::default(),
            paths: HostPaths::default(),
            commands: ToolCommands::default(),
            key_url: DEFAULT_REPO_KEY_URL.to_string(),
        }
    }
}

/// Host file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostPaths {
    pub multipath_conf: PathBuf,
    pub lvm_conf: PathBuf,
    /// Directory receiving `infinihost-out-*` files from the action
    pub results_dir: PathBuf,
    pub lsb_release: PathBuf,
    pub apt_sources_dir: PathBuf,
    pub apt_keyring_dir: PathBuf,
    /// Holds the deferred-install marker
    pub state_dir: PathBuf,
}

impl Default for HostPaths {
    fn default() -> Self {
        Self {
            multipath_conf: PathBuf::from("/etc/multipath.conf"),
            lvm_conf: PathBuf::from("/etc/lvm/lvm.conf"),
            results_dir: PathBuf::from("/home/ubuntu/infinihost-results"),
            lsb_release: PathBuf::from("/etc/lsb-release"),
            apt_sources_dir: PathBuf::from("/etc/apt/sources.list.d"),
            apt_keyring_dir: PathBuf::from("/etc/apt/trusted.gpg.d"),
            state_dir: PathBuf::from("/var/lib/infinidat-tools"),
        }
    }
}

/// External binaries, resolved through `PATH` unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolCommands {
    pub infinihost: PathBuf,
    pub apt_get: PathBuf,
    pub update_initramfs: PathBuf,
    pub systemctl: PathBuf,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self {
            infinihost: PathBuf::from("infinihost"),
            apt_get: PathBuf::from("apt-get"),
            update_initramfs: PathBuf::from("update-initramfs"),
            systemctl: PathBuf::from("systemctl"),
        }
    }
}

impl Settings {
    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(yaml)?;
        Ok(settings)
    }

    /// Load settings from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let yaml = std::fs::read_to_string(path)
            .map_err(|e| error::fs::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&yaml)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }
}
