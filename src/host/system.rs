//! The real host

use std::fs;

use tracing::{info, warn};

use super::{CheckReport, Host, MULTIPATH_SERVICE};
use crate::config::Settings;
use crate::config::settings::{HostPaths, ToolCommands};
use crate::error::{self, Result};
use crate::patch;
use crate::provision::{self, apt::AptGet, apt::AptRepository, key};
use crate::tools::system::{Initramfs, restart_service};
use crate::tools::{OutputSink, SettingsCheck};

/// Prefix of the results files written by the settings check action
pub const RESULTS_PREFIX: &str = "infinihost-out-";

/// [`Host`] backed by the local machine
#[derive(Debug, Clone)]
pub struct SystemHost {
    paths: HostPaths,
    commands: ToolCommands,
    key_url: String,
}

impl SystemHost {
    pub fn new(settings: &Settings) -> Self {
        Self {
            paths: settings.paths.clone(),
            commands: settings.commands.clone(),
            key_url: settings.key_url.clone(),
        }
    }

    fn settings_check_tool(&self) -> SettingsCheck {
        SettingsCheck::new(&self.commands.infinihost)
    }
}

impl Host for SystemHost {
    fn distrib_codename(&self) -> Result<String> {
        provision::read_codename(&self.paths.lsb_release)
    }

    fn fetch_default_key(&self) -> Result<String> {
        key::fetch_key(&self.key_url)
    }

    fn add_source(&mut self, source: &str, key: &str) -> Result<()> {
        AptRepository::new(&self.paths.apt_sources_dir, &self.paths.apt_keyring_dir)
            .add_source(source, key)
    }

    fn update_index(&mut self) -> Result<()> {
        AptGet::new(&self.commands.apt_get).update(true)
    }

    fn install_packages(&mut self, packages: &[&str]) -> Result<()> {
        AptGet::new(&self.commands.apt_get).install(packages, true)
    }

    fn settings_check(&mut self, auto_fix: bool) -> Result<i32> {
        self.settings_check_tool().run(auto_fix, OutputSink::Capture)
    }

    fn settings_check_report(&mut self, auto_fix: bool) -> Result<CheckReport> {
        let dir = &self.paths.results_dir;
        fs::create_dir_all(dir)
            .map_err(|e| error::fs::write_failed(dir.display().to_string(), e.to_string()))?;

        let (file, path) = tempfile::Builder::new()
            .prefix(RESULTS_PREFIX)
            .tempfile_in(dir)
            .and_then(|tmp| tmp.keep().map_err(|e| e.error))
            .map_err(|e| error::fs::write_failed(dir.display().to_string(), e.to_string()))?;

        let code = self
            .settings_check_tool()
            .run(auto_fix, OutputSink::File(&file))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).map_err(|e| {
                error::fs::write_failed(path.display().to_string(), e.to_string())
            })?;
        }

        info!("infinihost output saved to {}", path.display());
        Ok(CheckReport { code, path })
    }

    fn regenerate_initramfs(&mut self) -> Result<()> {
        Initramfs::new(&self.commands.update_initramfs).regenerate()
    }

    fn update_multipath_conf(&mut self, restart: bool) -> Result<()> {
        patch::apply_multipath_overrides(&self.paths.multipath_conf)?;
        if restart {
            // A failed restart leaves the new config for the next start
            if let Err(e) = restart_service(&self.commands.systemctl, MULTIPATH_SERVICE) {
                warn!("{}", e);
            }
        }
        Ok(())
    }

    fn set_lvm_global_filter(&mut self, value: &str) -> Result<()> {
        patch::apply_lvm_global_filter(&self.paths.lvm_conf, value)?;
        Ok(())
    }
}
