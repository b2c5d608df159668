//! initramfs regeneration and service control

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{error, info};

use super::display_command;
use crate::error::{self, Result};
use crate::progress::Spinner;

/// Arguments for `update-initramfs`: update the images of all kernels
pub const INITRAMFS_ARGS: &[&str] = &["-u", "-k", "all"];

/// Runner for `update-initramfs -u -k all`
#[derive(Debug, Clone)]
pub struct Initramfs {
    binary: PathBuf,
}

impl Initramfs {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Regenerate the initramfs of every installed kernel
    ///
    /// Any failure, including a missing binary, is `InitramfsRegeneration`.
    pub fn regenerate(&self) -> Result<()> {
        info!("Regenerating initrd");
        let spinner = Spinner::start("Regenerating initrd");
        let status = Command::new(&self.binary).args(INITRAMFS_ARGS).status();
        spinner.finish();

        let reason = match status {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => format!(
                "'{}' returned {}",
                display_command(&self.binary, INITRAMFS_ARGS),
                status
            ),
            Err(e) => format!("failed to run {}: {}", self.binary.display(), e),
        };
        error!("Error regenerating initrd: {}", reason);
        Err(error::tools::initramfs_failed(reason))
    }
}

/// Restart `service` through systemctl
pub fn restart_service(systemctl: &Path, service: &str) -> Result<()> {
    info!("Restarting {}", service);
    let args = ["restart", service];
    let status = Command::new(systemctl)
        .args(args)
        .status()
        .map_err(|e| error::tools::command_failed(display_command(systemctl, &args), e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(error::tools::command_failed(
            display_command(systemctl, &args),
            status.to_string(),
        ))
    }
}
