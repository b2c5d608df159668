//! `infinihost settings check` wrapper
//!
//! The host-power-tools utility checks the host for the recommended
//! settings. With `--auto-fix` it also fixes what is missing:
//! - generates a default multipath.conf with recommended defaults
//! - excludes local disks from the multipath configuration
//! - registers itself as a udev handler
//! - regenerates the initramfs so multipath applies there too (root on SAN)

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, error, info};

use super::{display_command, exit_code};
use crate::error::{self, Result};
use crate::progress::Spinner;

/// Package shipping the `infinihost` binary
pub const PACKAGE: &str = "host-power-tools";

/// Stripped from the child environment; a foreign `PYTHONPATH` makes
/// infinihost import incompatible modules and crash.
pub const STRIPPED_ENV: &str = "PYTHONPATH";

/// Where the tool's standard output goes
#[derive(Debug)]
pub enum OutputSink<'a> {
    /// Read into memory and logged at debug level
    Capture,
    /// Written straight to the given file
    File(&'a File),
}

/// Runner for `infinihost settings check`
#[derive(Debug, Clone)]
pub struct SettingsCheck {
    binary: PathBuf,
}

impl SettingsCheck {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments passed to the binary; `--auto-fix` is always last
    pub fn args(auto_fix: bool) -> Vec<&'static str> {
        let mut args = vec!["settings", "check"];
        if auto_fix {
            args.push("--auto-fix");
        }
        args
    }

    /// The command to spawn, with the sanitized environment
    pub fn command(&self, auto_fix: bool) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(Self::args(auto_fix));
        command.env_remove(STRIPPED_ENV);
        command
    }

    /// Run the check and return its exit code verbatim
    ///
    /// A missing binary is reported as `ToolNotInstalled`.
    pub fn run(&self, auto_fix: bool, sink: OutputSink<'_>) -> Result<i32> {
        let mut command = self.command(auto_fix);
        debug!(
            "Executing: {}",
            display_command(&self.binary, &Self::args(auto_fix))
        );

        let status = match sink {
            OutputSink::Capture => {
                command.stdout(Stdio::piped()).stderr(Stdio::inherit());
                let spinner = Spinner::start("Running infinihost settings check");
                let output = command.output().map_err(|e| self.spawn_error(&e));
                spinner.finish();
                let output = output?;
                debug!(
                    "infinihost output: {}",
                    String::from_utf8_lossy(&output.stdout)
                );
                output.status
            }
            OutputSink::File(file) => {
                let stdout = file.try_clone().map_err(|e| {
                    error::tools::command_failed(self.binary.display().to_string(), e.to_string())
                })?;
                command.stdout(Stdio::from(stdout));
                command.status().map_err(|e| self.spawn_error(&e))?
            }
        };

        let code = exit_code(status);
        info!("infinihost exit code: {}", code);
        Ok(code)
    }

    fn spawn_error(&self, err: &io::Error) -> crate::error::AgentError {
        let tool = self.binary.display().to_string();
        if err.kind() == io::ErrorKind::NotFound {
            error!("Failed to run '{}': is {} installed?", tool, PACKAGE);
            error::tools::not_installed(tool, PACKAGE)
        } else {
            error::tools::command_failed(tool, err.to_string())
        }
    }
}
