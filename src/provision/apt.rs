//! APT source registration and `apt-get` invocation

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::error::{self, Result};
use crate::progress::Spinner;
use crate::tools::display_command;

/// File name (without extension) used for our source list and keyring
pub const SOURCE_NAME: &str = "infinidat-tools";

/// First line of an ASCII-armored public key
pub const ARMOR_HEADER: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----";

/// Writes the repository source line and its key into APT's directories
#[derive(Debug, Clone)]
pub struct AptRepository {
    sources_dir: PathBuf,
    keyring_dir: PathBuf,
}

impl AptRepository {
    pub fn new(sources_dir: impl Into<PathBuf>, keyring_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources_dir: sources_dir.into(),
            keyring_dir: keyring_dir.into(),
        }
    }

    pub fn list_path(&self) -> PathBuf {
        self.sources_dir.join(format!("{SOURCE_NAME}.list"))
    }

    pub fn key_path(&self) -> PathBuf {
        self.keyring_dir.join(format!("{SOURCE_NAME}.asc"))
    }

    /// Register `source` signed by `key`, replacing any previous registration
    ///
    /// The key is stored as an `.asc` keyring, so only ASCII-armored public
    /// key blocks are accepted. Key IDs or binary keys are rejected.
    pub fn add_source(&self, source: &str, key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(error::config::invalid("repository key is empty"));
        }
        if !key.trim_start().starts_with(ARMOR_HEADER) {
            return Err(error::config::invalid(format!(
                "repository key must be an ASCII-armored public key block starting with '{ARMOR_HEADER}'"
            )));
        }

        write_file(&self.keyring_dir, &self.key_path(), key)?;
        write_file(&self.sources_dir, &self.list_path(), &format!("{source}\n"))?;
        info!("Registered {} in {}", source, self.list_path().display());
        Ok(())
    }
}

fn write_file(dir: &Path, path: &Path, contents: &str) -> Result<()> {
    fs::create_dir_all(dir)
        .and_then(|()| fs::write(path, contents))
        .map_err(|e| error::fs::write_failed(path.display().to_string(), e.to_string()))
}

/// Non-interactive `apt-get`
#[derive(Debug, Clone)]
pub struct AptGet {
    binary: PathBuf,
}

impl AptGet {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Refresh the package index; errors are only returned when `fatal`
    pub fn update(&self, fatal: bool) -> Result<()> {
        info!("Updating package index");
        let outcome = self
            .run(&["update"])
            .map_err(error::packages::refresh_failed);
        Self::settle(outcome, fatal)
    }

    /// Install `packages`; errors are only returned when `fatal`
    pub fn install(&self, packages: &[&str], fatal: bool) -> Result<()> {
        info!("Installing packages: {}", packages.join(" "));
        let mut args = vec![
            "--assume-yes",
            "--option=Dpkg::Options::=--force-confold",
            "install",
        ];
        args.extend_from_slice(packages);
        let outcome = self
            .run(&args)
            .map_err(|reason| error::packages::install_failed(packages, reason));
        Self::settle(outcome, fatal)
    }

    fn settle(outcome: Result<()>, fatal: bool) -> Result<()> {
        match outcome {
            Err(e) if !fatal => {
                warn!("{}", e);
                Ok(())
            }
            other => other,
        }
    }

    fn run(&self, args: &[&str]) -> std::result::Result<(), String> {
        let line = display_command(&self.binary, args);
        let spinner = Spinner::start(&line);
        let status = Command::new(&self.binary)
            .args(args)
            .env("DEBIAN_FRONTEND", "noninteractive")
            .status();
        spinner.finish();

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(format!("'{line}' returned {status}")),
            Err(e) => Err(format!("failed to run '{line}': {e}")),
        }
    }
}
