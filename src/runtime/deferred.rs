//! Deferred install marker
//!
//! A failed install leaves a marker in the state directory; the next hook
//! dispatch sees it and runs install again before its own handler.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{self, Result};

pub const MARKER_NAME: &str = "deferred-install";

#[derive(Debug, Clone)]
pub struct DeferredInstall {
    marker: PathBuf,
}

impl DeferredInstall {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            marker: state_dir.join(MARKER_NAME),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.marker.exists()
    }

    /// Ask for install to be run again
    pub fn request(&self) -> Result<()> {
        debug!("Deferring install via {}", self.marker.display());
        if let Some(dir) = self.marker.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| error::fs::write_failed(dir.display().to_string(), e.to_string()))?;
        }
        fs::write(&self.marker, b"")
            .map_err(|e| error::fs::write_failed(self.marker.display().to_string(), e.to_string()))
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.marker) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(error::fs::write_failed(
                self.marker.display().to_string(),
                e.to_string(),
            )),
        }
    }
}
