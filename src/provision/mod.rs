//! Package repository registration and package installation
//!
//! The sequence is: resolve the repository source for this release,
//! register it together with its signing key, refresh the package index and
//! install [`PACKAGES`]. Refresh and install failures are fatal.

pub mod apt;
pub mod key;

use std::path::Path;

use tracing::{info, warn};

use crate::config::CharmOptions;
use crate::error::{self, Result};
use crate::host::Host;

/// Placeholder expanded to the release codename in the source template
pub const CODENAME_PLACEHOLDER: &str = "{distrib_codename}";

/// Packages installed on the host
///
/// multipath-tools itself is expected to come with nova-compute.
pub const PACKAGES: &[&str] = &["host-power-tools", "scsitools", "multipath-tools-boot"];

/// Substitute the release codename into a repository source template
///
/// Only the exact `{distrib_codename}` token is replaced; any other brace
/// text is kept as is.
pub fn expand_source(template: &str, codename: &str) -> String {
    template.replace(CODENAME_PLACEHOLDER, codename)
}

/// Read `DISTRIB_CODENAME` from an lsb-release file, lowercased
pub fn read_codename(lsb_release: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(lsb_release)
        .map_err(|e| error::fs::read_failed(lsb_release.display().to_string(), e.to_string()))?;
    parse_codename(&contents).ok_or_else(|| {
        error::config::invalid(format!(
            "DISTRIB_CODENAME not set in {}",
            lsb_release.display()
        ))
    })
}

fn parse_codename(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        if key.trim() != "DISTRIB_CODENAME" {
            return None;
        }
        let value = value.trim().trim_matches('"').to_lowercase();
        (!value.is_empty()).then_some(value)
    })
}

/// Register the configured repository and install [`PACKAGES`]
///
/// Without `install_sources` the repository step is skipped and the packages
/// come from whatever sources the host already has.
pub fn provision<H: Host + ?Sized>(host: &mut H, options: &CharmOptions) -> Result<()> {
    if let Some(template) = options.install_sources() {
        let codename = host.distrib_codename()?;
        let source = expand_source(template, &codename);
        let key = match options.install_keys() {
            Some(key) => key.to_string(),
            None => host.fetch_default_key()?,
        };
        info!("Adding repository source: {}", source);
        host.add_source(&source, &key)?;
    } else {
        warn!("install_sources is not set, using the host's existing package sources");
    }

    host.update_index()?;
    host.install_packages(PACKAGES)?;
    Ok(())
}
