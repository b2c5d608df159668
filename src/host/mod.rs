//! Side effects on the machine
//!
//! The lifecycle handlers only talk to the host through [`Host`], which
//! keeps them independent of the real system. [`SystemHost`] is the
//! implementation used by the binary.

mod system;

use std::path::PathBuf;

use crate::error::Result;

pub use system::SystemHost;

/// Service reloaded after multipath.conf changes
pub const MULTIPATH_SERVICE: &str = "multipathd";

/// A settings check whose output went to a results file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Exit code of `infinihost settings check`
    pub code: i32,
    /// File holding the full output
    pub path: PathBuf,
}

/// Everything the lifecycle handlers do to the machine
pub trait Host {
    /// Lowercased release codename, e.g. `jammy`
    fn distrib_codename(&self) -> Result<String>;

    /// Download the default repository key
    fn fetch_default_key(&self) -> Result<String>;

    /// Register an APT source and the key it is signed with
    fn add_source(&mut self, source: &str, key: &str) -> Result<()>;

    /// Refresh the package index; failure is fatal
    fn update_index(&mut self) -> Result<()>;

    /// Install packages; failure is fatal
    fn install_packages(&mut self, packages: &[&str]) -> Result<()>;

    /// Run the settings check with output captured in memory
    fn settings_check(&mut self, auto_fix: bool) -> Result<i32>;

    /// Run the settings check with output kept in a world-readable results file
    fn settings_check_report(&mut self, auto_fix: bool) -> Result<CheckReport>;

    /// Regenerate the initramfs of all kernels
    fn regenerate_initramfs(&mut self) -> Result<()>;

    /// Force the multipath attribute overrides, restarting multipathd if `restart`
    fn update_multipath_conf(&mut self, restart: bool) -> Result<()>;

    /// Apply the managed lvm.conf `global_filter`; empty removes it
    fn set_lvm_global_filter(&mut self, value: &str) -> Result<()>;
}
