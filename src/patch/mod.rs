//! Idempotent config file patching
//!
//! - [`lvm`]: the marker-tagged `global_filter` edit for lvm.conf
//! - [`multipath`]: forced attribute values for multipath.conf
//! - [`file`]: applying a text transform to a file on disk

pub mod file;
pub mod lvm;
pub mod multipath;

use std::path::Path;

use tracing::info;

use crate::error::Result;

pub use file::patch_file;

/// Set the managed `global_filter` in the lvm.conf at `path`
pub fn apply_lvm_global_filter(path: &Path, value: &str) -> Result<bool> {
    info!("Setting lvm.conf global_filter");
    patch_file(path, |contents| lvm::set_global_filter(value, contents))
}

/// Force the multipath attribute overrides in the file at `path`
pub fn apply_multipath_overrides(path: &Path) -> Result<bool> {
    info!("Updating multipath.conf");
    patch_file(path, |contents| Ok(multipath::rewrite_attributes(contents)))
}
