//! Configuration handling for infinidat-tools
//!
//! This module contains data structures for:
//! - charm options (`install_sources`, `install_keys`, `lvm_global_filter`)
//! - the agent settings file (host paths, tool binaries, key URL)

pub mod options;
pub mod settings;

pub use options::CharmOptions;
pub use settings::Settings;
