//! Lifecycle handlers
//!
//! Each handler runs to completion and returns an explicit outcome; the
//! runtime adapter turns that into unit status, deferral and action results.
//!
//! - [`install`]: repository, packages, settings check, multipath, initramfs, lvm
//! - [`config_changed`]: re-applies the lvm.conf filter
//! - [`update_status`]: mandatory option check, also used on `start`
//! - [`settings_check`]: the `run-infinidat-settings-check` action

mod action;
mod lifecycle;

#[cfg(test)]
mod tests;

use std::fmt;

pub use action::{ActionOutcome, AUTO_FIX_PARAM, SETTINGS_CHECK_ACTION, UnitContext, settings_check};
pub use lifecycle::{config_changed, install, update_status};

#[cfg(test)]
pub use lifecycle::{INITRD_FAILED, INSTALL_FAILED, INSTALL_REVIEW, LVM_FAILED};

/// Observable unit state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    Active(Option<String>),
    Maintenance(String),
    Blocked(String),
}

impl UnitStatus {
    /// Status name as used by `status-set`
    pub fn name(&self) -> &'static str {
        match self {
            UnitStatus::Active(_) => "active",
            UnitStatus::Maintenance(_) => "maintenance",
            UnitStatus::Blocked(_) => "blocked",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UnitStatus::Active(message) => message.as_deref().unwrap_or_default(),
            UnitStatus::Maintenance(message) | UnitStatus::Blocked(message) => message,
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message().is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{} ({})", self.name(), self.message())
        }
    }
}

/// Result of a lifecycle hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The unit is active, optionally with a message
    Ok(Option<String>),
    /// Operator intervention is needed
    Blocked(String),
    /// The hook failed and install must be run again later
    NeedsRetry(String),
}

impl HookOutcome {
    /// Unit status to report for this outcome
    pub fn status(&self) -> UnitStatus {
        match self {
            HookOutcome::Ok(message) => UnitStatus::Active(message.clone()),
            HookOutcome::Blocked(reason) | HookOutcome::NeedsRetry(reason) => {
                UnitStatus::Blocked(reason.clone())
            }
        }
    }

    pub fn needs_retry(&self) -> bool {
        matches!(self, HookOutcome::NeedsRetry(_))
    }
}
