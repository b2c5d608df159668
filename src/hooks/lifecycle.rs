use tracing::{error, info};

use super::HookOutcome;
use crate::config::CharmOptions;
use crate::error::Result;
use crate::host::Host;
use crate::provision;

pub const INSTALL_FAILED: &str = "Installation failed";
pub const INSTALL_REVIEW: &str = "review infinihost settings status";
pub const INITRD_FAILED: &str = "error regenerating initrd";
pub const LVM_FAILED: &str = "Failed to update lvm.conf";

/// Install hook
///
/// Provisioning, the auto-fix settings check and the multipath update must
/// all succeed, otherwise the whole sequence is retried later. A failed
/// initramfs regeneration blocks the unit but the lvm.conf filter is still
/// applied.
pub fn install<H: Host + ?Sized>(host: &mut H, options: &CharmOptions) -> HookOutcome {
    info!("Preparing Infinidat tools package installation");

    let code = match prepare(host, options) {
        Ok(code) => code,
        Err(e) => {
            error!("Failed to install packages: {}", e);
            return HookOutcome::NeedsRetry(INSTALL_FAILED.to_string());
        }
    };

    let initramfs = host.regenerate_initramfs();
    let lvm = apply_lvm_filter(host, options);

    if initramfs.is_err() {
        return HookOutcome::Blocked(INITRD_FAILED.to_string());
    }
    if let Err(outcome) = lvm {
        return outcome;
    }

    if code == 0 {
        HookOutcome::Ok(None)
    } else {
        HookOutcome::Ok(Some(INSTALL_REVIEW.to_string()))
    }
}

fn prepare<H: Host + ?Sized>(host: &mut H, options: &CharmOptions) -> Result<i32> {
    provision::provision(host, options)?;
    let code = host.settings_check(true)?;
    host.update_multipath_conf(true)?;
    Ok(code)
}

/// Config-changed hook: re-apply the lvm.conf filter
pub fn config_changed<H: Host + ?Sized>(host: &mut H, options: &CharmOptions) -> HookOutcome {
    match apply_lvm_filter(host, options) {
        Ok(()) => HookOutcome::Ok(None),
        Err(outcome) => outcome,
    }
}

/// Update-status hook: block while a mandatory option is missing
pub fn update_status(options: &CharmOptions) -> HookOutcome {
    let missing = options.missing_mandatory();
    if missing.is_empty() {
        HookOutcome::Ok(None)
    } else {
        HookOutcome::Blocked(format!("Missing option(s): {}", missing.join(", ")))
    }
}

fn apply_lvm_filter<H: Host + ?Sized>(
    host: &mut H,
    options: &CharmOptions,
) -> std::result::Result<(), HookOutcome> {
    host.set_lvm_global_filter(options.lvm_global_filter())
        .map_err(|e| {
            error!("Error while modifying lvm.conf: {}", e);
            HookOutcome::Blocked(LVM_FAILED.to_string())
        })
}
