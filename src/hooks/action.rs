use tracing::error;

use crate::host::Host;

/// Action name as declared in actions.yaml
pub const SETTINGS_CHECK_ACTION: &str = "run-infinidat-settings-check";

/// Action parameter enabling auto-fix
pub const AUTO_FIX_PARAM: &str = "auto-fix";

/// Names used to point the operator at the results file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitContext {
    pub unit_name: String,
    pub model_name: String,
}

/// Result of an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed { result: String },
    Failed { message: String },
}

/// `run-infinidat-settings-check` action
///
/// `log` receives progress messages for the action log.
pub fn settings_check<H: Host + ?Sized>(
    host: &mut H,
    auto_fix: bool,
    unit: &UnitContext,
    log: &mut dyn FnMut(&str),
) -> ActionOutcome {
    log("Running 'infinihost settings check'");
    let report = match host.settings_check_report(auto_fix) {
        Ok(report) => report,
        Err(e) => {
            let message = format!("Failed to run infinihost: {e}");
            error!("{}", message);
            return ActionOutcome::Failed { message };
        }
    };

    if auto_fix {
        log("--auto-fix is enabled, updating multipath.conf");
        if let Err(e) = host.update_multipath_conf(true) {
            let message = format!("Failed to update multipath.conf: {e}");
            error!("{}", message);
            return ActionOutcome::Failed { message };
        }
    }

    ActionOutcome::Completed {
        result: format!(
            "exit code={}\nsee 'juju ssh -m {} {} cat {}' for more details",
            report.code,
            unit.model_name,
            unit.unit_name,
            report.path.display()
        ),
    }
}
