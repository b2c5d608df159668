//! The settings check action

use tracing::{error, info, warn};

use super::Context;
use crate::error::Result;
use crate::hooks::{self, AUTO_FIX_PARAM, ActionOutcome};

/// Run `infinihost settings check` as an action
///
/// Auto-fix is on when requested on the command line or through the
/// action's `auto-fix` parameter. Failures talking to the runtime are
/// reported through `action-fail` like any other action failure.
pub fn run_settings_check(ctx: &mut Context, auto_fix: bool) -> Result<()> {
    let auto_fix = match ctx.runtime.action_flag(AUTO_FIX_PARAM) {
        Ok(flag) => auto_fix || flag.unwrap_or(false),
        Err(e) => return fail(ctx, &format!("Failed to read action parameters: {e}")),
    };
    info!("Running settings check action (auto_fix={})", auto_fix);

    let runtime = &mut ctx.runtime;
    let outcome = hooks::settings_check(ctx.host.as_mut(), auto_fix, &ctx.unit, &mut |m: &str| {
        if let Err(e) = runtime.action_log(m) {
            warn!("Failed to write action log: {}", e);
        }
    });

    match outcome {
        ActionOutcome::Completed { result } => match ctx.runtime.action_set_result(&result) {
            Ok(()) => Ok(()),
            Err(e) => fail(ctx, &format!("Failed to set action result: {e}")),
        },
        ActionOutcome::Failed { message } => ctx.runtime.action_fail(&message),
    }
}

fn fail(ctx: &mut Context, message: &str) -> Result<()> {
    error!("{}", message);
    ctx.runtime.action_fail(message)
}
