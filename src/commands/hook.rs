//! Lifecycle hook commands

use tracing::{info, warn};

use super::Context;
use crate::config::CharmOptions;
use crate::error::Result;
use crate::hooks::{self, HookOutcome, UnitStatus};

/// Status shown while the install sequence runs
pub const INSTALLING: &str = "Installing Infinidat tools";

/// Lifecycle events handled by this agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Install,
    Start,
    ConfigChanged,
    UpdateStatus,
}

impl Event {
    /// Hook name as used in `hooks/<name>`
    pub fn name(self) -> &'static str {
        match self {
            Event::Install => "install",
            Event::Start => "start",
            Event::ConfigChanged => "config-changed",
            Event::UpdateStatus => "update-status",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            Event::Install,
            Event::Start,
            Event::ConfigChanged,
            Event::UpdateStatus,
        ]
        .into_iter()
        .find(|event| event.name() == name)
    }
}

/// Handle one lifecycle event
///
/// A pending deferred install runs first. If it fails again the event
/// itself is skipped so the unit stays blocked on the install failure.
pub fn run(ctx: &mut Context, event: Event) -> Result<()> {
    let options = ctx.runtime.options()?;

    if event != Event::Install && ctx.deferred.is_pending() {
        info!("Re-running deferred install before {}", event.name());
        if install(ctx, &options)?.needs_retry() {
            warn!("Install is still failing, skipping {}", event.name());
            return Ok(());
        }
    }

    info!("Handling {} hook", event.name());
    let outcome = match event {
        Event::Install => {
            install(ctx, &options)?;
            return Ok(());
        }
        Event::ConfigChanged => hooks::config_changed(ctx.host.as_mut(), &options),
        Event::Start | Event::UpdateStatus => hooks::update_status(&options),
    };
    ctx.runtime.set_status(&outcome.status())
}

fn install(ctx: &mut Context, options: &CharmOptions) -> Result<HookOutcome> {
    ctx.runtime
        .set_status(&UnitStatus::Maintenance(INSTALLING.to_string()))?;

    let outcome = hooks::install(ctx.host.as_mut(), options);
    ctx.runtime.set_status(&outcome.status())?;

    if outcome.needs_retry() {
        ctx.deferred.request()?;
    } else {
        ctx.deferred.clear()?;
    }
    Ok(outcome)
}
