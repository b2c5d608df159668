//! Juju dispatch entry point
//!
//! Juju runs the charm's `dispatch` script with `JUJU_DISPATCH_PATH` set to
//! `hooks/<hook>` or `actions/<action>`.

use tracing::info;

use super::Context;
use super::action;
use super::hook::{self, Event};
use crate::error::{self, Result};
use crate::hooks::SETTINGS_CHECK_ACTION;

pub const DISPATCH_PATH_ENV: &str = "JUJU_DISPATCH_PATH";

/// What a dispatch path asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Hook(Event),
    SettingsCheck,
}

impl Target {
    /// Map a dispatch path, `None` when this agent does not handle it
    pub fn from_dispatch_path(path: &str) -> Option<Self> {
        let (kind, name) = path.trim_matches('/').split_once('/')?;
        match kind {
            "hooks" => Event::from_name(name).map(Target::Hook),
            "actions" if name == SETTINGS_CHECK_ACTION => Some(Target::SettingsCheck),
            _ => None,
        }
    }
}

/// Handle the hook or action named by `JUJU_DISPATCH_PATH`
pub fn run(ctx: &mut Context) -> Result<()> {
    let path = std::env::var(DISPATCH_PATH_ENV)
        .map_err(|_| error::config::invalid(format!("{DISPATCH_PATH_ENV} is not set")))?;
    run_path(ctx, &path)
}

pub fn run_path(ctx: &mut Context, path: &str) -> Result<()> {
    match Target::from_dispatch_path(path) {
        Some(Target::Hook(event)) => hook::run(ctx, event),
        Some(Target::SettingsCheck) => action::run_settings_check(ctx, false),
        None => {
            info!("Nothing to do for {}", path);
            Ok(())
        }
    }
}
