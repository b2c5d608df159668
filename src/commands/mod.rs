//! Command implementations for the infinidat-tools CLI

pub mod action;
pub mod completions;
pub mod dispatch;
pub mod hook;
pub mod version;

use crate::cli::Cli;
use crate::config::Settings;
use crate::error::Result;
use crate::hooks::UnitContext;
use crate::host::{Host, SystemHost};
use crate::runtime::{self, DeferredInstall, Runtime};

/// Everything a hook or action needs
pub struct Context {
    pub runtime: Box<dyn Runtime>,
    pub host: Box<dyn Host>,
    pub unit: UnitContext,
    pub deferred: DeferredInstall,
}

impl Context {
    /// Build the context from the global CLI options
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings = Settings::load(cli.settings.as_deref())?;
        let unit = UnitContext {
            unit_name: cli.unit_name.clone(),
            model_name: cli.model_name.clone(),
        };
        Ok(Self::new(
            &settings,
            runtime::select(cli.runtime, &settings),
            Box::new(SystemHost::new(&settings)),
            unit,
        ))
    }

    pub fn new(
        settings: &Settings,
        runtime: Box<dyn Runtime>,
        host: Box<dyn Host>,
        unit: UnitContext,
    ) -> Self {
        Self {
            runtime,
            host,
            unit,
            deferred: DeferredInstall::new(&settings.paths.state_dir),
        }
    }
}
