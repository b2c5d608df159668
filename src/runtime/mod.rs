//! Adapters between lifecycle outcomes and the hosting runtime
//!
//! [`JujuRuntime`] talks to the Juju hook tools; [`ConsoleRuntime`] is used
//! outside a hook context and prints to the terminal instead.

mod console;
mod deferred;
mod juju;

use clap::ValueEnum;

use crate::config::{CharmOptions, Settings};
use crate::error::Result;
use crate::hooks::UnitStatus;

pub use console::ConsoleRuntime;
pub use deferred::DeferredInstall;
pub use juju::JujuRuntime;

/// Set by Juju in every hook and action context
pub const JUJU_CONTEXT_ENV: &str = "JUJU_CONTEXT_ID";

/// Which runtime adapter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuntimeKind {
    /// Juju when running inside a hook context, console otherwise
    Auto,
    Juju,
    Console,
}

impl RuntimeKind {
    /// Resolve `Auto` given whether a Juju hook context is present
    pub fn resolve(self, in_hook_context: bool) -> Self {
        match self {
            RuntimeKind::Auto if in_hook_context => RuntimeKind::Juju,
            RuntimeKind::Auto => RuntimeKind::Console,
            other => other,
        }
    }
}

/// The hosting runtime's view of the unit
pub trait Runtime {
    /// Current charm options
    fn options(&self) -> Result<CharmOptions>;

    /// Publish the unit status
    fn set_status(&mut self, status: &UnitStatus) -> Result<()>;

    /// Boolean action parameter, `None` when not provided
    fn action_flag(&self, name: &str) -> Result<Option<bool>>;

    /// Append to the action log
    fn action_log(&mut self, message: &str) -> Result<()>;

    /// Set the action's `result` value
    fn action_set_result(&mut self, result: &str) -> Result<()>;

    /// Mark the action as failed
    fn action_fail(&mut self, message: &str) -> Result<()>;
}

/// Build the runtime for `kind`
pub fn select(kind: RuntimeKind, settings: &Settings) -> Box<dyn Runtime> {
    let in_hook_context = std::env::var_os(JUJU_CONTEXT_ENV).is_some();
    match kind.resolve(in_hook_context) {
        RuntimeKind::Juju => Box::new(JujuRuntime::new()),
        RuntimeKind::Auto | RuntimeKind::Console => {
            Box::new(ConsoleRuntime::new(settings.options.clone()))
        }
    }
}
