//! Terminal runtime for manual runs and tests

use console::style;

use super::Runtime;
use crate::config::CharmOptions;
use crate::error::{self, Result};
use crate::hooks::{SETTINGS_CHECK_ACTION, UnitStatus};

/// [`Runtime`] printing status and action results to stdout
///
/// Options come from the settings file. There is no action channel, so a
/// failed action is returned as an error and fails the process.
#[derive(Debug)]
pub struct ConsoleRuntime {
    options: CharmOptions,
}

impl ConsoleRuntime {
    pub fn new(options: CharmOptions) -> Self {
        Self { options }
    }
}

impl Runtime for ConsoleRuntime {
    fn options(&self) -> Result<CharmOptions> {
        Ok(self.options.clone())
    }

    fn set_status(&mut self, status: &UnitStatus) -> Result<()> {
        let name = match status {
            UnitStatus::Active(_) => style(status.name()).green().bold(),
            UnitStatus::Maintenance(_) => style(status.name()).yellow().bold(),
            UnitStatus::Blocked(_) => style(status.name()).red().bold(),
        };
        if status.message().is_empty() {
            println!("status: {name}");
        } else {
            println!("status: {name} ({})", status.message());
        }
        Ok(())
    }

    fn action_flag(&self, _name: &str) -> Result<Option<bool>> {
        Ok(None)
    }

    fn action_log(&mut self, message: &str) -> Result<()> {
        println!("{}", style(message).dim());
        Ok(())
    }

    fn action_set_result(&mut self, result: &str) -> Result<()> {
        println!("result: {result}");
        Ok(())
    }

    fn action_fail(&mut self, message: &str) -> Result<()> {
        Err(error::runtime::action_failed(SETTINGS_CHECK_ACTION, message))
    }
}
