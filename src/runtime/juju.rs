//! Juju hook tools

use std::process::Command;

use tracing::debug;

use super::Runtime;
use crate::config::CharmOptions;
use crate::error::{self, Result};
use crate::hooks::UnitStatus;

/// [`Runtime`] backed by `status-set`, `config-get` and the action tools
#[derive(Debug, Default)]
pub struct JujuRuntime;

impl JujuRuntime {
    pub fn new() -> Self {
        Self
    }

    fn run(tool: &str, args: &[&str]) -> Result<String> {
        debug!("Calling {} {:?}", tool, args);
        let output = Command::new(tool)
            .args(args)
            .output()
            .map_err(|e| error::runtime::tool_failed(tool, e.to_string()))?;

        if !output.status.success() {
            return Err(error::runtime::tool_failed(
                tool,
                format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Arguments for `status-set`
pub fn status_args(status: &UnitStatus) -> Vec<&str> {
    vec![status.name(), status.message()]
}

/// Parse the JSON printed by `action-get <name> --format=json`
pub fn parse_flag(json: &str) -> Result<Option<bool>> {
    let value: serde_json::Value = serde_json::from_str(json.trim())?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Bool(flag) => Ok(Some(flag)),
        serde_json::Value::String(s) => match s.as_str() {
            "true" => Ok(Some(true)),
            "false" | "" => Ok(Some(false)),
            other => Err(error::config::invalid(format!(
                "expected a boolean action parameter, got '{other}'"
            ))),
        },
        other => Err(error::config::invalid(format!(
            "expected a boolean action parameter, got {other}"
        ))),
    }
}

impl Runtime for JujuRuntime {
    fn options(&self) -> Result<CharmOptions> {
        let json = Self::run("config-get", &["--format=json"])?;
        CharmOptions::from_json(&json)
    }

    fn set_status(&mut self, status: &UnitStatus) -> Result<()> {
        Self::run("status-set", &status_args(status)).map(|_| ())
    }

    fn action_flag(&self, name: &str) -> Result<Option<bool>> {
        let json = Self::run("action-get", &[name, "--format=json"])?;
        parse_flag(&json)
    }

    fn action_log(&mut self, message: &str) -> Result<()> {
        Self::run("action-log", &[message]).map(|_| ())
    }

    fn action_set_result(&mut self, result: &str) -> Result<()> {
        let arg = format!("result={result}");
        Self::run("action-set", &[arg.as_str()]).map(|_| ())
    }

    fn action_fail(&mut self, message: &str) -> Result<()> {
        Self::run("action-fail", &[message]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_args() {
        assert_eq!(status_args(&UnitStatus::Active(None)), vec!["active", ""]);
        assert_eq!(
            status_args(&UnitStatus::Blocked("Installation failed".to_string())),
            vec!["blocked", "Installation failed"]
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true\n").unwrap(), Some(true));
        assert_eq!(parse_flag("false").unwrap(), Some(false));
        assert_eq!(parse_flag("\"true\"").unwrap(), Some(true));
        assert_eq!(parse_flag("null").unwrap(), None);
        assert!(parse_flag("\"maybe\"").is_err());
        assert!(parse_flag("3").is_err());
    }

    #[test]
    fn test_missing_hook_tool_is_runtime_error() {
        let err = JujuRuntime::run("definitely-not-a-juju-tool", &[]).unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-juju-tool"));
    }
}
