//! Error types and handling for infinidat-tools
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`patch`]: Config file patching errors
//! - [`tools`]: External tool errors
//! - [`packages`]: Repository and package errors
//! - [`config`]: Settings and charm option errors
//! - [`fs`]: File system errors
//! - [`runtime`]: Hook tool errors

pub mod config;
pub mod fs;
pub mod packages;
pub mod patch;
pub mod runtime;
pub mod tools;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for infinidat-tools operations
#[derive(Error, Diagnostic, Debug)]
pub enum AgentError {
    // Patch errors
    #[error("Expected pattern not found in {path}: {pattern}")]
    #[diagnostic(
        code(infinidat_tools::patch::pattern_not_found),
        help("The file was left untouched. Restore the stock anchor line and retry")
    )]
    PatternNotFound { path: String, pattern: String },

    // Tool errors
    #[error("Failed to run '{tool}': is {package} installed?")]
    #[diagnostic(
        code(infinidat_tools::tools::not_installed),
        help("Install the package providing the tool and rerun the install hook")
    )]
    ToolNotInstalled { tool: String, package: String },

    #[error("Command '{command}' failed: {reason}")]
    #[diagnostic(code(infinidat_tools::tools::command_failed))]
    CommandFailed { command: String, reason: String },

    #[error("Error regenerating initrd: {reason}")]
    #[diagnostic(code(infinidat_tools::tools::initramfs))]
    InitramfsRegeneration { reason: String },

    // Package errors
    #[error("Failed to refresh package index: {reason}")]
    #[diagnostic(
        code(infinidat_tools::packages::refresh_failed),
        help("Check that the configured install_sources repository is reachable")
    )]
    RepositoryRefresh { reason: String },

    #[error("Failed to install packages {packages}: {reason}")]
    #[diagnostic(code(infinidat_tools::packages::install_failed))]
    PackageInstall { packages: String, reason: String },

    #[error("Failed to fetch repository key from {url}: {reason}")]
    #[diagnostic(
        code(infinidat_tools::packages::key_fetch_failed),
        help("Set the install_keys option to provide the key directly")
    )]
    KeyFetch { url: String, reason: String },

    // Configuration errors
    #[error("Failed to parse configuration: {path}: {reason}")]
    #[diagnostic(code(infinidat_tools::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(infinidat_tools::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(infinidat_tools::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(infinidat_tools::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(infinidat_tools::fs::io_error))]
    IoError { message: String },

    // Runtime errors
    #[error("Hook tool '{tool}' failed: {reason}")]
    #[diagnostic(
        code(infinidat_tools::runtime::tool_failed),
        help("Hook tools are only available inside a Juju hook context; use --runtime console otherwise")
    )]
    RuntimeTool { tool: String, reason: String },

    #[error("Action '{action}' failed: {message}")]
    #[diagnostic(code(infinidat_tools::runtime::action_failed))]
    ActionFailed { action: String, message: String },
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        AgentError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AgentError {
    fn from(err: serde_yaml::Error) -> Self {
        AgentError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AgentError>;
