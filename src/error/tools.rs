//! External tool errors

use super::AgentError;

/// Creates a tool not installed error
pub fn not_installed(tool: impl Into<String>, package: impl Into<String>) -> AgentError {
    AgentError::ToolNotInstalled {
        tool: tool.into(),
        package: package.into(),
    }
}

/// Creates a command failed error
pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> AgentError {
    AgentError::CommandFailed {
        command: command.into(),
        reason: reason.into(),
    }
}

/// Creates an initramfs regeneration error
pub fn initramfs_failed(reason: impl Into<String>) -> AgentError {
    AgentError::InitramfsRegeneration {
        reason: reason.into(),
    }
}
