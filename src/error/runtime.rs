//! Hook tool errors

use super::AgentError;

/// Creates a hook tool failed error
pub fn tool_failed(tool: impl Into<String>, reason: impl Into<String>) -> AgentError {
    AgentError::RuntimeTool {
        tool: tool.into(),
        reason: reason.into(),
    }
}

/// Creates an action failed error
pub fn action_failed(action: impl Into<String>, message: impl Into<String>) -> AgentError {
    AgentError::ActionFailed {
        action: action.into(),
        message: message.into(),
    }
}
