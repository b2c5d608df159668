//! Configuration errors

use super::AgentError;

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> AgentError {
    AgentError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> AgentError {
    AgentError::ConfigInvalid {
        message: message.into(),
    }
}
