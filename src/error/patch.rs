//! Config file patching errors

use super::AgentError;

/// Creates a pattern not found error
pub fn pattern_not_found(path: impl Into<String>, pattern: impl Into<String>) -> AgentError {
    AgentError::PatternNotFound {
        path: path.into(),
        pattern: pattern.into(),
    }
}
