//! Repository and package errors

use super::AgentError;

/// Creates a package index refresh error
pub fn refresh_failed(reason: impl Into<String>) -> AgentError {
    AgentError::RepositoryRefresh {
        reason: reason.into(),
    }
}

/// Creates a package install error
pub fn install_failed(packages: &[&str], reason: impl Into<String>) -> AgentError {
    AgentError::PackageInstall {
        packages: packages.join(" "),
        reason: reason.into(),
    }
}

/// Creates a repository key fetch error
pub fn key_fetch_failed(url: impl Into<String>, reason: impl Into<String>) -> AgentError {
    AgentError::KeyFetch {
        url: url.into(),
        reason: reason.into(),
    }
}
