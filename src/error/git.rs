//! Git subprocess errors

use super::AgntcError;

pub fn auth_failed(url: impl Into<String>, reason: impl Into<String>) -> AgntcError {
    AgntcError::GitAuthFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

pub fn clone_failed(url: impl Into<String>, attempts: u32, reason: impl Into<String>) -> AgntcError {
    AgntcError::GitCloneFailed {
        url: url.into(),
        attempts,
        reason: reason.into(),
    }
}

pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> AgntcError {
    AgntcError::GitCommandFailed {
        command: command.into(),
        reason: reason.into(),
    }
}
