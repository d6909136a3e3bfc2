//! Source parsing errors

use super::AgntcError;

/// Local path does not exist or is not a directory
pub fn path_not_found(path: impl Into<String>) -> AgntcError {
    AgntcError::PathNotFound { path: path.into() }
}

pub fn invalid(input: impl Into<String>, reason: impl Into<String>) -> AgntcError {
    AgntcError::InvalidSource {
        input: input.into(),
        reason: reason.into(),
    }
}
