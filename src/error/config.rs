//! Bundle config and manifest errors

use super::AgntcError;

pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> AgntcError {
    AgntcError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> AgntcError {
    AgntcError::ConfigInvalid {
        path: path.into(),
        message: message.into(),
    }
}

pub fn manifest_corrupt(path: impl Into<String>, reason: impl Into<String>) -> AgntcError {
    AgntcError::ManifestCorrupt {
        path: path.into(),
        reason: reason.into(),
    }
}
