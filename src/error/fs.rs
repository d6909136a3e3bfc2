//! File system errors
//!
//! The io error's own message is kept in `reason`, so permission failures stay
//! recognizable to the caller.

use std::path::Path;

use super::AgntcError;

pub fn read_failed(path: &Path, err: &std::io::Error) -> AgntcError {
    AgntcError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn write_failed(path: &Path, err: &std::io::Error) -> AgntcError {
    AgntcError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

pub fn remove_failed(path: &Path, err: &std::io::Error) -> AgntcError {
    AgntcError::FileRemoveFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
