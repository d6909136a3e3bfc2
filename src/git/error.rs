//! Git failure classification
//!
//! Clone failures are split into two classes: authentication problems, which
//! fail immediately, and everything else, which is retried.

/// Class of a failed git invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Auth,
    Transient,
}

type FailureCheck = fn(&str) -> bool;

const FAILURE_CLASSIFICATIONS: &[(FailureCheck, FailureKind)] = &[
    (
        |msg| {
            msg.contains("authentication failed")
                || msg.contains("could not read username")
                || msg.contains("could not read password")
                || msg.contains("terminal prompts disabled")
                || msg.contains("invalid username or password")
        },
        FailureKind::Auth,
    ),
    (
        |msg| {
            msg.contains("permission denied")
                || msg.contains("host key verification failed")
                || msg.contains("the requested url returned error: 403")
        },
        FailureKind::Auth,
    ),
];

/// Classify git stderr output
pub fn classify_failure(stderr: &str) -> FailureKind {
    let msg = stderr.to_lowercase();
    FAILURE_CLASSIFICATIONS
        .iter()
        .find(|(check, _)| check(&msg))
        .map_or(FailureKind::Transient, |(_, kind)| *kind)
}

/// Last non-empty stderr line, which is where git puts its `fatal:` summary
pub fn summarize_stderr(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or("git exited with an error")
        .to_string()
}
