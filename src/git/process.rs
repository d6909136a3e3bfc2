//! Bounded-time git subprocess execution
//!
//! Every git call runs with `GIT_TERMINAL_PROMPT=0` so a missing credential fails
//! instead of waiting on a prompt nobody will answer. Output pipes are drained on
//! reader threads while the child is polled, so a chatty `ls-remote` cannot block
//! on a full pipe and be mistaken for a hang.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{self, AgntcError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of a finished git process
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<bool>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status.success()));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Run `git <args>` and wait at most `timeout` for it to finish
///
/// A non-zero exit is returned as `GitOutput { success: false, .. }`, not as an
/// error; the caller decides how to classify stderr. Spawn failures and
/// timeouts are errors.
pub fn run_git(args: &[&str], cwd: Option<&Path>, timeout: Duration) -> Result<GitOutput> {
    let command = args.first().copied().unwrap_or("git").to_string();
    debug!(?args, "running git");

    let mut cmd = Command::new("git");
    cmd.args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd
        .spawn()
        .map_err(|e| error::git::command_failed(&command, format!("could not start git: {e}")))?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let finished = wait_with_deadline(&mut child, timeout)
        .map_err(|e| error::git::command_failed(&command, e.to_string()))?;

    let stdout = join(stdout);
    let stderr = join(stderr);

    match finished {
        Some(success) => Ok(GitOutput {
            success,
            stdout,
            stderr,
        }),
        None => Err(AgntcError::GitTimeout {
            command,
            seconds: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_git_version() {
        let out = run_git(&["--version"], None, Duration::from_secs(30)).unwrap();
        assert!(out.success);
        assert!(out.stdout.starts_with("git version"));
    }

    #[test]
    fn test_run_git_failure_is_not_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let out = run_git(
            &["rev-parse", "HEAD"],
            Some(temp.path()),
            Duration::from_secs(30),
        )
        .unwrap();
        assert!(!out.success);
        assert!(!out.stderr.is_empty());
    }
}
