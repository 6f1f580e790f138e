//! Git status lookup for the git widget
//!
//! Any failure (not a repository, git not installed, timeout) means the
//! widget is hidden, so errors are logged and mapped to `None`.

use cstatus_core::context::GitStatus;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Look up the branch and dirty state of the repository containing `dir`
pub async fn status(dir: &str, limit: Duration) -> Option<GitStatus> {
    if dir.is_empty() {
        return None;
    }

    let branch = run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"], limit).await?;
    let branch = branch.trim().to_string();
    if branch.is_empty() {
        return None;
    }

    let has_changes = run_git(dir, &["status", "--porcelain"], limit)
        .await
        .is_some_and(|status| !status.trim().is_empty());

    Some(GitStatus {
        branch,
        has_changes,
    })
}

async fn run_git(dir: &str, args: &[&str], limit: Duration) -> Option<String> {
    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(dir)
        // No optional index.lock while the user's git may be running
        .env("GIT_OPTIONAL_LOCKS", "0")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let shown = args.join(" ");
    match timeout(limit, command.output()).await {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(Ok(output)) => {
            debug!("git {shown} in {dir} exited with {}", output.status);
            None
        }
        Ok(Err(e)) => {
            debug!("Failed to run git in {}: {}", dir, e);
            None
        }
        Err(_) => {
            debug!("git {shown} in {dir} timed out after {limit:?}");
            None
        }
    }
}
