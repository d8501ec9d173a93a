//! The publish step: persist the store, then stage, commit, and push the
//! document through the `git` binary. The three commands run sequentially
//! and block the caller; there is no rollback, so a push failure after a
//! successful commit leaves the local repository ahead of the remote and
//! the counter untouched.

mod counter;

use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::PublishError;
use crate::store::RecordStore;

pub use counter::{load_commit_count, save_commit_count};

/// Remote name the push targets.
const REMOTE: &str = "origin";
/// Phrase git prints on stdout when a commit is a no-op. Exit status alone
/// cannot tell a no-op commit apart from a failure, so this text match is
/// the secondary discriminator on the failure path. English-locale only.
const NOTHING_TO_COMMIT: &str = "nothing to commit";

/// How a publish run ended when no step errored.
#[derive(Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The working tree matched the last commit; nothing was pushed and the
    /// counter did not advance.
    NoChanges,
    /// Commit and push landed; `message` is the commit message that was used.
    Pushed { message: String },
}

/// Runs the stage/commit/push sequence against a fixed working tree and
/// branch, with the commit counter as the message source.
pub struct Publisher {
    repo_dir: PathBuf,
    counter_file: PathBuf,
    branch: String,
}

impl Publisher {
    pub fn new(repo_dir: PathBuf, counter_file: PathBuf, branch: impl Into<String>) -> Self {
        Self {
            repo_dir,
            counter_file,
            branch: branch.into(),
        }
    }

    /// Publish the current store contents.
    ///
    /// The pre-save is best-effort: a save failure is logged and the flow
    /// continues with whatever document is already on disk, which may be
    /// stale. The counter only advances after the push succeeds.
    pub fn publish(&self, store: &RecordStore) -> Result<PublishOutcome, PublishError> {
        if let Err(err) = store.save() {
            tracing::warn!(error = %err, "pre-publish save failed; publishing the file as-is");
        }

        let count = load_commit_count(&self.counter_file)?;
        let message = count.to_string();

        let add = self.run_git("add", &["add", "-A"])?;
        if !add.status.success() {
            return Err(command_error("add", &add));
        }

        let commit = self.run_git("commit", &["commit", "-m", &message])?;
        if !commit.status.success() {
            let stdout = String::from_utf8_lossy(&commit.stdout);
            if stdout.contains(NOTHING_TO_COMMIT) {
                tracing::info!("publish skipped: working tree is clean");
                return Ok(PublishOutcome::NoChanges);
            }
            return Err(command_error("commit", &commit));
        }

        let push = self.run_git("push", &["push", REMOTE, &self.branch])?;
        if !push.status.success() {
            return Err(command_error("push", &push));
        }

        save_commit_count(&self.counter_file, count + 1)?;
        tracing::info!(commit = %message, "published record document");
        Ok(PublishOutcome::Pushed { message })
    }

    fn run_git(&self, step: &'static str, args: &[&str]) -> Result<Output, PublishError> {
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|source| PublishError::Spawn { step, source })
    }
}

/// Build a command error from a finished step, preferring stderr but falling
/// back to stdout when git wrote its explanation there.
fn command_error(step: &'static str, output: &Output) -> PublishError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let text = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    };
    PublishError::Command { step, stderr: text }
}

#[cfg(test)]
mod tests {
    use super::command_error;
    use crate::error::PublishError;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Output};

    fn output(code: i32, stdout: &str, stderr: &str) -> Output {
        Output {
            status: ExitStatus::from_raw(code << 8),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn command_error_prefers_stderr() {
        let err = command_error("push", &output(1, "noise", "rejected"));
        match err {
            PublishError::Command { step, stderr } => {
                assert_eq!(step, "push");
                assert_eq!(stderr, "rejected");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn command_error_falls_back_to_stdout() {
        let err = command_error("commit", &output(1, "explanation on stdout", ""));
        match err {
            PublishError::Command { stderr, .. } => {
                assert_eq!(stderr, "explanation on stdout");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
