//! Resolution of the application's on-disk layout beneath the user's home
//! directory. Everything the program touches lives under one folder so a
//! backup or a manual `git` session in the repo directory sees the same
//! files the TUI does.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".store-directory-manager";
/// Git working tree holding the published document.
const REPO_DIR_NAME: &str = "repo";
/// JSON document with the record array, inside the working tree.
const DATA_FILE_NAME: &str = "stores.json";
/// Commit counter. Lives outside the working tree so `git add -A` never
/// stages counter churn alongside the document.
const COUNTER_FILE_NAME: &str = "commit_count.txt";
/// Log file written by the tracing subscriber.
const LOG_FILE_NAME: &str = "manager.log";

/// Resolved locations for every file the application owns.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Git working tree that the publish step stages, commits, and pushes.
    pub repo_dir: PathBuf,
    /// The persisted record document.
    pub data_file: PathBuf,
    /// Plain-text commit counter.
    pub counter_file: PathBuf,
    /// Destination for log output.
    pub log_file: PathBuf,
}

impl AppPaths {
    /// Resolve the layout under the home directory and create the repo
    /// directory if it is missing. The document itself is not created here;
    /// an absent file reads as an empty store.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        let data_dir = base_dirs.home_dir().join(DATA_DIR_NAME);
        Self::under(data_dir)
    }

    /// Lay the files out beneath an explicit root. Split from `resolve` so
    /// tests can point the whole application at a scratch directory.
    pub fn under(data_dir: PathBuf) -> Result<Self> {
        let repo_dir = data_dir.join(REPO_DIR_NAME);
        fs::create_dir_all(&repo_dir).context("failed to create data directory")?;

        Ok(Self {
            data_file: repo_dir.join(DATA_FILE_NAME),
            counter_file: data_dir.join(COUNTER_FILE_NAME),
            log_file: data_dir.join(LOG_FILE_NAME),
            repo_dir,
        })
    }
}
