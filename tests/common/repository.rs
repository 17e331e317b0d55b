//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories together with private
//! config and cache directories, so that no test touches the user's real
//! preferences or status snapshots.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use vcs_overlay::core::{
    config::PERSONAL_PREFERENCES_FILE,
    database::snapshot_dir_for,
    error::{OverlayError, Result},
    git::GitRepo,
    StatusDatabase,
};

/// Test repository setup result. The TempDirs must be kept alive for the
/// duration of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    pub config_home: TempDir,
    pub cache_home: TempDir,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The vcs-overlay binary, running inside the repository with isolated directories
    pub fn overlay_cmd(&self) -> anyhow::Result<Command> {
        overlay_cmd_in(&self.path, self.config_home.path(), self.cache_home.path())
    }

    /// Write the personal preferences file the binary will read
    pub fn write_personal_preferences(&self, json: &str) -> Result<()> {
        let dir = self.config_home.path().join("vcs-overlay");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(PERSONAL_PREFERENCES_FILE), json)?;
        Ok(())
    }

    /// A database handle on the snapshot the binary will load
    pub fn database(&self) -> Result<StatusDatabase> {
        let repo_path = GitRepo::open(&self.path)?.get_repo_path();
        let cache_dir = self.cache_home.path().join("vcs-overlay");
        let snapshot_dir = snapshot_dir_for(&cache_dir, &repo_path);
        Ok(StatusDatabase::with_snapshot_dir(repo_path, snapshot_dir))
    }
}

/// The vcs-overlay binary running in `dir` with the given config and cache homes
pub fn overlay_cmd_in(
    dir: &Path,
    config_home: &Path,
    cache_home: &Path,
) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("vcs-overlay")?;
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", config_home)
        .env("XDG_CACHE_HOME", cache_home)
        .env("NO_COLOR", "1");
    Ok(cmd)
}

/// Sets up a fresh git repository for testing
///
/// Creates a temporary directory, initializes it as a git repository,
/// and sets up basic git configuration to avoid user prompts.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
        config_home: TempDir::new()?,
        cache_home: TempDir::new()?,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git(&repo.path, &["add", "initial.txt"])?;
    git(&repo.path, &["commit", "-m", "Initial commit"])?;

    Ok(repo)
}

/// Creates a file with specified content, creating parent directories as needed
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Runs a git command in the repository
pub fn git(repo_path: &Path, args: &[&str]) -> Result<()> {
    Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .map_err(OverlayError::Io)?;
    Ok(())
}
