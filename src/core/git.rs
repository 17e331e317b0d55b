//! Git repository queries backing the status database.
//!
//! This module provides a high-level interface to the repository through the
//! [`GitRepo`] struct. It wraps the `git2` library for working-tree statuses
//! and upstream comparisons, and shells out to `git lfs` for lock listings.
//!
//! # Public API
//! - [`GitRepo`]: Main interface for git repository queries
//! - [`LfsLock`]: One lock reported by `git lfs locks`
//!
//! # Key Features
//! - **Status reading**: Convert git2 status flags to typed [`StatusRecord`]s
//! - **Remote changes**: Files added, deleted or modified on the upstream branch
//! - **Locks**: Parse `git lfs locks --verify --json` into ours/theirs locks

use crate::core::{
    error::{OverlayError, Result},
    state::{LockDetails, StatusRecord},
    status::{FileStatus, LockStatus, RemoteStatus},
};
use git2::{Repository, StatusOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LfsLock {
    pub path: String,
    pub owner: String,
    pub locked_at: String,
    pub status: LockStatus,
}

#[derive(Deserialize)]
struct LfsLockOwner {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct LfsLockEntry {
    path: String,
    #[serde(default)]
    locked_at: String,
    owner: Option<LfsLockOwner>,
}

#[derive(Deserialize)]
struct LfsVerifyOutput {
    #[serde(default)]
    ours: Vec<LfsLockEntry>,
    #[serde(default)]
    theirs: Vec<LfsLockEntry>,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    pub fn get_repo_path(&self) -> PathBuf {
        self.repo.path().to_path_buf()
    }

    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or(OverlayError::NotInGitRepo)
    }

    /// Working-tree statuses of every changed, untracked or ignored file.
    pub fn get_statuses(&self) -> Result<Vec<StatusRecord>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(true)
            .recurse_ignored_dirs(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut records = Vec::with_capacity(statuses.len());

        for entry in statuses.iter() {
            let path = entry.path().ok_or(OverlayError::InvalidUtf8Path)?;
            let status = FileStatus::from_git2(entry.status());
            if status != FileStatus::Normal {
                records.push(StatusRecord::new(path.trim_end_matches('/'), status));
            }
        }

        records.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(records)
    }

    /// Files changed on the upstream branch since the merge base with HEAD,
    /// with how each one changed.
    ///
    /// Empty when there is no upstream or nothing to pull.
    pub fn get_remote_changes(&self) -> Result<Vec<(String, RemoteStatus)>> {
        let Some((local_oid, upstream_oid)) = self.head_and_upstream()? else {
            return Ok(Vec::new());
        };

        let (_, behind) = self.repo.graph_ahead_behind(local_oid, upstream_oid)?;
        if behind == 0 {
            return Ok(Vec::new());
        }

        let base_oid = self.repo.merge_base(local_oid, upstream_oid)?;
        let base_tree = self.repo.find_commit(base_oid)?.tree()?;
        let upstream_tree = self.repo.find_commit(upstream_oid)?.tree()?;
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&base_tree), Some(&upstream_tree), None)?;

        let mut changes: Vec<(String, RemoteStatus)> = diff
            .deltas()
            .filter_map(|delta| {
                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .and_then(|p| p.to_str())?;
                Some((path.to_string(), RemoteStatus::from_delta(delta.status())))
            })
            .collect();
        changes.sort_by(|a, b| a.0.cmp(&b.0));
        changes.dedup_by(|a, b| a.0 == b.0);
        Ok(changes)
    }

    fn head_and_upstream(&self) -> Result<Option<(git2::Oid, git2::Oid)>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(_) => return Ok(None),
        };

        let (Some(local_oid), Some(branch_name)) = (head.target(), head.shorthand()) else {
            return Ok(None);
        };

        let local_branch = match self.repo.find_branch(branch_name, git2::BranchType::Local) {
            Ok(branch) => branch,
            Err(_) => return Ok(None),
        };

        let upstream_branch = match local_branch.upstream() {
            Ok(upstream) => upstream,
            Err(_) => return Ok(None), // No upstream configured
        };

        Ok(upstream_branch
            .get()
            .target()
            .map(|upstream_oid| (local_oid, upstream_oid)))
    }

    /// Locks known to the LFS server. Empty when git-lfs is unavailable.
    pub fn get_lfs_locks(&self) -> Result<Vec<LfsLock>> {
        let mut cmd = std::process::Command::new("git");
        cmd.args(["lfs", "locks", "--verify", "--json"])
            .current_dir(self.workdir()?);

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                log::debug!("git lfs unavailable: {e}");
                return Ok(Vec::new());
            }
        };

        if !output.status.success() {
            log::debug!(
                "git lfs locks failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(Vec::new());
        }

        parse_lfs_locks(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the output of `git lfs locks --verify --json`.
pub fn parse_lfs_locks(json: &str) -> Result<Vec<LfsLock>> {
    let output: LfsVerifyOutput = serde_json::from_str(json)?;

    let convert = |entry: LfsLockEntry, status: LockStatus| LfsLock {
        path: entry.path,
        owner: entry.owner.map(|owner| owner.name).unwrap_or_default(),
        locked_at: entry.locked_at,
        status,
    };

    Ok(output
        .ours
        .into_iter()
        .map(|entry| convert(entry, LockStatus::LockedHere))
        .chain(
            output
                .theirs
                .into_iter()
                .map(|entry| convert(entry, LockStatus::LockedOther)),
        )
        .collect())
}

impl LfsLock {
    pub fn details(&self) -> LockDetails {
        LockDetails {
            owner: self.owner.clone(),
            date: self.locked_at.clone(),
            path: self.path.clone(),
            message: String::new(),
        }
    }
}
