//! Type-safe version-control status enumerations.
//!
//! This module defines the three independent status axes an item can carry:
//! its local file state ([`FileStatus`]), its state relative to the remote
//! ([`RemoteStatus`]) and its lock ownership ([`LockStatus`]).
//!
//! # Public API
//! - [`FileStatus`]: Local working-copy status of an item
//! - [`RemoteStatus`]: Whether the remote holds newer changes for the item
//! - [`LockStatus`]: LFS lock ownership of the item
//! - [`nicify_name`]: Turns a `CamelCase` variant name into spaced words
//!
//! # Key Features
//! - **git2 integration**: Direct conversion from git2::Status flags
//! - **Display formatting**: Human readable names for dialogs and CLI output

use serde::{Deserialize, Serialize};
use std::fmt;

/// Local working-copy status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FileStatus {
    /// No known status, nothing to draw
    #[default]
    None,
    /// Versioned and unchanged
    Normal,
    /// Scheduled for addition
    Added,
    /// Merge conflict pending
    Conflicted,
    /// Scheduled for deletion
    Deleted,
    /// Matched by an ignore rule
    Ignored,
    /// Content changed
    Modified,
    /// Type changed or replaced in place
    Replaced,
    /// Present on disk but not versioned
    Unversioned,
    /// Excluded from the integration by user patterns
    Excluded,
    /// Versioned but missing on disk
    Missing,
    /// Renamed or moved
    Renamed,
}

impl FileStatus {
    /// Convert from git2::Status flags.
    ///
    /// Conflicts win over everything else, then index changes, then working
    /// tree changes. Returns `Normal` for a clean entry.
    pub fn from_git2(flags: git2::Status) -> FileStatus {
        if flags.contains(git2::Status::CONFLICTED) {
            return FileStatus::Conflicted;
        }
        if flags.contains(git2::Status::IGNORED) {
            return FileStatus::Ignored;
        }
        if flags.contains(git2::Status::INDEX_NEW) {
            return FileStatus::Added;
        }
        if flags.contains(git2::Status::WT_NEW) {
            return FileStatus::Unversioned;
        }
        if flags.intersects(git2::Status::INDEX_DELETED) {
            return FileStatus::Deleted;
        }
        if flags.contains(git2::Status::WT_DELETED) {
            return FileStatus::Missing;
        }
        if flags.intersects(git2::Status::INDEX_RENAMED | git2::Status::WT_RENAMED) {
            return FileStatus::Renamed;
        }
        if flags.intersects(git2::Status::INDEX_TYPECHANGE | git2::Status::WT_TYPECHANGE) {
            return FileStatus::Replaced;
        }
        if flags.intersects(git2::Status::INDEX_MODIFIED | git2::Status::WT_MODIFIED) {
            return FileStatus::Modified;
        }

        FileStatus::Normal
    }

    /// Short marker used for the icon in terminal output
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::None => "",
            FileStatus::Normal => "✓",
            FileStatus::Added => "+",
            FileStatus::Conflicted => "!",
            FileStatus::Deleted => "-",
            FileStatus::Ignored => "·",
            FileStatus::Modified => "M",
            FileStatus::Replaced => "T",
            FileStatus::Unversioned => "?",
            FileStatus::Excluded => "x",
            FileStatus::Missing => "~",
            FileStatus::Renamed => "R",
        }
    }

    /// Whether an icon exists for this status at all
    pub fn has_icon(&self) -> bool {
        !matches!(self, FileStatus::None)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// State of the item relative to its remote counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RemoteStatus {
    #[default]
    None,
    Added,
    Deleted,
    Modified,
}

impl RemoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteStatus::None => "",
            RemoteStatus::Added => "⇣+",
            RemoteStatus::Deleted => "⇣-",
            RemoteStatus::Modified => "⇣",
        }
    }

    /// Convert how a file changed between two upstream trees
    pub fn from_delta(delta: git2::Delta) -> RemoteStatus {
        match delta {
            git2::Delta::Added | git2::Delta::Copied => RemoteStatus::Added,
            git2::Delta::Deleted => RemoteStatus::Deleted,
            git2::Delta::Unmodified => RemoteStatus::None,
            _ => RemoteStatus::Modified,
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Lock ownership of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LockStatus {
    #[default]
    NoLock,
    /// Locked by the current user in this working copy
    LockedHere,
    /// Locked by someone else
    LockedOther,
    /// Locked here, but the lock was broken or stolen on the server
    LockedButStolen,
}

impl LockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockStatus::NoLock => "",
            LockStatus::LockedHere => "🔒",
            LockStatus::LockedOther => "🔐",
            LockStatus::LockedButStolen => "🔓",
        }
    }

    /// Human readable name, e.g. `"Locked Other"`
    pub fn nicified(&self) -> String {
        nicify_name(&format!("{self:?}"))
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Insert spaces before every interior capital letter of a `CamelCase` name.
///
/// Runs of capitals stay together (`"LFSLock"` becomes `"LFS Lock"`).
pub fn nicify_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                result.push(' ');
            }
        }
        result.push(c);
    }

    result
}
