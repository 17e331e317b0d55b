//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`OverlayError`] which covers every failure mode of the
//! overlay integration. It uses `thiserror` for ergonomic error definitions and
//! includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`OverlayError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, OverlayError>`
//!
//! # Error Categories
//! - **User preconditions**: Refresh requested while the integration is disabled
//! - **Git operations**: Repository not found, git2 library errors
//! - **Snapshot storage**: Serialization, file system and parse errors
//! - **Preferences**: Invalid exclude patterns, unreadable preference files
//!
//! Date parsing failures in lock details are deliberately absent: they never
//! leave the formatter, which falls back to the raw text.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for vcs-overlay
#[derive(Error, Debug)]
pub enum OverlayError {
    // User precondition errors
    #[error("Can't refresh the icons as the integration is disabled. Check the preferences.")]
    IntegrationDisabled,

    // Git repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Invalid UTF-8 path in repository")]
    InvalidUtf8Path,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Item errors
    #[error("'{path}' is not inside the work tree")]
    OutsideWorkTree { path: String },

    // Snapshot errors
    #[error("Could not find cache directory")]
    CacheDirectoryNotFound,

    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write status snapshot '{path}': {source}")]
    SnapshotWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read status snapshot '{path}': {source}")]
    SnapshotReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse status snapshot '{path}': {source}")]
    SnapshotParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Preference errors
    #[error("Failed to parse preferences '{path}': {source}")]
    PreferencesParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        source: globset::Error,
    },

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using OverlayError
pub type Result<T> = std::result::Result<T, OverlayError>;

impl OverlayError {
    /// Create an error for a path that lies outside the work tree
    pub fn outside_work_tree(path: impl Into<String>) -> Self {
        Self::OutsideWorkTree { path: path.into() }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a snapshot write failed error
    pub fn snapshot_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SnapshotWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a snapshot read failed error
    pub fn snapshot_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SnapshotReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a snapshot parse failed error
    pub fn snapshot_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::SnapshotParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a preferences parse failed error
    pub fn preferences_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::PreferencesParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid exclude pattern error
    pub fn invalid_exclude_pattern(pattern: impl Into<String>, source: globset::Error) -> Self {
        Self::InvalidExcludePattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Title of the blocking dialog shown for this error, if it is user-facing
    pub fn dialog_title(&self) -> Option<&'static str> {
        match self {
            Self::IntegrationDisabled => Some("Integration Disabled"),
            _ => None,
        }
    }
}
