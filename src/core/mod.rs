//! Core functionality for the vcs-overlay tool.
//!
//! This module provides the fundamental building blocks: status types, icon
//! resolution, lock detail formatting, the refresh lifecycle, the overlay
//! controller and the git-backed status database behind it.

pub mod collaborators;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod database;
pub mod dirs;
pub mod error;
pub mod geometry;
pub mod git;
pub mod host;
pub mod icon_resolver;
pub mod lock_details;
pub mod matcher;
pub mod output;
pub mod overlay;
pub mod preferences;
pub mod refresh;
pub mod state;
pub mod status;

#[cfg(test)]
pub(crate) mod test_support;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{OverlayError, Result};

// === Status model ===
// Typed statuses and the cached record of one item
pub use state::{ItemId, LockDetails, StatusRecord};
pub use status::{FileStatus, LockStatus, RemoteStatus};

// === Icon resolution ===
// Pure mapping from a record and preferences to icon placements
pub use geometry::Rect;
pub use icon_resolver::{resolve, resolve_non_item, IconPlacement, IconPlan, IconRef, Slot};
pub use lock_details::format_lock_details;
pub use preferences::PreferenceSnapshot;

// === Orchestration ===
// Controller, refresh lifecycle and the seams they are wired through
pub use collaborators::{
    IntegrationState, OverlayHost, PathMatcher, PreferencesStore, ProgressSink, StatusCache,
};
pub use overlay::{OverlayController, OverlayServices};
pub use refresh::{RefreshCoordinator, RefreshState};

// === Backends ===
// Git, preference files and terminal implementations of the seams
pub use command_init::{OverlayCommandContext, OverlayCommandInit};
pub use config::FilePreferencesStore;
pub use database::StatusDatabase;
pub use git::GitRepo;
pub use host::{LocalIntegrationState, LogProgressSink, TerminalHost};
pub use matcher::GlobPathMatcher;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_dialog, print_error, print_info, print_section_header, print_success};
