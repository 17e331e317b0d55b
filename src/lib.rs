//! vcs-overlay - version control status overlays for file browsers.
//!
//! This library decides which status icons to draw over the items of a
//! file browser (file status, remote changes, LFS locks), where to draw them
//! for list rows and grid tiles, and drives the refresh of the status cache
//! behind them. Everything the overlay needs from its environment is reached
//! through small traits, so the same logic serves an editor integration or
//! the bundled command line tool.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Status types and records
//! - Icon resolution and lock detail formatting
//! - The overlay controller and refresh coordinator
//! - A git-backed status database
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    format_lock_details,
    resolve,
    resolve_non_item,
    FileStatus,
    GitRepo,
    IconPlacement,
    IconPlan,
    IconRef,
    ItemId,
    LockDetails,
    LockStatus,
    OverlayController,
    // Error handling
    OverlayError,
    OverlayServices,
    PreferenceSnapshot,
    Rect,
    RemoteStatus,
    Result,
    Slot,
    StatusDatabase,
    StatusRecord,
};
