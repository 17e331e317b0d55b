//! Status-to-icon resolution.
//!
//! [`resolve`] turns one cached [`StatusRecord`] plus the active
//! [`PreferenceSnapshot`] into an [`IconPlan`]: the icons to draw for an item,
//! where to draw them relative to the item's bounding box, and which of them
//! react to clicks. It is a pure function; the same inputs always yield the
//! same plan.
//!
//! # Layouts
//! - **Wide** boxes (list rows): the remote and lock icons sit as squares of
//!   the row height at the trailing edge, the file icon is a small badge at the
//!   leading edge.
//! - **Tall** boxes (grid tiles): the remote icon takes the top-trailing
//!   corner, the lock icon the bottom-trailing corner and the file icon the
//!   bottom-leading corner.

use crate::core::{
    collaborators::PathMatcher,
    geometry::Rect,
    preferences::PreferenceSnapshot,
    state::{ItemId, StatusRecord},
    status::{FileStatus, LockStatus, RemoteStatus},
};
use serde::Serialize;

/// Tall-layout remote and lock icons are this many times narrower than the tile.
const CORNER_ICON_DIVISOR: f32 = 2.4;
/// Remote icon lift above the tile in tall layout.
const REMOTE_ICON_LIFT: f32 = 4.0;
/// Gap between the remote and lock icon in tall layout.
const LOCK_ICON_DROP: f32 = 2.0;
/// File badge size in list rows.
const FILE_BADGE_SIZE: f32 = 14.0;
const FILE_BADGE_OFFSET_X: f32 = -3.0;
const FILE_BADGE_OFFSET_Y: f32 = 7.0;
const INCOMPLETE_BADGE_SIZE: f32 = 20.0;
const INCOMPLETE_BADGE_MARGIN: f32 = 8.0;
const INCOMPLETE_BADGE_LIFT: f32 = 2.0;

pub const INCOMPLETE_DATA_TOOLTIP: &str =
    "Some or all git overlay icons are skipped as you have too many changes to display.\n\
     If you have a lot of unversioned files consider adding them to a git ignore list.\n\
     If the server repository has a lot of changes, consider updating.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Slot {
    Remote,
    Lock,
    File,
    IncompleteData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IconRef {
    Remote(RemoteStatus),
    Lock(LockStatus),
    File(FileStatus),
    IncompleteDataWarning,
}

impl IconRef {
    /// Terminal rendition of the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            IconRef::Remote(status) => status.as_str(),
            IconRef::Lock(status) => status.as_str(),
            IconRef::File(status) => status.as_str(),
            IconRef::IncompleteDataWarning => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconPlacement {
    pub slot: Slot,
    pub icon: IconRef,
    pub rect: Rect,
    /// Clicking the icon opens the lock details dialog
    pub interactive: bool,
    pub tooltip: Option<&'static str>,
}

pub type IconPlan = Vec<IconPlacement>;

/// What the resolver needs to know about the item being drawn.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext<'a> {
    pub bounds: Rect,
    /// Resolved path, used for exclude matching of unknown items
    pub path: Option<&'a str>,
}

/// Compute the icons for one item.
///
/// Slots are evaluated independently and returned in remote, lock, file order.
pub fn resolve(
    record: &StatusRecord,
    prefs: &PreferenceSnapshot,
    item: &ItemContext<'_>,
    matcher: &dyn PathMatcher,
) -> IconPlan {
    let mut plan = IconPlan::with_capacity(3);

    if prefs.download_remote_changes() && record.remote_status != RemoteStatus::None {
        plan.push(IconPlacement {
            slot: Slot::Remote,
            icon: IconRef::Remote(record.remote_status),
            rect: remote_rect(item.bounds),
            interactive: false,
            tooltip: None,
        });
    }

    if (prefs.download_remote_changes() || prefs.lock_prompt_enabled)
        && record.lock_status != LockStatus::NoLock
    {
        plan.push(IconPlacement {
            slot: Slot::Lock,
            icon: IconRef::Lock(record.lock_status),
            rect: lock_rect(item.bounds),
            interactive: true,
            tooltip: None,
        });
    }

    let status = effective_file_status(record, prefs, item.path, matcher);
    if file_icon_visible(status, prefs) {
        plan.push(IconPlacement {
            slot: Slot::File,
            icon: IconRef::File(status),
            rect: file_rect(item.bounds),
            interactive: false,
            tooltip: None,
        });
    }

    plan
}

/// Plan for identities that are not items (empty or synthetic container ids).
///
/// Only the root container ever gets something: the incomplete-data badge,
/// and only while the cache reports an incomplete snapshot.
pub fn resolve_non_item(item: &ItemId, bounds: Rect, data_is_incomplete: bool) -> IconPlan {
    if data_is_incomplete && item.is_root() {
        vec![IconPlacement {
            slot: Slot::IncompleteData,
            icon: IconRef::IncompleteDataWarning,
            rect: incomplete_data_rect(bounds),
            interactive: false,
            tooltip: Some(INCOMPLETE_DATA_TOOLTIP),
        }]
    } else {
        IconPlan::new()
    }
}

/// The file status the icon is chosen for.
///
/// Unknown records are shown as `Normal` when normal icons are enabled, which
/// treats "never scanned" the same as "scanned and clean". Unknown records on
/// excluded paths become `Excluded`, or `None` when excluded icons are hidden.
pub fn effective_file_status(
    record: &StatusRecord,
    prefs: &PreferenceSnapshot,
    path: Option<&str>,
    matcher: &dyn PathMatcher,
) -> FileStatus {
    if record.is_valid() || !prefs.show_normal_status_icons {
        return record.file_status;
    }

    let excluded = !prefs.excluded_path_patterns.is_empty()
        && path.is_some_and(|path| matcher.should_exclude(&prefs.excluded_path_patterns, path));

    match (excluded, prefs.show_excluded_status_icons) {
        (false, _) => FileStatus::Normal,
        (true, true) => FileStatus::Excluded,
        (true, false) => FileStatus::None,
    }
}

fn file_icon_visible(status: FileStatus, prefs: &PreferenceSnapshot) -> bool {
    match status {
        FileStatus::Normal => prefs.show_normal_status_icons,
        FileStatus::Excluded | FileStatus::Ignored => prefs.show_excluded_status_icons,
        other => other.has_icon(),
    }
}

fn remote_rect(bounds: Rect) -> Rect {
    if bounds.is_wide() {
        Rect::square(
            bounds.right() - 2.0 * bounds.height,
            bounds.y,
            bounds.height,
        )
    } else {
        let side = bounds.width / CORNER_ICON_DIVISOR;
        Rect::square(bounds.right() - side, bounds.y - REMOTE_ICON_LIFT, side)
    }
}

fn lock_rect(bounds: Rect) -> Rect {
    if bounds.is_wide() {
        Rect::square(
            bounds.right() - 3.0 * bounds.height,
            bounds.y,
            bounds.height,
        )
    } else {
        let side = bounds.width / CORNER_ICON_DIVISOR;
        let offset = bounds.width - side;
        Rect::square(
            bounds.x + offset,
            bounds.y + offset + LOCK_ICON_DROP,
            side,
        )
    }
}

fn file_rect(bounds: Rect) -> Rect {
    if bounds.is_wide() {
        Rect::square(
            bounds.x + FILE_BADGE_OFFSET_X,
            bounds.y + FILE_BADGE_OFFSET_Y,
            FILE_BADGE_SIZE,
        )
    } else {
        let side = bounds.width / 3.0 + 2.0;
        Rect::square(bounds.x, bounds.y + (bounds.width - side) + 1.0, side)
    }
}

fn incomplete_data_rect(bounds: Rect) -> Rect {
    Rect::square(
        bounds.right() - INCOMPLETE_BADGE_SIZE - INCOMPLETE_BADGE_MARGIN,
        bounds.y - INCOMPLETE_BADGE_LIFT,
        INCOMPLETE_BADGE_SIZE,
    )
}
