//! Unified color system for overlay icons in terminal output.
//!
//! Every icon drawn by the [`TerminalHost`](crate::core::host::TerminalHost)
//! goes through [`get_icon_color_style`] so that a given status always has
//! the same color, whichever command printed it.
//!
//! # Color Scheme
//! - **Modified / Renamed / Replaced**: Yellow
//! - **Added / Unversioned**: Green and cyan
//! - **Deleted / Missing / Conflicted**: Red, conflicts in bold
//! - **Ignored / Excluded / Normal**: Muted
//! - **Remote changes**: Blue
//! - **Locks**: Green when ours, red when someone else's, magenta when stolen
//! - **Incomplete data warning**: Yellow bold

use crate::core::icon_resolver::IconRef;
use crate::core::status::{FileStatus, LockStatus, RemoteStatus};
use colored::*;

/// Single function to apply color styling based on the icon.
/// Returns a closure that can be applied to any text to get the appropriate color
pub fn get_icon_color_style(icon: IconRef) -> Box<dyn Fn(&str) -> ColoredString> {
    match icon {
        IconRef::File(status) => get_file_status_color_style(status),
        IconRef::Remote(RemoteStatus::None) => Box::new(|text: &str| text.normal()),
        IconRef::Remote(_) => Box::new(|text: &str| text.blue()),
        IconRef::Lock(LockStatus::NoLock) => Box::new(|text: &str| text.normal()),
        IconRef::Lock(LockStatus::LockedHere) => Box::new(|text: &str| text.green()),
        IconRef::Lock(LockStatus::LockedOther) => Box::new(|text: &str| text.red()),
        IconRef::Lock(LockStatus::LockedButStolen) => Box::new(|text: &str| text.magenta()),
        IconRef::IncompleteDataWarning => Box::new(|text: &str| text.yellow().bold()),
    }
}

pub fn get_file_status_color_style(status: FileStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        FileStatus::Modified | FileStatus::Renamed | FileStatus::Replaced => {
            Box::new(|text: &str| text.yellow())
        }
        FileStatus::Added => Box::new(|text: &str| text.green()),
        FileStatus::Unversioned => Box::new(|text: &str| text.cyan()),
        FileStatus::Deleted | FileStatus::Missing => Box::new(|text: &str| text.red()),
        FileStatus::Conflicted => Box::new(|text: &str| text.red().bold()),
        FileStatus::Normal | FileStatus::Ignored | FileStatus::Excluded => {
            Box::new(|text: &str| text.bright_black())
        }
        FileStatus::None => Box::new(|text: &str| text.normal()),
    }
}

/// Get the colored glyph of an icon, padded to two columns for alignment
pub fn get_colored_glyph(icon: IconRef) -> ColoredString {
    let color_fn = get_icon_color_style(icon);
    let glyph = icon.glyph();
    match glyph.chars().count() {
        1 => color_fn(&format!("{glyph} ")),
        _ => color_fn(glyph),
    }
}
