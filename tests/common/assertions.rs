//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating vcs-overlay command output and error
//! messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for git repository error messages
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// Creates a predicate that checks for a drawn icon, e.g. `File(Modified)`
pub fn has_icon(icon: &str) -> impl Predicate<str> {
    predicates::str::contains(icon)
}

/// Creates a predicate that checks for a clickable lock icon
pub fn has_clickable_lock() -> impl Predicate<str> {
    predicates::str::contains("[click for lock details]")
}

/// Creates a predicate that checks for the disabled integration dialog
pub fn integration_disabled_dialog() -> impl Predicate<str> {
    predicates::str::contains("Integration Disabled").and(predicates::str::contains(
        "Can't refresh the icons as the integration is disabled. Check the preferences.",
    ))
}
