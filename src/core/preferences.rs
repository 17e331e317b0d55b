//! The display configuration the overlay logic reads.
//!
//! [`PreferenceSnapshot`] is rebuilt in full on every preference change and is
//! never mutated in place. Where the values come from is the business of a
//! [`PreferencesStore`](crate::core::collaborators::PreferencesStore).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    pub core_integration_enabled: bool,
    pub populate_database_enabled: bool,
    pub lock_prompt_enabled: bool,
    pub show_normal_status_icons: bool,
    pub show_excluded_status_icons: bool,
    /// Personal patterns first, then project patterns
    pub excluded_path_patterns: Vec<String>,
    pub fetch_remote_changes: bool,
    pub needs_authentication: bool,
}

impl PreferenceSnapshot {
    /// Whether the render hook should be installed at all
    pub fn is_active(&self) -> bool {
        self.core_integration_enabled
            && (self.populate_database_enabled || self.lock_prompt_enabled)
    }

    /// Whether a refresh may be requested by the user
    pub fn can_refresh(&self) -> bool {
        self.core_integration_enabled && self.populate_database_enabled
    }

    /// Remote state is only meaningful when it is fetched and we are authenticated.
    pub fn download_remote_changes(&self) -> bool {
        self.fetch_remote_changes && !self.needs_authentication
    }
}
