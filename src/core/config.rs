//! File-backed preferences.
//!
//! Personal preferences live in `preferences.json` inside the platform config
//! directory; project preferences live in `.vcs-overlay.json` at the project
//! root and are shared through version control. [`FilePreferencesStore`] merges
//! both into a [`PreferenceSnapshot`].

use crate::core::collaborators::PreferencesStore;
use crate::core::dirs::get_config_directory;
use crate::core::error::{OverlayError, Result};
use crate::core::preferences::PreferenceSnapshot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PERSONAL_PREFERENCES_FILE: &str = "preferences.json";
pub const PROJECT_PREFERENCES_FILE: &str = ".vcs-overlay.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PersonalPreferences {
    pub enable_core_integration: bool,
    pub populate_statuses_database: bool,
    pub show_normal_status_overlay_icon: bool,
    pub show_excluded_status_overlay_icon: bool,
    pub fetch_remote_changes: bool,
    pub exclude: Vec<String>,
    /// Entries above this count mark the status database as incomplete
    pub max_status_entries: usize,
}

impl Default for PersonalPreferences {
    fn default() -> Self {
        Self {
            enable_core_integration: true,
            populate_statuses_database: true,
            show_normal_status_overlay_icon: false,
            show_excluded_status_overlay_icon: false,
            fetch_remote_changes: true,
            exclude: Vec::new(),
            max_status_entries: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectPreferences {
    pub enable_lock_prompt: bool,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    pub personal: PersonalPreferences,
    pub project: ProjectPreferences,
    /// Runtime state: the backend refused our credentials
    pub needs_authentication: bool,
    personal_path: PathBuf,
}

impl FilePreferencesStore {
    /// Load personal preferences from the config directory (creating them with
    /// defaults on first use) and project preferences from `project_root`.
    pub fn load(project_root: Option<&Path>) -> Result<Self> {
        let personal_path = get_config_directory()?.join(PERSONAL_PREFERENCES_FILE);
        Self::load_from(personal_path, project_root)
    }

    pub fn load_from(personal_path: PathBuf, project_root: Option<&Path>) -> Result<Self> {
        let personal = if personal_path.exists() {
            read_json(&personal_path)?
        } else {
            let personal = PersonalPreferences::default();
            write_json(&personal_path, &personal)?;
            log::debug!("Created default preferences at {}", personal_path.display());
            personal
        };

        let project = match project_root.map(|root| root.join(PROJECT_PREFERENCES_FILE)) {
            Some(path) if path.exists() => read_json(&path)?,
            _ => ProjectPreferences::default(),
        };

        Ok(Self {
            personal,
            project,
            needs_authentication: false,
            personal_path,
        })
    }

    pub fn save(&self) -> Result<()> {
        write_json(&self.personal_path, &self.personal)
    }

    pub fn personal_path(&self) -> &Path {
        &self.personal_path
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn snapshot(&self) -> PreferenceSnapshot {
        PreferenceSnapshot {
            core_integration_enabled: self.personal.enable_core_integration,
            populate_database_enabled: self.personal.populate_statuses_database,
            lock_prompt_enabled: self.project.enable_lock_prompt,
            show_normal_status_icons: self.personal.show_normal_status_overlay_icon,
            show_excluded_status_icons: self.personal.show_excluded_status_overlay_icon,
            excluded_path_patterns: self
                .personal
                .exclude
                .iter()
                .chain(&self.project.exclude)
                .cloned()
                .collect(),
            fetch_remote_changes: self.personal.fetch_remote_changes,
            needs_authentication: self.needs_authentication,
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        log::warn!("Invalid preferences file '{}': {}", path.display(), e);
        OverlayError::preferences_parse_failed(path, e)
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
