//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories with specific file states,
//! preferences and cached statuses.

#![allow(dead_code)]

use super::repository::*;
use vcs_overlay::core::{
    error::Result,
    state::{LockDetails, StatusRecord},
    status::{FileStatus, LockStatus},
};

/// Scenario: one modified and one untracked file next to the initial commit
pub fn create_changed_repo() -> Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit()?;
    create_file(&repo.path, "initial.txt", "modified content\n")?;
    create_file(&repo.path, "new.txt", "new content\n")?;
    Ok(repo)
}

/// Scenario: a cached snapshot holding a file locked by someone else
pub fn create_locked_repo() -> Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit()?;
    create_file(&repo.path, "Art/hero.psd", "binary")?;
    git(&repo.path, &["add", "."])?;
    git(&repo.path, &["commit", "-m", "Add art"])?;

    let database = repo.database()?;
    database.replace(
        vec![StatusRecord::new("Art/hero.psd", FileStatus::Normal).with_lock(
            LockStatus::LockedOther,
            Some(LockDetails {
                owner: "alice".to_string(),
                date: "2020-09-08 23:32:13 +0300 (Tue, 08 Sep 2020)".to_string(),
                path: "Art/hero.psd".to_string(),
                message: String::new(),
            }),
        )],
        false,
    );
    database.save()?;

    Ok(repo)
}

/// Personal preferences showing normal and excluded icons for `excludes`
pub fn show_all_icons_preferences(excludes: &[&str]) -> String {
    let excludes: Vec<String> = excludes.iter().map(|e| format!("\"{e}\"")).collect();
    format!(
        r#"{{
            "show_normal_status_overlay_icon": true,
            "show_excluded_status_overlay_icon": true,
            "exclude": [{}]
        }}"#,
        excludes.join(", ")
    )
}
