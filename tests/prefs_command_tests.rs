use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;

mod common;
use common::repository::*;

#[cfg(test)]
mod prefs_command_tests {
    use super::*;

    #[test]
    fn test_prefs_creates_defaults() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;

        repo.overlay_cmd()?
            .arg("prefs")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"core_integration_enabled\": true"))
            .stdout(predicate::str::contains("\"show_normal_status_icons\": false"));

        assert!(repo
            .config_home
            .path()
            .join("vcs-overlay")
            .join("preferences.json")
            .exists());
        Ok(())
    }

    #[test]
    fn test_prefs_merges_project_excludes() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        repo.write_personal_preferences(r#"{ "exclude": ["Temp"] }"#)?;
        create_file(
            &repo.path,
            ".vcs-overlay.json",
            r#"{ "enable_lock_prompt": true, "exclude": ["Builds/**"] }"#,
        )?;

        repo.overlay_cmd()?
            .arg("prefs")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"lock_prompt_enabled\": true"))
            .stdout(predicate::str::contains("\"Temp\",\n    \"Builds/**\""));
        Ok(())
    }

    #[test]
    fn test_prefs_toggle_integration() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;

        repo.overlay_cmd()?
            .args(["prefs", "--disable"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Integration disabled"))
            .stdout(predicate::str::contains("\"core_integration_enabled\": false"));

        repo.overlay_cmd()?
            .arg("refresh")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Integration Disabled"));

        repo.overlay_cmd()?
            .args(["prefs", "--enable"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"core_integration_enabled\": true"));

        repo.overlay_cmd()?.arg("refresh").assert().success();
        Ok(())
    }

    #[test]
    fn test_prefs_rejects_invalid_file() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        repo.write_personal_preferences("{ invalid json")?;

        repo.overlay_cmd()?
            .arg("prefs")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Failed to parse preferences"));
        Ok(())
    }
}
