mod common;
use common::{fixtures::*, repository::*};
use vcs_overlay::core::{
    collaborators::StatusCache, config::FilePreferencesStore, database::snapshot_dir_for,
    FileStatus, GitRepo, GlobPathMatcher, IconRef, ItemId, LocalIntegrationState,
    LogProgressSink, OverlayController, OverlayServices, Rect, StatusDatabase, TerminalHost,
};

const ROW: Rect = Rect::new(0.0, 0.0, 240.0, 16.0);

fn controller_for(
    repo: &TestRepo,
) -> anyhow::Result<(OverlayController, StatusDatabase, GitRepo)> {
    let git_repo = GitRepo::open(&repo.path)?;
    let preferences = FilePreferencesStore::load_from(
        repo.config_home.path().join("preferences.json"),
        Some(repo.path.as_path()),
    )?;
    let repo_path = git_repo.get_repo_path();
    let database = StatusDatabase::with_snapshot_dir(
        repo_path.clone(),
        snapshot_dir_for(repo.cache_home.path(), &repo_path),
    );

    let controller = OverlayController::new(OverlayServices {
        preferences: Box::new(preferences),
        cache: Box::new(database.clone()),
        progress: Box::new(LogProgressSink::new()),
        matcher: Box::new(GlobPathMatcher::new()),
        integration: Box::new(LocalIntegrationState::new()),
        host: Box::new(TerminalHost::quiet()),
    });
    Ok((controller, database, git_repo))
}

#[cfg(test)]
mod overlay_controller_tests {
    use super::*;

    #[test]
    fn test_refresh_cycle_with_git_database() -> anyhow::Result<()> {
        let repo = create_changed_repo()?;
        let (mut controller, database, git_repo) = controller_for(&repo)?;
        controller.init();
        assert!(controller.is_hook_installed());

        controller.refresh_menu()?;
        assert!(controller.refresh_coordinator().is_refreshing());
        assert!(database.is_pending_population());
        controller.tick();

        database.populate(&git_repo, 100, false)?;
        controller.on_cache_changed();
        assert!(!controller.refresh_coordinator().is_refreshing());

        let plan = controller.on_item_gui(&ItemId::new("initial.txt"), ROW);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].icon, IconRef::File(FileStatus::Modified));

        controller.teardown();
        assert!(!controller.is_hook_installed());
        Ok(())
    }

    #[test]
    fn test_second_refresh_keeps_stale_statuses_for_lock_details() -> anyhow::Result<()> {
        let repo = create_locked_repo()?;
        let (mut controller, database, _git_repo) = controller_for(&repo)?;
        let fixture_db = repo.database()?;
        fixture_db.load()?;
        database.replace(
            fixture_db
                .paths()
                .iter()
                .map(|path| fixture_db.status(&ItemId::new(path.as_str())))
                .collect(),
            false,
        );
        controller.init();

        let item = ItemId::new("Art/hero.psd");
        assert!(controller.lock_details(&item).contains("Owner: alice"));

        controller.refresh_menu()?;
        assert!(controller.plan_item(&item, ROW).is_empty());
        assert!(controller.lock_details(&item).contains("Owner: alice"));
        Ok(())
    }
}
