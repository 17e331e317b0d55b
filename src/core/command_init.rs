//! Centralized initialization for overlay commands.
//!
//! Every command needs the same wiring: find the repository, load the
//! preferences, load the last status snapshot and build an
//! [`OverlayController`] around the terminal collaborators.
//! [`OverlayCommandInit`] does that once.
//!
//! # Initialization Steps
//! 1. **Git repository validation**: Ensure we're in a valid git repository
//! 2. **Preferences**: Load personal and project preferences
//! 3. **Snapshot loading**: Load the statuses of the last refresh, if any
//! 4. **Controller**: Wire the collaborators and run `init`

use crate::core::{
    config::FilePreferencesStore,
    database::StatusDatabase,
    error::{OverlayError, Result},
    git::GitRepo,
    host::{LocalIntegrationState, LogProgressSink, TerminalHost},
    matcher::GlobPathMatcher,
    overlay::{OverlayController, OverlayServices},
    state::ItemId,
};
use std::env;
use std::path::{Component, Path, PathBuf};

/// Initialized context shared by the overlay commands
pub struct OverlayCommandContext {
    pub git_repo: GitRepo,
    pub workdir: PathBuf,
    /// Second handle on the database owned by the controller
    pub database: StatusDatabase,
    pub max_status_entries: usize,
    pub controller: OverlayController,
}

pub struct OverlayCommandInit;

impl OverlayCommandInit {
    /// Initialize everything needed for an overlay command in the current directory
    pub fn initialize() -> Result<OverlayCommandContext> {
        let current_dir = env::current_dir()?;
        let git_repo = GitRepo::open(&current_dir).map_err(|_| OverlayError::NotInGitRepo)?;
        let workdir = git_repo.workdir()?;

        let preferences = FilePreferencesStore::load(Some(workdir.as_path()))?;
        let max_status_entries = preferences.personal.max_status_entries;

        let database = StatusDatabase::new(git_repo.get_repo_path())?;
        if !database.load()? {
            log::debug!("No statuses cached yet for {}", workdir.display());
        }

        let mut controller = OverlayController::new(OverlayServices {
            preferences: Box::new(preferences),
            cache: Box::new(database.clone()),
            progress: Box::new(LogProgressSink::new()),
            matcher: Box::new(GlobPathMatcher::new()),
            integration: Box::new(LocalIntegrationState::new()),
            host: Box::new(TerminalHost::new()),
        });
        controller.init();

        Ok(OverlayCommandContext {
            git_repo,
            workdir,
            database,
            max_status_entries,
            controller,
        })
    }
}

impl OverlayCommandContext {
    /// Item id of a path given on the command line, relative to the current directory
    pub fn item_id(&self, arg: &str) -> Result<ItemId> {
        item_id_for(&self.workdir, &env::current_dir()?, arg)
    }
}

/// Map `arg` (relative to `cwd`) to the item id of the file below `workdir`.
///
/// The work tree itself maps to the root container.
pub fn item_id_for(workdir: &Path, cwd: &Path, arg: &str) -> Result<ItemId> {
    let workdir = workdir.canonicalize().unwrap_or_else(|_| workdir.to_path_buf());
    let cwd = cwd.canonicalize().unwrap_or_else(|_| cwd.to_path_buf());
    let full = normalize_path(&cwd.join(arg));

    let relative = full
        .strip_prefix(&workdir)
        .map_err(|_| OverlayError::outside_work_tree(arg))?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect::<Option<_>>()
        .ok_or(OverlayError::InvalidUtf8Path)?;

    if parts.is_empty() {
        Ok(ItemId::root())
    } else {
        Ok(ItemId::new(parts.join("/")))
    }
}

/// Resolve `.` and `..` without touching the file system
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
