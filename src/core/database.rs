//! Git-backed status database.
//!
//! [`StatusDatabase`] is the [`StatusCache`] used outside of tests. Items are
//! identified by their repository-relative path. The database is a cheap
//! clonable handle: the overlay controller owns one clone while the code that
//! drives population keeps another, all on the same thread.
//!
//! # Lifecycle
//! - `invalidate` moves the current records aside as stale data and marks the
//!   database as waiting for population
//! - `populate` rebuilds every record from the repository, drops stale data,
//!   and persists the snapshot
//! - the driver then announces the change to the controller
//!
//! # Persistence
//! Snapshots are JSON files in the user cache directory, one folder per
//! repository named after the md5 hash of the repository path.

use crate::core::{
    collaborators::StatusCache,
    dirs::get_cache_directory,
    error::{OverlayError, Result},
    git::{GitRepo, LfsLock},
    state::{is_non_item_id, ItemId, StatusRecord},
    status::FileStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const SNAPSHOT_FILE: &str = "statuses.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub repo_path: PathBuf,
    pub last_updated: DateTime<Utc>,
    pub data_is_incomplete: bool,
    pub records: Vec<StatusRecord>,
}

#[derive(Debug, Default)]
struct DatabaseState {
    records: BTreeMap<String, StatusRecord>,
    stale: BTreeMap<String, StatusRecord>,
    data_is_incomplete: bool,
    pending_population: bool,
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct StatusDatabase {
    repo_path: PathBuf,
    snapshot_dir: PathBuf,
    state: Rc<RefCell<DatabaseState>>,
}

impl StatusDatabase {
    /// Empty database for `repo_path`, persisted in the user cache directory.
    pub fn new(repo_path: impl Into<PathBuf>) -> Result<Self> {
        let repo_path = repo_path.into();
        let snapshot_dir = snapshot_dir_for(&get_cache_directory()?, &repo_path);
        Ok(Self::with_snapshot_dir(repo_path, snapshot_dir))
    }

    pub fn with_snapshot_dir(repo_path: impl Into<PathBuf>, snapshot_dir: PathBuf) -> Self {
        Self {
            repo_path: repo_path.into(),
            snapshot_dir,
            state: Rc::new(RefCell::new(DatabaseState::default())),
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_dir.join(SNAPSHOT_FILE)
    }

    pub fn is_pending_population(&self) -> bool {
        self.state.borrow().pending_population
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().last_updated
    }

    pub fn len(&self) -> usize {
        self.state.borrow().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paths of every current record, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.state.borrow().records.keys().cloned().collect()
    }

    /// Replace every record at once.
    pub fn replace(&self, records: Vec<StatusRecord>, data_is_incomplete: bool) {
        let mut state = self.state.borrow_mut();
        state.records = records
            .into_iter()
            .map(|record| (record.path.clone(), record))
            .collect();
        state.stale.clear();
        state.data_is_incomplete = data_is_incomplete;
        state.pending_population = false;
        state.last_updated = Some(Utc::now());
    }

    /// Rebuild every record from `repo`.
    ///
    /// At most `max_entries` records are kept; anything beyond marks the data
    /// as incomplete. Upstream changes are only looked at with `include_remote`.
    pub fn populate(
        &self,
        repo: &GitRepo,
        max_entries: usize,
        include_remote: bool,
    ) -> Result<()> {
        log::debug!("Populating status database for {}", self.repo_path.display());

        let mut records: BTreeMap<String, StatusRecord> = repo
            .get_statuses()?
            .into_iter()
            .map(|record| (record.path.clone(), record))
            .collect();

        let remote_changes = if include_remote {
            repo.get_remote_changes()?
        } else {
            Vec::new()
        };
        for (path, remote_status) in remote_changes {
            records
                .entry(path.clone())
                .or_insert_with(|| StatusRecord::new(path, FileStatus::Normal))
                .remote_status = remote_status;
        }

        apply_locks(&mut records, repo.get_lfs_locks()?);

        let total = records.len();
        let data_is_incomplete = total > max_entries;
        if data_is_incomplete {
            log::warn!("{total} statuses found, only {max_entries} are kept");
        }

        self.replace(
            records.into_values().take(max_entries).collect(),
            data_is_incomplete,
        );
        self.save()?;

        log::debug!("Status database holds {} records", self.len());
        Ok(())
    }

    /// Load the persisted snapshot. Returns false when there is none.
    ///
    /// An unreadable or corrupt snapshot is logged and skipped; the database
    /// then starts empty and the next refresh overwrites the file.
    pub fn load(&self) -> Result<bool> {
        let snapshot = match self.read_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(false),
            Err(e) => {
                log::warn!("Ignoring status snapshot: {e}");
                return Ok(false);
            }
        };

        self.replace(snapshot.records, snapshot.data_is_incomplete);
        self.state.borrow_mut().last_updated = Some(snapshot.last_updated);
        Ok(true)
    }

    /// Read the persisted snapshot without applying it.
    pub fn read_snapshot(&self) -> Result<Option<StatusSnapshot>> {
        let path = self.snapshot_path();
        if !path.exists() {
            log::debug!("No status snapshot at {}", path.display());
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).map_err(|e| OverlayError::snapshot_read_failed(&path, e))?;
        let snapshot = serde_json::from_str(&content)
            .map_err(|e| OverlayError::snapshot_parse_failed(&path, e))?;
        Ok(Some(snapshot))
    }

    pub fn save(&self) -> Result<()> {
        if let Err(e) = fs::create_dir_all(&self.snapshot_dir) {
            return Err(OverlayError::cache_directory_creation_failed(
                &self.snapshot_dir,
                e,
            ));
        }

        let snapshot = {
            let state = self.state.borrow();
            StatusSnapshot {
                repo_path: self.repo_path.clone(),
                last_updated: state.last_updated.unwrap_or_else(Utc::now),
                data_is_incomplete: state.data_is_incomplete,
                records: state.records.values().cloned().collect(),
            }
        };

        let path = self.snapshot_path();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&path, json).map_err(|e| OverlayError::snapshot_write_failed(&path, e))
    }
}

impl StatusCache for StatusDatabase {
    fn status(&self, item: &ItemId) -> StatusRecord {
        self.state
            .borrow()
            .records
            .get(item.as_str())
            .cloned()
            .unwrap_or_else(StatusRecord::unknown)
    }

    /// No status history is kept, so `include_history` adds nothing.
    fn all_known_statuses(
        &self,
        item: &ItemId,
        _include_history: bool,
        include_stale: bool,
        include_locks: bool,
    ) -> Vec<StatusRecord> {
        let state = self.state.borrow();
        let mut known: Vec<StatusRecord> =
            state.records.get(item.as_str()).cloned().into_iter().collect();

        if include_stale {
            if let Some(stale) = state.stale.get(item.as_str()) {
                if !known.contains(stale) {
                    known.push(stale.clone());
                }
            }
        }

        if !include_locks {
            for record in &mut known {
                record.lock_details = None;
            }
        }

        known
    }

    fn item_path(&self, item: &ItemId) -> Option<String> {
        (!is_non_item_id(item.as_str())).then(|| item.as_str().to_string())
    }

    fn invalidate(&mut self) {
        let mut state = self.state.borrow_mut();
        let records = std::mem::take(&mut state.records);
        state.stale = records;
        state.data_is_incomplete = false;
        state.pending_population = true;
        log::debug!("Status database invalidated, {} records kept as stale", state.stale.len());
    }

    fn data_is_incomplete(&self) -> bool {
        self.state.borrow().data_is_incomplete
    }
}

/// Snapshot folder of `repo_path` below `cache_home`.
pub fn snapshot_dir_for(cache_home: &Path, repo_path: &Path) -> PathBuf {
    let repo_hash = format!("{:x}", md5::compute(repo_path.to_string_lossy().as_bytes()));
    cache_home.join(repo_hash)
}

fn apply_locks(records: &mut BTreeMap<String, StatusRecord>, locks: Vec<LfsLock>) {
    for lock in locks {
        let details = lock.details();
        let record = records
            .entry(lock.path.clone())
            .or_insert_with(|| StatusRecord::new(lock.path.clone(), FileStatus::Normal));
        record.lock_status = lock.status;
        record.lock_details = Some(details);
    }
}
