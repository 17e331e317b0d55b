//! Status records and the item identifiers they are keyed by.
//!
//! A [`StatusRecord`] is an immutable snapshot of everything the status cache
//! knows about one item. Records are replaced wholesale whenever the cache is
//! repopulated; consumers only ever read them.
//!
//! # Public API
//! - [`StatusRecord`]: Cached status of one item
//! - [`LockDetails`]: Lock metadata attached to a record
//! - [`ItemId`]: Stable identifier of a file browser item
//! - [`ROOT_CONTAINER_ID`]: Identifier of the designated root container

use crate::core::status::{FileStatus, LockStatus, RemoteStatus};
use serde::{Deserialize, Serialize};

/// Identifier of the root container. It is a non-item id (see [`is_non_item_id`])
/// that still receives the incomplete-data badge.
pub const ROOT_CONTAINER_ID: &str = "00000000000000001000000000000000";

/// Prefix shared by every synthetic, non-item identifier.
const NON_ITEM_PREFIX: &str = "00000000";

/// Stable identifier of a file browser item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self(ROOT_CONTAINER_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for empty ids and synthetic container ids that carry no status.
    pub fn is_non_item(&self) -> bool {
        is_non_item_id(&self.0)
    }

    pub fn is_root(&self) -> bool {
        self.0.eq_ignore_ascii_case(ROOT_CONTAINER_ID)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_non_item_id(id: &str) -> bool {
    id.is_empty() || id.starts_with(NON_ITEM_PREFIX)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockDetails {
    pub owner: String,
    /// Date exactly as reported by the backend
    pub date: String,
    pub path: String,
    #[serde(default)]
    pub message: String,
}

impl LockDetails {
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty() && self.date.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Repository-relative path; empty for the unknown record
    pub path: String,
    pub file_status: FileStatus,
    #[serde(default)]
    pub remote_status: RemoteStatus,
    #[serde(default)]
    pub lock_status: LockStatus,
    #[serde(default)]
    pub lock_details: Option<LockDetails>,
}

impl StatusRecord {
    pub fn new(path: impl Into<String>, file_status: FileStatus) -> Self {
        Self {
            path: path.into(),
            file_status,
            ..Default::default()
        }
    }

    /// The record returned for items the cache knows nothing about.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn with_remote(mut self, remote_status: RemoteStatus) -> Self {
        self.remote_status = remote_status;
        self
    }

    pub fn with_lock(mut self, lock_status: LockStatus, details: Option<LockDetails>) -> Self {
        self.lock_status = lock_status;
        self.lock_details = details;
        self
    }

    /// Whether this record reflects a resolved status rather than an absent entry.
    pub fn is_valid(&self) -> bool {
        !self.path.is_empty()
    }

    /// Lock details worth showing to the user, if any
    pub fn visible_lock_details(&self) -> Option<&LockDetails> {
        self.lock_details.as_ref().filter(|details| !details.is_empty())
    }
}
