//! Seams to the environment the overlay logic runs in.
//!
//! The overlay core never talks to a file browser, a status backend or a
//! progress UI directly. Each of those is reached through one of the traits
//! below and owned by the [`OverlayController`](crate::core::overlay::OverlayController).
//!
//! # Public API
//! - [`StatusCache`]: Read access to cached status records plus invalidation
//! - [`PreferencesStore`]: Source of [`PreferenceSnapshot`]s
//! - [`ProgressSink`]: Long-running operation indicators
//! - [`PathMatcher`]: Exclude pattern matching
//! - [`IntegrationState`]: Transient integration memory cleared on refresh
//! - [`OverlayHost`]: Render hook, drawing, dialogs and event subscriptions

use crate::core::{
    icon_resolver::IconPlacement,
    preferences::PreferenceSnapshot,
    state::{ItemId, StatusRecord},
};

/// Opaque handle of one in-flight progress indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgressToken(pub u64);

/// Handle of an installed per-item render hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookHandle(pub u64);

/// Handle of an event subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub u64);

/// Notifications the controller listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    PreferencesChanged,
    CacheChanged,
    Update,
}

pub trait StatusCache {
    /// The known status of `item`, or [`StatusRecord::unknown`] when there is none.
    fn status(&self, item: &ItemId) -> StatusRecord;

    /// Every record known for `item`, optionally including history, stale and
    /// lock-only entries.
    fn all_known_statuses(
        &self,
        item: &ItemId,
        include_history: bool,
        include_stale: bool,
        include_locks: bool,
    ) -> Vec<StatusRecord>;

    /// Resolved path of `item`, if the item exists.
    fn item_path(&self, item: &ItemId) -> Option<String>;

    /// Drop the cached contents. Repopulation happens on the cache's own schedule
    /// and is announced through [`EventSource::CacheChanged`].
    fn invalidate(&mut self);

    /// True when the last population skipped items.
    fn data_is_incomplete(&self) -> bool;
}

pub trait PreferencesStore {
    fn snapshot(&self) -> PreferenceSnapshot;
}

pub trait ProgressSink {
    fn start(&mut self, title: &str, message: &str) -> ProgressToken;
    fn report(&mut self, token: ProgressToken, fraction: f32);
    fn remove(&mut self, token: ProgressToken);
}

pub trait PathMatcher {
    fn should_exclude(&self, patterns: &[String], path: &str) -> bool;
}

pub trait IntegrationState {
    fn clear_last_displayed_error(&mut self);
    fn clear_lock_prompt_knowledge(&mut self);
    fn set_silence_lock_prompts(&mut self, silence: bool);
}

pub trait OverlayHost {
    fn subscribe(&mut self, source: EventSource) -> Subscription;
    fn unsubscribe(&mut self, subscription: Subscription);
    fn register_item_hook(&mut self) -> HookHandle;
    fn remove_item_hook(&mut self, hook: HookHandle);
    fn repaint(&mut self);
    fn draw(&mut self, item: &ItemId, placement: &IconPlacement);
    /// Blocking, modal message
    fn show_dialog(&mut self, title: &str, message: &str);
}
