//! Recording collaborators shared by the unit tests.

use crate::core::{
    collaborators::*,
    icon_resolver::IconPlacement,
    preferences::PreferenceSnapshot,
    state::{ItemId, StatusRecord},
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Journal {
    pub active_tokens: Vec<ProgressToken>,
    pub started: usize,
    pub removed: Vec<ProgressToken>,
    pub reports: Vec<(ProgressToken, f32)>,
    pub subscriptions: Vec<(Subscription, EventSource)>,
    pub hooks: Vec<HookHandle>,
    pub hook_registrations: usize,
    pub repaints: usize,
    pub draws: Vec<(ItemId, IconPlacement)>,
    pub dialogs: Vec<(String, String)>,
    pub invalidations: usize,
    pub cleared_errors: usize,
    pub cleared_lock_knowledge: usize,
    pub silence: Option<bool>,
    next_id: u64,
}

impl Journal {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn subscribed_to(&self, source: EventSource) -> usize {
        self.subscriptions.iter().filter(|(_, s)| *s == source).count()
    }
}

pub type SharedJournal = Rc<RefCell<Journal>>;

pub struct FakeProgress(pub SharedJournal);

impl ProgressSink for FakeProgress {
    fn start(&mut self, _title: &str, _message: &str) -> ProgressToken {
        let mut journal = self.0.borrow_mut();
        let token = ProgressToken(journal.next());
        journal.started += 1;
        journal.active_tokens.push(token);
        token
    }

    fn report(&mut self, token: ProgressToken, fraction: f32) {
        self.0.borrow_mut().reports.push((token, fraction));
    }

    fn remove(&mut self, token: ProgressToken) {
        let mut journal = self.0.borrow_mut();
        journal.active_tokens.retain(|t| *t != token);
        journal.removed.push(token);
    }
}

pub struct FakeHost(pub SharedJournal);

impl OverlayHost for FakeHost {
    fn subscribe(&mut self, source: EventSource) -> Subscription {
        let mut journal = self.0.borrow_mut();
        let subscription = Subscription(journal.next());
        journal.subscriptions.push((subscription, source));
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.0
            .borrow_mut()
            .subscriptions
            .retain(|(s, _)| *s != subscription);
    }

    fn register_item_hook(&mut self) -> HookHandle {
        let mut journal = self.0.borrow_mut();
        let hook = HookHandle(journal.next());
        journal.hook_registrations += 1;
        journal.hooks.push(hook);
        hook
    }

    fn remove_item_hook(&mut self, hook: HookHandle) {
        self.0.borrow_mut().hooks.retain(|h| *h != hook);
    }

    fn repaint(&mut self) {
        self.0.borrow_mut().repaints += 1;
    }

    fn draw(&mut self, item: &ItemId, placement: &IconPlacement) {
        self.0
            .borrow_mut()
            .draws
            .push((item.clone(), placement.clone()));
    }

    fn show_dialog(&mut self, title: &str, message: &str) {
        self.0
            .borrow_mut()
            .dialogs
            .push((title.to_string(), message.to_string()));
    }
}

pub struct FakeIntegration(pub SharedJournal);

impl IntegrationState for FakeIntegration {
    fn clear_last_displayed_error(&mut self) {
        self.0.borrow_mut().cleared_errors += 1;
    }

    fn clear_lock_prompt_knowledge(&mut self) {
        self.0.borrow_mut().cleared_lock_knowledge += 1;
    }

    fn set_silence_lock_prompts(&mut self, silence: bool) {
        self.0.borrow_mut().silence = Some(silence);
    }
}

#[derive(Default)]
pub struct FakeCache {
    pub records: HashMap<ItemId, Vec<StatusRecord>>,
    pub incomplete: bool,
    pub journal: Option<SharedJournal>,
}

impl StatusCache for FakeCache {
    fn status(&self, item: &ItemId) -> StatusRecord {
        self.records
            .get(item)
            .and_then(|records| records.first().cloned())
            .unwrap_or_else(StatusRecord::unknown)
    }

    fn all_known_statuses(&self, item: &ItemId, _: bool, _: bool, _: bool) -> Vec<StatusRecord> {
        self.records.get(item).cloned().unwrap_or_default()
    }

    fn item_path(&self, item: &ItemId) -> Option<String> {
        Some(item.as_str().to_string())
    }

    fn invalidate(&mut self) {
        if let Some(journal) = &self.journal {
            journal.borrow_mut().invalidations += 1;
        }
    }

    fn data_is_incomplete(&self) -> bool {
        self.incomplete
    }
}

/// Preferences whose snapshot tests can swap at will.
pub struct FakePreferences(pub Rc<RefCell<PreferenceSnapshot>>);

impl PreferencesStore for FakePreferences {
    fn snapshot(&self) -> PreferenceSnapshot {
        self.0.borrow().clone()
    }
}

pub struct PrefixMatcher;

impl PathMatcher for PrefixMatcher {
    fn should_exclude(&self, patterns: &[String], path: &str) -> bool {
        patterns.iter().any(|p| path.starts_with(p.as_str()))
    }
}

pub fn enabled_prefs() -> PreferenceSnapshot {
    PreferenceSnapshot {
        core_integration_enabled: true,
        populate_database_enabled: true,
        lock_prompt_enabled: true,
        fetch_remote_changes: true,
        show_normal_status_icons: true,
        show_excluded_status_icons: true,
        ..Default::default()
    }
}
