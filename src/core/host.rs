//! Terminal implementations of the host-side collaborators.
//!
//! The command line has no file browser to paint into, so [`TerminalHost`]
//! prints every drawn icon as a line of text and every dialog as a framed
//! block. Handles are plain counters. [`LogProgressSink`] reports long-running
//! operations through `log`, and [`LocalIntegrationState`] keeps the transient
//! integration memory for the lifetime of one process.

use crate::core::{
    collaborators::{
        EventSource, HookHandle, IntegrationState, OverlayHost, ProgressSink, ProgressToken,
        Subscription,
    },
    icon_resolver::IconPlacement,
    output::{format_placement, print_dialog},
    state::ItemId,
};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct TerminalHost {
    next_handle: u64,
    subscriptions: HashMap<Subscription, EventSource>,
    hooks: HashSet<HookHandle>,
    repaints: usize,
    /// Print drawn icons and dialogs; off when only counting
    quiet: bool,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    pub fn repaints(&self) -> usize {
        self.repaints
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn has_item_hook(&self) -> bool {
        !self.hooks.is_empty()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl OverlayHost for TerminalHost {
    fn subscribe(&mut self, source: EventSource) -> Subscription {
        let subscription = Subscription(self.next());
        self.subscriptions.insert(subscription, source);
        log::debug!("Subscribed to {source:?} ({})", subscription.0);
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        if let Some(source) = self.subscriptions.remove(&subscription) {
            log::debug!("Unsubscribed from {source:?} ({})", subscription.0);
        }
    }

    fn register_item_hook(&mut self) -> HookHandle {
        let hook = HookHandle(self.next());
        self.hooks.insert(hook);
        hook
    }

    fn remove_item_hook(&mut self, hook: HookHandle) {
        self.hooks.remove(&hook);
    }

    fn repaint(&mut self) {
        self.repaints += 1;
    }

    fn draw(&mut self, item: &ItemId, placement: &IconPlacement) {
        log::trace!("Drawing {:?} for {}", placement.icon, item);
        if !self.quiet {
            println!("{}", format_placement(placement));
        }
    }

    fn show_dialog(&mut self, title: &str, message: &str) {
        log::info!("{title}: {message}");
        if !self.quiet {
            print_dialog(title, message);
        }
    }
}

#[derive(Debug, Default)]
pub struct LogProgressSink {
    next_token: u64,
    active: HashMap<ProgressToken, String>,
}

impl LogProgressSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.active.len()
    }
}

impl ProgressSink for LogProgressSink {
    fn start(&mut self, title: &str, message: &str) -> ProgressToken {
        self.next_token += 1;
        let token = ProgressToken(self.next_token);
        self.active.insert(token, title.to_string());
        log::info!("{title}: {message}");
        token
    }

    fn report(&mut self, token: ProgressToken, fraction: f32) {
        if let Some(title) = self.active.get(&token) {
            log::debug!("{title}: {:.0}%", fraction * 100.0);
        }
    }

    fn remove(&mut self, token: ProgressToken) {
        if let Some(title) = self.active.remove(&token) {
            log::debug!("{title}: done");
        }
    }
}

/// Integration memory that lives as long as the process.
#[derive(Debug, Default)]
pub struct LocalIntegrationState {
    pub last_displayed_error: Option<String>,
    /// Paths the user was already prompted to lock
    pub lock_prompt_knowledge: HashSet<String>,
    pub silence_lock_prompts: bool,
}

impl LocalIntegrationState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntegrationState for LocalIntegrationState {
    fn clear_last_displayed_error(&mut self) {
        self.last_displayed_error = None;
    }

    fn clear_lock_prompt_knowledge(&mut self) {
        self.lock_prompt_knowledge.clear();
    }

    fn set_silence_lock_prompts(&mut self, silence: bool) {
        self.silence_lock_prompts = silence;
    }
}
