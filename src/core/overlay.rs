//! Overlay orchestration: hook management, rendering and user commands.
//!
//! [`OverlayController`] owns every collaborator and is driven by the host
//! through discrete events: preference changes, cache changes, per-item render
//! requests, lock icon clicks, the refresh menu command and update ticks. All
//! of them run on the host's single event thread.
//!
//! # Lifecycle
//! 1. [`OverlayController::new`] wires the collaborators, nothing is installed yet
//! 2. [`OverlayController::init`] subscribes to preference and cache notifications
//!    and applies the current preferences
//! 3. [`OverlayController::teardown`] removes everything `init` installed

use crate::core::{
    collaborators::{
        EventSource, HookHandle, IntegrationState, OverlayHost, PathMatcher, PreferencesStore,
        ProgressSink, StatusCache, Subscription,
    },
    error::Result,
    geometry::Rect,
    icon_resolver::{self, IconPlan, ItemContext, Slot},
    lock_details::format_lock_details,
    preferences::PreferenceSnapshot,
    refresh::{RefreshContext, RefreshCoordinator},
    state::ItemId,
};

pub const REFRESH_MENU_TEXT: &str = "Refresh Icons && Locks";
pub const LOCK_DETAILS_TITLE: &str = "Git LFS Lock Details";

/// The collaborators an [`OverlayController`] is built from.
pub struct OverlayServices {
    pub preferences: Box<dyn PreferencesStore>,
    pub cache: Box<dyn StatusCache>,
    pub progress: Box<dyn ProgressSink>,
    pub matcher: Box<dyn PathMatcher>,
    pub integration: Box<dyn IntegrationState>,
    pub host: Box<dyn OverlayHost>,
}

pub struct OverlayController {
    services: OverlayServices,
    prefs: PreferenceSnapshot,
    refresh: RefreshCoordinator,
    item_hook: Option<HookHandle>,
    subscriptions: Vec<Subscription>,
}

impl OverlayController {
    pub fn new(services: OverlayServices) -> Self {
        let prefs = services.preferences.snapshot();
        Self {
            services,
            prefs,
            refresh: RefreshCoordinator::new(),
            item_hook: None,
            subscriptions: Vec::new(),
        }
    }

    /// Subscribe to notifications and apply the current preferences.
    ///
    /// Calling it again while initialised does not subscribe twice.
    pub fn init(&mut self) {
        if self.subscriptions.is_empty() {
            let host = &mut self.services.host;
            self.subscriptions = vec![
                host.subscribe(EventSource::PreferencesChanged),
                host.subscribe(EventSource::CacheChanged),
            ];
        }

        self.on_preferences_changed();
    }

    /// Undo everything [`init`](Self::init) installed and drop any refresh indicator.
    pub fn teardown(&mut self) {
        self.remove_item_hook();
        for subscription in self.subscriptions.drain(..) {
            self.services.host.unsubscribe(subscription);
        }
        self.refresh.clear(
            self.services.progress.as_mut(),
            self.services.host.as_mut(),
        );
    }

    pub fn preferences(&self) -> &PreferenceSnapshot {
        &self.prefs
    }

    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    pub fn is_hook_installed(&self) -> bool {
        self.item_hook.is_some()
    }

    pub fn cache(&self) -> &dyn StatusCache {
        self.services.cache.as_ref()
    }

    pub fn cache_mut(&mut self) -> &mut dyn StatusCache {
        self.services.cache.as_mut()
    }

    pub fn on_preferences_changed(&mut self) {
        self.prefs = self.services.preferences.snapshot();

        if self.prefs.is_active() {
            if self.item_hook.is_none() {
                self.item_hook = Some(self.services.host.register_item_hook());
                log::debug!("Item render hook installed");
            }
        } else {
            self.remove_item_hook();
        }

        self.on_cache_changed();
    }

    pub fn on_cache_changed(&mut self) {
        self.refresh.on_cache_changed(
            self.services.progress.as_mut(),
            self.services.host.as_mut(),
        );
        self.services.host.repaint();
    }

    /// Heartbeat from the host's update loop.
    pub fn tick(&mut self) {
        self.refresh.tick(self.services.progress.as_mut());
    }

    /// Compute and draw the icons of one item. Returns what was drawn.
    pub fn on_item_gui(&mut self, item: &ItemId, bounds: Rect) -> IconPlan {
        let plan = self.plan_item(item, bounds);
        for placement in &plan {
            self.services.host.draw(item, placement);
        }
        plan
    }

    /// The icons [`on_item_gui`](Self::on_item_gui) would draw, without drawing them.
    pub fn plan_item(&self, item: &ItemId, bounds: Rect) -> IconPlan {
        let cache = self.services.cache.as_ref();

        if item.is_non_item() {
            return icon_resolver::resolve_non_item(item, bounds, cache.data_is_incomplete());
        }

        let record = cache.status(item);
        let path = if record.is_valid() {
            Some(record.path.clone())
        } else {
            cache.item_path(item)
        };
        let context = ItemContext {
            bounds,
            path: path.as_deref(),
        };

        icon_resolver::resolve(&record, &self.prefs, &context, self.services.matcher.as_ref())
    }

    /// Lock details text for `item`, covering stale entries as well.
    pub fn lock_details(&self, item: &ItemId) -> String {
        let records = self
            .services
            .cache
            .all_known_statuses(item, false, true, true);
        format_lock_details(&records)
    }

    /// The lock icon of `item` was clicked.
    pub fn on_lock_clicked(&mut self, item: &ItemId) {
        let details = self.lock_details(item);
        self.services.host.show_dialog(LOCK_DETAILS_TITLE, &details);
    }

    /// Route a click inside the item's box to the interactive slot under it.
    ///
    /// Returns true when the click hit the lock icon.
    pub fn on_item_click(&mut self, item: &ItemId, bounds: Rect, x: f32, y: f32) -> bool {
        let hit = self.plan_item(item, bounds).iter().any(|placement| {
            placement.interactive
                && placement.slot == Slot::Lock
                && x >= placement.rect.x
                && x < placement.rect.right()
                && y >= placement.rect.y
                && y < placement.rect.bottom()
        });

        if hit {
            self.on_lock_clicked(item);
        }
        hit
    }

    /// The refresh menu command.
    ///
    /// When the integration is disabled the error is shown as a blocking
    /// dialog and also returned to the caller.
    pub fn refresh_menu(&mut self) -> Result<()> {
        let services = &mut self.services;
        let result = self.refresh.invalidate(
            &self.prefs,
            RefreshContext {
                cache: services.cache.as_mut(),
                integration: services.integration.as_mut(),
                progress: services.progress.as_mut(),
                host: services.host.as_mut(),
            },
        );

        if let Err(e) = &result {
            if let Some(title) = e.dialog_title() {
                services.host.show_dialog(title, &e.to_string());
            }
        }

        result
    }

    fn remove_item_hook(&mut self) {
        if let Some(hook) = self.item_hook.take() {
            self.services.host.remove_item_hook(hook);
            log::debug!("Item render hook removed");
        }
    }
}
