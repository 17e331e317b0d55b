//! Status cache invalidation and the refresh progress lifecycle.
//!
//! The [`RefreshCoordinator`] owns at most one progress indicator. A refresh is
//! started by the user, the status cache repopulates on its own, and the cache
//! changed notification ends the refresh. While the indicator is alive a
//! heartbeat subscription keeps reporting a fixed fraction so it visibly stays
//! busy; the value says nothing about real completion.
//!
//! # States
//! - **Idle**: no indicator, no heartbeat
//! - **Refreshing**: exactly one indicator token and one heartbeat subscription

use crate::core::{
    collaborators::{
        EventSource, IntegrationState, OverlayHost, ProgressSink, ProgressToken, StatusCache,
        Subscription,
    },
    error::{OverlayError, Result},
    preferences::PreferenceSnapshot,
};

pub const REFRESH_PROGRESS_TITLE: &str = "Git Refresh";
pub const REFRESH_PROGRESS_MESSAGE: &str = "Checking all git statuses...";
/// Reported on every heartbeat to keep the indefinite indicator alive.
pub const HEARTBEAT_FRACTION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing {
        token: ProgressToken,
        heartbeat: Subscription,
    },
}

/// The environment a refresh operates on.
pub struct RefreshContext<'a> {
    pub cache: &'a mut dyn StatusCache,
    pub integration: &'a mut dyn IntegrationState,
    pub progress: &'a mut dyn ProgressSink,
    pub host: &'a mut dyn OverlayHost,
}

#[derive(Debug)]
pub struct RefreshCoordinator {
    state: RefreshState,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self {
            state: RefreshState::Idle,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self.state, RefreshState::Refreshing { .. })
    }

    pub fn active_token(&self) -> Option<ProgressToken> {
        match self.state {
            RefreshState::Refreshing { token, .. } => Some(token),
            RefreshState::Idle => None,
        }
    }

    /// Invalidate the status cache and show a refresh indicator.
    ///
    /// Rejected with [`OverlayError::IntegrationDisabled`] when the integration
    /// or database population is off; nothing is touched in that case. A refresh
    /// already in flight has its indicator replaced, never duplicated.
    pub fn invalidate(
        &mut self,
        prefs: &PreferenceSnapshot,
        ctx: RefreshContext<'_>,
    ) -> Result<()> {
        if !prefs.can_refresh() {
            log::debug!("Refresh rejected: integration or database population disabled");
            return Err(OverlayError::IntegrationDisabled);
        }

        ctx.integration.clear_last_displayed_error();
        ctx.integration.set_silence_lock_prompts(false);
        ctx.cache.invalidate();
        ctx.integration.clear_lock_prompt_knowledge();

        self.clear(ctx.progress, ctx.host);

        let token = ctx
            .progress
            .start(REFRESH_PROGRESS_TITLE, REFRESH_PROGRESS_MESSAGE);
        let heartbeat = ctx.host.subscribe(EventSource::Update);
        self.state = RefreshState::Refreshing { token, heartbeat };

        log::debug!("Refresh started with progress token {token:?}");
        Ok(())
    }

    /// Heartbeat tick. Reports only while a refresh is in flight, so a tick that
    /// was already queued when the refresh ended does nothing.
    pub fn tick(&self, progress: &mut dyn ProgressSink) {
        if let RefreshState::Refreshing { token, .. } = self.state {
            progress.report(token, HEARTBEAT_FRACTION);
        }
    }

    /// The status cache replaced its contents. Ends any refresh in flight.
    ///
    /// Returns whether an indicator was released. Idempotent.
    pub fn on_cache_changed(
        &mut self,
        progress: &mut dyn ProgressSink,
        host: &mut dyn OverlayHost,
    ) -> bool {
        let released = self.clear(progress, host);
        if released {
            log::debug!("Refresh finished");
        }
        released
    }

    /// Release the indicator and stop the heartbeat, if any.
    pub fn clear(&mut self, progress: &mut dyn ProgressSink, host: &mut dyn OverlayHost) -> bool {
        match std::mem::replace(&mut self.state, RefreshState::Idle) {
            RefreshState::Refreshing { token, heartbeat } => {
                host.unsubscribe(heartbeat);
                progress.remove(token);
                true
            }
            RefreshState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Env {
        journal: SharedJournal,
        cache: FakeCache,
        integration: FakeIntegration,
        progress: FakeProgress,
        host: FakeHost,
    }

    impl Env {
        fn new() -> Self {
            let journal: SharedJournal = Rc::new(RefCell::new(Journal::default()));
            Self {
                cache: FakeCache {
                    journal: Some(journal.clone()),
                    ..Default::default()
                },
                integration: FakeIntegration(journal.clone()),
                progress: FakeProgress(journal.clone()),
                host: FakeHost(journal.clone()),
                journal,
            }
        }

        fn ctx(&mut self) -> RefreshContext<'_> {
            RefreshContext {
                cache: &mut self.cache,
                integration: &mut self.integration,
                progress: &mut self.progress,
                host: &mut self.host,
            }
        }
    }

    #[test]
    fn test_invalidate_starts_refresh() {
        let mut env = Env::new();
        let mut coordinator = RefreshCoordinator::new();

        coordinator.invalidate(&enabled_prefs(), env.ctx()).unwrap();

        assert!(coordinator.is_refreshing());
        let journal = env.journal.borrow();
        assert_eq!(journal.active_tokens.len(), 1);
        assert_eq!(Some(journal.active_tokens[0]), coordinator.active_token());
        assert_eq!(journal.subscribed_to(EventSource::Update), 1);
        assert_eq!(journal.invalidations, 1);
        assert_eq!(journal.cleared_errors, 1);
        assert_eq!(journal.cleared_lock_knowledge, 1);
        assert_eq!(journal.silence, Some(false));
    }

    #[test]
    fn test_invalidate_twice_keeps_single_token() {
        let mut env = Env::new();
        let mut coordinator = RefreshCoordinator::new();

        coordinator.invalidate(&enabled_prefs(), env.ctx()).unwrap();
        let first = coordinator.active_token();
        coordinator.invalidate(&enabled_prefs(), env.ctx()).unwrap();

        let journal = env.journal.borrow();
        assert_eq!(journal.started, 2);
        assert_eq!(journal.active_tokens.len(), 1);
        assert_eq!(journal.removed, vec![first.unwrap()]);
        assert_eq!(journal.subscribed_to(EventSource::Update), 1);
        assert_ne!(coordinator.active_token(), first);
    }

    #[test]
    fn test_invalidate_rejected_when_population_disabled() {
        let mut env = Env::new();
        let mut coordinator = RefreshCoordinator::new();
        let prefs = PreferenceSnapshot {
            populate_database_enabled: false,
            ..enabled_prefs()
        };

        let result = coordinator.invalidate(&prefs, env.ctx());

        assert!(matches!(result, Err(OverlayError::IntegrationDisabled)));
        assert_eq!(coordinator.state(), RefreshState::Idle);
        let journal = env.journal.borrow();
        assert_eq!(journal.started, 0);
        assert_eq!(journal.invalidations, 0);
        assert_eq!(journal.cleared_errors, 0);
    }

    #[test]
    fn test_invalidate_rejected_when_core_integration_disabled() {
        let mut env = Env::new();
        let mut coordinator = RefreshCoordinator::new();
        let prefs = PreferenceSnapshot {
            core_integration_enabled: false,
            ..enabled_prefs()
        };

        assert!(coordinator.invalidate(&prefs, env.ctx()).is_err());
        assert!(!coordinator.is_refreshing());
    }

    #[test]
    fn test_heartbeat_reports_midpoint_while_refreshing() {
        let mut env = Env::new();
        let mut coordinator = RefreshCoordinator::new();

        coordinator.tick(&mut env.progress);
        assert!(env.journal.borrow().reports.is_empty());

        coordinator.invalidate(&enabled_prefs(), env.ctx()).unwrap();
        coordinator.tick(&mut env.progress);
        coordinator.tick(&mut env.progress);

        let token = coordinator.active_token().unwrap();
        assert_eq!(
            env.journal.borrow().reports,
            vec![(token, HEARTBEAT_FRACTION), (token, HEARTBEAT_FRACTION)]
        );
    }

    #[test]
    fn test_cache_changed_ends_refresh() {
        let mut env = Env::new();
        let mut coordinator = RefreshCoordinator::new();
        coordinator.invalidate(&enabled_prefs(), env.ctx()).unwrap();

        assert!(coordinator.on_cache_changed(&mut env.progress, &mut env.host));

        assert_eq!(coordinator.state(), RefreshState::Idle);
        let journal = env.journal.borrow();
        assert!(journal.active_tokens.is_empty());
        assert_eq!(journal.subscribed_to(EventSource::Update), 0);
        drop(journal);

        // A tick queued before the cache changed is harmless.
        coordinator.tick(&mut env.progress);
        assert!(env.journal.borrow().reports.is_empty());
    }

    #[test]
    fn test_cache_changed_when_idle_is_noop() {
        let mut env = Env::new();
        let mut coordinator = RefreshCoordinator::new();

        assert!(!coordinator.on_cache_changed(&mut env.progress, &mut env.host));
        assert!(!coordinator.on_cache_changed(&mut env.progress, &mut env.host));

        let journal = env.journal.borrow();
        assert_eq!(journal.started, 0);
        assert!(journal.removed.is_empty());
        assert!(journal.subscriptions.is_empty());
        assert_eq!(coordinator.state(), RefreshState::Idle);
    }
}
