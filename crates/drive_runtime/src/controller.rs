//! Headless drive controller.
//!
//! [`DriveController`] owns one [`DriveState`], runs reducer-emitted effects sequentially against
//! the injected [`HostServices`], and feeds their outcomes back through the reducer. It is the
//! non-reactive twin of [`crate::DriveProvider`] and drives the behavior tests.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use drive_host::{unix_time_ms_now, AuthSubscription, FileEntry, HostServices, Session};
use leptos::logging;

use crate::{
    effects::execute_effect,
    model::{DriveState, DriveVariant},
    reducer::{reduce_drive, DriveAction, DriveEffect, DriveError},
    view,
};

/// Single-owner drive controller for one variant.
pub struct DriveController {
    host: HostServices,
    state: DriveState,
    inbox: Rc<RefCell<VecDeque<DriveAction>>>,
    subscription: Option<AuthSubscription>,
}

impl DriveController {
    /// Creates an idle controller. Call [`Self::start`] to load the first listing.
    pub fn new(variant: DriveVariant, host: HostServices) -> Self {
        Self {
            host,
            state: DriveState::new(variant),
            inbox: Rc::default(),
            subscription: None,
        }
    }

    /// Loads the initial view.
    ///
    /// The public drive lists immediately. The authenticated drive subscribes to session changes
    /// and applies the current session, which lists the user's prefix when one exists.
    pub async fn start(&mut self) -> Result<(), DriveError> {
        match self.state.variant {
            DriveVariant::Public => self.dispatch(DriveAction::RefreshListing).await,
            DriveVariant::Authenticated => {
                if self.subscription.is_none() {
                    let inbox = Rc::clone(&self.inbox);
                    self.subscription =
                        Some(self.host.auth.subscribe(Rc::new(move |session: Option<Session>| {
                            inbox
                                .borrow_mut()
                                .push_back(DriveAction::SessionChanged(session));
                        })));
                }
                match self.host.auth.get_session().await {
                    Ok(session) => self.dispatch(DriveAction::SessionChanged(session)).await,
                    Err(err) => {
                        logging::warn!("session restore failed: {err}");
                        Ok(())
                    }
                }
            }
        }
    }

    /// Applies `action` and runs every effect it causes, including follow-up actions.
    ///
    /// # Errors
    ///
    /// Returns the reducer's rejection of `action` itself. Failures of collaborator calls are
    /// handled inside the drive (notice, notification, or log) and do not surface here.
    pub async fn dispatch(&mut self, action: DriveAction) -> Result<(), DriveError> {
        let effects = reduce_drive(&mut self.state, action)?;
        self.run(effects.into()).await;
        Ok(())
    }

    /// Applies session changes that arrived through the auth subscription since the last call.
    pub async fn sync(&mut self) {
        self.run(VecDeque::new()).await;
    }

    async fn run(&mut self, mut pending: VecDeque<DriveEffect>) {
        loop {
            self.drain_inbox(&mut pending);
            let Some(effect) = pending.pop_front() else {
                break;
            };
            if let Some(outcome) = execute_effect(&self.host, effect).await {
                self.apply_follow_up(outcome, &mut pending);
            }
        }
    }

    fn drain_inbox(&mut self, pending: &mut VecDeque<DriveEffect>) {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            self.apply_follow_up(action, pending);
        }
    }

    fn apply_follow_up(&mut self, action: DriveAction, pending: &mut VecDeque<DriveEffect>) {
        match reduce_drive(&mut self.state, action) {
            Ok(effects) => pending.extend(effects),
            Err(err) => logging::warn!("drive reducer error: {err}"),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &DriveState {
        &self.state
    }

    /// Entries shown right now.
    pub fn visible_entries(&self) -> Vec<FileEntry> {
        view::visible_entries(&self.state, unix_time_ms_now())
    }

    /// Names shown at `now_ms`.
    pub fn visible_names_at(&self, now_ms: u64) -> Vec<String> {
        view::visible_names(&self.state, now_ms)
    }

    /// Releases the auth subscription. Later session changes are ignored.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.inbox.borrow_mut().clear();
    }
}
