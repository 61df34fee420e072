//! Authentication provider contracts, session model, and subscription plumbing.

use std::{
    cell::RefCell,
    fmt,
    future::Future,
    pin::Pin,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`AuthService`] async methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback invoked with the new session whenever it changes.
pub type SessionCallback = Rc<dyn Fn(Option<Session>)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Session handle issued by the auth provider.
///
/// The drive only checks for presence and reads [`Session::user_id`] as its key prefix. The
/// token fields are carried for the storage adapter.
pub struct Session {
    /// Bearer token sent with storage requests.
    pub access_token: String,
    /// Token used to renew the session, when issued.
    pub refresh_token: Option<String>,
    /// Stable user identifier.
    pub user_id: String,
    /// Email address the magic link was sent to.
    pub email: Option<String>,
    /// Absolute expiry in unix milliseconds, when known.
    pub expires_at_unix_ms: Option<u64>,
}

/// Host service for passwordless (magic-link) authentication.
pub trait AuthService {
    /// Returns the current session, if any.
    fn get_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<Session>, String>>;

    /// Registers `callback` for session changes. Dropping the handle unsubscribes.
    fn subscribe(&self, callback: SessionCallback) -> AuthSubscription;

    /// Sends a one-time sign-in link to `email`.
    fn sign_in_with_otp<'a>(&'a self, email: &'a str) -> AuthFuture<'a, Result<(), String>>;

    /// Ends the current session.
    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>>;
}

/// Scoped session-change subscription. The listener is removed when this handle drops.
pub struct AuthSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl AuthSubscription {
    /// Builds a subscription that runs `release` exactly once on drop.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Builds a subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Releases the subscription now.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Default)]
struct BroadcastInner {
    next_id: u64,
    listeners: Vec<(u64, SessionCallback)>,
}

#[derive(Clone, Default)]
/// Fan-out list of session listeners shared by auth adapters.
pub struct SessionBroadcast {
    inner: Rc<RefCell<BroadcastInner>>,
}

impl SessionBroadcast {
    /// Adds a listener and returns the handle that removes it.
    pub fn subscribe(&self, callback: SessionCallback) -> AuthSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.listeners.push((id, callback));
            id
        };
        let weak: Weak<RefCell<BroadcastInner>> = Rc::downgrade(&self.inner);
        AuthSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Invokes every current listener with `session`.
    pub fn emit(&self, session: Option<Session>) {
        // Listeners may subscribe or unsubscribe while being notified.
        let listeners: Vec<SessionCallback> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for listener in listeners {
            listener(session.clone());
        }
    }

    /// Returns the number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for SessionBroadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBroadcast")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Auth adapter for hosts without an auth backend. Never has a session.
pub struct NoopAuthService;

impl AuthService for NoopAuthService {
    fn get_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<Session>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn subscribe(&self, _callback: SessionCallback) -> AuthSubscription {
        AuthSubscription::detached()
    }

    fn sign_in_with_otp<'a>(&'a self, _email: &'a str) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async { Err("auth unavailable: sign_in_with_otp".to_string()) })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory auth provider used as the simulated backend in tests.
///
/// Requested links are recorded; [`MemoryAuthService::complete_sign_in`] plays the part of the
/// user following the link from their inbox.
pub struct MemoryAuthService {
    session: Rc<RefCell<Option<Session>>>,
    broadcast: SessionBroadcast,
    requested_links: Rc<RefCell<Vec<String>>>,
    sign_in_failure: Rc<RefCell<Option<String>>>,
}

impl MemoryAuthService {
    /// Makes every subsequent sign-in request fail with `message`.
    pub fn fail_sign_in(&self, message: impl Into<String>) {
        *self.sign_in_failure.borrow_mut() = Some(message.into());
    }

    /// Returns every email a link was requested for.
    pub fn requested_links(&self) -> Vec<String> {
        self.requested_links.borrow().clone()
    }

    /// Installs `session` and notifies subscribers, as if a magic link was followed.
    pub fn complete_sign_in(&self, session: Session) {
        *self.session.borrow_mut() = Some(session.clone());
        self.broadcast.emit(Some(session));
    }

    /// Returns the number of live session subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.broadcast.listener_count()
    }
}

impl AuthService for MemoryAuthService {
    fn get_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<Session>, String>> {
        Box::pin(async move { Ok(self.session.borrow().clone()) })
    }

    fn subscribe(&self, callback: SessionCallback) -> AuthSubscription {
        self.broadcast.subscribe(callback)
    }

    fn sign_in_with_otp<'a>(&'a self, email: &'a str) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Some(message) = self.sign_in_failure.borrow().clone() {
                return Err(message);
            }
            self.requested_links.borrow_mut().push(email.to_string());
            Ok(())
        })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.session.borrow_mut().take();
            self.broadcast.emit(None);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn session(user_id: &str) -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: None,
            user_id: user_id.to_string(),
            email: Some("me@example.com".to_string()),
            expires_at_unix_ms: None,
        }
    }

    #[test]
    fn dropping_subscription_removes_listener() {
        let auth = MemoryAuthService::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = auth.subscribe(Rc::new(move |s: Option<Session>| {
            sink.borrow_mut().push(s.map(|s| s.user_id));
        }));
        assert_eq!(auth.subscriber_count(), 1);

        auth.complete_sign_in(session("u1"));
        drop(sub);
        assert_eq!(auth.subscriber_count(), 0);
        block_on(auth.sign_out()).expect("sign out");

        assert_eq!(*seen.borrow(), vec![Some("u1".to_string())]);
    }

    #[test]
    fn memory_auth_records_links_and_tracks_session() {
        let auth = MemoryAuthService::default();
        block_on(auth.sign_in_with_otp("me@example.com")).expect("otp");
        assert_eq!(auth.requested_links(), vec!["me@example.com"]);
        assert_eq!(block_on(auth.get_session()).expect("session"), None);

        auth.complete_sign_in(session("u1"));
        assert_eq!(
            block_on(auth.get_session())
                .expect("session")
                .map(|s| s.user_id),
            Some("u1".to_string())
        );

        auth.fail_sign_in("rate limited");
        assert_eq!(
            block_on(auth.sign_in_with_otp("me@example.com")).expect_err("fails"),
            "rate limited"
        );
    }

    #[test]
    fn explicit_unsubscribe_releases_once() {
        let broadcast = SessionBroadcast::default();
        let sub = broadcast.subscribe(Rc::new(|_| {}));
        let other = broadcast.subscribe(Rc::new(|_| {}));
        sub.unsubscribe();
        assert_eq!(broadcast.listener_count(), 1);
        drop(other);
        assert_eq!(broadcast.listener_count(), 0);
        AuthSubscription::detached().unsubscribe();
    }
}
