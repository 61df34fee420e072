use std::{cell::Cell, rc::Rc};

use drive_host::{
    unix_time_ms_now, AuthFuture, AuthService, AuthSubscription, Session, SessionBroadcast,
    SessionCallback,
};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::{check_response, transport_error, SupabaseClient};
use crate::{location, session_store::WebSessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Tokens delivered in the URL fragment when a magic link is followed.
pub struct AuthFragment {
    /// Bearer token for the new session.
    pub access_token: String,
    /// Renewal token, when issued.
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds, when reported.
    pub expires_in_secs: Option<u64>,
}

/// Parses a magic-link callback fragment (without the leading `#`).
///
/// Returns `Ok(None)` when the fragment carries no auth payload.
///
/// # Errors
///
/// Returns the provider's description when the fragment reports a failed sign-in, such as an
/// expired link.
pub fn parse_auth_fragment(fragment: &str) -> Result<Option<AuthFragment>, String> {
    let url = Url::parse(&format!("http://fragment.invalid/?{fragment}"))
        .map_err(|e| format!("auth fragment unreadable: {e}"))?;
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in_secs = None;
    let mut error = None;
    let mut error_description = None;
    for (name, value) in url.query_pairs() {
        match name.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "refresh_token" => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in_secs = value.parse().ok(),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }
    if let Some(error) = error {
        return Err(error_description.unwrap_or(error));
    }
    Ok(access_token
        .filter(|token| !token.is_empty())
        .map(|access_token| AuthFragment {
            access_token,
            refresh_token,
            expires_in_secs,
        }))
}

#[derive(Debug, Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    create_user: bool,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Clone)]
/// Magic-link auth adapter for the Supabase auth REST API.
///
/// The session is restored lazily on the first [`AuthService::get_session`] call, from either a
/// magic-link callback fragment or `localStorage`.
pub struct SupabaseAuthService {
    client: SupabaseClient,
    store: WebSessionStore,
    broadcast: SessionBroadcast,
    restored: Rc<Cell<bool>>,
}

impl SupabaseAuthService {
    pub(crate) fn new(client: SupabaseClient) -> Self {
        let store = WebSessionStore::for_config(client.config());
        Self {
            client,
            store,
            broadcast: SessionBroadcast::default(),
            restored: Rc::default(),
        }
    }

    fn install(&self, session: Option<Session>) {
        *self.client.session.borrow_mut() = session;
    }

    async fn restore_session(&self) -> Result<Option<Session>, String> {
        if self.restored.replace(true) {
            return Ok(self.client.session.borrow().clone());
        }

        if let Some(fragment) = location::current_fragment() {
            let parsed = parse_auth_fragment(&fragment);
            if parsed.as_ref().map_or(true, Option::is_some) {
                location::clear_fragment();
            }
            if let Some(tokens) = parsed? {
                let session = self.session_from_fragment(tokens).await?;
                self.store.save(&session)?;
                self.install(Some(session.clone()));
                return Ok(Some(session));
            }
        }

        let session = self.store.load();
        self.install(session.clone());
        Ok(session)
    }

    async fn session_from_fragment(&self, tokens: AuthFragment) -> Result<Session, String> {
        let url = self
            .client
            .endpoint(&self.client.config().auth_url(), &["user"])?;
        let response = self
            .client
            .http
            .get(url)
            .header("apikey", self.client.config().anon_key.as_str())
            .bearer_auth(&tokens.access_token)
            .send()
            .await
            .map_err(|e| transport_error("user", e))?;
        let user: UserResponse = check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| format!("user response decode failed: {e}"))?;
        Ok(Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user_id: user.id,
            email: user.email,
            expires_at_unix_ms: tokens
                .expires_in_secs
                .map(|secs| unix_time_ms_now().saturating_add(secs.saturating_mul(1000))),
        })
    }

    async fn request_link(&self, email: &str) -> Result<(), String> {
        let mut url = self
            .client
            .endpoint(&self.client.config().auth_url(), &["otp"])?;
        if let Some(redirect) = location::current_page_url() {
            url.query_pairs_mut().append_pair("redirect_to", &redirect);
        }
        let response = self
            .client
            .authorize(self.client.http.post(url))
            .json(&OtpRequest {
                email,
                create_user: true,
            })
            .send()
            .await
            .map_err(|e| transport_error("otp", e))?;
        check_response(response).await?;
        Ok(())
    }

    async fn end_session(&self) -> Result<(), String> {
        let has_session = self.client.session.borrow().is_some();
        if has_session {
            let url = self
                .client
                .endpoint(&self.client.config().auth_url(), &["logout"])?;
            let response = self
                .client
                .authorize(self.client.http.post(url))
                .send()
                .await
                .map_err(|e| transport_error("logout", e))?;
            // An already revoked token still ends the local session.
            if !matches!(
                response.status(),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
            ) {
                check_response(response).await?;
            }
        }
        self.install(None);
        self.store.clear()?;
        self.broadcast.emit(None);
        Ok(())
    }
}

impl AuthService for SupabaseAuthService {
    fn get_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<Session>, String>> {
        Box::pin(self.restore_session())
    }

    fn subscribe(&self, callback: SessionCallback) -> AuthSubscription {
        let listener = self.broadcast.subscribe(callback);
        let auth = self.clone();
        let storage_watch = location::watch_storage_key(
            self.store.key().to_string(),
            Box::new(move || {
                // Another tab followed the magic link or signed out.
                let session = auth.store.load();
                auth.install(session.clone());
                auth.broadcast.emit(session);
            }),
        );
        AuthSubscription::new(move || {
            storage_watch.unsubscribe();
            listener.unsubscribe();
        })
    }

    fn sign_in_with_otp<'a>(&'a self, email: &'a str) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(self.request_link(email))
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(self.end_session())
    }
}
