//! REST adapters for a Supabase-compatible storage and auth backend.
//!
//! A single [`SupabaseClient`] is constructed at startup and handed out as explicit storage and
//! auth adapters. Both adapters share the client's session cell, so storage requests carry the
//! signed-in user's token as soon as the auth adapter installs it.

mod auth;
mod storage;

use std::{cell::RefCell, rc::Rc};

use drive_host::{BackendConfig, Session};
use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;

pub use auth::{parse_auth_fragment, AuthFragment, SupabaseAuthService};
pub use storage::{parse_timestamp_ms, SupabaseStorageService};

#[derive(Debug, Clone)]
/// Explicitly constructed backend handle shared by the storage and auth adapters.
pub struct SupabaseClient {
    http: reqwest::Client,
    config: Rc<BackendConfig>,
    session: Rc<RefCell<Option<Session>>>,
}

impl SupabaseClient {
    /// Creates a client for `config`.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Rc::new(config),
            session: Rc::default(),
        }
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Returns a storage adapter bound to the configured bucket.
    pub fn storage(&self) -> SupabaseStorageService {
        SupabaseStorageService::new(self.clone())
    }

    /// Returns an auth adapter sharing this client's session.
    pub fn auth(&self) -> SupabaseAuthService {
        SupabaseAuthService::new(self.clone())
    }

    fn bearer_token(&self) -> String {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.config.anon_key.as_str())
            .bearer_auth(self.bearer_token())
    }

    fn endpoint(&self, base: &str, segments: &[&str]) -> Result<Url, String> {
        let mut url = Url::parse(base).map_err(|e| format!("invalid backend url `{base}`: {e}"))?;
        url.path_segments_mut()
            .map_err(|_| format!("backend url `{base}` cannot carry a path"))?
            .extend(segments.iter().flat_map(|segment| segment.split('/')));
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

async fn check_response(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let raw = response.text().await.unwrap_or_default();
    Err(format!("{status}: {}", error_message(&raw)))
}

fn error_message(raw: &str) -> String {
    serde_json::from_str::<ErrorBody>(raw)
        .ok()
        .and_then(|body| {
            body.message
                .or(body.msg)
                .or(body.error_description)
                .or(body.error)
        })
        .unwrap_or_else(|| raw.trim().to_string())
}

fn transport_error(op: &str, err: reqwest::Error) -> String {
    format!("{op} request failed: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(BackendConfig::from_values(
            Some("https://abc.supabase.co"),
            Some("anon"),
        ))
    }

    #[test]
    fn endpoint_encodes_each_key_segment() {
        let client = client();
        let url = client
            .endpoint(
                &client.config().storage_url(),
                &["object", "files", "public/my file#1.txt"],
            )
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://abc.supabase.co/storage/v1/object/files/public/my%20file%231.txt"
        );
    }

    #[test]
    fn endpoint_rejects_missing_base_url() {
        let client = SupabaseClient::new(BackendConfig::from_values(None, None));
        let err = client
            .endpoint(&client.config().storage_url(), &["object"])
            .expect_err("empty base url");
        assert!(err.contains("invalid backend url"));
    }

    #[test]
    fn bearer_token_prefers_session_over_anon_key() {
        let client = client();
        assert_eq!(client.bearer_token(), "anon");
        *client.session.borrow_mut() = Some(Session {
            access_token: "user-token".to_string(),
            refresh_token: None,
            user_id: "u1".to_string(),
            email: None,
            expires_at_unix_ms: None,
        });
        assert_eq!(client.bearer_token(), "user-token");
    }

    #[test]
    fn error_message_reads_known_fields_or_falls_back_to_body() {
        assert_eq!(
            error_message(r#"{"statusCode":"404","error":"not_found","message":"Object not found"}"#),
            "Object not found"
        );
        assert_eq!(
            error_message(r#"{"error_description":"Email rate limit exceeded"}"#),
            "Email rate limit exceeded"
        );
        assert_eq!(error_message(" bad gateway "), "bad gateway");
    }
}
