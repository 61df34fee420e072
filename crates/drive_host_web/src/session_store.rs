//! `localStorage`-backed session persistence.
//!
//! The browser API boundary is synchronous; values are JSON text under one key per backend
//! project, the same slot the hosted JS client uses.

use drive_host::{unix_time_ms_now, BackendConfig, Session};

#[derive(Debug, Clone)]
/// Session persistence backed by `window.localStorage`.
pub struct WebSessionStore {
    key: String,
}

impl WebSessionStore {
    /// Creates a store for the project addressed by `config`.
    pub fn for_config(config: &BackendConfig) -> Self {
        Self {
            key: session_storage_key(config),
        }
    }

    /// Returns the `localStorage` key used by this store.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the persisted session, dropping it when unreadable or expired.
    pub fn load(&self) -> Option<Session> {
        let raw = load_raw(&self.key)?;
        decode_session(&raw, unix_time_ms_now())
    }

    /// Persists `session`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails or localStorage rejects the write.
    pub fn save(&self, session: &Session) -> Result<(), String> {
        let raw = serde_json::to_string(session).map_err(|e| e.to_string())?;
        save_raw(&self.key, &raw)
    }

    /// Removes the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn clear(&self) -> Result<(), String> {
        delete_raw(&self.key)
    }
}

/// Builds the storage key `sb-<project-ref>-auth-token` from the backend host name.
pub fn session_storage_key(config: &BackendConfig) -> String {
    let host = config
        .url
        .split("://")
        .nth(1)
        .unwrap_or(config.url.as_str());
    let project_ref = host
        .split(['.', ':', '/'])
        .next()
        .filter(|label| !label.is_empty())
        .unwrap_or("local");
    format!("sb-{project_ref}-auth-token")
}

/// Decodes a persisted session, rejecting it once `now_ms` reaches its expiry.
pub fn decode_session(raw: &str, now_ms: u64) -> Option<Session> {
    let session: Session = serde_json::from_str(raw).ok()?;
    match session.expires_at_unix_ms {
        Some(expires_at) if expires_at <= now_ms => None,
        _ => Some(session),
    }
}

fn load_raw(key: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        storage.get_item(key).ok().flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = key;
        None
    }
}

fn save_raw(key: &str, raw_json: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(key, raw_json)
            .map_err(|e| format!("localStorage set_item failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (key, raw_json);
        Ok(())
    }
}

fn delete_raw(key: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .remove_item(key)
            .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = key;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at_unix_ms: Option<u64>) -> Session {
        Session {
            access_token: "t".to_string(),
            refresh_token: Some("r".to_string()),
            user_id: "u1".to_string(),
            email: None,
            expires_at_unix_ms,
        }
    }

    #[test]
    fn storage_key_uses_project_ref() {
        let hosted = BackendConfig::from_values(Some("https://abcdef.supabase.co"), Some("k"));
        assert_eq!(session_storage_key(&hosted), "sb-abcdef-auth-token");

        let local = BackendConfig::from_values(Some("http://localhost:54321"), Some("k"));
        assert_eq!(session_storage_key(&local), "sb-localhost-auth-token");

        let missing = BackendConfig::from_values(None, None);
        assert_eq!(session_storage_key(&missing), "sb-local-auth-token");
    }

    #[test]
    fn decode_session_drops_expired_and_invalid_payloads() {
        let raw = serde_json::to_string(&session(Some(1_000))).expect("serialize");
        assert_eq!(decode_session(&raw, 999), Some(session(Some(1_000))));
        assert_eq!(decode_session(&raw, 1_000), None);

        let no_expiry = serde_json::to_string(&session(None)).expect("serialize");
        assert!(decode_session(&no_expiry, u64::MAX).is_some());
        assert_eq!(decode_session("{not json", 0), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_store_is_empty_and_accepts_writes() {
        let store = WebSessionStore::for_config(&BackendConfig::from_values(
            Some("https://abcdef.supabase.co"),
            Some("k"),
        ));
        assert_eq!(store.key(), "sb-abcdef-auth-token");
        store.save(&session(None)).expect("save");
        assert_eq!(store.load(), None);
        store.clear().expect("clear");
    }
}
