//! Backend connection settings.

/// Storage bucket holding every drive object.
pub const DEFAULT_BUCKET: &str = "files";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Service endpoint, API key, and bucket for the managed backend.
///
/// Absent values are kept as empty strings so the app can still mount; callers log
/// [`BackendConfig::missing_fields`] instead of refusing to start.
pub struct BackendConfig {
    /// Base service URL, without a trailing slash.
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
    /// Storage bucket name.
    pub bucket: String,
}

impl BackendConfig {
    /// Builds a config from optional raw values, trimming whitespace and trailing slashes.
    pub fn from_values(url: Option<&str>, anon_key: Option<&str>) -> Self {
        Self {
            url: url
                .map(|value| value.trim().trim_end_matches('/').to_string())
                .unwrap_or_default(),
            anon_key: anon_key
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    /// Reads `SUPABASE_URL` and `SUPABASE_ANON_KEY` captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY"))
    }

    /// Overrides the bucket name.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Returns the names of required settings that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.is_empty() {
            missing.push("SUPABASE_URL");
        }
        if self.anon_key.is_empty() {
            missing.push("SUPABASE_ANON_KEY");
        }
        missing
    }

    /// Returns `true` when every required setting is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Base URL of the storage REST API.
    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.url)
    }

    /// Base URL of the auth REST API.
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_normalizes_and_reports_missing_fields() {
        let config = BackendConfig::from_values(Some(" https://abc.supabase.co/ "), None);
        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.bucket, DEFAULT_BUCKET);
        assert_eq!(config.missing_fields(), vec!["SUPABASE_ANON_KEY"]);
        assert!(!config.is_complete());

        let empty = BackendConfig::from_values(None, Some("   "));
        assert_eq!(
            empty.missing_fields(),
            vec!["SUPABASE_URL", "SUPABASE_ANON_KEY"]
        );
    }

    #[test]
    fn endpoint_urls_derive_from_base() {
        let config = BackendConfig::from_values(Some("https://abc.supabase.co"), Some("key"))
            .with_bucket("media");
        assert!(config.is_complete());
        assert_eq!(config.storage_url(), "https://abc.supabase.co/storage/v1");
        assert_eq!(config.auth_url(), "https://abc.supabase.co/auth/v1");
        assert_eq!(config.bucket, "media");
    }
}
