use std::collections::BTreeSet;

use drive_host::{FileEntry, Session, PUBLIC_PREFIX};
use serde::{Deserialize, Serialize};

/// Validity of signed download URLs, in seconds.
pub const SIGNED_URL_TTL_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriveVariant {
    /// Shared `public` prefix, no login, local-only trash.
    Public,
    /// Per-user prefix behind a magic-link login.
    Authenticated,
}

impl DriveVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Authenticated => "authenticated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriveMode {
    /// "My Drive": entries not marked as trashed.
    #[default]
    Primary,
    /// "Trash": entries marked as trashed.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStyle {
    #[default]
    Grid,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecencyFilter {
    #[default]
    All,
    /// Created within the trailing 24 hours.
    Recent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: DriveMode,
    pub search_term: String,
    pub display_style: DisplayStyle,
    pub recency_filter: RecencyFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Unauthenticated,
    /// A magic link went out; the session callback can still complete the login.
    LinkSent { email: String },
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Client-local drive state. Nothing here is persisted; a reload starts from [`DriveState::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveState {
    pub variant: DriveVariant,
    pub view: ViewState,
    /// Most recent successful listing, in store order.
    pub listing: Vec<FileEntry>,
    /// Names marked as trashed in the public drive. Never sent to the store.
    pub tombstones: BTreeSet<String>,
    pub session: Option<Session>,
    pub auth: AuthPhase,
    pub preview_url: Option<String>,
    pub notice: Option<Notice>,
}

impl DriveState {
    pub fn new(variant: DriveVariant) -> Self {
        Self {
            variant,
            view: ViewState::default(),
            listing: Vec::new(),
            tombstones: BTreeSet::new(),
            session: None,
            auth: AuthPhase::default(),
            preview_url: None,
            notice: None,
        }
    }

    /// Key prefix the drive lists and writes under, if one is available yet.
    pub fn prefix(&self) -> Option<String> {
        match self.variant {
            DriveVariant::Public => Some(PUBLIC_PREFIX.to_string()),
            DriveVariant::Authenticated => self
                .session
                .as_ref()
                .map(|session| session.user_id.clone()),
        }
    }

    pub fn is_trashed(&self, name: &str) -> bool {
        self.tombstones.contains(name)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.session.as_ref().and_then(|session| session.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_follows_variant_and_session() {
        assert_eq!(
            DriveState::new(DriveVariant::Public).prefix().as_deref(),
            Some("public")
        );

        let mut state = DriveState::new(DriveVariant::Authenticated);
        assert_eq!(state.prefix(), None);
        state.session = Some(Session {
            access_token: "t".to_string(),
            refresh_token: None,
            user_id: "8c1d".to_string(),
            email: Some("me@example.com".to_string()),
            expires_at_unix_ms: None,
        });
        assert_eq!(state.prefix().as_deref(), Some("8c1d"));
        assert_eq!(state.user_email(), Some("me@example.com"));
    }

    #[test]
    fn view_enums_serialize_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&DriveMode::Secondary).expect("serialize"),
            "\"secondary\""
        );
        assert_eq!(
            serde_json::to_string(&RecencyFilter::Recent).expect("serialize"),
            "\"recent\""
        );
        assert_eq!(ViewState::default().display_style, DisplayStyle::Grid);
    }
}
