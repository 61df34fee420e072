//! Reducer actions, side-effect intents, and transition logic for the drive view.

use std::fmt;

use drive_host::{is_image_name, object_key, FileEntry, Session};
use thiserror::Error;

use crate::model::{
    AuthPhase, DisplayStyle, DriveMode, DriveState, DriveVariant, Notice, RecencyFilter,
    SIGNED_URL_TTL_SECONDS,
};

const MAGIC_LINK_SENT_NOTICE: &str = "Check your email for the login link!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Collaborator-backed operations whose failures flow back into the reducer.
pub enum DriveOperation {
    /// Store listing.
    List,
    /// Object upload.
    Upload,
    /// Signed-URL download.
    Download,
    /// Object removal.
    Delete,
    /// Magic-link request.
    SendMagicLink,
    /// Session sign-out.
    SignOut,
}

impl DriveOperation {
    /// Title of the blocking notification shown when this operation fails.
    pub fn failure_title(self) -> &'static str {
        match self {
            Self::List => "Listing failed",
            Self::Upload => "Upload failed",
            Self::Download => "Download failed",
            Self::Delete => "Delete failed",
            Self::SendMagicLink => "Login link failed",
            Self::SignOut => "Sign-out failed",
        }
    }
}

impl fmt::Display for DriveOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::List => "list",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Delete => "delete",
            Self::SendMagicLink => "send magic link",
            Self::SignOut => "sign out",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Drive errors, covering rejected actions and collaborator failures.
pub enum DriveError {
    /// A collaborator call failed (network, backend, or browser API).
    #[error("{operation} failed: {message}")]
    Service {
        /// Operation that failed.
        operation: DriveOperation,
        /// Collaborator-provided message.
        message: String,
    },
    /// The user declined a confirmation prompt. Not shown to the user.
    #[error("cancelled by user")]
    UserCancelled,
    /// The action needs a signed-in user.
    #[error("no active session")]
    MissingSession,
    /// The action does not exist in this drive variant.
    #[error("`{action}` is not available in the {} drive", .variant.as_str())]
    Unsupported {
        /// Rejected action name.
        action: &'static str,
        /// Variant the action was dispatched to.
        variant: DriveVariant,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_drive`] to mutate [`DriveState`].
pub enum DriveAction {
    /// Re-list the drive prefix.
    RefreshListing,
    /// A listing request resolved.
    ListingLoaded {
        /// Entries in store order.
        entries: Vec<FileEntry>,
    },
    /// Upload a picked file under the drive prefix, replacing any same-named object.
    Upload {
        /// File name used as the last key segment.
        name: String,
        /// MIME type reported by the picker.
        content_type: Option<String>,
        /// File contents.
        bytes: Vec<u8>,
    },
    /// An upload resolved successfully.
    UploadCompleted {
        /// Uploaded file name.
        name: String,
    },
    /// Open (public variant): preview images, open everything else externally.
    ActivateFile {
        /// Target file name.
        name: String,
    },
    /// Show a resolved image URL in the preview overlay.
    ShowPreview {
        /// Public image URL.
        url: String,
    },
    /// Close the preview overlay.
    ClosePreview,
    /// Download via a short-lived signed URL (authenticated variant).
    Download {
        /// Target file name.
        name: String,
    },
    /// Delete after confirmation (authenticated variant).
    Delete {
        /// Target file name.
        name: String,
    },
    /// A removal resolved successfully.
    DeleteCompleted {
        /// Removed file name.
        name: String,
    },
    /// Trash the name in Primary mode, restore it in Secondary mode (public variant). Never
    /// reaches the store.
    ToggleTrash {
        /// Target file name.
        name: String,
    },
    /// Replace the search term.
    SetSearchTerm(String),
    /// Switch between drive and trash.
    SetMode(DriveMode),
    /// Switch between grid and list rendering.
    SetDisplayStyle(DisplayStyle),
    /// Switch between all and recent entries.
    SetRecencyFilter(RecencyFilter),
    /// Request a magic link for `email`.
    RequestMagicLink {
        /// Address to send the link to.
        email: String,
    },
    /// The magic-link request resolved successfully.
    MagicLinkSent {
        /// Address the link went to.
        email: String,
    },
    /// End the current session.
    SignOut,
    /// The auth provider reported a new session (or none).
    SessionChanged(Option<Session>),
    /// A collaborator call failed or was cancelled.
    OperationFailed {
        /// Operation that failed.
        operation: DriveOperation,
        /// Failure detail.
        error: DriveError,
    },
    /// Clear the status-bar notice.
    DismissNotice,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_drive`] for the runtime to execute.
pub enum DriveEffect {
    /// List objects below `prefix`.
    ListObjects {
        /// Listing prefix.
        prefix: String,
    },
    /// Upload bytes under `key` with overwrite enabled.
    UploadObject {
        /// Object key.
        key: String,
        /// File name, echoed back on completion.
        name: String,
        /// MIME type.
        content_type: Option<String>,
        /// File contents.
        bytes: Vec<u8>,
    },
    /// Resolve the public URL for `key`, then preview it or open it externally.
    OpenPublicObject {
        /// Object key.
        key: String,
        /// Preview in-app instead of opening a new browsing context.
        preview: bool,
    },
    /// Request a signed URL for `key` and open it.
    OpenSignedObject {
        /// Object key.
        key: String,
        /// URL validity in seconds.
        ttl_seconds: u32,
    },
    /// Ask the user to confirm deleting `name`, then remove `key`.
    ConfirmAndRemove {
        /// File name shown in the prompt.
        name: String,
        /// Object key.
        key: String,
    },
    /// Show a blocking notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body.
        body: String,
    },
    /// Log a diagnostic without involving the user.
    LogWarning(String),
    /// Send a magic link.
    SendMagicLink {
        /// Recipient.
        email: String,
    },
    /// Sign out with the auth provider.
    SignOut,
}

/// Applies a [`DriveAction`] to the drive state and collects resulting side effects.
///
/// This function is the single writer of [`DriveState`]; collaborator results come back in as
/// actions, so every state change passes through here.
///
/// # Errors
///
/// Returns [`DriveError::Unsupported`] for actions that do not exist in the state's variant and
/// [`DriveError::MissingSession`] for authenticated-only work without a session.
pub fn reduce_drive(
    state: &mut DriveState,
    action: DriveAction,
) -> Result<Vec<DriveEffect>, DriveError> {
    let mut effects = Vec::new();
    match action {
        DriveAction::RefreshListing => {
            if let Some(prefix) = state.prefix() {
                effects.push(DriveEffect::ListObjects { prefix });
            }
        }
        DriveAction::ListingLoaded { entries } => {
            // Last response wins; a listing that lands after sign-out has nothing to show.
            if state.prefix().is_some() {
                state.listing = entries;
            }
        }
        DriveAction::Upload {
            name,
            content_type,
            bytes,
        } => {
            let prefix = state.prefix().ok_or(DriveError::MissingSession)?;
            effects.push(DriveEffect::UploadObject {
                key: object_key(&prefix, &name),
                name,
                content_type,
                bytes,
            });
        }
        DriveAction::UploadCompleted { .. } | DriveAction::DeleteCompleted { .. } => {
            if let Some(prefix) = state.prefix() {
                effects.push(DriveEffect::ListObjects { prefix });
            }
        }
        DriveAction::ActivateFile { name } => {
            require_variant(state, DriveVariant::Public, "activate_file")?;
            if state.view.mode == DriveMode::Primary {
                effects.push(DriveEffect::OpenPublicObject {
                    key: object_key(drive_host::PUBLIC_PREFIX, &name),
                    preview: is_image_name(&name),
                });
            }
        }
        DriveAction::ShowPreview { url } => {
            state.preview_url = Some(url);
        }
        DriveAction::ClosePreview => {
            state.preview_url = None;
        }
        DriveAction::Download { name } => {
            require_variant(state, DriveVariant::Authenticated, "download")?;
            let prefix = state.prefix().ok_or(DriveError::MissingSession)?;
            effects.push(DriveEffect::OpenSignedObject {
                key: object_key(&prefix, &name),
                ttl_seconds: SIGNED_URL_TTL_SECONDS,
            });
        }
        DriveAction::Delete { name } => {
            require_variant(state, DriveVariant::Authenticated, "delete")?;
            let prefix = state.prefix().ok_or(DriveError::MissingSession)?;
            effects.push(DriveEffect::ConfirmAndRemove {
                key: object_key(&prefix, &name),
                name,
            });
        }
        DriveAction::ToggleTrash { name } => {
            require_variant(state, DriveVariant::Public, "toggle_trash")?;
            match state.view.mode {
                DriveMode::Primary => {
                    state.tombstones.insert(name);
                }
                DriveMode::Secondary => {
                    state.tombstones.remove(&name);
                }
            }
        }
        DriveAction::SetSearchTerm(term) => {
            state.view.search_term = term;
        }
        DriveAction::SetMode(mode) => {
            state.view.mode = mode;
        }
        DriveAction::SetDisplayStyle(style) => {
            require_variant(state, DriveVariant::Authenticated, "set_display_style")?;
            state.view.display_style = style;
        }
        DriveAction::SetRecencyFilter(filter) => {
            require_variant(state, DriveVariant::Authenticated, "set_recency_filter")?;
            state.view.recency_filter = filter;
        }
        DriveAction::RequestMagicLink { email } => {
            require_variant(state, DriveVariant::Authenticated, "request_magic_link")?;
            state.notice = None;
            effects.push(DriveEffect::SendMagicLink {
                email: email.trim().to_string(),
            });
        }
        DriveAction::MagicLinkSent { email } => {
            if state.auth != AuthPhase::Authenticated {
                state.auth = AuthPhase::LinkSent { email };
                state.notice = Some(Notice::info(MAGIC_LINK_SENT_NOTICE));
            }
        }
        DriveAction::SignOut => {
            require_variant(state, DriveVariant::Authenticated, "sign_out")?;
            if state.session.is_none() {
                return Err(DriveError::MissingSession);
            }
            effects.push(DriveEffect::SignOut);
        }
        DriveAction::SessionChanged(session) => {
            require_variant(state, DriveVariant::Authenticated, "session_changed")?;
            apply_session(state, session, &mut effects);
        }
        DriveAction::OperationFailed { operation, error } => {
            apply_failure(state, operation, error, &mut effects);
        }
        DriveAction::DismissNotice => {
            state.notice = None;
        }
    }

    Ok(effects)
}

fn require_variant(
    state: &DriveState,
    expected: DriveVariant,
    action: &'static str,
) -> Result<(), DriveError> {
    if state.variant == expected {
        Ok(())
    } else {
        Err(DriveError::Unsupported {
            action,
            variant: state.variant,
        })
    }
}

fn apply_session(state: &mut DriveState, session: Option<Session>, effects: &mut Vec<DriveEffect>) {
    match session {
        Some(session) => {
            let same_user = state.auth == AuthPhase::Authenticated
                && state
                    .session
                    .as_ref()
                    .is_some_and(|current| current.user_id == session.user_id);
            let prefix = session.user_id.clone();
            state.session = Some(session);
            if !same_user {
                state.auth = AuthPhase::Authenticated;
                state.listing.clear();
                state.notice = None;
                effects.push(DriveEffect::ListObjects { prefix });
            }
        }
        None => {
            // A session-less event while a link is pending keeps the "check your email" screen.
            if state.session.is_some() || state.auth == AuthPhase::Authenticated {
                state.auth = AuthPhase::Unauthenticated;
            }
            state.session = None;
            state.listing.clear();
            state.preview_url = None;
        }
    }
}

fn apply_failure(
    state: &mut DriveState,
    operation: DriveOperation,
    error: DriveError,
    effects: &mut Vec<DriveEffect>,
) {
    match (&error, operation) {
        (DriveError::UserCancelled, _) => {}
        // Stale-but-available: keep the previous listing and tell only the log.
        (_, DriveOperation::List) => {
            effects.push(DriveEffect::LogWarning(error.to_string()));
        }
        _ => {
            let body = match &error {
                DriveError::Service { message, .. } => message.clone(),
                other => other.to_string(),
            };
            state.notice = Some(Notice::error(format!(
                "{}: {body}",
                operation.failure_title()
            )));
            effects.push(DriveEffect::Notify {
                title: operation.failure_title().to_string(),
                body,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::NoticeKind;

    fn public_with(names: &[&str]) -> DriveState {
        let mut state = DriveState::new(DriveVariant::Public);
        state.listing = names.iter().map(|name| FileEntry::named(*name)).collect();
        state
    }

    fn session(user_id: &str) -> Session {
        Session {
            access_token: format!("token-{user_id}"),
            refresh_token: None,
            user_id: user_id.to_string(),
            email: Some(format!("{user_id}@example.com")),
            expires_at_unix_ms: None,
        }
    }

    fn signed_in(user_id: &str) -> DriveState {
        let mut state = DriveState::new(DriveVariant::Authenticated);
        reduce_drive(&mut state, DriveAction::SessionChanged(Some(session(user_id))))
            .expect("sign in");
        state
    }

    #[test]
    fn refresh_lists_public_prefix() {
        let mut state = DriveState::new(DriveVariant::Public);
        let effects = reduce_drive(&mut state, DriveAction::RefreshListing).expect("refresh");
        assert_eq!(
            effects,
            vec![DriveEffect::ListObjects {
                prefix: "public".to_string()
            }]
        );
    }

    #[test]
    fn refresh_without_session_is_noop_in_authenticated_drive() {
        let mut state = DriveState::new(DriveVariant::Authenticated);
        let effects = reduce_drive(&mut state, DriveAction::RefreshListing).expect("refresh");
        assert!(effects.is_empty());
    }

    #[test]
    fn listing_replaces_wholesale() {
        let mut state = public_with(&["old.txt"]);
        let entries = vec![FileEntry::named("b.txt"), FileEntry::named("a.png")];
        reduce_drive(
            &mut state,
            DriveAction::ListingLoaded {
                entries: entries.clone(),
            },
        )
        .expect("load");
        assert_eq!(state.listing, entries);
    }

    #[test]
    fn toggle_trash_round_trip_through_trash_view_has_no_effects() {
        let mut state = public_with(&["a.png", "b.txt"]);
        let before = state.tombstones.clone();

        let first = reduce_drive(
            &mut state,
            DriveAction::ToggleTrash {
                name: "b.txt".to_string(),
            },
        )
        .expect("toggle");
        assert!(state.is_trashed("b.txt"));
        reduce_drive(&mut state, DriveAction::SetMode(DriveMode::Secondary)).expect("mode");
        let second = reduce_drive(
            &mut state,
            DriveAction::ToggleTrash {
                name: "b.txt".to_string(),
            },
        )
        .expect("toggle");

        assert!(first.is_empty() && second.is_empty());
        assert_eq!(state.tombstones, before);
    }

    #[test]
    fn toggle_trash_follows_mode_not_membership() {
        let mut state = public_with(&["x.txt", "y.txt"]);
        state.tombstones.insert("x.txt".to_string());

        reduce_drive(
            &mut state,
            DriveAction::ToggleTrash {
                name: "x.txt".to_string(),
            },
        )
        .expect("primary toggle");
        assert!(state.is_trashed("x.txt"));

        state.view.mode = DriveMode::Secondary;
        reduce_drive(
            &mut state,
            DriveAction::ToggleTrash {
                name: "y.txt".to_string(),
            },
        )
        .expect("secondary toggle");
        assert!(!state.is_trashed("y.txt"));
    }

    #[test]
    fn trash_restore_from_secondary_mode() {
        let mut state = public_with(&["a.png", "b.txt"]);
        reduce_drive(
            &mut state,
            DriveAction::ToggleTrash {
                name: "b.txt".to_string(),
            },
        )
        .expect("trash");
        reduce_drive(&mut state, DriveAction::SetMode(DriveMode::Secondary)).expect("mode");
        reduce_drive(
            &mut state,
            DriveAction::ToggleTrash {
                name: "b.txt".to_string(),
            },
        )
        .expect("restore");
        assert!(state.tombstones.is_empty());
    }

    #[test]
    fn activate_previews_images_and_opens_other_files() {
        let mut state = public_with(&["a.PNG", "b.txt"]);
        let image = reduce_drive(
            &mut state,
            DriveAction::ActivateFile {
                name: "a.PNG".to_string(),
            },
        )
        .expect("activate image");
        assert_eq!(
            image,
            vec![DriveEffect::OpenPublicObject {
                key: "public/a.PNG".to_string(),
                preview: true
            }]
        );
        let doc = reduce_drive(
            &mut state,
            DriveAction::ActivateFile {
                name: "b.txt".to_string(),
            },
        )
        .expect("activate doc");
        assert_eq!(
            doc,
            vec![DriveEffect::OpenPublicObject {
                key: "public/b.txt".to_string(),
                preview: false
            }]
        );
    }

    #[test]
    fn activate_in_trash_is_inert() {
        let mut state = public_with(&["a.png"]);
        state.view.mode = DriveMode::Secondary;
        let effects = reduce_drive(
            &mut state,
            DriveAction::ActivateFile {
                name: "a.png".to_string(),
            },
        )
        .expect("activate");
        assert!(effects.is_empty());
    }

    #[test]
    fn preview_opens_and_closes() {
        let mut state = public_with(&[]);
        reduce_drive(
            &mut state,
            DriveAction::ShowPreview {
                url: "https://cdn/a.png".to_string(),
            },
        )
        .expect("preview");
        assert_eq!(state.preview_url.as_deref(), Some("https://cdn/a.png"));
        reduce_drive(&mut state, DriveAction::ClosePreview).expect("close");
        assert_eq!(state.preview_url, None);
        let again = reduce_drive(&mut state, DriveAction::ClosePreview).expect("close twice");
        assert!(again.is_empty());
        assert_eq!(state.preview_url, None);
    }

    #[test]
    fn upload_targets_prefix_with_file_name() {
        let mut state = signed_in("u1");
        let effects = reduce_drive(
            &mut state,
            DriveAction::Upload {
                name: "notes.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                bytes: b"hi".to_vec(),
            },
        )
        .expect("upload");
        assert_eq!(
            effects,
            vec![DriveEffect::UploadObject {
                key: "u1/notes.txt".to_string(),
                name: "notes.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                bytes: b"hi".to_vec(),
            }]
        );

        let completed = reduce_drive(
            &mut state,
            DriveAction::UploadCompleted {
                name: "notes.txt".to_string(),
            },
        )
        .expect("completed");
        assert_eq!(
            completed,
            vec![DriveEffect::ListObjects {
                prefix: "u1".to_string()
            }]
        );
    }

    #[test]
    fn upload_without_session_is_rejected() {
        let mut state = DriveState::new(DriveVariant::Authenticated);
        let err = reduce_drive(
            &mut state,
            DriveAction::Upload {
                name: "a.txt".to_string(),
                content_type: None,
                bytes: Vec::new(),
            },
        )
        .expect_err("no session");
        assert_eq!(err, DriveError::MissingSession);
    }

    #[test]
    fn download_and_delete_emit_scoped_effects() {
        let mut state = signed_in("u1");
        assert_eq!(
            reduce_drive(
                &mut state,
                DriveAction::Download {
                    name: "a.txt".to_string()
                }
            )
            .expect("download"),
            vec![DriveEffect::OpenSignedObject {
                key: "u1/a.txt".to_string(),
                ttl_seconds: 60
            }]
        );
        assert_eq!(
            reduce_drive(
                &mut state,
                DriveAction::Delete {
                    name: "a.txt".to_string()
                }
            )
            .expect("delete"),
            vec![DriveEffect::ConfirmAndRemove {
                name: "a.txt".to_string(),
                key: "u1/a.txt".to_string()
            }]
        );
    }

    #[test]
    fn variant_specific_actions_are_rejected_elsewhere() {
        let mut public = public_with(&["a.txt"]);
        assert_eq!(
            reduce_drive(
                &mut public,
                DriveAction::Delete {
                    name: "a.txt".to_string()
                }
            ),
            Err(DriveError::Unsupported {
                action: "delete",
                variant: DriveVariant::Public
            })
        );
        assert!(reduce_drive(&mut public, DriveAction::SetRecencyFilter(RecencyFilter::Recent))
            .is_err());

        let mut private = signed_in("u1");
        let err = reduce_drive(
            &mut private,
            DriveAction::ToggleTrash {
                name: "a.txt".to_string(),
            },
        )
        .expect_err("no trash in authenticated drive");
        assert_eq!(
            err.to_string(),
            "`toggle_trash` is not available in the authenticated drive"
        );
    }

    #[test]
    fn setters_touch_only_view_state() {
        let mut state = signed_in("u1");
        let before_listing = state.listing.clone();
        for action in [
            DriveAction::SetSearchTerm("rep".to_string()),
            DriveAction::SetMode(DriveMode::Secondary),
            DriveAction::SetDisplayStyle(DisplayStyle::List),
            DriveAction::SetRecencyFilter(RecencyFilter::Recent),
        ] {
            assert!(reduce_drive(&mut state, action).expect("setter").is_empty());
        }
        assert_eq!(state.view.search_term, "rep");
        assert_eq!(state.view.display_style, DisplayStyle::List);
        assert_eq!(state.view.recency_filter, RecencyFilter::Recent);
        assert_eq!(state.listing, before_listing);
    }

    #[test]
    fn auth_state_machine_walks_through_link_sent() {
        let mut state = DriveState::new(DriveVariant::Authenticated);
        let effects = reduce_drive(
            &mut state,
            DriveAction::RequestMagicLink {
                email: " me@example.com ".to_string(),
            },
        )
        .expect("request");
        assert_eq!(
            effects,
            vec![DriveEffect::SendMagicLink {
                email: "me@example.com".to_string()
            }]
        );

        reduce_drive(
            &mut state,
            DriveAction::MagicLinkSent {
                email: "me@example.com".to_string(),
            },
        )
        .expect("sent");
        assert_eq!(
            state.auth,
            AuthPhase::LinkSent {
                email: "me@example.com".to_string()
            }
        );
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));

        let effects = reduce_drive(&mut state, DriveAction::SessionChanged(Some(session("u1"))))
            .expect("session");
        assert_eq!(state.auth, AuthPhase::Authenticated);
        assert_eq!(
            effects,
            vec![DriveEffect::ListObjects {
                prefix: "u1".to_string()
            }]
        );

        assert_eq!(
            reduce_drive(&mut state, DriveAction::SignOut).expect("sign out"),
            vec![DriveEffect::SignOut]
        );
        reduce_drive(&mut state, DriveAction::SessionChanged(None)).expect("signed out");
        assert_eq!(state.auth, AuthPhase::Unauthenticated);
        assert!(state.session.is_none());
        assert!(state.listing.is_empty());
    }

    #[test]
    fn repeated_session_for_same_user_does_not_refresh() {
        let mut state = signed_in("u1");
        let mut renewed = session("u1");
        renewed.access_token = "renewed".to_string();
        let effects =
            reduce_drive(&mut state, DriveAction::SessionChanged(Some(renewed))).expect("renew");
        assert!(effects.is_empty());
        assert_eq!(
            state.session.as_ref().map(|s| s.access_token.as_str()),
            Some("renewed")
        );
    }

    #[test]
    fn listing_after_sign_out_is_dropped() {
        let mut state = DriveState::new(DriveVariant::Authenticated);
        reduce_drive(
            &mut state,
            DriveAction::ListingLoaded {
                entries: vec![FileEntry::named("late.txt")],
            },
        )
        .expect("late listing");
        assert!(state.listing.is_empty());
    }

    #[test]
    fn listing_failure_is_logged_and_keeps_previous_view() {
        let mut state = public_with(&["a.png"]);
        let effects = reduce_drive(
            &mut state,
            DriveAction::OperationFailed {
                operation: DriveOperation::List,
                error: DriveError::Service {
                    operation: DriveOperation::List,
                    message: "timeout".to_string(),
                },
            },
        )
        .expect("failure");
        assert_eq!(
            effects,
            vec![DriveEffect::LogWarning("list failed: timeout".to_string())]
        );
        assert_eq!(state.listing, vec![FileEntry::named("a.png")]);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn mutating_failures_notify_and_cancellation_is_silent() {
        let mut state = signed_in("u1");
        let effects = reduce_drive(
            &mut state,
            DriveAction::OperationFailed {
                operation: DriveOperation::Upload,
                error: DriveError::Service {
                    operation: DriveOperation::Upload,
                    message: "quota exceeded".to_string(),
                },
            },
        )
        .expect("failure");
        assert_eq!(
            effects,
            vec![DriveEffect::Notify {
                title: "Upload failed".to_string(),
                body: "quota exceeded".to_string()
            }]
        );
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Upload failed: quota exceeded")
        );

        reduce_drive(&mut state, DriveAction::DismissNotice).expect("dismiss");
        let effects = reduce_drive(
            &mut state,
            DriveAction::OperationFailed {
                operation: DriveOperation::Delete,
                error: DriveError::UserCancelled,
            },
        )
        .expect("cancel");
        assert!(effects.is_empty());
        assert_eq!(state.notice, None);
    }
}
