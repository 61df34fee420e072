//! Effect execution against the injected host services.
//!
//! Each effect runs to completion and reports its outcome as at most one follow-up
//! [`DriveAction`]. Collaborator failures are converted into [`DriveAction::OperationFailed`] so
//! the reducer decides whether they are logged or shown.

use drive_host::{HostServices, UploadOptions};
use leptos::logging;

use crate::reducer::{DriveAction, DriveEffect, DriveError, DriveOperation};

fn failed(operation: DriveOperation, message: String) -> DriveAction {
    DriveAction::OperationFailed {
        operation,
        error: DriveError::Service { operation, message },
    }
}

/// Message shown by the delete confirmation prompt.
pub fn delete_prompt(name: &str) -> String {
    format!("Delete \"{name}\"? This cannot be undone.")
}

/// Executes one reducer-emitted effect and returns the action reporting its outcome.
pub async fn execute_effect(host: &HostServices, effect: DriveEffect) -> Option<DriveAction> {
    match effect {
        DriveEffect::ListObjects { prefix } => Some(match host.store.list(&prefix).await {
            Ok(entries) => DriveAction::ListingLoaded { entries },
            Err(err) => failed(DriveOperation::List, err),
        }),
        DriveEffect::UploadObject {
            key,
            name,
            content_type,
            bytes,
        } => {
            let opts = UploadOptions {
                overwrite: true,
                content_type,
            };
            Some(match host.store.upload(&key, bytes, opts).await {
                Ok(()) => DriveAction::UploadCompleted { name },
                Err(err) => failed(DriveOperation::Upload, err),
            })
        }
        DriveEffect::OpenPublicObject { key, preview } => {
            let url = host.store.public_url(&key);
            if preview {
                return Some(DriveAction::ShowPreview { url });
            }
            if let Err(err) = host.external_urls.open_url(&url).await {
                logging::warn!("open public file failed for `{url}`: {err}");
            }
            None
        }
        DriveEffect::OpenSignedObject { key, ttl_seconds } => {
            let url = match host.store.create_signed_url(&key, ttl_seconds).await {
                Ok(url) => url,
                Err(err) => return Some(failed(DriveOperation::Download, err)),
            };
            host.external_urls
                .open_url(&url)
                .await
                .err()
                .map(|err| failed(DriveOperation::Download, err))
        }
        DriveEffect::ConfirmAndRemove { name, key } => {
            if !host.confirm.confirm(&delete_prompt(&name)).await {
                return Some(DriveAction::OperationFailed {
                    operation: DriveOperation::Delete,
                    error: DriveError::UserCancelled,
                });
            }
            Some(match host.store.remove(&[key]).await {
                Ok(()) => DriveAction::DeleteCompleted { name },
                Err(err) => failed(DriveOperation::Delete, err),
            })
        }
        DriveEffect::Notify { title, body } => {
            if let Err(err) = host.notifications.notify(&title, &body).await {
                logging::warn!("notification dispatch failed: {err}");
            }
            None
        }
        DriveEffect::LogWarning(message) => {
            logging::warn!("drive: {message}");
            None
        }
        DriveEffect::SendMagicLink { email } => {
            Some(match host.auth.sign_in_with_otp(&email).await {
                Ok(()) => DriveAction::MagicLinkSent { email },
                Err(err) => failed(DriveOperation::SendMagicLink, err),
            })
        }
        // Providers also broadcast the cleared session. A repeated `None` is a no-op.
        DriveEffect::SignOut => Some(match host.auth.sign_out().await {
            Ok(()) => DriveAction::SessionChanged(None),
            Err(err) => failed(DriveOperation::SignOut, err),
        }),
    }
}
