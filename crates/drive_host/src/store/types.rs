//! Object-store data types shared across host contracts and implementations.

use serde::{Deserialize, Serialize};

/// Key prefix used by the shared, login-free drive.
pub const PUBLIC_PREFIX: &str = "public";

const IMAGE_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One object returned by a store listing, kept verbatim for display.
pub struct FileEntry {
    /// Store-assigned object id. Folder placeholders carry none.
    pub id: Option<String>,
    /// Base name of the object below the listed prefix.
    pub name: String,
    /// Creation time in unix milliseconds when the store reports one.
    pub created_at_unix_ms: Option<u64>,
    /// Object size in bytes when the store reports one.
    pub size_bytes: Option<u64>,
}

impl FileEntry {
    /// Builds an entry with only a name, as used by tests and placeholder rows.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            created_at_unix_ms: None,
            size_bytes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Options applied to a single upload.
pub struct UploadOptions {
    /// Replace an existing object with the same key instead of failing.
    pub overwrite: bool,
    /// MIME type sent with the object bytes.
    pub content_type: Option<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            overwrite: true,
            content_type: None,
        }
    }
}

/// Joins a listing prefix and a file name into an object key.
pub fn object_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Returns `true` when `name` ends in an image extension the preview overlay can show.
///
/// Matching is case-insensitive and anchored at the end of the name.
pub fn is_image_name(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|candidate| ext.eq_ignore_ascii_case(candidate))
}
