use chrono::DateTime;
use drive_host::{FileEntry, ObjectStoreFuture, ObjectStoreService, UploadOptions};
use serde::{Deserialize, Serialize};

use super::{check_response, transport_error, SupabaseClient};

const LIST_LIMIT: u32 = 100;
const UPLOAD_CACHE_CONTROL: &str = "max-age=3600";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: u32,
    offset: u32,
    #[serde(rename = "sortBy")]
    sort_by: SortBy,
}

#[derive(Debug, Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

#[derive(Debug, Deserialize)]
struct ObjectRow {
    id: Option<String>,
    name: String,
    created_at: Option<String>,
    #[serde(default)]
    metadata: Option<ObjectMetadata>,
}

#[derive(Debug, Deserialize)]
struct ObjectMetadata {
    size: Option<u64>,
}

impl From<ObjectRow> for FileEntry {
    fn from(row: ObjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at_unix_ms: row.created_at.as_deref().and_then(parse_timestamp_ms),
            size_bytes: row.metadata.and_then(|meta| meta.size),
        }
    }
}

#[derive(Debug, Serialize)]
struct SignRequest {
    #[serde(rename = "expiresIn")]
    expires_in: u32,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

#[derive(Debug, Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

/// Parses an RFC 3339 timestamp into unix milliseconds. Pre-epoch values are rejected.
pub fn parse_timestamp_ms(raw: &str) -> Option<u64> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    u64::try_from(parsed.timestamp_millis()).ok()
}

#[derive(Debug, Clone)]
/// Object-store adapter for the Supabase storage REST API.
pub struct SupabaseStorageService {
    client: SupabaseClient,
}

impl SupabaseStorageService {
    pub(crate) fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn bucket(&self) -> &str {
        &self.client.config().bucket
    }

    fn storage_endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, String> {
        self.client
            .endpoint(&self.client.config().storage_url(), segments)
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<FileEntry>, String> {
        let url = self.storage_endpoint(&["object", "list", self.bucket()])?;
        let body = ListRequest {
            prefix,
            limit: LIST_LIMIT,
            offset: 0,
            sort_by: SortBy {
                column: "name",
                order: "asc",
            },
        };
        let response = self
            .client
            .authorize(self.client.http.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("list", e))?;
        let rows: Vec<ObjectRow> = check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| format!("list response decode failed: {e}"))?;
        Ok(rows.into_iter().map(FileEntry::from).collect())
    }

    async fn upload_object(
        &self,
        key: &str,
        data: Vec<u8>,
        opts: UploadOptions,
    ) -> Result<(), String> {
        let url = self.storage_endpoint(&["object", self.bucket(), key])?;
        let content_type = opts
            .content_type
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let response = self
            .client
            .authorize(self.client.http.post(url))
            .header("x-upsert", if opts.overwrite { "true" } else { "false" })
            .header("cache-control", UPLOAD_CACHE_CONTROL)
            .header("content-type", content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| transport_error("upload", e))?;
        check_response(response).await?;
        Ok(())
    }

    async fn sign_object(&self, key: &str, ttl_seconds: u32) -> Result<String, String> {
        let url = self.storage_endpoint(&["object", "sign", self.bucket(), key])?;
        let response = self
            .client
            .authorize(self.client.http.post(url))
            .json(&SignRequest {
                expires_in: ttl_seconds,
            })
            .send()
            .await
            .map_err(|e| transport_error("sign", e))?;
        let signed: SignResponse = check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| format!("sign response decode failed: {e}"))?;
        Ok(format!(
            "{}{}",
            self.client.config().storage_url(),
            signed.signed_url
        ))
    }

    async fn remove_objects(&self, keys: &[String]) -> Result<(), String> {
        let url = self.storage_endpoint(&["object", self.bucket()])?;
        let response = self
            .client
            .authorize(self.client.http.delete(url))
            .json(&RemoveRequest { prefixes: keys })
            .send()
            .await
            .map_err(|e| transport_error("remove", e))?;
        check_response(response).await?;
        Ok(())
    }
}

impl ObjectStoreService for SupabaseStorageService {
    fn list<'a>(&'a self, prefix: &'a str) -> ObjectStoreFuture<'a, Result<Vec<FileEntry>, String>> {
        Box::pin(self.list_objects(prefix))
    }

    fn upload<'a>(
        &'a self,
        key: &'a str,
        data: Vec<u8>,
        opts: UploadOptions,
    ) -> ObjectStoreFuture<'a, Result<(), String>> {
        Box::pin(self.upload_object(key, data, opts))
    }

    fn public_url(&self, key: &str) -> String {
        match self.storage_endpoint(&["object", "public", self.bucket(), key]) {
            Ok(url) => url.to_string(),
            Err(_) => format!(
                "{}/object/public/{}/{key}",
                self.client.config().storage_url(),
                self.bucket()
            ),
        }
    }

    fn create_signed_url<'a>(
        &'a self,
        key: &'a str,
        ttl_seconds: u32,
    ) -> ObjectStoreFuture<'a, Result<String, String>> {
        Box::pin(self.sign_object(key, ttl_seconds))
    }

    fn remove<'a>(&'a self, keys: &'a [String]) -> ObjectStoreFuture<'a, Result<(), String>> {
        Box::pin(self.remove_objects(keys))
    }
}
