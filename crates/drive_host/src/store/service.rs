//! Object-store service contracts and adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use super::types::{FileEntry, UploadOptions};
use crate::time::unix_time_ms_now;

/// Object-safe boxed future used by [`ObjectStoreService`] async methods.
pub type ObjectStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for a key-addressed binary object store.
pub trait ObjectStoreService {
    /// Lists the objects directly below `prefix`, in store order.
    fn list<'a>(&'a self, prefix: &'a str) -> ObjectStoreFuture<'a, Result<Vec<FileEntry>, String>>;

    /// Uploads `data` under `key`.
    fn upload<'a>(
        &'a self,
        key: &'a str,
        data: Vec<u8>,
        opts: UploadOptions,
    ) -> ObjectStoreFuture<'a, Result<(), String>>;

    /// Builds the public URL for `key`. Construction only, no request is made.
    fn public_url(&self, key: &str) -> String;

    /// Requests a signed URL for `key` that stays valid for `ttl_seconds`.
    fn create_signed_url<'a>(
        &'a self,
        key: &'a str,
        ttl_seconds: u32,
    ) -> ObjectStoreFuture<'a, Result<String, String>>;

    /// Removes every object in `keys`.
    fn remove<'a>(&'a self, keys: &'a [String]) -> ObjectStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op object store for unsupported targets and baseline tests.
pub struct NoopObjectStore;

impl NoopObjectStore {
    fn unsupported_error(op: &str) -> String {
        format!("object store unavailable: {op}")
    }
}

impl ObjectStoreService for NoopObjectStore {
    fn list<'a>(
        &'a self,
        _prefix: &'a str,
    ) -> ObjectStoreFuture<'a, Result<Vec<FileEntry>, String>> {
        Box::pin(async { Err(Self::unsupported_error("list")) })
    }

    fn upload<'a>(
        &'a self,
        _key: &'a str,
        _data: Vec<u8>,
        _opts: UploadOptions,
    ) -> ObjectStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("upload")) })
    }

    fn public_url(&self, key: &str) -> String {
        format!("about:blank#{key}")
    }

    fn create_signed_url<'a>(
        &'a self,
        _key: &'a str,
        _ttl_seconds: u32,
    ) -> ObjectStoreFuture<'a, Result<String, String>> {
        Box::pin(async { Err(Self::unsupported_error("create_signed_url")) })
    }

    fn remove<'a>(&'a self, _keys: &'a [String]) -> ObjectStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("remove")) })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Store operations that can be observed or made to fail on [`MemoryObjectStore`].
pub enum StoreOperation {
    /// [`ObjectStoreService::list`].
    List,
    /// [`ObjectStoreService::upload`].
    Upload,
    /// [`ObjectStoreService::create_signed_url`].
    CreateSignedUrl,
    /// [`ObjectStoreService::remove`].
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One call observed by [`MemoryObjectStore`].
pub enum StoreCall {
    /// A listing request for a prefix.
    List(String),
    /// An upload request for a key.
    Upload {
        /// Object key.
        key: String,
        /// Whether overwrite was requested.
        overwrite: bool,
    },
    /// A signed-URL request.
    CreateSignedUrl {
        /// Object key.
        key: String,
        /// Requested validity in seconds.
        ttl_seconds: u32,
    },
    /// A removal request.
    Remove(Vec<String>),
}

#[derive(Debug, Clone)]
struct StoredObject {
    id: u64,
    key: String,
    size: u64,
    created_at_unix_ms: u64,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    objects: Vec<StoredObject>,
    next_id: u64,
    calls: Vec<StoreCall>,
    failures: HashMap<StoreOperation, String>,
}

#[derive(Debug, Clone)]
/// In-memory object store used as the simulated backend in tests and offline builds.
///
/// Listings are returned sorted by name, matching the hosted store's default ordering. Every call
/// is recorded so callers can assert which operations reached the store.
pub struct MemoryObjectStore {
    base_url: String,
    inner: Rc<RefCell<MemoryStoreInner>>,
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new("memory://files")
    }
}

impl MemoryObjectStore {
    /// Creates an empty store whose URLs are rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            inner: Rc::new(RefCell::new(MemoryStoreInner::default())),
        }
    }

    /// Seeds an object without recording a call.
    pub fn insert(&self, key: impl Into<String>, size: u64, created_at_unix_ms: u64) {
        let mut inner = self.inner.borrow_mut();
        let key = key.into();
        inner.objects.retain(|obj| obj.key != key);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.objects.push(StoredObject {
            id,
            key,
            size,
            created_at_unix_ms,
        });
    }

    /// Makes every subsequent `op` call fail with `message` until [`Self::clear_failures`].
    pub fn fail(&self, op: StoreOperation, message: impl Into<String>) {
        self.inner.borrow_mut().failures.insert(op, message.into());
    }

    /// Clears every configured failure.
    pub fn clear_failures(&self) {
        self.inner.borrow_mut().failures.clear();
    }

    /// Returns the calls observed so far, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.borrow().calls.clone()
    }

    /// Returns every stored key, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .borrow()
            .objects
            .iter()
            .map(|obj| obj.key.clone())
            .collect();
        keys.sort();
        keys
    }

    fn record(&self, call: StoreCall, op: StoreOperation) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        match inner.failures.get(&op) {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }
}

impl ObjectStoreService for MemoryObjectStore {
    fn list<'a>(&'a self, prefix: &'a str) -> ObjectStoreFuture<'a, Result<Vec<FileEntry>, String>> {
        Box::pin(async move {
            self.record(StoreCall::List(prefix.to_string()), StoreOperation::List)?;
            let dir = format!("{}/", prefix.trim_end_matches('/'));
            let inner = self.inner.borrow();
            let mut entries: Vec<FileEntry> = inner
                .objects
                .iter()
                .filter_map(|obj| {
                    let name = obj.key.strip_prefix(&dir)?;
                    if name.is_empty() || name.contains('/') {
                        return None;
                    }
                    Some(FileEntry {
                        id: Some(format!("mem-{}", obj.id)),
                        name: name.to_string(),
                        created_at_unix_ms: Some(obj.created_at_unix_ms),
                        size_bytes: Some(obj.size),
                    })
                })
                .collect();
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(entries)
        })
    }

    fn upload<'a>(
        &'a self,
        key: &'a str,
        data: Vec<u8>,
        opts: UploadOptions,
    ) -> ObjectStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.record(
                StoreCall::Upload {
                    key: key.to_string(),
                    overwrite: opts.overwrite,
                },
                StoreOperation::Upload,
            )?;
            let exists = self.inner.borrow().objects.iter().any(|obj| obj.key == key);
            if exists && !opts.overwrite {
                return Err(format!("object already exists: {key}"));
            }
            self.insert(key, data.len() as u64, unix_time_ms_now());
            Ok(())
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/public/{key}", self.base_url)
    }

    fn create_signed_url<'a>(
        &'a self,
        key: &'a str,
        ttl_seconds: u32,
    ) -> ObjectStoreFuture<'a, Result<String, String>> {
        Box::pin(async move {
            self.record(
                StoreCall::CreateSignedUrl {
                    key: key.to_string(),
                    ttl_seconds,
                },
                StoreOperation::CreateSignedUrl,
            )?;
            if !self.inner.borrow().objects.iter().any(|obj| obj.key == key) {
                return Err(format!("object not found: {key}"));
            }
            Ok(format!("{}/sign/{key}?expires_in={ttl_seconds}", self.base_url))
        })
    }

    fn remove<'a>(&'a self, keys: &'a [String]) -> ObjectStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.record(StoreCall::Remove(keys.to_vec()), StoreOperation::Remove)?;
            self.inner
                .borrow_mut()
                .objects
                .retain(|obj| !keys.contains(&obj.key));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_object_store_reports_unsupported() {
        let store = NoopObjectStore;
        let store_obj: &dyn ObjectStoreService = &store;

        let err = block_on(store_obj.list("public")).expect_err("list should fail");
        assert!(err.contains("list"));
        let err = block_on(store_obj.remove(&["public/a".to_string()])).expect_err("remove");
        assert!(err.contains("remove"));
    }

    #[test]
    fn memory_store_lists_direct_children_sorted_by_name() {
        let store = MemoryObjectStore::default();
        store.insert("public/b.txt", 3, 20);
        store.insert("public/a.png", 5, 10);
        store.insert("public/nested/c.txt", 1, 30);
        store.insert("user-1/d.txt", 1, 40);

        let entries = block_on(store.list("public")).expect("list");
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.txt"]);
        assert_eq!(entries[0].size_bytes, Some(5));
        assert_eq!(entries[0].created_at_unix_ms, Some(10));
        assert_eq!(store.calls(), vec![StoreCall::List("public".to_string())]);
    }

    #[test]
    fn memory_store_upload_respects_overwrite_flag() {
        let store = MemoryObjectStore::default();
        store.insert("public/a.txt", 1, 1);

        let strict = UploadOptions {
            overwrite: false,
            content_type: None,
        };
        block_on(store.upload("public/a.txt", vec![1, 2], strict)).expect_err("conflict");
        block_on(store.upload("public/a.txt", vec![1, 2], UploadOptions::default()))
            .expect("overwrite");

        let entries = block_on(store.list("public")).expect("list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size_bytes, Some(2));
    }

    #[test]
    fn memory_store_failures_are_recorded_and_sticky() {
        let store = MemoryObjectStore::default();
        store.fail(StoreOperation::Upload, "quota exceeded");

        let err = block_on(store.upload("public/a.txt", vec![], UploadOptions::default()))
            .expect_err("upload should fail");
        assert_eq!(err, "quota exceeded");
        assert!(store.keys().is_empty());
        assert_eq!(store.calls().len(), 1);

        store.clear_failures();
        block_on(store.upload("public/a.txt", vec![], UploadOptions::default())).expect("upload");
        assert_eq!(store.keys(), vec!["public/a.txt".to_string()]);
    }

    #[test]
    fn memory_store_signs_and_removes_objects() {
        let store = MemoryObjectStore::new("memory://drive");
        store.insert("u/a.txt", 1, 1);

        let url = block_on(store.create_signed_url("u/a.txt", 60)).expect("sign");
        assert_eq!(url, "memory://drive/sign/u/a.txt?expires_in=60");
        block_on(store.create_signed_url("u/missing.txt", 60)).expect_err("missing");
        assert_eq!(store.public_url("u/a.txt"), "memory://drive/public/u/a.txt");

        block_on(store.remove(&["u/a.txt".to_string()])).expect("remove");
        assert!(store.keys().is_empty());
    }
}
