//! Typed collaborator contracts and shared models for the drive front end.
//!
//! This crate is the API-first boundary between the drive controller and the managed backend. It
//! exposes the object-store and auth contracts, the host services the controller needs to reach
//! the user (external URLs, blocking notifications, confirmation prompts), backend configuration,
//! and in-memory adapters used as simulated collaborators. Concrete browser adapters live in
//! `drive_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod config;
pub mod confirm;
pub mod external_url;
pub mod host;
pub mod notifications;
pub mod store;
pub mod time;

pub use auth::{
    AuthFuture, AuthService, AuthSubscription, MemoryAuthService, NoopAuthService, Session,
    SessionBroadcast, SessionCallback,
};
pub use config::{BackendConfig, DEFAULT_BUCKET};
pub use confirm::{ConfirmFuture, ConfirmService, NoopConfirmService, ScriptedConfirmService};
pub use external_url::{
    ExternalUrlFuture, ExternalUrlService, NoopExternalUrlService, RecordingExternalUrlService,
};
pub use host::HostServices;
pub use notifications::{
    NoopNotificationService, NotificationFuture, NotificationService,
    RecordingNotificationService,
};
pub use store::service::{
    MemoryObjectStore, NoopObjectStore, ObjectStoreFuture, ObjectStoreService, StoreCall,
    StoreOperation,
};
pub use store::types::{is_image_name, object_key, FileEntry, UploadOptions, PUBLIC_PREFIX};
pub use time::{unix_time_ms_now, DAY_MS};
