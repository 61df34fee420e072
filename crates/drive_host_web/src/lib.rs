//! Browser (`wasm32`) implementations of [`drive_host`] service contracts.
//!
//! This crate is the concrete host wiring layer: Supabase-compatible storage and auth over REST,
//! `localStorage` session persistence, and the window-level services (open, alert, confirm,
//! file picking) the drive needs. Non-wasm builds compile the same API with inert browser calls
//! so the adapters stay testable on the host.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod confirm;
pub mod external_url;
pub mod file_input;
pub mod location;
pub mod notifications;
pub mod session_store;
pub mod supabase;

pub use adapters::build_host_services;
pub use confirm::WebConfirmService;
pub use external_url::WebExternalUrlService;
pub use file_input::{read_selected_file, SelectedFile};
pub use notifications::WebNotificationService;
pub use session_store::WebSessionStore;
pub use supabase::{
    parse_auth_fragment, parse_timestamp_ms, AuthFragment, SupabaseAuthService, SupabaseClient,
    SupabaseStorageService,
};
