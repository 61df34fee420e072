//! Derived file view: which listing entries are shown for the current view state.
//!
//! Filters run in a fixed order (search, then trash partition or recency) and never reorder, so
//! the result keeps the store's listing order.

use drive_host::{FileEntry, DAY_MS};

use crate::model::{DriveMode, DriveState, DriveVariant, RecencyFilter};

/// Case-insensitive substring match of `term` against `name`. An empty term matches everything.
pub fn matches_search(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// `true` when `created_at_unix_ms` lies strictly within the trailing day before `now_ms`.
pub fn is_recent(created_at_unix_ms: Option<u64>, now_ms: u64) -> bool {
    match created_at_unix_ms {
        Some(created) => now_ms.saturating_sub(created) < DAY_MS,
        None => false,
    }
}

fn passes_partition(state: &DriveState, entry: &FileEntry, now_ms: u64) -> bool {
    match state.variant {
        DriveVariant::Public => match state.view.mode {
            DriveMode::Primary => !state.is_trashed(&entry.name),
            DriveMode::Secondary => state.is_trashed(&entry.name),
        },
        DriveVariant::Authenticated => match state.view.recency_filter {
            RecencyFilter::All => true,
            RecencyFilter::Recent => is_recent(entry.created_at_unix_ms, now_ms),
        },
    }
}

/// Returns the entries to display at `now_ms`, in listing order.
pub fn visible_entries(state: &DriveState, now_ms: u64) -> Vec<FileEntry> {
    state
        .listing
        .iter()
        .filter(|entry| matches_search(&entry.name, &state.view.search_term))
        .filter(|entry| passes_partition(state, entry, now_ms))
        .cloned()
        .collect()
}

/// Convenience for callers that only need the names.
pub fn visible_names(state: &DriveState, now_ms: u64) -> Vec<String> {
    visible_entries(state, now_ms)
        .into_iter()
        .map(|entry| entry.name)
        .collect()
}
