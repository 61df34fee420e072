//! Drive view controller: state model, reducer, derived view, effect execution, and Leptos UI.

pub mod components;
pub mod controller;
mod effect_executor;
pub mod effects;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod view;

pub use components::{use_drive_runtime, DriveProvider, DriveRuntimeContext, DriveShell};
pub use controller::DriveController;
pub use effects::execute_effect;
pub use model::*;
pub use reducer::{reduce_drive, DriveAction, DriveEffect, DriveError, DriveOperation};
pub use view::{is_recent, matches_search, visible_entries, visible_names};
