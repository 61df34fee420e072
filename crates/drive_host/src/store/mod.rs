//! Object-store contracts, models, and in-memory adapters.

pub mod service;
pub mod types;
