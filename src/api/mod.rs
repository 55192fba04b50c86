//! API module
//!
//! HTTP API endpoints for the admin and helper-facing layers.

pub mod routes;

pub use routes::{create_router, AppState};
