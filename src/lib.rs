//! helper_review Library
//!
//! Helper credential review workflow: guarded review state, the handlers that
//! drive it and the HTTP surface that exposes them.

pub mod aggregate;
pub mod api;
pub mod domain;
pub mod handlers;
pub mod outbound;
pub mod store;

pub mod config;
pub mod db;
mod error;

pub use aggregate::{HelperValidation, ReviewStatus};
pub use config::Config;
pub use domain::{DomainError, HelperEvent, ProfileUpdate};
pub use error::{AppError, ErrorResponse};
