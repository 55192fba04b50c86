//! Aggregate module
//!
//! Review state and its guarded transitions.

pub mod helper;

pub use helper::{HelperValidation, ReviewStatus, ReviewTransition};
