//! Domain module
//!
//! Review workflow errors, events and update payloads.

pub mod error;
pub mod events;

pub use error::{AdminDecision, DomainError, Requirement};
pub use events::{HelperEvent, ProfileUpdate};
