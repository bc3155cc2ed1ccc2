//! Core business logic for rapport.

pub mod categories;
pub mod redaction;
pub mod services;

pub use redaction::redact;
pub use services::*;
