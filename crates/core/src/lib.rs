//! Core business logic for draftsmith.

pub mod services;

pub use services::*;
