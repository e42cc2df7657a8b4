//! Common utilities and shared types for draftsmith.
//!
//! This crate provides the foundational pieces used across all draftsmith
//! crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
