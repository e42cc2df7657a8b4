//! HTTP API layer for draftsmith.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: auth, projects, sections, export
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: token resolution into request extensions
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
