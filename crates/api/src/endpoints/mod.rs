//! API endpoints.

mod auth;
mod projects;
mod sections;

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::middleware::AppState;

/// A bare confirmation message.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Liveness probe.
async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("Draftsmith API is running"))
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/auth", auth::router())
        .nest("/projects", projects::router())
        .nest("/sections", sections::router())
}
