//! Section endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use draftsmith_common::AppResult;
use draftsmith_db::entities::section;
use serde::Deserialize;
use validator::Validate;

use super::MessageResponse;
use crate::{extractors::AuthUser, middleware::AppState};

/// Refinement request.
#[derive(Debug, Deserialize, Validate)]
pub struct RefineRequest {
    #[validate(length(min = 1))]
    pub prompt: String,
}

/// Refine a section's content with an instruction.
async fn refine(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(section_id): Path<i32>,
    Json(req): Json<RefineRequest>,
) -> AppResult<Json<section::Model>> {
    req.validate()?;

    let section = state
        .section_service
        .refine(user.id, section_id, req.prompt)
        .await?;

    Ok(Json(section))
}

/// Feedback request.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub liked: bool,
}

/// Record feedback on a section's latest content change.
async fn feedback(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(section_id): Path<i32>,
    Json(req): Json<FeedbackRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .section_service
        .feedback(user.id, section_id, req.liked)
        .await?;

    Ok(Json(MessageResponse::new("Feedback saved")))
}

/// Comment request.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

/// Attach a comment to a section.
async fn comment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(section_id): Path<i32>,
    Json(req): Json<CommentRequest>,
) -> AppResult<Json<MessageResponse>> {
    req.validate()?;

    state
        .section_service
        .comment(user.id, section_id, req.text)
        .await?;

    Ok(Json(MessageResponse::new("Comment added")))
}

/// Create the sections router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/refine", post(refine))
        .route("/{id}/feedback", post(feedback))
        .route("/{id}/comment", post(comment))
}
