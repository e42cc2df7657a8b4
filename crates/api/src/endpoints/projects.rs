//! Project endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use draftsmith_common::{AppError, AppResult};
use draftsmith_core::{CreateProjectInput, ProjectWithSections, build_docx, build_pptx};
use draftsmith_db::entities::{project, project::DocType, section};
use serde::Serialize;

use super::MessageResponse;
use crate::{extractors::AuthUser, middleware::AppState};

/// A project with its sections on the wire.
#[derive(Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: project::Model,
    pub sections: Vec<section::Model>,
}

impl From<ProjectWithSections> for ProjectResponse {
    fn from(value: ProjectWithSections) -> Self {
        Self {
            project: value.project,
            sections: value.sections,
        }
    }
}

/// List the caller's projects.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = state.project_service.list(user.id).await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Create a project with its initial sections.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectInput>,
) -> AppResult<Json<ProjectResponse>> {
    let created = state.project_service.create(user.id, input).await?;

    Ok(Json(created.into()))
}

/// Get one owned project.
async fn show(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> AppResult<Json<ProjectResponse>> {
    let project = state.project_service.get(user.id, project_id).await?;

    Ok(Json(project.into()))
}

/// Delete a project and everything under it.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.project_service.delete(user.id, project_id).await?;

    Ok(Json(MessageResponse::new(
        "Project and all related data deleted successfully",
    )))
}

/// Generate content for every section of a project.
async fn generate(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> AppResult<Json<ProjectResponse>> {
    let project = state.project_service.generate(user.id, project_id).await?;

    Ok(Json(project.into()))
}

/// Download a project as a word-processor document.
async fn export_docx(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let ProjectWithSections { project, sections } =
        state.project_service.get(user.id, project_id).await?;

    if project.doc_type != DocType::Docx {
        return Err(AppError::BadRequest(
            "Project is not a docx document".to_string(),
        ));
    }

    let bytes = build_docx(&project, &sections)?;
    Ok(attachment(&project, bytes))
}

/// Download a project as a slide deck.
async fn export_pptx(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let ProjectWithSections { project, sections } =
        state.project_service.get(user.id, project_id).await?;

    if project.doc_type != DocType::Pptx {
        return Err(AppError::BadRequest(
            "Project is not a pptx document".to_string(),
        ));
    }

    let bytes = build_pptx(&project, &sections)?;
    Ok(attachment(&project, bytes))
}

fn attachment(project: &project::Model, bytes: Vec<u8>) -> impl IntoResponse + use<> {
    (
        [
            (
                header::CONTENT_TYPE,
                project.doc_type.media_type().to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}.{}\"",
                    project.title.replace(['"', '\r', '\n'], "_"),
                    project.doc_type.extension()
                ),
            ),
        ],
        bytes,
    )
}

/// Create the projects router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).delete(delete))
        .route("/{id}/generate", post(generate))
        .route("/{id}/export/docx", get(export_docx))
        .route("/{id}/export/pptx", get(export_pptx))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_response() -> ProjectResponse {
        ProjectResponse {
            project: project::Model {
                id: 1,
                title: "Report".to_string(),
                topic: "Oceans".to_string(),
                doc_type: DocType::Docx,
                created_at: chrono::Utc::now().into(),
                owner_id: 9,
            },
            sections: vec![section::Model {
                id: 4,
                title: "Intro".to_string(),
                sort_order: 1,
                content: None,
                project_id: 1,
            }],
        }
    }

    #[test]
    fn test_project_response_flattens_project_fields() {
        let json = serde_json::to_value(test_response()).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["doc_type"], "docx");
        assert_eq!(json["sections"][0]["title"], "Intro");
    }

    #[test]
    fn test_section_order_field_name_on_the_wire() {
        let json = serde_json::to_value(test_response()).unwrap();

        assert_eq!(json["sections"][0]["order"], 1);
        assert!(json["sections"][0].get("sort_order").is_none());
    }

    #[test]
    fn test_attachment_sanitizes_filename_quotes() {
        let mut response = test_response();
        response.project.title = "My \"Report\"".to_string();

        let built = attachment(&response.project, vec![1, 2, 3]).into_response();
        let disposition = built
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();

        assert_eq!(
            disposition,
            "attachment; filename=\"My _Report_.docx\""
        );
    }
}
