//! Project service.
//!
//! Orchestrates project-level operations: creation with initial sections,
//! owner-scoped reads, cascade deletion, and whole-project generation.

use draftsmith_common::{AppError, AppResult};
use draftsmith_db::{
    entities::{project, project::DocType, section},
    repositories::{ContentUpdate, NewSection, ProjectRepository, SectionRepository},
};
use serde::Deserialize;
use validator::Validate;

use crate::services::generation::GenerationClient;

/// Prompt recorded on history rows created by whole-project generation.
pub const INITIAL_GENERATION_PROMPT: &str = "Initial generation";

/// A project together with its sections, as returned to the API layer.
#[derive(Debug, Clone)]
pub struct ProjectWithSections {
    pub project: project::Model,
    pub sections: Vec<section::Model>,
}

/// Input for one initial section of a new project.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSectionInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub order: i32,
}

/// Input for creating a project.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub topic: String,

    /// Document kind; must be one of the closed set.
    pub doc_type: String,

    #[serde(default)]
    #[validate(nested)]
    pub sections: Vec<CreateSectionInput>,
}

/// Project service for business logic.
#[derive(Clone)]
pub struct ProjectService {
    project_repo: ProjectRepository,
    section_repo: SectionRepository,
    generation: GenerationClient,
}

impl ProjectService {
    /// Create a new project service.
    #[must_use]
    pub const fn new(
        project_repo: ProjectRepository,
        section_repo: SectionRepository,
        generation: GenerationClient,
    ) -> Self {
        Self {
            project_repo,
            section_repo,
            generation,
        }
    }

    /// List all projects owned by a user.
    pub async fn list(&self, owner_id: i32) -> AppResult<Vec<ProjectWithSections>> {
        let projects = self
            .project_repo
            .find_by_owner_with_sections(owner_id)
            .await?;

        Ok(projects
            .into_iter()
            .map(|(project, sections)| ProjectWithSections { project, sections })
            .collect())
    }

    /// Create a project with its initial sections in one atomic operation.
    pub async fn create(
        &self,
        owner_id: i32,
        input: CreateProjectInput,
    ) -> AppResult<ProjectWithSections> {
        input.validate()?;

        let doc_type = parse_doc_type(&input.doc_type)?;

        let sections = input
            .sections
            .into_iter()
            .map(|s| NewSection {
                title: s.title,
                sort_order: s.order,
            })
            .collect();

        let project = self
            .project_repo
            .create_with_sections(owner_id, input.title, input.topic, doc_type, sections)
            .await?;

        let sections = self.section_repo.find_by_project(project.id).await?;

        Ok(ProjectWithSections { project, sections })
    }

    /// Get a project owned by a user, or not-found.
    pub async fn get(&self, owner_id: i32, project_id: i32) -> AppResult<ProjectWithSections> {
        let project = self.get_owned(owner_id, project_id).await?;
        let sections = self.section_repo.find_by_project(project.id).await?;

        Ok(ProjectWithSections { project, sections })
    }

    /// Delete a project and everything hanging off it.
    pub async fn delete(&self, owner_id: i32, project_id: i32) -> AppResult<()> {
        let project = self.get_owned(owner_id, project_id).await?;
        self.project_repo.delete_with_children(project).await
    }

    /// Generate content for every section of a project.
    ///
    /// Sections are processed in whatever order persistence returns them.
    /// Upstream failures surface as sentinel text on the affected section
    /// rather than aborting the loop; the database commit happens once
    /// after all sections have been processed.
    pub async fn generate(&self, owner_id: i32, project_id: i32) -> AppResult<ProjectWithSections> {
        let project = self.get_owned(owner_id, project_id).await?;
        let sections = self.section_repo.find_by_project(project.id).await?;

        let mut updates = Vec::with_capacity(sections.len());

        for section in sections {
            let new_content = self.generation.generate(&section.title, &project.topic).await;

            updates.push(ContentUpdate {
                section,
                new_content,
                prompt: INITIAL_GENERATION_PROMPT.to_string(),
            });
        }

        let sections = self.section_repo.apply_content_updates(updates).await?;

        Ok(ProjectWithSections { project, sections })
    }

    async fn get_owned(&self, owner_id: i32, project_id: i32) -> AppResult<project::Model> {
        self.project_repo
            .find_for_owner(project_id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }
}

fn parse_doc_type(value: &str) -> AppResult<DocType> {
    match value {
        "docx" => Ok(DocType::Docx),
        "pptx" => Ok(DocType::Pptx),
        _ => Err(AppError::BadRequest("Invalid doc_type".to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use draftsmith_common::Config;
    use draftsmith_common::config::{AuthConfig, DatabaseConfig, LlmConfig, ServerConfig};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                cors_origins: vec![],
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            auth: AuthConfig {
                secret_key: "secret".to_string(),
                algorithm: "HS256".to_string(),
                access_token_expire_minutes: 60,
            },
            llm: LlmConfig {
                api_key: "test-key".to_string(),
                api_url: "https://example.com/generate".to_string(),
            },
        }
    }

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> ProjectService {
        let config = create_test_config();
        ProjectService::new(
            ProjectRepository::new(db.clone()),
            SectionRepository::new(db),
            GenerationClient::new(&config),
        )
    }

    #[test]
    fn test_parse_doc_type() {
        assert!(matches!(parse_doc_type("docx"), Ok(DocType::Docx)));
        assert!(matches!(parse_doc_type("pptx"), Ok(DocType::Pptx)));
        assert!(matches!(
            parse_doc_type("pdf"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_get_project_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<project::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        assert!(matches!(
            service.get(1, 99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_project_not_owned_is_not_found() {
        // The owner-scoped query returns nothing for someone else's project
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<project::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        assert!(matches!(
            service.delete(2, 1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_appends_history_rows_with_fixed_prompt() {
        use draftsmith_db::entities::refinement_history;

        use crate::services::generation::GENERATION_FAILED;

        let project = project::Model {
            id: 1,
            title: "Report".to_string(),
            topic: "Oceans".to_string(),
            doc_type: DocType::Docx,
            created_at: chrono::Utc::now().into(),
            owner_id: 1,
        };
        let sections = vec![
            section::Model {
                id: 1,
                title: "Intro".to_string(),
                sort_order: 1,
                content: None,
                project_id: 1,
            },
            section::Model {
                id: 2,
                title: "Methods".to_string(),
                sort_order: 2,
                content: Some("stale draft".to_string()),
                project_id: 1,
            },
        ];

        // The test client has no reachable upstream, so every section is
        // written with the failure sentinel
        let history = |id: i32, section: &section::Model| refinement_history::Model {
            id,
            section_id: section.id,
            old_content: section.content.clone(),
            new_content: GENERATION_FAILED.to_string(),
            prompt: INITIAL_GENERATION_PROMPT.to_string(),
            liked: None,
            created_at: chrono::Utc::now().into(),
        };
        let written = |section: &section::Model| section::Model {
            content: Some(GENERATION_FAILED.to_string()),
            ..section.clone()
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![project]])
                .append_query_results([sections.clone()])
                .append_query_results([vec![history(1, &sections[0])]])
                .append_query_results([vec![written(&sections[0])]])
                .append_query_results([vec![history(2, &sections[1])]])
                .append_query_results([vec![written(&sections[1])]])
                .into_connection(),
        );
        let service = create_test_service(Arc::clone(&db));

        let result = service.generate(1, 1).await.unwrap();
        assert_eq!(result.sections.len(), 2);
        assert!(
            result
                .sections
                .iter()
                .all(|s| s.content.as_deref() == Some(GENERATION_FAILED))
        );

        drop(service);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = format!("{:?}", db.into_transaction_log());

        // Each history row carries the fixed initial-generation marker,
        // and the second one snapshots the prior content
        assert!(log.contains(INITIAL_GENERATION_PROMPT));
        assert!(log.contains("stale draft"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_doc_type() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .create(
                1,
                CreateProjectInput {
                    title: "Report".to_string(),
                    topic: "Oceans".to_string(),
                    doc_type: "pdf".to_string(),
                    sections: vec![],
                },
            )
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid doc_type"),
            other => panic!("expected doc_type rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .create(
                1,
                CreateProjectInput {
                    title: String::new(),
                    topic: "Oceans".to_string(),
                    doc_type: "docx".to_string(),
                    sections: vec![],
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
