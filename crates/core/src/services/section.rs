//! Section service.
//!
//! Section-level operations: refinement, feedback on the latest history
//! row, and comments. All reads go through the owner-scoped join, so a
//! section in another user's project behaves like a missing one.

use draftsmith_common::{AppError, AppResult};
use draftsmith_db::{
    entities::{comment, section},
    repositories::{
        CommentRepository, ContentUpdate, RefinementHistoryRepository, SectionRepository,
    },
};

use crate::services::generation::GenerationClient;

/// Section service for business logic.
#[derive(Clone)]
pub struct SectionService {
    section_repo: SectionRepository,
    history_repo: RefinementHistoryRepository,
    comment_repo: CommentRepository,
    generation: GenerationClient,
}

impl SectionService {
    /// Create a new section service.
    #[must_use]
    pub const fn new(
        section_repo: SectionRepository,
        history_repo: RefinementHistoryRepository,
        comment_repo: CommentRepository,
        generation: GenerationClient,
    ) -> Self {
        Self {
            section_repo,
            history_repo,
            comment_repo,
            generation,
        }
    }

    /// Refine a section's content with an improvement instruction.
    ///
    /// Appends one history row (old content as the snapshot, refiner output
    /// as the new content) and replaces the section's content, in one
    /// transaction.
    pub async fn refine(
        &self,
        owner_id: i32,
        section_id: i32,
        prompt: String,
    ) -> AppResult<section::Model> {
        let section = self.get_owned(owner_id, section_id).await?;

        let new_content = self
            .generation
            .refine(section.content.as_deref().unwrap_or(""), &prompt)
            .await;

        let mut updated = self
            .section_repo
            .apply_content_updates(vec![ContentUpdate {
                section,
                new_content,
                prompt,
            }])
            .await?;

        updated
            .pop()
            .ok_or_else(|| AppError::Internal("Refinement produced no update".to_string()))
    }

    /// Record feedback on the most recent content change of a section.
    ///
    /// A no-op when the section has no history yet; the endpoint still
    /// confirms, matching the append-only audit contract.
    pub async fn feedback(&self, owner_id: i32, section_id: i32, liked: bool) -> AppResult<()> {
        let section = self.get_owned(owner_id, section_id).await?;

        if let Some(latest) = self.history_repo.find_latest_for_section(section.id).await? {
            self.history_repo.set_liked(latest, liked).await?;
        }

        Ok(())
    }

    /// Attach a freeform comment to a section.
    pub async fn comment(
        &self,
        owner_id: i32,
        section_id: i32,
        text: String,
    ) -> AppResult<comment::Model> {
        let section = self.get_owned(owner_id, section_id).await?;
        self.comment_repo.create(section.id, text).await
    }

    async fn get_owned(&self, owner_id: i32, section_id: i32) -> AppResult<section::Model> {
        self.section_repo
            .find_for_owner(section_id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::generation::GENERATION_FAILED;
    use draftsmith_common::Config;
    use draftsmith_common::config::{AuthConfig, DatabaseConfig, LlmConfig, ServerConfig};
    use draftsmith_db::entities::refinement_history;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
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

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> SectionService {
        let config = create_test_config();
        SectionService::new(
            SectionRepository::new(db.clone()),
            RefinementHistoryRepository::new(db.clone()),
            CommentRepository::new(db),
            GenerationClient::new(&config),
        )
    }

    fn test_section(id: i32, project_id: i32) -> section::Model {
        section::Model {
            id,
            title: "Intro".to_string(),
            sort_order: 1,
            content: Some("existing text".to_string()),
            project_id,
        }
    }

    #[tokio::test]
    async fn test_refine_unknown_section_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<section::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        assert!(matches!(
            service.refine(1, 99, "shorten".to_string()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_refine_appends_history_row_and_replaces_content() {
        // The test client has no reachable upstream, so the refiner output
        // is the fixed failure sentinel; that string must flow into both
        // the history row and the section content.
        let history = refinement_history::Model {
            id: 3,
            section_id: 5,
            old_content: Some("existing text".to_string()),
            new_content: GENERATION_FAILED.to_string(),
            prompt: "tighten".to_string(),
            liked: None,
            created_at: chrono::Utc::now().into(),
        };
        let mut updated = test_section(5, 1);
        updated.content = Some(GENERATION_FAILED.to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![test_section(5, 1)]])
                .append_query_results([vec![history]])
                .append_query_results([vec![updated]])
                .into_connection(),
        );
        let service = create_test_service(Arc::clone(&db));

        let section = service.refine(1, 5, "tighten".to_string()).await.unwrap();
        assert_eq!(section.content.as_deref(), Some(GENERATION_FAILED));

        drop(service);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = format!("{:?}", db.into_transaction_log());

        // One history insert (the mock holds results for exactly one),
        // carrying the pre-call content as the snapshot and the refiner
        // output as the new content
        assert!(log.contains("refinement_history"));
        assert!(log.contains("existing text"));
        assert!(log.contains(GENERATION_FAILED));
        assert!(log.contains("tighten"));
    }

    #[tokio::test]
    async fn test_feedback_without_history_is_noop_ok() {
        // First query: owner-scoped section load. Second: latest history (empty).
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![test_section(5, 1)]])
                .append_query_results([Vec::<refinement_history::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        assert!(service.feedback(1, 5, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_feedback_marks_latest_history_row() {
        let latest = refinement_history::Model {
            id: 9,
            section_id: 5,
            old_content: None,
            new_content: "draft".to_string(),
            prompt: "Initial generation".to_string(),
            liked: None,
            created_at: chrono::Utc::now().into(),
        };
        let marked = refinement_history::Model {
            liked: Some(true),
            ..latest.clone()
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![test_section(5, 1)]])
                .append_query_results([vec![latest]])
                .append_query_results([vec![marked]])
                .into_connection(),
        );
        let service = create_test_service(Arc::clone(&db));

        service.feedback(1, 5, true).await.unwrap();

        drop(service);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = format!("{:?}", db.into_transaction_log());

        // Latest-row selection orders by timestamp then id, both descending
        assert!(log.contains(r#"\"created_at\" DESC"#));
        assert!(log.contains(r#"\"id\" DESC"#));
        // The update flips liked on the selected row only
        assert!(log.contains("Bool(Some(true))"));
        assert!(log.contains("Int(Some(9))"));
    }

    #[tokio::test]
    async fn test_comment_inserts_row() {
        let inserted = comment::Model {
            id: 10,
            section_id: 5,
            text: "needs a chart".to_string(),
            created_at: chrono::Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![test_section(5, 1)]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 10,
                    rows_affected: 1,
                }])
                .append_query_results([vec![inserted.clone()]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let comment = service
            .comment(1, 5, "needs a chart".to_string())
            .await
            .unwrap();

        assert_eq!(comment.id, inserted.id);
        assert_eq!(comment.text, "needs a chart");
    }

    #[tokio::test]
    async fn test_comment_on_foreign_section_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<section::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        assert!(matches!(
            service.comment(2, 5, "hi".to_string()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
