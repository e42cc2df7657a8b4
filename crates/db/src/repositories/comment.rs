//! Comment repository.

use std::sync::Arc;

use crate::entities::comment;
use draftsmith_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a comment on a section.
    pub async fn create(&self, section_id: i32, text: String) -> AppResult<comment::Model> {
        let model = comment::ActiveModel {
            section_id: Set(section_id),
            text: Set(text),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
