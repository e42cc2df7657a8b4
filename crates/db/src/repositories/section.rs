//! Section repository.

use std::sync::Arc;

use crate::entities::{Section, project, refinement_history, section};
use draftsmith_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

/// One pending content change: the section as currently loaded, the text
/// that replaces its content, and the instruction that produced it.
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub section: section::Model,
    pub new_content: String,
    pub prompt: String,
}

/// Section repository for database operations.
#[derive(Clone)]
pub struct SectionRepository {
    db: Arc<DatabaseConnection>,
}

impl SectionRepository {
    /// Create a new section repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List all sections of a project, in storage order.
    pub async fn find_by_project(&self, project_id: i32) -> AppResult<Vec<section::Model>> {
        Section::find()
            .filter(section::Column::ProjectId.eq(project_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a section by ID, scoped to the owner of its project.
    ///
    /// Joins through the projects table so a section belonging to another
    /// user's project is indistinguishable from a missing one.
    pub async fn find_for_owner(
        &self,
        section_id: i32,
        owner_id: i32,
    ) -> AppResult<Option<section::Model>> {
        Section::find()
            .filter(section::Column::Id.eq(section_id))
            .join(JoinType::InnerJoin, section::Relation::Project.def())
            .filter(project::Column::OwnerId.eq(owner_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a batch of content changes, each appending a history row and
    /// replacing the section's content, committed once at the end.
    ///
    /// Returns the updated section models in input order.
    pub async fn apply_content_updates(
        &self,
        updates: Vec<ContentUpdate>,
    ) -> AppResult<Vec<section::Model>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut updated = Vec::with_capacity(updates.len());

        for update in updates {
            refinement_history::ActiveModel {
                section_id: Set(update.section.id),
                old_content: Set(update.section.content.clone()),
                new_content: Set(update.new_content.clone()),
                prompt: Set(update.prompt),
                liked: Set(None),
                created_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

            let mut active: section::ActiveModel = update.section.into();
            active.content = Set(Some(update.new_content));

            let model = active
                .update(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            updated.push(model);
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(updated)
    }
}
