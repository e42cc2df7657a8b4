//! Refinement history repository.

use std::sync::Arc;

use crate::entities::{RefinementHistory, refinement_history};
use draftsmith_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Refinement history repository for database operations.
#[derive(Clone)]
pub struct RefinementHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl RefinementHistoryRepository {
    /// Create a new refinement history repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the most recent history row for a section, or None.
    ///
    /// Ordered by creation timestamp descending with the row ID as a
    /// deterministic tie-break for same-timestamp inserts.
    pub async fn find_latest_for_section(
        &self,
        section_id: i32,
    ) -> AppResult<Option<refinement_history::Model>> {
        RefinementHistory::find()
            .filter(refinement_history::Column::SectionId.eq(section_id))
            .order_by_desc(refinement_history::Column::CreatedAt)
            .order_by_desc(refinement_history::Column::Id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the feedback flag on a history row.
    pub async fn set_liked(
        &self,
        row: refinement_history::Model,
        liked: bool,
    ) -> AppResult<refinement_history::Model> {
        let mut active: refinement_history::ActiveModel = row.into();
        active.liked = Set(Some(liked));

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
