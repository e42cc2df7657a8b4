//! Project repository.

use std::sync::Arc;

use crate::entities::{
    Comment, Project, RefinementHistory, Section, comment, project, refinement_history, section,
};
use draftsmith_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Input for one section of a newly created project.
#[derive(Debug, Clone)]
pub struct NewSection {
    pub title: String,
    pub sort_order: i32,
}

/// Project repository for database operations.
///
/// Every read here is scoped to an owner; callers cannot load another
/// user's project through this type.
#[derive(Clone)]
pub struct ProjectRepository {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepository {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List all projects owned by a user together with their sections.
    pub async fn find_by_owner_with_sections(
        &self,
        owner_id: i32,
    ) -> AppResult<Vec<(project::Model, Vec<section::Model>)>> {
        Project::find()
            .filter(project::Column::OwnerId.eq(owner_id))
            .order_by_desc(project::Column::CreatedAt)
            .find_with_related(Section)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a project by ID, scoped to its owner.
    pub async fn find_for_owner(
        &self,
        project_id: i32,
        owner_id: i32,
    ) -> AppResult<Option<project::Model>> {
        Project::find_by_id(project_id)
            .filter(project::Column::OwnerId.eq(owner_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a project together with its initial sections.
    ///
    /// The project row is inserted first so its ID is available for the
    /// section rows; the whole operation commits as one transaction, so a
    /// failed section insert leaves no partial project behind.
    pub async fn create_with_sections(
        &self,
        owner_id: i32,
        title: String,
        topic: String,
        doc_type: project::DocType,
        sections: Vec<NewSection>,
    ) -> AppResult<project::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let project = project::ActiveModel {
            title: Set(title),
            topic: Set(topic),
            doc_type: Set(doc_type),
            created_at: Set(chrono::Utc::now().into()),
            owner_id: Set(owner_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        for input in sections {
            section::ActiveModel {
                title: Set(input.title),
                sort_order: Set(input.sort_order),
                content: Set(None),
                project_id: Set(project.id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(project)
    }

    /// Delete a project and all dependent rows.
    ///
    /// Explicit ordered deletes inside one transaction, children before
    /// parents: comments and refinement history referencing the project's
    /// sections, then the sections, then the project itself.
    pub async fn delete_with_children(&self, project: project::Model) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let section_ids: Vec<i32> = Section::find()
            .filter(section::Column::ProjectId.eq(project.id))
            .all(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .map(|s| s.id)
            .collect();

        if !section_ids.is_empty() {
            Comment::delete_many()
                .filter(comment::Column::SectionId.is_in(section_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            RefinementHistory::delete_many()
                .filter(refinement_history::Column::SectionId.is_in(section_ids))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            Section::delete_many()
                .filter(section::Column::ProjectId.eq(project.id))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        project
            .delete(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
