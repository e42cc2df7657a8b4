//! Refinement history entity.
//!
//! An immutable audit record of one content change to a section.
//! Append-only, except for the `liked` flag which the feedback endpoint
//! sets on the most recent record.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "refinement_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub section_id: i32,

    /// Content snapshot before the change. None for the first generation.
    #[sea_orm(column_type = "Text", nullable)]
    pub old_content: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub new_content: String,

    /// The instruction that produced the change, or the fixed
    /// "Initial generation" marker.
    #[sea_orm(column_type = "Text")]
    pub prompt: String,

    /// Tri-state feedback flag; absent until feedback is given.
    #[sea_orm(nullable)]
    pub liked: Option<bool>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
