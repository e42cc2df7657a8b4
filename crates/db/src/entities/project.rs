//! Project entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Target document kind for a project. Immutable after creation; constrains
/// which export operation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    #[sea_orm(string_value = "docx")]
    Docx,
    #[sea_orm(string_value = "pptx")]
    Pptx,
}

impl DocType {
    /// File extension used when naming export attachments.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pptx => "pptx",
        }
    }

    /// Office document media type for the export response.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    /// Free text used as generation context.
    #[sea_orm(column_type = "Text")]
    pub topic: String,

    pub doc_type: DocType,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(indexed)]
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,

    #[sea_orm(has_many = "super::section::Entity")]
    Sections,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DocType::Docx).expect("serialize"),
            "\"docx\""
        );
        assert_eq!(
            serde_json::to_string(&DocType::Pptx).expect("serialize"),
            "\"pptx\""
        );
    }

    #[test]
    fn test_doc_type_rejects_unknown_kind() {
        assert!(serde_json::from_str::<DocType>("\"pdf\"").is_err());
    }

    #[test]
    fn test_media_types() {
        assert!(DocType::Docx.media_type().contains("wordprocessingml"));
        assert!(DocType::Pptx.media_type().contains("presentationml"));
    }
}
