//! Create comments table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::SectionId).integer().not_null())
                    .col(ColumnDef::new(Comments::Text).text().not_null())
                    .col(
                        ColumnDef::new(Comments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: section_id
        manager
            .create_index(
                Index::create()
                    .name("idx_comments_section_id")
                    .table(Comments::Table)
                    .col(Comments::SectionId)
                    .to_owned(),
            )
            .await?;

        // Foreign key: section_id -> sections.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_comments_section_id")
                    .from(Comments::Table, Comments::SectionId)
                    .to(Sections::Table, Sections::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Comments {
    Table,
    Id,
    SectionId,
    Text,
    CreatedAt,
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
}
