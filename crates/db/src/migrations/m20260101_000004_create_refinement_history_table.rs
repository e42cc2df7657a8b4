//! Create refinement history table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RefinementHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RefinementHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RefinementHistory::SectionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RefinementHistory::OldContent).text())
                    .col(ColumnDef::new(RefinementHistory::NewContent).text().not_null())
                    .col(ColumnDef::new(RefinementHistory::Prompt).text().not_null())
                    .col(ColumnDef::new(RefinementHistory::Liked).boolean())
                    .col(
                        ColumnDef::new(RefinementHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index: (section_id, created_at) for latest-row lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_refinement_history_section_id_created_at")
                    .table(RefinementHistory::Table)
                    .col(RefinementHistory::SectionId)
                    .col(RefinementHistory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Foreign key: section_id -> sections.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_refinement_history_section_id")
                    .from(RefinementHistory::Table, RefinementHistory::SectionId)
                    .to(Sections::Table, Sections::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RefinementHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RefinementHistory {
    Table,
    Id,
    SectionId,
    OldContent,
    NewContent,
    Prompt,
    Liked,
    CreatedAt,
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
}
