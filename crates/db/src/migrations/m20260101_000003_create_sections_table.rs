//! Create sections table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Sections::SortOrder).integer().not_null())
                    .col(ColumnDef::new(Sections::Content).text())
                    .col(ColumnDef::new(Sections::ProjectId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Index: project_id
        manager
            .create_index(
                Index::create()
                    .name("idx_sections_project_id")
                    .table(Sections::Table)
                    .col(Sections::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Foreign key: project_id -> projects.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_sections_project_id")
                    .from(Sections::Table, Sections::ProjectId)
                    .to(Projects::Table, Projects::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
    Title,
    SortOrder,
    Content,
    ProjectId,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}
