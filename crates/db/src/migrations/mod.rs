//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20260101_000001_create_users_table;
mod m20260101_000002_create_projects_table;
mod m20260101_000003_create_sections_table;
mod m20260101_000004_create_refinement_history_table;
mod m20260101_000005_create_comments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_users_table::Migration),
            Box::new(m20260101_000002_create_projects_table::Migration),
            Box::new(m20260101_000003_create_sections_table::Migration),
            Box::new(m20260101_000004_create_refinement_history_table::Migration),
            Box::new(m20260101_000005_create_comments_table::Migration),
        ]
    }
}
