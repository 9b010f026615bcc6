// ABOUTME: SeaORM migration module for database schema management
// ABOUTME: Creates the catalog schema on startup and in tests

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_catalog_tables::Migration)]
    }
}

pub mod m20250101_000001_create_catalog_tables;
