pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_geography;
mod m20260301_000002_catalog;
mod m20260301_000003_contact;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_geography::Migration),
            Box::new(m20260301_000002_catalog::Migration),
            Box::new(m20260301_000003_contact::Migration),
        ]
    }
}
