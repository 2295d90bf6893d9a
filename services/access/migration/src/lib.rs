pub use sea_orm_migration::prelude::*;

mod m20260901_000001_create_lockers;
mod m20260901_000002_create_qr_sessions;
mod m20260901_000003_create_access_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_lockers::Migration),
            Box::new(m20260901_000002_create_qr_sessions::Migration),
            Box::new(m20260901_000003_create_access_events::Migration),
        ]
    }
}
