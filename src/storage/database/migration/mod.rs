use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_news_table;
mod m20250301_000003_create_testimonials_table;
mod m20250301_000004_create_contact_messages_table;
mod m20250301_000005_create_documents_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_news_table::Migration),
            Box::new(m20250301_000003_create_testimonials_table::Migration),
            Box::new(m20250301_000004_create_contact_messages_table::Migration),
            Box::new(m20250301_000005_create_documents_table::Migration),
        ]
    }
}
