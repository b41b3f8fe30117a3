//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_account;
mod m20240101_000002_create_payroll_record;
mod m20240101_000003_create_payment;
mod m20240101_000004_create_work_entry;
mod m20240101_000005_create_visitor_message;
mod m20240101_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_account::Migration),
            Box::new(m20240101_000002_create_payroll_record::Migration),
            Box::new(m20240101_000003_create_payment::Migration),
            Box::new(m20240101_000004_create_work_entry::Migration),
            Box::new(m20240101_000005_create_visitor_message::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000009_add_indexes::Migration),
        ]
    }
}
