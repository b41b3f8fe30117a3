//! Create `payroll_record` table.
//!
//! The (email, month, year) uniqueness lives in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PayrollRecord::Table)
                    .if_not_exists()
                    .col(uuid(PayrollRecord::Id).primary_key())
                    .col(string_len(PayrollRecord::Email, 255).not_null())
                    .col(string_len(PayrollRecord::EmployeeName, 128).not_null())
                    .col(big_integer(PayrollRecord::Salary).not_null())
                    .col(integer(PayrollRecord::Month).not_null())
                    .col(integer(PayrollRecord::Year).not_null())
                    .col(string_len(PayrollRecord::Status, 24).not_null())
                    // Null until the record transitions to Paid
                    .col(ColumnDef::new(PayrollRecord::PaymentDate).date().null())
                    .col(timestamp_with_time_zone(PayrollRecord::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PayrollRecord::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PayrollRecord {
    Table,
    Id,
    Email,
    EmployeeName,
    Salary,
    Month,
    Year,
    Status,
    PaymentDate,
    CreatedAt,
}
