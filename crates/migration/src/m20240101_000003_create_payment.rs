//! Create `payment` table with FK to `account`.
//!
//! Account-centric payment history; replaces the original embedded array.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(uuid(Payment::AccountId).not_null())
                    .col(integer(Payment::Month).not_null())
                    .col(integer(Payment::Year).not_null())
                    .col(date(Payment::PaidOn).not_null())
                    .col(big_integer(Payment::SalaryAtPayment).not_null())
                    .col(timestamp_with_time_zone(Payment::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_account")
                            .from(Payment::Table, Payment::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment {
    Table,
    Id,
    AccountId,
    Month,
    Year,
    PaidOn,
    SalaryAtPayment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
}
