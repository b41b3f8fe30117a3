//! Create `account` table.
//!
//! Email is stored lowercase-normalized and carries the unique natural key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string_len(Account::Email, 255).unique_key().not_null())
                    // Null for externally-authenticated accounts
                    .col(
                        ColumnDef::new(Account::PasswordHash)
                            .string_len(255)
                            .null(),
                    )
                    .col(string_len(Account::Username, 128).not_null())
                    .col(string_len(Account::AccountType, 16).not_null())
                    .col(string_len(Account::BankAccountNumber, 64).not_null())
                    .col(string_len(Account::UploadedPhoto, 512).not_null())
                    .col(big_integer(Account::Salary).not_null())
                    .col(boolean(Account::IsVerified).not_null())
                    .col(boolean(Account::IsFired).not_null())
                    .col(timestamp_with_time_zone(Account::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Account::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Email,
    PasswordHash,
    Username,
    AccountType,
    BankAccountNumber,
    UploadedPhoto,
    Salary,
    IsVerified,
    IsFired,
    CreatedAt,
    UpdatedAt,
}
