use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // PayrollRecord: composite unique (email, month, year).
        // Closes the check-then-act duplicate-period race at the storage level.
        manager
            .create_index(
                Index::create()
                    .name("uniq_payroll_email_month_year")
                    .table(PayrollRecord::Table)
                    .col(PayrollRecord::Email)
                    .col(PayrollRecord::Month)
                    .col(PayrollRecord::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Payment: composite unique (account_id, month, year)
        manager
            .create_index(
                Index::create()
                    .name("uniq_payment_account_month_year")
                    .table(Payment::Table)
                    .col(Payment::AccountId)
                    .col(Payment::Month)
                    .col(Payment::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // WorkEntry: index on account_id
        manager
            .create_index(
                Index::create()
                    .name("idx_work_entry_account")
                    .table(WorkEntry::Table)
                    .col(WorkEntry::AccountId)
                    .to_owned(),
            )
            .await?;

        // VisitorMessage: index on created_at for newest-first listing
        manager
            .create_index(
                Index::create()
                    .name("idx_message_created_at")
                    .table(VisitorMessage::Table)
                    .col(VisitorMessage::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_payroll_email_month_year").table(PayrollRecord::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_payment_account_month_year").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_work_entry_account").table(WorkEntry::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_message_created_at").table(VisitorMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PayrollRecord { Table, Email, Month, Year }

#[derive(DeriveIden)]
enum Payment { Table, AccountId, Month, Year }

#[derive(DeriveIden)]
enum WorkEntry { Table, AccountId }

#[derive(DeriveIden)]
enum VisitorMessage { Table, CreatedAt }
