use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::payroll_record::validate_period;

use super::domain::{AccountType, CreateRecordInput, PayStatus, PaymentEntry, PayrollRecord, Period, SalaryIncrease};
use super::errors::PayrollError;
use super::repository::{NewPayrollRecord, PayrollRepository};

/// Payroll ledger workflows over an injected repository.
pub struct PayrollService<R: PayrollRepository> {
    repo: Arc<R>,
}

impl<R: PayrollRepository> PayrollService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Submit one (employee, month, year) record.
    ///
    /// Status defaults to Pending Approval; the repository's uniqueness
    /// constraint rejects a second record for the same period.
    #[instrument(skip(self, input), fields(email = %input.email, month = input.month, year = input.year))]
    pub async fn create_record(&self, input: CreateRecordInput) -> Result<PayrollRecord, PayrollError> {
        validate_period(input.month, input.year).map_err(|e| PayrollError::Validation(e.to_string()))?;
        if input.salary < 0 {
            return Err(PayrollError::Validation("salary must be non-negative".into()));
        }
        if input.employee_name.trim().is_empty() {
            return Err(PayrollError::Validation("employee name required".into()));
        }
        let record = self
            .repo
            .insert_record(NewPayrollRecord {
                email: models::account::normalize_email(&input.email),
                employee_name: input.employee_name,
                salary: input.salary,
                month: input.month,
                year: input.year,
                status: input.status.unwrap_or(PayStatus::PendingApproval),
            })
            .await?;
        info!(record_id = %record.id, "payroll_record_created");
        Ok(record)
    }

    pub async fn get_record(&self, id: Uuid) -> Result<PayrollRecord, PayrollError> {
        self.repo.find_record(id).await?.ok_or(PayrollError::RecordNotFound)
    }

    pub async fn list_records(&self) -> Result<Vec<PayrollRecord>, PayrollError> {
        self.repo.list_records().await
    }

    /// Transition a record to Paid and stamp the payment date.
    ///
    /// Re-invoking on an already-Paid record still succeeds and overwrites
    /// the payment date; the ledger keeps the historical behavior and only
    /// logs the overwrite.
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: Uuid, paid_on: NaiveDate) -> Result<PayrollRecord, PayrollError> {
        let (record, previous) = self
            .repo
            .mark_paid(id, paid_on)
            .await?
            .ok_or(PayrollError::RecordNotFound)?;
        if previous == PayStatus::Paid {
            warn!(record_id = %id, "payment date overwritten on already-paid record");
        } else {
            info!(record_id = %id, %paid_on, "payroll_record_paid");
        }
        Ok(record)
    }

    /// Raise the employee's salary by `increment` from their latest payroll
    /// period onward, and update the account's live salary to match.
    ///
    /// A decrement larger than the latest salary is rejected by the
    /// repository before anything is written, so the ledger is untouched
    /// on the error branch.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn increase_salary_across_periods(&self, email: &str, increment: i64)
        -> Result<SalaryIncrease, PayrollError>
    {
        let increase = self.repo.increase_salary_across_periods(email, increment).await?;
        info!(
            email = %increase.email,
            new_salary = increase.new_salary,
            records_updated = increase.records_updated,
            "salary_increased"
        );
        Ok(increase)
    }

    /// Append a payment entry to the account's history, snapshotting the
    /// current account salary. One entry per (account, month, year).
    #[instrument(skip(self), fields(email = %email))]
    pub async fn record_direct_payment(
        &self,
        email: &str,
        paid_on: NaiveDate,
        month: i32,
        year: i32,
    ) -> Result<PaymentEntry, PayrollError> {
        validate_period(month, year).map_err(|e| PayrollError::Validation(e.to_string()))?;
        let account = self
            .repo
            .find_account(email)
            .await?
            .ok_or(PayrollError::AccountNotFound)?;
        let entry = self
            .repo
            .append_payment(account.id, Period::new(year, month), paid_on, account.salary)
            .await?;
        info!(account_id = %account.id, month, year, "direct_payment_recorded");
        Ok(entry)
    }

    /// Set the account type. No transition legality check is applied.
    #[instrument(skip(self))]
    pub async fn promote(&self, account_id: Uuid, new_type: AccountType) -> Result<(), PayrollError> {
        let rows = self.repo.set_account_type(account_id, new_type).await?;
        if rows == 0 {
            return Err(PayrollError::AccountNotFound);
        }
        info!(%account_id, ?new_type, "account_promoted");
        Ok(())
    }

    /// Mark the account fired: fired flag plus account type Fired.
    #[instrument(skip(self))]
    pub async fn fire(&self, account_id: Uuid) -> Result<(), PayrollError> {
        if !self.repo.account_exists(account_id).await? {
            return Err(PayrollError::AccountNotFound);
        }
        let rows = self.repo.mark_fired(account_id).await?;
        if rows == 0 {
            return Err(PayrollError::NoChangeApplied);
        }
        info!(%account_id, "account_fired");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::repository::mock::MockPayrollRepository;

    fn service() -> (Arc<MockPayrollRepository>, PayrollService<MockPayrollRepository>) {
        let repo = Arc::new(MockPayrollRepository::default());
        (repo.clone(), PayrollService::new(repo))
    }

    fn record_input(email: &str, salary: i64, month: i32, year: i32) -> CreateRecordInput {
        CreateRecordInput {
            email: email.into(),
            employee_name: "Jane Doe".into(),
            salary,
            month,
            year,
            status: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn create_defaults_to_pending_approval() {
        let (_, svc) = service();
        let rec = svc.create_record(record_input("jane@x.com", 40000, 1, 2024)).await.unwrap();
        assert_eq!(rec.status, PayStatus::PendingApproval);
        assert!(rec.payment_date.is_none());
    }

    #[tokio::test]
    async fn duplicate_period_rejected() {
        let (_, svc) = service();
        svc.create_record(record_input("jane@x.com", 40000, 1, 2024)).await.unwrap();
        let err = svc.create_record(record_input("jane@x.com", 45000, 1, 2024)).await.unwrap_err();
        assert!(matches!(err, PayrollError::DuplicatePeriod(_)));
        // Same month for a different employee is fine
        svc.create_record(record_input("bob@x.com", 30000, 1, 2024)).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_check_is_case_insensitive() {
        let (_, svc) = service();
        svc.create_record(record_input("Jane@X.com", 40000, 1, 2024)).await.unwrap();
        let err = svc.create_record(record_input("jane@x.com", 40000, 1, 2024)).await.unwrap_err();
        assert!(matches!(err, PayrollError::DuplicatePeriod(_)));
    }

    #[tokio::test]
    async fn month_out_of_range_rejected() {
        let (_, svc) = service();
        let err = svc.create_record(record_input("jane@x.com", 40000, 13, 2024)).await.unwrap_err();
        assert!(matches!(err, PayrollError::Validation(_)));
    }

    #[tokio::test]
    async fn concurrent_submissions_for_one_period_yield_single_winner() {
        let (_, svc) = service();
        let svc = Arc::new(svc);
        let a = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.create_record(record_input("jane@x.com", 40000, 1, 2024)).await })
        };
        let b = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.create_record(record_input("jane@x.com", 40000, 1, 2024)).await })
        };
        let (ra, rb) = (a.await.unwrap(), b.await.unwrap());
        let wins = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1, "exactly one concurrent submission may land");
        let loser = if ra.is_ok() { rb } else { ra };
        assert!(matches!(loser.unwrap_err(), PayrollError::DuplicatePeriod(_)));
    }

    #[tokio::test]
    async fn mark_paid_transitions_and_stamps_date() {
        let (_, svc) = service();
        let rec = svc.create_record(record_input("jane@x.com", 40000, 1, 2024)).await.unwrap();
        let paid = svc.mark_paid(rec.id, date(2024, 2, 1)).await.unwrap();
        assert_eq!(paid.status, PayStatus::Paid);
        assert_eq!(paid.payment_date, Some(date(2024, 2, 1)));
    }

    #[tokio::test]
    async fn mark_paid_unknown_record_not_found() {
        let (_, svc) = service();
        let err = svc.mark_paid(Uuid::new_v4(), date(2024, 2, 1)).await.unwrap_err();
        assert!(matches!(err, PayrollError::RecordNotFound));
    }

    // Documents a known gap rather than desired behavior: a second mark_paid
    // on a Paid record succeeds and silently replaces the payment date.
    #[tokio::test]
    async fn mark_paid_repeat_overwrites_payment_date() {
        let (_, svc) = service();
        let rec = svc.create_record(record_input("jane@x.com", 40000, 1, 2024)).await.unwrap();
        svc.mark_paid(rec.id, date(2024, 2, 1)).await.unwrap();
        let again = svc.mark_paid(rec.id, date(2024, 3, 15)).await.unwrap();
        assert_eq!(again.status, PayStatus::Paid);
        assert_eq!(again.payment_date, Some(date(2024, 3, 15)));
    }

    #[tokio::test]
    async fn increase_applies_from_latest_period_and_updates_account() {
        let (repo, svc) = service();
        let account_id = repo.seed_account("x@co.com", 40000, AccountType::Employee);
        svc.create_record(record_input("x@co.com", 35000, 1, 2024)).await.unwrap();
        svc.create_record(record_input("x@co.com", 38000, 2, 2024)).await.unwrap();
        svc.create_record(record_input("x@co.com", 40000, 3, 2024)).await.unwrap();

        let increase = svc.increase_salary_across_periods("x@co.com", 5000).await.unwrap();
        assert_eq!(increase.new_salary, 45000);
        assert_eq!(increase.effective_from, Period::new(2024, 3));
        assert_eq!(increase.records_updated, 1);

        let records = repo.records_for("x@co.com");
        assert_eq!(records[0].salary, 35000, "periods before the latest stay unchanged");
        assert_eq!(records[1].salary, 38000);
        assert_eq!(records[2].salary, 45000);
        assert_eq!(repo.account(account_id).unwrap().salary, 45000);
    }

    #[tokio::test]
    async fn rejected_decrement_leaves_ledger_untouched() {
        let (repo, svc) = service();
        let account_id = repo.seed_account("x@co.com", 40000, AccountType::Employee);
        svc.create_record(record_input("x@co.com", 40000, 3, 2024)).await.unwrap();

        let err = svc.increase_salary_across_periods("x@co.com", -50000).await.unwrap_err();
        assert!(matches!(err, PayrollError::Validation(_)));

        // The rejection must happen before anything is written
        assert_eq!(repo.records_for("x@co.com")[0].salary, 40000);
        assert_eq!(repo.account(account_id).unwrap().salary, 40000);
    }

    #[tokio::test]
    async fn increase_without_history_is_record_not_found() {
        let (repo, svc) = service();
        repo.seed_account("x@co.com", 40000, AccountType::Employee);
        let err = svc.increase_salary_across_periods("x@co.com", 5000).await.unwrap_err();
        assert!(matches!(err, PayrollError::RecordNotFound));
    }

    #[tokio::test]
    async fn increase_with_history_but_no_account_is_consistency_fault() {
        let (_, svc) = service();
        svc.create_record(record_input("ghost@co.com", 40000, 3, 2024)).await.unwrap();
        let err = svc.increase_salary_across_periods("ghost@co.com", 5000).await.unwrap_err();
        assert!(matches!(err, PayrollError::Consistency(_)));
    }

    #[tokio::test]
    async fn direct_payment_snapshots_current_salary() {
        let (repo, svc) = service();
        let account_id = repo.seed_account("pay@co.com", 42000, AccountType::Employee);
        let entry = svc.record_direct_payment("pay@co.com", date(2024, 1, 31), 1, 2024).await.unwrap();
        assert_eq!(entry.salary_at_payment, 42000);
        assert_eq!(repo.payments_for(account_id).len(), 1);
    }

    #[tokio::test]
    async fn direct_payment_duplicate_period_rejected() {
        let (repo, svc) = service();
        repo.seed_account("pay@co.com", 42000, AccountType::Employee);
        svc.record_direct_payment("pay@co.com", date(2024, 1, 31), 1, 2024).await.unwrap();
        let err = svc.record_direct_payment("pay@co.com", date(2024, 1, 31), 1, 2024).await.unwrap_err();
        assert!(matches!(err, PayrollError::DuplicatePeriod(_)));
    }

    #[tokio::test]
    async fn direct_payment_unknown_account_rejected() {
        let (_, svc) = service();
        let err = svc.record_direct_payment("nobody@co.com", date(2024, 1, 31), 1, 2024).await.unwrap_err();
        assert!(matches!(err, PayrollError::AccountNotFound));
    }

    #[tokio::test]
    async fn promote_sets_type_unconditionally() {
        let (repo, svc) = service();
        let id = repo.seed_account("p@co.com", 30000, AccountType::Employee);
        svc.promote(id, AccountType::Admin).await.unwrap();
        assert_eq!(repo.account(id).unwrap().account_type, AccountType::Admin);

        // No transition legality: even Fired -> HR goes through
        svc.fire(id).await.unwrap();
        svc.promote(id, AccountType::Hr).await.unwrap();
        assert_eq!(repo.account(id).unwrap().account_type, AccountType::Hr);
    }

    #[tokio::test]
    async fn promote_unknown_account_not_found() {
        let (_, svc) = service();
        let err = svc.promote(Uuid::new_v4(), AccountType::Admin).await.unwrap_err();
        assert!(matches!(err, PayrollError::AccountNotFound));
    }

    #[tokio::test]
    async fn fire_sets_flag_and_type() {
        let (repo, svc) = service();
        let id = repo.seed_account("f@co.com", 30000, AccountType::Employee);
        svc.fire(id).await.unwrap();
        let account = repo.account(id).unwrap();
        assert!(account.is_fired);
        assert_eq!(account.account_type, AccountType::Fired);
    }

    #[tokio::test]
    async fn fire_unknown_account_not_found() {
        let (_, svc) = service();
        let err = svc.fire(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PayrollError::AccountNotFound));
    }
}
