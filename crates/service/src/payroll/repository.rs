use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::domain::{AccountType, PayStatus, PaymentEntry, PayrollRecord, Period, SalaryIncrease};
use super::errors::PayrollError;

/// Persisted fields for a new payroll record.
#[derive(Debug, Clone)]
pub struct NewPayrollRecord {
    pub email: String,
    pub employee_name: String,
    pub salary: i64,
    pub month: i32,
    pub year: i32,
    pub status: PayStatus,
}

/// Account view the ledger needs: identity plus live salary.
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub salary: i64,
}

/// Repository abstraction for payroll persistence.
///
/// Operations with uniqueness or multi-row semantics are atomic at this
/// boundary: `insert_record` and `append_payment` enforce the period
/// uniqueness with a storage constraint, and
/// `increase_salary_across_periods` runs as one isolated update.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    async fn insert_record(&self, rec: NewPayrollRecord) -> Result<PayrollRecord, PayrollError>;
    async fn find_record(&self, id: Uuid) -> Result<Option<PayrollRecord>, PayrollError>;
    async fn list_records(&self) -> Result<Vec<PayrollRecord>, PayrollError>;

    /// Unconditionally stamp status Paid and the payment date.
    /// Returns the updated record plus the status it had before.
    async fn mark_paid(&self, id: Uuid, paid_on: NaiveDate)
        -> Result<Option<(PayrollRecord, PayStatus)>, PayrollError>;

    /// Find latest period, bump every record at or after it, and set the
    /// account's live salary, all under one serialization point. A
    /// resulting negative salary is rejected before anything is written.
    async fn increase_salary_across_periods(&self, email: &str, increment: i64)
        -> Result<SalaryIncrease, PayrollError>;

    async fn find_account(&self, email: &str) -> Result<Option<AccountSummary>, PayrollError>;
    async fn append_payment(
        &self,
        account_id: Uuid,
        period: Period,
        paid_on: NaiveDate,
        salary_at_payment: i64,
    ) -> Result<PaymentEntry, PayrollError>;

    /// Returns rows affected; zero means the account id did not resolve.
    async fn set_account_type(&self, id: Uuid, account_type: AccountType) -> Result<u64, PayrollError>;
    async fn mark_fired(&self, id: Uuid) -> Result<u64, PayrollError>;
    async fn account_exists(&self, id: Uuid) -> Result<bool, PayrollError>;
}

/// In-memory mock repository for tests and doc examples. A single state
/// mutex stands in for the storage engine's atomicity.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub struct MockAccount {
        pub id: Uuid,
        pub email: String,
        pub salary: i64,
        pub account_type: AccountType,
        pub is_fired: bool,
    }

    #[derive(Default)]
    struct State {
        records: HashMap<Uuid, PayrollRecord>,
        accounts: HashMap<Uuid, MockAccount>,
        payments: Vec<PaymentEntry>,
    }

    #[derive(Default)]
    pub struct MockPayrollRepository {
        state: Mutex<State>,
    }

    impl MockPayrollRepository {
        /// Seed an account and return its id.
        pub fn seed_account(&self, email: &str, salary: i64, account_type: AccountType) -> Uuid {
            let id = Uuid::new_v4();
            let account = MockAccount {
                id,
                email: models::account::normalize_email(email),
                salary,
                account_type,
                is_fired: false,
            };
            self.state.lock().unwrap().accounts.insert(id, account);
            id
        }

        pub fn account(&self, id: Uuid) -> Option<MockAccount> {
            self.state.lock().unwrap().accounts.get(&id).cloned()
        }

        pub fn records_for(&self, email: &str) -> Vec<PayrollRecord> {
            let email = models::account::normalize_email(email);
            let state = self.state.lock().unwrap();
            let mut out: Vec<_> = state.records.values().filter(|r| r.email == email).cloned().collect();
            out.sort_by_key(|r| (r.year, r.month));
            out
        }

        pub fn payments_for(&self, account_id: Uuid) -> Vec<PaymentEntry> {
            let state = self.state.lock().unwrap();
            state.payments.iter().filter(|p| p.account_id == account_id).cloned().collect()
        }
    }

    #[async_trait]
    impl PayrollRepository for MockPayrollRepository {
        async fn insert_record(&self, rec: NewPayrollRecord) -> Result<PayrollRecord, PayrollError> {
            let mut state = self.state.lock().unwrap();
            let duplicate = state
                .records
                .values()
                .any(|r| r.email == rec.email && r.month == rec.month && r.year == rec.year);
            if duplicate {
                return Err(PayrollError::DuplicatePeriod(format!(
                    "{} {}/{}", rec.email, rec.month, rec.year
                )));
            }
            let record = PayrollRecord {
                id: Uuid::new_v4(),
                email: rec.email,
                employee_name: rec.employee_name,
                salary: rec.salary,
                month: rec.month,
                year: rec.year,
                status: rec.status,
                payment_date: None,
            };
            state.records.insert(record.id, record.clone());
            Ok(record)
        }

        async fn find_record(&self, id: Uuid) -> Result<Option<PayrollRecord>, PayrollError> {
            Ok(self.state.lock().unwrap().records.get(&id).cloned())
        }

        async fn list_records(&self) -> Result<Vec<PayrollRecord>, PayrollError> {
            let state = self.state.lock().unwrap();
            let mut out: Vec<_> = state.records.values().cloned().collect();
            out.sort_by_key(|r| (r.year, r.month));
            Ok(out)
        }

        async fn mark_paid(&self, id: Uuid, paid_on: NaiveDate)
            -> Result<Option<(PayrollRecord, PayStatus)>, PayrollError>
        {
            let mut state = self.state.lock().unwrap();
            match state.records.get_mut(&id) {
                Some(record) => {
                    let previous = record.status;
                    record.status = PayStatus::Paid;
                    record.payment_date = Some(paid_on);
                    Ok(Some((record.clone(), previous)))
                }
                None => Ok(None),
            }
        }

        async fn increase_salary_across_periods(&self, email: &str, increment: i64)
            -> Result<SalaryIncrease, PayrollError>
        {
            let email = models::account::normalize_email(email);
            let mut state = self.state.lock().unwrap();

            let latest = state
                .records
                .values()
                .filter(|r| r.email == email)
                .max_by_key(|r| (r.year, r.month))
                .cloned()
                .ok_or(PayrollError::RecordNotFound)?;
            let new_salary = latest.salary + increment;
            if new_salary < 0 {
                return Err(PayrollError::Validation(format!(
                    "resulting salary is negative: {}", new_salary
                )));
            }
            let from = latest.period();

            // Nothing is written until every precondition holds
            if !state.accounts.values().any(|a| a.email == email) {
                return Err(PayrollError::Consistency(email.clone()));
            }

            let mut updated = 0u64;
            for record in state.records.values_mut() {
                if record.email == email && record.period() >= from {
                    record.salary = new_salary;
                    updated += 1;
                }
            }

            let account = state
                .accounts
                .values_mut()
                .find(|a| a.email == email)
                .ok_or_else(|| PayrollError::Consistency(email.clone()))?;
            account.salary = new_salary;

            Ok(SalaryIncrease { email, new_salary, records_updated: updated, effective_from: from })
        }

        async fn find_account(&self, email: &str) -> Result<Option<AccountSummary>, PayrollError> {
            let email = models::account::normalize_email(email);
            let state = self.state.lock().unwrap();
            Ok(state
                .accounts
                .values()
                .find(|a| a.email == email)
                .map(|a| AccountSummary { id: a.id, email: a.email.clone(), salary: a.salary }))
        }

        async fn append_payment(
            &self,
            account_id: Uuid,
            period: Period,
            paid_on: NaiveDate,
            salary_at_payment: i64,
        ) -> Result<PaymentEntry, PayrollError> {
            let mut state = self.state.lock().unwrap();
            let duplicate = state.payments.iter().any(|p| {
                p.account_id == account_id && p.month == period.month && p.year == period.year
            });
            if duplicate {
                return Err(PayrollError::DuplicatePeriod(format!(
                    "{} {}/{}", account_id, period.month, period.year
                )));
            }
            let entry = PaymentEntry {
                id: Uuid::new_v4(),
                account_id,
                month: period.month,
                year: period.year,
                paid_on,
                salary_at_payment,
            };
            state.payments.push(entry.clone());
            Ok(entry)
        }

        async fn set_account_type(&self, id: Uuid, account_type: AccountType) -> Result<u64, PayrollError> {
            let mut state = self.state.lock().unwrap();
            match state.accounts.get_mut(&id) {
                Some(account) => {
                    account.account_type = account_type;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn mark_fired(&self, id: Uuid) -> Result<u64, PayrollError> {
            let mut state = self.state.lock().unwrap();
            match state.accounts.get_mut(&id) {
                Some(account) => {
                    account.is_fired = true;
                    account.account_type = AccountType::Fired;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn account_exists(&self, id: Uuid) -> Result<bool, PayrollError> {
            Ok(self.state.lock().unwrap().accounts.contains_key(&id))
        }
    }
}
