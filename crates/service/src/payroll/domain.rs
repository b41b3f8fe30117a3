use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::account::AccountType;
pub use models::payroll_record::PayStatus;

/// A payroll period. Field order gives chronological `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: i32,
}

impl Period {
    pub fn new(year: i32, month: i32) -> Self { Self { year, month } }
}

/// One (employee, month, year) compensation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "employeeName")]
    pub employee_name: String,
    pub salary: i64,
    pub month: i32,
    pub year: i32,
    pub status: PayStatus,
    #[serde(rename = "paymentDate")]
    pub payment_date: Option<NaiveDate>,
}

impl PayrollRecord {
    pub fn period(&self) -> Period { Period::new(self.year, self.month) }
}

impl From<models::payroll_record::Model> for PayrollRecord {
    fn from(m: models::payroll_record::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            employee_name: m.employee_name,
            salary: m.salary,
            month: m.month,
            year: m.year,
            status: m.status,
            payment_date: m.payment_date,
        }
    }
}

/// Submission input for a new payroll record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordInput {
    pub email: String,
    #[serde(rename = "employeeName")]
    pub employee_name: String,
    pub salary: i64,
    pub month: i32,
    pub year: i32,
    #[serde(default)]
    pub status: Option<PayStatus>,
}

/// Account payment-history entry (salary snapshotted at append time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub id: Uuid,
    pub account_id: Uuid,
    pub month: i32,
    pub year: i32,
    #[serde(rename = "paidOn")]
    pub paid_on: NaiveDate,
    #[serde(rename = "salaryAtPayment")]
    pub salary_at_payment: i64,
}

impl From<models::payment::Model> for PaymentEntry {
    fn from(m: models::payment::Model) -> Self {
        Self {
            id: m.id,
            account_id: m.account_id,
            month: m.month,
            year: m.year,
            paid_on: m.paid_on,
            salary_at_payment: m.salary_at_payment,
        }
    }
}

/// Result of a ledger-wide salary increase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryIncrease {
    pub email: String,
    #[serde(rename = "newSalary")]
    pub new_salary: i64,
    #[serde(rename = "recordsUpdated")]
    pub records_updated: u64,
    #[serde(rename = "effectiveFrom")]
    pub effective_from: Period,
}
