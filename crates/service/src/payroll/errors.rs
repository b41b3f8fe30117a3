use thiserror::Error;

/// Business errors for the payroll ledger
#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("validation failed: {0}")]
    Validation(String),
    /// A record or payment entry already exists for (employee, month, year).
    #[error("payroll period already recorded: {0}")]
    DuplicatePeriod(String),
    #[error("payroll record not found")]
    RecordNotFound,
    #[error("account not found")]
    AccountNotFound,
    /// The update resolved the target but matched zero rows.
    #[error("no change applied")]
    NoChangeApplied,
    /// Payroll history exists but the owning account is missing.
    #[error("account missing for payroll history: {0}")]
    Consistency(String),
    #[error("repository error: {0}")]
    Repository(String),
}
