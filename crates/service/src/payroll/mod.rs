//! Payroll ledger: record lifecycle, duplicate-period enforcement, salary
//! progression, and the account-centric payment history.
//!
//! Uniqueness of (email, month, year) is owned by the repository's storage
//! constraint rather than a check-then-act sequence, so concurrent
//! submissions for one period cannot both land.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::PayrollService;
