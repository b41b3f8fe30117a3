//! Account directory operations: listing, lookup, verification, profile
//! updates, and the HR flat salary increment.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;

use models::account;

use crate::auth::service::hash_password;
use crate::errors::ServiceError;

/// List every account, newest first.
pub async fn list_accounts(db: &DatabaseConnection) -> Result<Vec<account::Model>, ServiceError> {
    let accounts = account::Entity::find()
        .order_by_desc(account::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(accounts)
}

/// Fetch one account by email; the lookup is case-insensitive.
pub async fn get_account(db: &DatabaseConnection, email: &str) -> Result<Option<account::Model>, ServiceError> {
    Ok(account::find_by_email(db, email).await?)
}

/// Set the verification flag.
pub async fn set_verified(db: &DatabaseConnection, email: &str, verified: bool) -> Result<account::Model, ServiceError> {
    let found = account::find_by_email(db, email)
        .await?
        .ok_or_else(|| ServiceError::not_found("account"))?;
    let mut am: account::ActiveModel = found.into();
    am.is_verified = Set(verified);
    am.updated_at = Set(chrono::Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(email = %updated.email, verified, "account_verification_updated");
    Ok(updated)
}

/// Update the bank account reference and, when supplied, re-hash and store
/// a new password.
pub async fn update_bank_and_password(
    db: &DatabaseConnection,
    email: &str,
    bank_account_number: String,
    password: Option<String>,
) -> Result<account::Model, ServiceError> {
    let found = account::find_by_email(db, email)
        .await?
        .ok_or_else(|| ServiceError::not_found("account"))?;
    let mut am: account::ActiveModel = found.into();
    am.bank_account_number = Set(bank_account_number);
    if let Some(password) = password {
        let hash = hash_password(&password).map_err(|e| ServiceError::Validation(e.to_string()))?;
        am.password_hash = Set(Some(hash));
    }
    am.updated_at = Set(chrono::Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Flat salary increment on the live account (distinct from the
/// ledger-wide increase in the payroll service).
pub async fn increase_salary_flat(db: &DatabaseConnection, email: &str, amount: i64) -> Result<account::Model, ServiceError> {
    let found = account::find_by_email(db, email)
        .await?
        .ok_or_else(|| ServiceError::not_found("account"))?;
    let new_salary = found.salary + amount;
    if new_salary < 0 {
        return Err(ServiceError::Validation("resulting salary is negative".into()));
    }
    let mut am: account::ActiveModel = found.into();
    am.salary = Set(new_salary);
    am.updated_at = Set(chrono::Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(email = %updated.email, new_salary, "account_salary_incremented");
    Ok(updated)
}

/// Hard-delete an account.
pub async fn delete_account(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let rows = account::hard_delete(db, id).await?;
    if rows == 0 {
        return Err(ServiceError::not_found("account"));
    }
    info!(%id, "account_deleted");
    Ok(())
}
