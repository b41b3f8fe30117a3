use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, SqlErr};
use uuid::Uuid;

use crate::auth::domain::Account;
use crate::auth::errors::AuthError;
use crate::auth::repository::{AccountRepository, NewAccount};

/// True when the error is a storage-level unique-index rejection.
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let res = models::account::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(Account::from))
    }

    async fn insert(&self, new: NewAccount) -> Result<Account, AuthError> {
        models::account::validate_email(&new.email)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let now = Utc::now().into();
        let am = models::account::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(models::account::normalize_email(&new.email)),
            password_hash: Set(new.password_hash),
            username: Set(new.username),
            account_type: Set(new.account_type),
            bank_account_number: Set(new.bank_account_number),
            uploaded_photo: Set(new.uploaded_photo),
            salary: Set(new.salary),
            is_verified: Set(false),
            is_fired: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        match am.insert(&self.db).await {
            Ok(m) => Ok(Account::from(m)),
            // The unique email index reports concurrent duplicate inserts
            Err(e) if is_unique_violation(&e) => Err(AuthError::Conflict),
            Err(e) => Err(AuthError::Repository(e.to_string())),
        }
    }
}
