use async_trait::async_trait;

use models::account::AccountType;

use super::domain::Account;
use super::errors::AuthError;

/// Fields persisted when an account is registered.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: Option<String>,
    pub username: String,
    pub account_type: AccountType,
    pub bank_account_number: String,
    pub uploaded_photo: String,
    pub salary: i64,
}

/// Repository abstraction for account persistence.
///
/// `insert` must rely on a storage-level uniqueness guarantee for the
/// normalized email and surface a duplicate as `AuthError::Conflict`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;
    async fn insert(&self, new: NewAccount) -> Result<Account, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAccountRepository {
        accounts: Mutex<HashMap<String, Account>>, // key: normalized email
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(&models::account::normalize_email(email)).cloned())
        }

        async fn insert(&self, new: NewAccount) -> Result<Account, AuthError> {
            let mut accounts = self.accounts.lock().unwrap();
            let key = models::account::normalize_email(&new.email);
            if accounts.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let account = Account {
                id: Uuid::new_v4(),
                email: key.clone(),
                username: new.username,
                account_type: new.account_type,
                bank_account_number: new.bank_account_number,
                uploaded_photo: new.uploaded_photo,
                salary: new.salary,
                is_verified: false,
                password_hash: new.password_hash,
            };
            accounts.insert(key, account.clone());
            Ok(account)
        }
    }
}
