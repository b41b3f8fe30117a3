use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use models::account::AccountType;

use super::domain::{Profile, RegisterInput, RegisterOutcome};
use super::errors::AuthError;
use super::repository::{AccountRepository, NewAccount};

/// Registration workflow over an injected account repository.
pub struct AuthService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register an account, hashing the password when one is supplied.
    ///
    /// Registration is idempotent: an already-registered email returns the
    /// stored profile unchanged instead of an error.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, repository::mock::MockAccountRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAccountRepository::default());
    /// let svc = AuthService::new(repo);
    /// let input = RegisterInput {
    ///     email: "user@example.com".into(),
    ///     password: Some("Secret123".into()),
    ///     username: Some("Test".into()),
    ///     bank_account_number: None,
    ///     account_type: None,
    ///     uploaded_photo: None,
    ///     salary: None,
    /// };
    /// let out = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert!(out.created);
    /// assert_eq!(out.profile.email, "user@example.com");
    /// assert_eq!(out.profile.salary, 30000);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<RegisterOutcome, AuthError> {
        if !input.email.contains('@') {
            return Err(AuthError::Validation("invalid email".into()));
        }
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            debug!("account exists: {}", existing.email);
            return Ok(RegisterOutcome { profile: Profile::from(&existing), created: false });
        }

        let password_hash = match &input.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let account_type = input.account_type.unwrap_or(AccountType::Employee);
        let salary = input.salary.unwrap_or_else(|| account_type.default_salary());
        if salary < 0 {
            return Err(AuthError::Validation("salary must be non-negative".into()));
        }
        let new = NewAccount {
            email: input.email.clone(),
            password_hash,
            username: input.username.unwrap_or_else(|| "New Employee".to_string()),
            account_type,
            bank_account_number: input.bank_account_number.unwrap_or_default(),
            uploaded_photo: input.uploaded_photo.unwrap_or_default(),
            salary,
        };

        match self.repo.insert(new).await {
            Ok(account) => {
                info!(account_id = %account.id, email = %account.email, "account_registered");
                Ok(RegisterOutcome { profile: Profile::from(&account), created: true })
            }
            // Lost a concurrent registration race; behave idempotently
            Err(AuthError::Conflict) => {
                let existing = self.repo.find_by_email(&input.email).await?.ok_or(AuthError::NotFound)?;
                Ok(RegisterOutcome { profile: Profile::from(&existing), created: false })
            }
            Err(e) => Err(e),
        }
    }
}

/// Argon2 hash of a raw password.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}
