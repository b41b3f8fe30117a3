use thiserror::Error;

use super::token::TokenError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("account already exists")]
    Conflict,
    #[error("account not found")]
    NotFound,
    #[error("invalid or expired token")]
    Unauthenticated,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthenticated => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}
