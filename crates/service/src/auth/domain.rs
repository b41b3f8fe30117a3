use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::account::AccountType;

/// Registration input; wire names match the frontend payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    /// Absent for externally-authenticated accounts.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, rename = "bankAccountNumber")]
    pub bank_account_number: Option<String>,
    #[serde(default, rename = "accountType")]
    pub account_type: Option<AccountType>,
    #[serde(default, rename = "uploadedPhoto")]
    pub uploaded_photo: Option<String>,
    #[serde(default)]
    pub salary: Option<i64>,
}

/// Domain account (business view; no timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub account_type: AccountType,
    pub bank_account_number: String,
    pub uploaded_photo: String,
    pub salary: i64,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

/// Public profile returned by registration and lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    pub username: String,
    #[serde(rename = "accountType")]
    pub account_type: AccountType,
    #[serde(rename = "bankAccountNumber")]
    pub bank_account_number: String,
    #[serde(rename = "uploadedPhoto")]
    pub uploaded_photo: String,
    pub salary: i64,
}

impl From<&Account> for Profile {
    fn from(a: &Account) -> Self {
        Self {
            email: a.email.clone(),
            username: a.username.clone(),
            account_type: a.account_type,
            bank_account_number: a.bank_account_number.clone(),
            uploaded_photo: a.uploaded_photo.clone(),
            salary: a.salary,
        }
    }
}

impl From<models::account::Model> for Account {
    fn from(m: models::account::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            username: m.username,
            account_type: m.account_type,
            bank_account_number: m.bank_account_number,
            uploaded_photo: m.uploaded_photo,
            salary: m.salary,
            is_verified: m.is_verified,
            password_hash: m.password_hash,
        }
    }
}

/// Registration result; `created` is false when the email already existed
/// and the stored profile was returned unchanged.
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub profile: Profile,
    pub created: bool,
}
