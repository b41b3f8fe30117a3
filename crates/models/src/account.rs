use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{payment, work_entry};

/// Account role. Transitions are not restricted at the storage level;
/// policy lives in the payroll service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AccountType {
    #[sea_orm(string_value = "Employee")]
    Employee,
    #[sea_orm(string_value = "HR")]
    #[serde(rename = "HR")]
    Hr,
    #[sea_orm(string_value = "Admin")]
    Admin,
    #[sea_orm(string_value = "Fired")]
    Fired,
}

impl AccountType {
    /// Registration default when no salary is supplied.
    pub fn default_salary(self) -> i64 {
        match self {
            AccountType::Hr => 50000,
            _ => 30000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Stored lowercase; the natural key (case-insensitive).
    pub email: String,
    /// Null for externally-authenticated accounts.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub username: String,
    pub account_type: AccountType,
    pub bank_account_number: String,
    pub uploaded_photo: String,
    pub salary: i64,
    pub is_verified: bool,
    pub is_fired: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Payment,
    WorkEntry,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Payment => Entity::has_many(payment::Entity).into(),
            Relation::WorkEntry => Entity::has_many(work_entry::Entity).into(),
        }
    }
}

impl Related<payment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Payment.def() }
}

impl Related<work_entry::Entity> for Entity {
    fn to() -> RelationDef { Relation::WorkEntry.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Input for account creation; salary defaults by account type when absent.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: Option<String>,
    pub username: String,
    pub account_type: AccountType,
    pub bank_account_number: String,
    pub uploaded_photo: String,
    pub salary: Option<i64>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, new: NewAccount) -> Result<Model, ModelError> {
    validate_email(&new.email)?;
    let salary = new.salary.unwrap_or_else(|| new.account_type.default_salary());
    if salary < 0 {
        return Err(ModelError::Validation("salary must be non-negative".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(normalize_email(&new.email)),
        password_hash: Set(new.password_hash),
        username: Set(new.username),
        account_type: Set(new.account_type),
        bank_account_number: Set(new.bank_account_number),
        uploaded_photo: Set(new.uploaded_photo),
        salary: Set(salary),
        is_verified: Set(false),
        is_fired: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Case-insensitive lookup via the normalized email column.
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
