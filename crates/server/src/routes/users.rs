//! Account directory routes: registration, lookup, profile updates,
//! promotion, firing, and the account-centric payment path.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use models::account;
use service::auth::domain::{Profile, RegisterInput};
use service::auth::repo::seaorm::SeaOrmAccountRepository;
use service::auth::AuthService;
use service::directory;
use service::payroll::domain::AccountType;
use service::payroll::repo::seaorm::SeaOrmPayrollRepository;
use service::payroll::PayrollService;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

fn payroll(state: &ServerState) -> PayrollService<SeaOrmPayrollRepository> {
    PayrollService::new(Arc::new(SeaOrmPayrollRepository { db: state.db.clone() }))
}

/// Register an account. Idempotent: an existing email returns the stored
/// profile with 200 instead of an error.
#[utoipa::path(post, path = "/users", tag = "users",
    responses(
        (status = 201, description = "Account created"),
        (status = 200, description = "Account already existed"),
        (status = 400, description = "Invalid input")
    ))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let svc = AuthService::new(Arc::new(SeaOrmAccountRepository { db: state.db.clone() }));
    let outcome = svc.register(input).await?;
    let status = if outcome.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(outcome.profile)))
}

#[utoipa::path(get, path = "/users", tag = "users",
    responses((status = 200, description = "All accounts, newest first")))]
pub async fn list_users(
    State(state): State<ServerState>,
) -> Result<Json<Vec<account::Model>>, ApiError> {
    Ok(Json(directory::list_accounts(&state.db).await?))
}

pub async fn get_user(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Json<account::Model>, ApiError> {
    let found = directory::get_account(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("account not found".into()))?;
    Ok(Json(found))
}

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    #[serde(rename = "isVerified")]
    pub is_verified: bool,
}

pub async fn set_verified(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<account::Model>, ApiError> {
    let updated = directory::set_verified(&state.db, &email, body.is_verified).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    #[serde(rename = "bankAccountNumber")]
    pub bank_account_number: String,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn update_user(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Json(body): Json<UpdateUserBody>,
) -> Result<Json<account::Model>, ApiError> {
    let updated = directory::update_bank_and_password(
        &state.db,
        &email,
        body.bank_account_number,
        body.password,
    )
    .await?;
    Ok(Json(updated))
}

pub async fn promote_to_admin(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    payroll(&state).promote(id, AccountType::Admin).await?;
    Ok(Json(json!({ "message": "account promoted to Admin" })))
}

pub async fn promote_to_hr(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    payroll(&state).promote(id, AccountType::Hr).await?;
    Ok(Json(json!({ "message": "account promoted to HR" })))
}

pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    directory::delete_account(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn fire_user(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    payroll(&state).fire(id).await?;
    Ok(Json(json!({ "message": "account fired" })))
}

#[derive(Debug, Deserialize)]
pub struct IncreaseSalaryBody {
    pub amount: i64,
}

/// Flat increment on the live account salary (HR action); the payroll
/// ledger is untouched.
pub async fn increase_salary(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Json(body): Json<IncreaseSalaryBody>,
) -> Result<Json<account::Model>, ApiError> {
    let updated = directory::increase_salary_flat(&state.db, &email, body.amount).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct PayBody {
    pub month: i32,
    pub year: i32,
    #[serde(default, rename = "paidOn")]
    pub paid_on: Option<NaiveDate>,
}

/// Append a payment snapshotting the account's current salary.
pub async fn pay_user(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Json(body): Json<PayBody>,
) -> Result<Json<service::payroll::domain::PaymentEntry>, ApiError> {
    let paid_on = body.paid_on.unwrap_or_else(|| Utc::now().date_naive());
    let entry = payroll(&state)
        .record_direct_payment(&email, paid_on, body.month, body.year)
        .await?;
    Ok(Json(entry))
}
