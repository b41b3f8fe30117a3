//! Payroll ledger routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use service::payroll::domain::{CreateRecordInput, PayrollRecord, SalaryIncrease};
use service::payroll::repo::seaorm::SeaOrmPayrollRepository;
use service::payroll::PayrollService;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

fn payroll(state: &ServerState) -> PayrollService<SeaOrmPayrollRepository> {
    PayrollService::new(Arc::new(SeaOrmPayrollRepository { db: state.db.clone() }))
}

#[utoipa::path(get, path = "/payroll", tag = "payroll",
    responses((status = 200, description = "All payroll records, latest period first")))]
pub async fn list_records(
    State(state): State<ServerState>,
) -> Result<Json<Vec<PayrollRecord>>, ApiError> {
    Ok(Json(payroll(&state).list_records().await?))
}

/// Submit a payroll record for one (employee, month, year). A second
/// submission for the same period is rejected with 409.
#[utoipa::path(post, path = "/payroll", tag = "payroll",
    responses(
        (status = 201, description = "Record created"),
        (status = 409, description = "Period already recorded"),
        (status = 400, description = "Invalid input")
    ))]
pub async fn create_record(
    State(state): State<ServerState>,
    Json(input): Json<CreateRecordInput>,
) -> Result<(StatusCode, Json<PayrollRecord>), ApiError> {
    let record = payroll(&state).create_record(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_record(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayrollRecord>, ApiError> {
    Ok(Json(payroll(&state).get_record(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct MarkPaidBody {
    #[serde(default, rename = "paymentDate")]
    pub payment_date: Option<NaiveDate>,
}

pub async fn mark_paid(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MarkPaidBody>,
) -> Result<Json<PayrollRecord>, ApiError> {
    let paid_on = body.payment_date.unwrap_or_else(|| Utc::now().date_naive());
    let record = payroll(&state).mark_paid(id, paid_on).await?;
    Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct IncreaseBody {
    pub increment: i64,
}

/// Ledger-wide raise: every record from the latest period on gets the new
/// salary, and the live account salary follows.
pub async fn increase_salary(
    State(state): State<ServerState>,
    Path(email): Path<String>,
    Json(body): Json<IncreaseBody>,
) -> Result<Json<SalaryIncrease>, ApiError> {
    let increase = payroll(&state)
        .increase_salary_across_periods(&email, body.increment)
        .await?;
    Ok(Json(increase))
}
