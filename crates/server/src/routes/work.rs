//! Work entry routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use models::work_entry;
use service::work::{self, NewWorkEntry, WorkEntryPatch};

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/work", tag = "work",
    responses((status = 200, description = "All work entries, latest first")))]
pub async fn list_entries(
    State(state): State<ServerState>,
) -> Result<Json<Vec<work_entry::Model>>, ApiError> {
    Ok(Json(work::list_entries(&state.db).await?))
}

pub async fn list_entries_for_account(
    State(state): State<ServerState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Vec<work_entry::Model>>, ApiError> {
    Ok(Json(work::list_entries_for_account(&state.db, account_id).await?))
}

#[utoipa::path(post, path = "/work", tag = "work",
    responses(
        (status = 201, description = "Entry recorded"),
        (status = 404, description = "Owner account unknown"),
        (status = 400, description = "Invalid input")
    ))]
pub async fn create_entry(
    State(state): State<ServerState>,
    Json(input): Json<NewWorkEntry>,
) -> Result<(StatusCode, Json<work_entry::Model>), ApiError> {
    let entry = work::create_entry(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<WorkEntryPatch>,
) -> Result<Json<work_entry::Model>, ApiError> {
    Ok(Json(work::update_entry(&state.db, id, patch).await?))
}

pub async fn delete_entry(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    work::delete_entry(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
