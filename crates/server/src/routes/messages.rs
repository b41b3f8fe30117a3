//! Visitor message routes: public submit, authenticated inbox.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use models::visitor_message;
use service::messages;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub email: String,
    pub message: String,
}

#[utoipa::path(post, path = "/api/messages", tag = "messages",
    responses(
        (status = 201, description = "Message recorded"),
        (status = 400, description = "Invalid input")
    ))]
pub async fn leave_message(
    State(state): State<ServerState>,
    Json(body): Json<MessageBody>,
) -> Result<(StatusCode, Json<visitor_message::Model>), ApiError> {
    let created = messages::leave_message(&state.db, &body.email, &body.message).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/messages", tag = "messages",
    responses((status = 200, description = "All messages, newest first")))]
pub async fn list_messages(
    State(state): State<ServerState>,
) -> Result<Json<Vec<visitor_message::Model>>, ApiError> {
    Ok(Json(messages::list_messages(&state.db).await?))
}
