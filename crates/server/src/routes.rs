use axum::routing::{get, patch, post};
use axum::{middleware, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod auth;
pub mod messages;
pub mod payroll;
pub mod policy;
pub mod users;
pub mod work;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "system",
    responses((status = 200, description = "Liveness")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router. Every route passes through the
/// policy middleware; the gate table in [`policy`] decides who gets in.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        .route("/validate-token", get(auth::validate_token))
        .route("/profile", get(auth::profile))
        .route("/users", post(users::register).get(users::list_users))
        .route(
            "/users/:email",
            get(users::get_user)
                .patch(users::set_verified)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/admin/:id", patch(users::promote_to_admin))
        .route("/users/employee/:id", patch(users::promote_to_hr))
        .route("/users/fire/:id", patch(users::fire_user))
        .route("/users/increase-salary/:email", patch(users::increase_salary))
        .route("/users/pay/:email", patch(users::pay_user))
        .route("/work", get(work::list_entries).post(work::create_entry))
        .route(
            "/work/:id",
            get(work::list_entries_for_account)
                .put(work::update_entry)
                .delete(work::delete_entry),
        )
        .route("/payroll", get(payroll::list_records).post(payroll::create_record))
        .route("/payroll/:id", get(payroll::get_record).patch(payroll::mark_paid))
        .route("/payroll/increase-salary/:email", patch(payroll::increase_salary))
        .route(
            "/api/messages",
            get(messages::list_messages).post(messages::leave_message),
        )
        .layer(middleware::from_fn_with_state(state.clone(), policy::enforce))
        .with_state(state);

    let docs = SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi());

    Router::new()
        .merge(api)
        .merge(docs)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
