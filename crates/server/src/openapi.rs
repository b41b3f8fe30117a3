use utoipa::OpenApi;

/// OpenAPI document served at `/api-docs/openapi.json` and browsable
/// under `/docs`. Coverage is the collection-level surface; per-id
/// routes follow the same shapes.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::issue_token,
        crate::routes::auth::logout,
        crate::routes::auth::validate_token,
        crate::routes::auth::profile,
        crate::routes::users::register,
        crate::routes::users::list_users,
        crate::routes::payroll::list_records,
        crate::routes::payroll::create_record,
        crate::routes::work::list_entries,
        crate::routes::work::create_entry,
        crate::routes::messages::leave_message,
        crate::routes::messages::list_messages,
    ),
    tags(
        (name = "system", description = "Liveness"),
        (name = "auth", description = "Session tokens and cookies"),
        (name = "users", description = "Account directory"),
        (name = "payroll", description = "Payroll ledger"),
        (name = "work", description = "Work entries"),
        (name = "messages", description = "Visitor messages")
    )
)]
pub struct ApiDoc;
