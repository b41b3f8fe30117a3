use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::payroll::errors::PayrollError;

/// One HTTP-facing error type; every service error maps into it exactly
/// once. Body shape is `{"message": ...}` across all statuses.
#[derive(Debug)]
pub enum ApiError {
    Unauthenticated(String),
    NotFound(String),
    Conflict(String),
    Validation(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Unauthenticated(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Validation(m)
            | ApiError::Internal(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(message = %self.message(), "internal error");
        }
        (status, Json(serde_json::json!({ "message": self.message() }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => ApiError::Validation(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Db(m) => ApiError::Internal(m),
            ServiceError::Model(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<PayrollError> for ApiError {
    fn from(e: PayrollError) -> Self {
        match e {
            PayrollError::Validation(m) => ApiError::Validation(m),
            PayrollError::DuplicatePeriod(m) => {
                ApiError::Conflict(format!("record already exists for {}", m))
            }
            PayrollError::RecordNotFound => ApiError::NotFound("payroll record not found".into()),
            PayrollError::AccountNotFound => ApiError::NotFound("account not found".into()),
            PayrollError::NoChangeApplied => ApiError::Conflict("no change applied".into()),
            PayrollError::Consistency(m) => {
                ApiError::Internal(format!("payroll history without account: {}", m))
            }
            PayrollError::Repository(m) => ApiError::Internal(m),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => ApiError::Validation(m),
            AuthError::Conflict => ApiError::Conflict(e.to_string()),
            AuthError::NotFound => ApiError::NotFound(e.to_string()),
            AuthError::Unauthenticated | AuthError::Token(_) => {
                ApiError::Unauthenticated(e.to_string())
            }
            AuthError::HashError(m) | AuthError::Repository(m) => ApiError::Internal(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_model() {
        assert_eq!(
            ApiError::from(PayrollError::DuplicatePeriod("x 3/2024".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(PayrollError::RecordNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(PayrollError::Consistency("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(ServiceError::Validation("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::Unauthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
