//! Session endpoints: token issuance, logout, and cookie liveness.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};
use tracing::info;

use service::auth::{CookiePolicy, SameSitePolicy, TokenService};

use crate::errors::ApiError;
use crate::routes::policy::SessionClaims;

pub const SESSION_COOKIE: &str = "token";

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub tokens: Arc<TokenService>,
    pub cookies: CookiePolicy,
}

/// Build the session cookie according to the deployment policy.
/// Always `HttpOnly` on path `/`.
pub fn session_cookie(policy: CookiePolicy, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(policy.secure);
    cookie.set_same_site(match policy.same_site {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::None => SameSite::None,
    });
    cookie
}

/// Sign the supplied claims object verbatim and set the session cookie.
/// The caller is a trusted frontend that has already authenticated the
/// user; this endpoint only vouches for the claims' integrity over time.
#[utoipa::path(post, path = "/jwt", tag = "auth",
    responses((status = 200, description = "Token issued and cookie set")))]
pub async fn issue_token(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(claims): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let token = state
        .tokens
        .issue(&claims)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("session token issued");
    let jar = jar.add(session_cookie(state.cookies, token.clone()));
    Ok((jar, Json(serde_json::json!({ "token": token }))))
}

/// Clear the session cookie, whether or not the request carried one.
/// The token itself stays valid until expiry; there is no server-side
/// revocation.
#[utoipa::path(post, path = "/logout", tag = "auth",
    responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");
    removal.make_removal();
    (jar.add(removal), StatusCode::NO_CONTENT)
}

/// Report whether the current cookie holds a live token: 200 when it
/// does, 401 when it is missing, invalid, or expired.
#[utoipa::path(get, path = "/validate-token", tag = "auth",
    responses(
        (status = 200, description = "Token is live"),
        (status = 401, description = "Missing, invalid, or expired token")
    ))]
pub async fn validate_token(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> (StatusCode, Json<Value>) {
    let is_valid = jar
        .get(SESSION_COOKIE)
        .map(|c| state.tokens.verify(c.value()).is_ok())
        .unwrap_or(false);
    let status = if is_valid { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    (status, Json(serde_json::json!({ "isValid": is_valid })))
}

/// Decoded claims of the current session, as verified by the policy
/// middleware.
#[utoipa::path(get, path = "/profile", tag = "auth",
    responses(
        (status = 200, description = "Session claims"),
        (status = 401, description = "No live session")
    ))]
pub async fn profile(Extension(claims): Extension<SessionClaims>) -> Json<Value> {
    Json(Value::Object(claims.0))
}
