//! Session policy: one global middleware consulting a declarative
//! method + path table. Paths not listed require authentication, so new
//! routes are protected until somebody deliberately opens them.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Map, Value};
use tracing::warn;

use models::account::AccountType;
use service::auth::token::TokenError;

use crate::errors::ApiError;
use crate::routes::auth::{ServerState, SESSION_COOKIE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    Public,
    Authenticated,
    Role(AccountType),
}

/// Routes that deviate from the authenticated default. First match wins;
/// a trailing `*` segment matches any remainder.
const POLICY: &[(&Method, &str, Gate)] = &[
    (&Method::POST, "/jwt", Gate::Public),
    (&Method::POST, "/logout", Gate::Public),
    (&Method::GET, "/validate-token", Gate::Public),
    (&Method::GET, "/health", Gate::Public),
    (&Method::POST, "/users", Gate::Public),
    (&Method::POST, "/api/messages", Gate::Public),
    (&Method::GET, "/docs", Gate::Public),
    (&Method::GET, "/docs/*", Gate::Public),
    (&Method::GET, "/api-docs/*", Gate::Public),
    (&Method::DELETE, "/users/:id", Gate::Role(AccountType::Admin)),
    (&Method::PATCH, "/users/fire/:id", Gate::Role(AccountType::Admin)),
    (&Method::PATCH, "/users/increase-salary/:email", Gate::Role(AccountType::Hr)),
];

fn segment_match(pattern: &str, path: &str) -> bool {
    let mut pat = pattern.split('/').filter(|s| !s.is_empty());
    let mut segs = path.split('/').filter(|s| !s.is_empty());
    loop {
        match (pat.next(), segs.next()) {
            (Some("*"), _) => return true,
            (Some(p), Some(s)) => {
                if !p.starts_with(':') && p != s {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

pub fn gate_for(method: &Method, path: &str) -> Gate {
    POLICY
        .iter()
        .find(|(m, pattern, _)| *m == method && segment_match(pattern, path))
        .map(|(_, _, gate)| *gate)
        .unwrap_or(Gate::Authenticated)
}

/// Verified claims of the current session, available to handlers via
/// request extensions.
#[derive(Debug, Clone)]
pub struct SessionClaims(pub Map<String, Value>);

impl SessionClaims {
    pub fn account_type(&self) -> Option<&str> {
        self.0.get("accountType").and_then(Value::as_str)
    }
}

fn role_name(role: AccountType) -> &'static str {
    match role {
        AccountType::Employee => "Employee",
        AccountType::Hr => "HR",
        AccountType::Admin => "Admin",
        AccountType::Fired => "Fired",
    }
}

fn role_satisfied(claims: &SessionClaims, required: AccountType) -> bool {
    match claims.account_type() {
        // Admin passes every role gate
        Some(t) => t == role_name(required) || t == role_name(AccountType::Admin),
        None => false,
    }
}

pub async fn enforce(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // CORS preflight never carries credentials
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let gate = gate_for(req.method(), req.uri().path());
    if gate == Gate::Public {
        return Ok(next.run(req).await);
    }

    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Err(ApiError::Unauthenticated("missing session cookie".into()));
    };
    let claims = match state.tokens.verify(cookie.value()) {
        Ok(claims) => SessionClaims(claims),
        Err(e) => {
            let reason = match e {
                TokenError::Expired => "expired token",
                _ => "invalid token",
            };
            warn!(path = %req.uri().path(), %e, "token verification failed");
            return Err(ApiError::Unauthenticated(reason.into()));
        }
    };

    if let Gate::Role(required) = gate {
        if !role_satisfied(&claims, required) {
            warn!(
                path = %req.uri().path(),
                required = role_name(required),
                "role gate refused"
            );
            return Err(ApiError::Unauthenticated("insufficient role".into()));
        }
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_the_public_surface() {
        assert_eq!(gate_for(&Method::POST, "/jwt"), Gate::Public);
        assert_eq!(gate_for(&Method::POST, "/users"), Gate::Public);
        assert_eq!(gate_for(&Method::POST, "/api/messages"), Gate::Public);
        assert_eq!(gate_for(&Method::GET, "/docs/index.html"), Gate::Public);
    }

    #[test]
    fn mutating_account_routes_are_role_gated() {
        assert_eq!(
            gate_for(&Method::DELETE, "/users/9f0c2c1e-0000-0000-0000-000000000000"),
            Gate::Role(AccountType::Admin)
        );
        assert_eq!(
            gate_for(&Method::PATCH, "/users/fire/9f0c2c1e-0000-0000-0000-000000000000"),
            Gate::Role(AccountType::Admin)
        );
        assert_eq!(
            gate_for(&Method::PATCH, "/users/increase-salary/a@b.c"),
            Gate::Role(AccountType::Hr)
        );
    }

    #[test]
    fn unlisted_routes_fail_closed() {
        assert_eq!(gate_for(&Method::GET, "/users"), Gate::Authenticated);
        assert_eq!(gate_for(&Method::GET, "/api/messages"), Gate::Authenticated);
        assert_eq!(gate_for(&Method::DELETE, "/anything/else"), Gate::Authenticated);
        // method matters: registration is public, listing is not
        assert_eq!(gate_for(&Method::GET, "/jwt"), Gate::Authenticated);
    }

    #[test]
    fn admin_satisfies_any_role_gate() {
        let mut m = Map::new();
        m.insert("accountType".into(), Value::String("Admin".into()));
        assert!(role_satisfied(&SessionClaims(m), AccountType::Hr));

        let mut m = Map::new();
        m.insert("accountType".into(), Value::String("Employee".into()));
        assert!(!role_satisfied(&SessionClaims(m), AccountType::Hr));

        assert!(!role_satisfied(&SessionClaims(Map::new()), AccountType::Admin));
    }
}
