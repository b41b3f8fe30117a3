//! Router-level tests for the session flow and the policy gates. These
//! run without a database: the handlers exercised here either never touch
//! storage or are expected to be stopped at the gate.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::auth::ServerState;
use server::routes::build_router;
use service::auth::{CookiePolicy, TokenService};

fn test_router() -> axum::Router {
    let state = ServerState {
        db: DatabaseConnection::default(),
        tokens: Arc::new(TokenService::new("integration-secret", 180)),
        cookies: CookiePolicy::for_deployment(false),
    };
    build_router(CorsLayer::very_permissive(), state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let response = test_router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn jwt_sets_cookie_and_validate_token_accepts_it() {
    let app = test_router();

    let response = app
        .clone()
        .oneshot(
            Request::post("/jwt")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "jane@corp.io", "accountType": "HR"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::get("/validate-token")
                .header(header::COOKIE, format!("token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["isValid"], true);

    // no cookie at all: 401 with the flag down
    let response = app
        .oneshot(Request::get("/validate-token").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["isValid"], false);
}

#[tokio::test]
async fn profile_echoes_the_session_claims() {
    let app = test_router();
    let tokens = TokenService::new("integration-secret", 180);

    let response = app
        .clone()
        .oneshot(Request::get("/profile").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = tokens
        .issue(json!({"email": "jane@corp.io", "accountType": "HR"}).as_object().unwrap())
        .unwrap();
    let response = app
        .oneshot(
            Request::get("/profile")
                .header(header::COOKIE, format!("token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let claims = body_json(response).await;
    assert_eq!(claims["email"], "jane@corp.io");
    assert_eq!(claims["accountType"], "HR");
    assert!(claims.get("exp").is_some());
}

#[tokio::test]
async fn non_object_claims_are_rejected() {
    let response = test_router()
        .oneshot(
            Request::post("/jwt")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("[1, 2, 3]"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn protected_routes_refuse_missing_and_garbage_cookies() {
    let app = test_router();

    let response = app
        .clone()
        .oneshot(Request::get("/payroll").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::get("/payroll")
                .header(header::COOKIE, "token=not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn role_gates_consult_the_claims() {
    let app = test_router();
    let tokens = TokenService::new("integration-secret", 180);

    let employee = tokens
        .issue(json!({"email": "emp@corp.io", "accountType": "Employee"}).as_object().unwrap())
        .unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::patch("/users/increase-salary/emp@corp.io")
                .header(header::COOKIE, format!("token={}", employee))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"amount": 1000}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The same gate machinery lets a live session through routes that
    // only ask for authentication.
    let admin = tokens
        .issue(json!({"email": "boss@corp.io", "accountType": "Admin"}).as_object().unwrap())
        .unwrap();
    let response = app
        .oneshot(
            Request::get("/profile")
                .header(header::COOKIE, format!("token={}", admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["accountType"], "Admin");
}

#[tokio::test]
async fn foreign_signature_is_refused() {
    let foreign = TokenService::new("some-other-secret", 180)
        .issue(json!({"email": "jane@corp.io", "accountType": "Admin"}).as_object().unwrap())
        .unwrap();
    let response = test_router()
        .oneshot(
            Request::get("/users")
                .header(header::COOKIE, format!("token={}", foreign))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let response = test_router()
        .oneshot(Request::post("/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn swagger_json_is_public() {
    let response = test_router()
        .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
