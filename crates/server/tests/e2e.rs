//! End-to-end test against a running server with a real database.
//! Opt-in: set `E2E_BASE_URL` (e.g. http://127.0.0.1:5000) with the
//! server already listening, otherwise the test is a no-op.

use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

fn base_url() -> Option<String> {
    std::env::var("E2E_BASE_URL").ok()
}

#[tokio::test]
async fn payroll_lifecycle_over_http() -> Result<(), anyhow::Error> {
    let Some(base) = base_url() else {
        eprintln!("skip: E2E_BASE_URL not set");
        return Ok(());
    };
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let health: Value = client.get(format!("{}/health", base)).send().await?.json().await?;
    assert_eq!(health["status"], "ok");

    // Register an employee; second registration must be a 200 no-op.
    let email = format!("e2e_{}@example.com", Uuid::new_v4());
    let register = json!({
        "email": email,
        "password": "Secret123!",
        "username": "E2E Employee",
        "bankAccountNumber": "1234-5678"
    });
    let res = client.post(format!("{}/users", base)).json(&register).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let profile: Value = res.json().await?;
    assert_eq!(profile["salary"], 30000);

    let res = client.post(format!("{}/users", base)).json(&register).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Unauthenticated listing is refused until the session cookie is set.
    let res = client.get(format!("{}/payroll", base)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/jwt", base))
        .json(&json!({"email": email, "accountType": "Admin"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/payroll", base))
        .json(&json!({
            "email": email,
            "employeeName": "E2E Employee",
            "salary": 30000,
            "month": 3,
            "year": 2031
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let record: Value = res.json().await?;
    assert_eq!(record["status"], "Pending Approval");
    let record_id = record["id"].as_str().unwrap().to_string();

    // Same period again: the unique constraint answers 409.
    let res = client
        .post(format!("{}/payroll", base))
        .json(&json!({
            "email": email,
            "employeeName": "E2E Employee",
            "salary": 30000,
            "month": 3,
            "year": 2031
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .patch(format!("{}/payroll/{}", base, record_id))
        .json(&json!({"paymentDate": "2031-04-01"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let paid: Value = res.json().await?;
    assert_eq!(paid["status"], "Paid");
    assert_eq!(paid["paymentDate"], "2031-04-01");

    let res = client
        .patch(format!("{}/payroll/increase-salary/{}", base, email))
        .json(&json!({"increment": 5000}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let increase: Value = res.json().await?;
    assert_eq!(increase["newSalary"], 35000);

    // Live account salary followed the ledger.
    let res = client.get(format!("{}/users/{}", base, email)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let account: Value = res.json().await?;
    assert_eq!(account["salary"], 35000);
    let account_id = account["id"].as_str().unwrap().to_string();

    // Cleanup (Admin gate).
    let res = client.delete(format!("{}/users/{}", base, account_id)).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    Ok(())
}
