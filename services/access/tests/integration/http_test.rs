use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use bodegix_access::domain::types::{AccessOutcome, QrPolicy};
use bodegix_access::infra::actuator::{Actuator, LogUnlockActuator};
use bodegix_access::infra::backend::{EventBackend, LockerBackend, SessionBackend};
use bodegix_access::infra::memory::{
    InMemoryAccessEventLog, InMemoryLockerDirectory, InMemoryQrSessionStore,
};
use bodegix_access::router::build_router;
use bodegix_access::state::AppState;
use bodegix_auth_types::identity::JwtSecret;

use crate::helpers::{MockAuth, TEST_JWT_SECRET, assigned_locker};

struct TestApp {
    server: TestServer,
    events: InMemoryAccessEventLog,
}

fn test_app() -> TestApp {
    let events = InMemoryAccessEventLog::default();
    let state = AppState {
        sessions: SessionBackend::Memory(InMemoryQrSessionStore::default()),
        lockers: LockerBackend::Memory(InMemoryLockerDirectory::new([assigned_locker()])),
        events: EventBackend::Memory(events.clone()),
        actuator: Actuator::Log(LogUnlockActuator),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        policy: QrPolicy::default(),
    };
    TestApp {
        server: TestServer::new(build_router(state)).unwrap(),
        events,
    }
}

fn owner_token() -> String {
    MockAuth::new(42, Some(3)).bearer_token(TEST_JWT_SECRET)
}

fn reader_token(tenant_id: i32) -> String {
    MockAuth::new(500, Some(tenant_id)).bearer_token(TEST_JWT_SECRET)
}

async fn issue(app: &TestApp, body: Value) -> Value {
    let response = app
        .server
        .post("/qr-sessions")
        .authorization_bearer(owner_token())
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn should_answer_health_checks() {
    let app = test_app();
    assert_eq!(app.server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(app.server.get("/readyz").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_require_bearer_token() {
    let app = test_app();

    let response = app
        .server
        .post("/qr-sessions")
        .json(&json!({ "lockerId": 7 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/qr/scan")
        .authorization_bearer(MockAuth::new(42, Some(3)).bearer_token("wrong-secret"))
        .json(&json!({ "code": "abc" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_expired_token() {
    let app = test_app();
    // An hour back clears the validator's leeway.
    let exp = chrono::Utc::now().timestamp() as u64 - 3600;
    let token = MockAuth::new(42, Some(3)).token_with_exp(TEST_JWT_SECRET, exp);

    let response = app
        .server
        .post("/qr-sessions")
        .authorization_bearer(token)
        .json(&json!({ "lockerId": 7 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_issue_with_camel_case_body() {
    let app = test_app();

    let body = issue(&app, json!({ "lockerId": 7, "ttlSeconds": 30, "asUrl": true })).await;

    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 32);
    assert_eq!(body["ttlSeconds"], 30);
    assert_eq!(
        body["payload"],
        format!("https://bodegix.app/open?c={code}")
    );
    let expires_at = body["expiresAt"].as_str().unwrap();
    assert!(expires_at.ends_with('Z'), "unexpected expiresAt {expires_at}");
}

#[tokio::test]
async fn should_accept_legacy_field_names() {
    let app = test_app();

    let body = issue(&app, json!({ "locker_id": 7, "empresaId": 3 })).await;
    assert_eq!(body["ttlSeconds"], 15);
    assert_eq!(body["payload"], body["code"]);
}

#[tokio::test]
async fn should_reject_invalid_ttl() {
    let app = test_app();

    let response = app
        .server
        .post("/qr-sessions")
        .authorization_bearer(owner_token())
        .json(&json!({ "lockerId": 7, "ttlSeconds": 0 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_TTL");
}

#[tokio::test]
async fn should_not_disclose_lockers_of_other_tenants() {
    let app = test_app();

    let response = app
        .server
        .post("/qr-sessions")
        .authorization_bearer(MockAuth::new(42, Some(9)).bearer_token(TEST_JWT_SECRET))
        .json(&json!({ "lockerId": 7 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "LOCKER_NOT_FOUND");
}

#[tokio::test]
async fn should_scan_once_and_report_status() {
    let app = test_app();
    let issued = issue(&app, json!({ "lockerId": 7, "asUrl": false })).await;
    let code = issued["code"].as_str().unwrap();
    let status_path = format!("/qr-sessions/{code}/status");

    let status = app
        .server
        .get(&status_path)
        .authorization_bearer(owner_token())
        .await;
    assert_eq!(status.json::<Value>(), json!({ "status": "pending" }));

    let granted = app
        .server
        .post("/qr/scan")
        .authorization_bearer(reader_token(3))
        .json(&json!({ "code": code, "lockerId": 7 }))
        .await;
    assert_eq!(granted.status_code(), StatusCode::OK);
    assert_eq!(
        granted.json::<Value>(),
        json!({ "outcome": "granted", "lockerId": 7, "tenantId": 3, "userId": 42 })
    );

    let replay = app
        .server
        .post("/qr/scan")
        .authorization_bearer(reader_token(3))
        .json(&json!({ "code": code }))
        .await;
    assert_eq!(replay.status_code(), StatusCode::CONFLICT);
    assert_eq!(replay.json::<Value>()["kind"], "ALREADY_USED");

    let status = app
        .server
        .get(&status_path)
        .authorization_bearer(owner_token())
        .await;
    assert_eq!(status.json::<Value>(), json!({ "status": "used" }));

    let outcomes: Vec<_> = app.events.events().iter().map(|e| e.outcome).collect();
    assert_eq!(
        outcomes,
        vec![AccessOutcome::Granted, AccessOutcome::AlreadyUsed]
    );
}

#[tokio::test]
async fn should_refuse_reader_of_another_tenant() {
    let app = test_app();
    let issued = issue(&app, json!({ "lockerId": 7 })).await;
    let code = issued["code"].as_str().unwrap();

    let response = app
        .server
        .post("/qr/scan")
        .authorization_bearer(reader_token(9))
        .json(&json!({ "code": code }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");

    let status = app
        .server
        .get(&format!("/qr-sessions/{code}/status"))
        .authorization_bearer(reader_token(9))
        .await;
    assert_eq!(status.json::<Value>(), json!({ "status": "unknown" }));
}

#[tokio::test]
async fn should_report_unknown_code_on_scan() {
    let app = test_app();

    let response = app
        .server
        .post("/qr/scan")
        .authorization_bearer(reader_token(3))
        .json(&json!({ "code": "ffffffffffffffffffffffffffffffff" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "UNKNOWN_CODE");
}
