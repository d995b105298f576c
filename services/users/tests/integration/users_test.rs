use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Value, json};

use devenv_users::handlers::user::UserResponse;
use devenv_users::metrics::MetricsConfig;

use crate::helpers::{
    FailingUserRepo, MockUserRepo, StalledUserRepo, ana, test_server, test_server_with_metrics,
};

fn assert_error_body(body: &Value, kind: &str, message: &str) {
    assert_eq!(body["kind"], kind);
    assert_eq!(body["error"], message);
}

// ── Health & metrics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_ping_with_pong() {
    let server = test_server(MockUserRepo::empty());

    let response = server.get("/ping").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "message": "pong" }));
}

#[tokio::test]
async fn should_expose_request_counters_on_metrics() {
    let server = test_server(MockUserRepo::empty());
    server.get("/ping").await.assert_status_ok();

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("http_requests_total"), "{text}");
    assert!(text.contains("http_request_duration_seconds"), "{text}");
}

#[tokio::test]
async fn should_count_slow_and_unmatched_requests() {
    let server = test_server_with_metrics(
        MockUserRepo::empty(),
        MetricsConfig {
            slow_time: Duration::ZERO,
            ..MetricsConfig::default()
        },
    );
    server.get("/users/1").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/nope").await.assert_status(StatusCode::NOT_FOUND);

    let text = server.get("/metrics").await.text();

    assert!(text.contains("http_slow_requests_total"), "{text}");
    assert!(text.contains(r#"path="/users/{id}""#), "{text}");
    assert!(text.contains(r#"path="unmatched""#), "{text}");
}

#[tokio::test]
async fn should_set_request_id_header() {
    let server = test_server(MockUserRepo::empty());

    let response = server.get("/ping").await;

    assert!(!response.header("x-request-id").is_empty());
}

// ── Full lifecycle ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_run_create_read_patch_delete_scenario() {
    let server = test_server(MockUserRepo::empty());

    let response = server.post("/users").json(&ana()).await;
    response.assert_status(StatusCode::CREATED);
    let created: UserResponse = response.json();
    assert_eq!(created.name, "Ana");
    assert_eq!(created.lastname, "Diaz");
    assert_eq!(created.age, 30);
    assert_eq!(created.email, "ana@x.com");

    let path = format!("/users/{}", created.id);

    let response = server.get(&path).await;
    response.assert_status_ok();
    assert_eq!(response.json::<UserResponse>(), created);

    let response = server.patch(&path).json(&json!({ "age": 31 })).await;
    response.assert_status_ok();
    let patched: UserResponse = response.json();
    assert_eq!(patched.id, created.id);
    assert_eq!(patched.age, 31);
    assert_eq!(patched.name, "Ana");
    assert_eq!(patched.lastname, "Diaz");
    assert_eq!(patched.email, "ana@x.com");

    let response = server.delete(&path).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "User deleted successfully" }));

    let response = server.get(&path).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response.json(), "USER_NOT_FOUND", "User not found");
}

#[tokio::test]
async fn should_assign_distinct_ids_to_new_users() {
    let server = test_server(MockUserRepo::empty());

    let first: UserResponse = server.post("/users").json(&ana()).await.json();
    let second: UserResponse = server
        .post("/users")
        .json(&json!({"name": "Luis", "lastname": "Paz", "age": 41, "email": "luis@x.com"}))
        .await
        .json();

    assert_ne!(first.id, second.id);
}

// ── Read ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_404_for_unknown_user() {
    let server = test_server(MockUserRepo::empty());

    let response = server.get("/users/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response.json(), "USER_NOT_FOUND", "User not found");
}

#[tokio::test]
async fn should_reject_malformed_ids_without_touching_storage() {
    let repo = MockUserRepo::empty();
    let server = test_server(repo.clone());

    for id in ["abc", "1.5", "99999999999999999999", "%20"] {
        let path = format!("/users/{id}");

        let responses = [
            server.get(&path).await,
            server.put(&path).json(&json!({ "age": 1 })).await,
            server.patch(&path).json(&json!({ "age": 1 })).await,
            server.delete(&path).await,
        ];

        for response in responses {
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_error_body(&response.json(), "INVALID_USER_ID", "Invalid user ID");
        }
    }
    assert_eq!(repo.calls(), 0);
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_invalid_create_payloads_without_touching_storage() {
    let repo = MockUserRepo::empty();
    let server = test_server(repo.clone());

    let bodies = [
        json!({ "name": "Ana", "lastname": "Diaz", "age": 30 }),
        json!({ "name": "Ana", "lastname": "Diaz", "age": "thirty", "email": "ana@x.com" }),
        json!([]),
    ];
    for body in bodies {
        let response = server.post("/users").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "INVALID_PAYLOAD", "Invalid request payload");
    }

    let response = server.post("/users").text("{not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(&response.json(), "INVALID_PAYLOAD", "Invalid request payload");

    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn should_return_500_for_duplicate_email() {
    let server = test_server(MockUserRepo::empty());
    server
        .post("/users")
        .json(&ana())
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.post("/users").json(&ana()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&response.json(), "INTERNAL", "Internal Server Error");
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_preserve_unset_fields_on_put() {
    let server = test_server(MockUserRepo::empty());
    let created: UserResponse = server.post("/users").json(&ana()).await.json();
    let path = format!("/users/{}", created.id);
    let body = json!({ "name": "Ana Maria", "email": "anamaria@x.com" });

    let response = server.put(&path).json(&body).await;
    response.assert_status_ok();
    let updated: UserResponse = response.json();
    assert_eq!(
        updated,
        UserResponse {
            id: created.id,
            name: "Ana Maria".into(),
            lastname: "Diaz".into(),
            age: 30,
            email: "anamaria@x.com".into(),
        }
    );

    let again: UserResponse = server.put(&path).json(&body).await.json();
    assert_eq!(again, updated);

    let stored: UserResponse = server.get(&path).await.json();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn should_return_current_user_for_empty_patch() {
    let server = test_server(MockUserRepo::empty());
    let created: UserResponse = server.post("/users").json(&ana()).await.json();

    let response = server
        .patch(&format!("/users/{}", created.id))
        .json(&json!({}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<UserResponse>(), created);
}

#[tokio::test]
async fn should_return_404_when_updating_unknown_user() {
    let server = test_server(MockUserRepo::empty());

    let put = server.put("/users/42").json(&json!({ "age": 1 })).await;
    let patch = server.patch("/users/42").json(&json!({ "age": 1 })).await;

    for response in [put, patch] {
        response.assert_status(StatusCode::NOT_FOUND);
        assert_error_body(&response.json(), "USER_NOT_FOUND", "User not found");
    }
}

#[tokio::test]
async fn should_reject_invalid_update_payload() {
    let repo = MockUserRepo::empty();
    let server = test_server(repo.clone());

    let response = server.patch("/users/1").json(&json!({ "age": "old" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(&response.json(), "INVALID_PAYLOAD", "Invalid request payload");
    assert_eq!(repo.calls(), 0);
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_404_on_second_delete() {
    let server = test_server(MockUserRepo::empty());
    let created: UserResponse = server.post("/users").json(&ana()).await.json();
    let path = format!("/users/{}", created.id);

    server.delete(&path).await.assert_status_ok();
    let response = server.delete(&path).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response.json(), "USER_NOT_FOUND", "User not found");
}

// ── Storage failures ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_map_storage_failures_to_500() {
    let server = test_server(FailingUserRepo);

    let responses = [
        server.get("/users/1").await,
        server.post("/users").json(&ana()).await,
        server.put("/users/1").json(&json!({ "age": 1 })).await,
        server.patch("/users/1").json(&json!({ "age": 1 })).await,
        server.delete("/users/1").await,
    ];

    for response in responses {
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_error_body(&body, "INTERNAL", "Internal Server Error");
        assert!(!body.to_string().contains("connection refused"));
    }
}

// ── Timeout ──────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn should_answer_408_when_storage_stalls() {
    let server = test_server(StalledUserRepo);

    let response = server.get("/users/1").await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);
    response.assert_text("timeout");
}
