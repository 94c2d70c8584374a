//! End-to-end tests driving the router in-process

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use roster_core::AssignmentEngine;
use roster_db::{Database, DatabaseConfig};
use roster_server::{router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn app() -> (Router, TempDir) {
    let temp = TempDir::new().unwrap();
    let db = Database::connect(DatabaseConfig::new(temp.path().join("api.db")))
        .await
        .unwrap();
    db.migrate().await.unwrap();

    let engine = AssignmentEngine::with_rng(db.clone(), StdRng::seed_from_u64(7));
    let state = AppState::with_engine(db, engine);
    (router(state, Duration::from_secs(60)), temp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

fn reviewers(pr: &Value) -> Vec<String> {
    let mut ids: Vec<String> = pr["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    ids.sort();
    ids
}

async fn add_team(app: &Router, name: &str, members: &[&str]) {
    let members: Vec<Value> = members
        .iter()
        .map(|id| json!({"user_id": id, "username": id.to_uppercase(), "is_active": true}))
        .collect();
    let (status, _) = post(app, "/team/add", json!({"team_name": name, "members": members})).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_team_lifecycle() {
    let (app, _temp) = app().await;

    let (status, body) = post(
        &app,
        "/team/add",
        json!({
            "team_name": "backend",
            "members": [
                {"user_id": "u2", "username": "Bob", "is_active": false},
                {"user_id": "u1", "username": "Alice", "is_active": true}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["team"]["team_name"], "backend");
    assert_eq!(body["team"]["members"][0]["user_id"], "u1");

    let (status, body) = get(&app, "/team/get?team_name=backend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"].as_array().unwrap().len(), 2);
    assert_eq!(body["members"][1]["is_active"], false);

    let (status, body) = post(
        &app,
        "/team/add",
        json!({"team_name": "backend", "members": [{"user_id": "u9", "username": "Z"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "TEAM_EXISTS");

    let (status, body) = post(
        &app,
        "/team/add",
        json!({"team_name": "web", "members": [{"user_id": "u1", "username": "Alice"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "USER_EXISTS");

    let (status, body) = get(&app, "/team/get?team_name=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    let (status, body) = get(&app, "/team/get?team_name=").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    let (status, body) = get(&app, "/team/get").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

#[tokio::test]
async fn test_pull_request_flow() {
    let (app, _temp) = app().await;
    add_team(&app, "core", &["a", "b", "c", "d"]).await;

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr-1", "pull_request_name": "Add search", "author_id": "a"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let pr = &body["pr"];
    assert_eq!(pr["status"], "OPEN");
    assert!(pr["createdAt"].is_string());
    assert!(pr.get("mergedAt").is_none());
    let assigned = reviewers(pr);
    assert_eq!(assigned.len(), 2);
    assert!(!assigned.contains(&"a".to_string()));

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr-1", "pull_request_name": "Again", "author_id": "b"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "PR_EXISTS");

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr-2", "pull_request_name": "X", "author_id": "ghost"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    // Reassign one of the current reviewers
    let old = assigned[0].clone();
    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-1", "old_user_id": old}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let replaced_by = body["replaced_by"].as_str().unwrap().to_string();
    assert_ne!(replaced_by, old);
    assert_ne!(replaced_by, "a");
    let after = reviewers(&body["pr"]);
    assert!(after.contains(&replaced_by));
    assert!(!after.contains(&old));

    let (status, body) = get(&app, &format!("/pullRequest/userReviews?user_id={}", replaced_by)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pull_requests"][0]["pull_request_id"], "pr-1");
    assert!(body["pull_requests"][0].get("assigned_reviewers").is_none());

    let (status, body) = get(&app, &format!("/users/getReview?user_id={}", old)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["pull_requests"].as_array().unwrap().is_empty());

    // Merge twice; the second call is a no-op
    let (status, first) = post(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pr"]["status"], "MERGED");
    let (status, second) = post(&app, "/pullRequest/merge", json!({"pull_request_id": "pr-1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pr"]["mergedAt"], second["pr"]["mergedAt"]);

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-1", "old_user_id": replaced_by}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "PR_MERGED");

    let (status, body) = post(&app, "/pullRequest/merge", json!({"pull_request_id": "nope"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn test_reassign_conflicts() {
    let (app, _temp) = app().await;
    add_team(&app, "core", &["a", "b", "c"]).await;
    post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr-1", "pull_request_name": "Work", "author_id": "a"}),
    )
    .await;

    // b and c both review and nobody else is left
    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-1", "old_user_id": "b"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "NO_CANDIDATE");

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-1", "old_user_id": "a"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "NOT_ASSIGNED");
}

#[tokio::test]
async fn test_deactivation_drops_last_reviewers() {
    let (app, _temp) = app().await;
    add_team(&app, "core", &["a", "b", "c"]).await;
    let (_, body) = post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr-1", "pull_request_name": "Work", "author_id": "a"}),
    )
    .await;
    assert_eq!(reviewers(&body["pr"]), vec!["b", "c"]);

    let (status, body) = post(&app, "/team/deactivateUsers", json!({"users": ["b", "c", "b"]})).await;
    assert_eq!(status, StatusCode::OK);
    let updated = body["updated_prs"].as_array().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["pull_request_id"], "pr-1");
    assert!(reviewers(&updated[0]).is_empty());

    let (status, body) = post(
        &app,
        "/pullRequest/reassign",
        json!({"pull_request_id": "pr-1", "old_user_id": "b"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "NOT_ASSIGNED");

    let (status, body) = post(&app, "/team/deactivateUsers", json!({"users": ["a", "ghost"]})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    // The failed batch left a active
    let (_, team) = get(&app, "/team/get?team_name=core").await;
    assert_eq!(team["members"][0]["user_id"], "a");
    assert_eq!(team["members"][0]["is_active"], true);
}

#[tokio::test]
async fn test_set_is_active() {
    let (app, _temp) = app().await;
    add_team(&app, "core", &["a"]).await;

    let (status, body) = post(&app, "/users/setIsActive", json!({"user_id": "a", "is_active": false})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["user_id"], "a");
    assert_eq!(body["user"]["team_name"], "core");
    assert_eq!(body["user"]["is_active"], false);

    let (status, body) = post(&app, "/users/setIsActive", json!({"user_id": "a"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");

    let (status, body) = post(
        &app,
        "/users/setIsActive",
        json!({"user_id": "a", "is_active": true, "extra": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");

    let (status, body) = post(&app, "/users/setIsActive", json!({"user_id": "ghost", "is_active": true})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() {
    let (app, _temp) = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/pullRequest/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "", "pull_request_name": "X", "author_id": "a"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

#[tokio::test]
async fn test_stats_and_health() {
    let (app, _temp) = app().await;
    add_team(&app, "core", &["a", "b", "c"]).await;
    post(
        &app,
        "/pullRequest/create",
        json!({"pull_request_id": "pr-1", "pull_request_name": "Work", "author_id": "a"}),
    )
    .await;

    let (status, body) = get(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_active_users"], 3);
    assert_eq!(body["top_reviewers"].as_array().unwrap().len(), 2);
    assert_eq!(body["pr_status_distribution"][0]["status"], "OPEN");
    assert_eq!(body["pr_status_distribution"][0]["count"], 1);

    for uri in ["/ping", "/health"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"pong");
    }
}
