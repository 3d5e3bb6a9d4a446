mod common;

use auth::Algorithm;
use auth::Authenticator;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "longenoughpw").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "User created successfully");
    assert!(body.get("hashed_password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("alice", "longenoughpw").await;
    let response = app.register("alice", "another-password").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Username already registered");
}

#[tokio::test]
async fn test_register_taken_username_with_short_password() {
    let app = TestApp::spawn().await;

    app.register("alice", "longenoughpw").await;
    let response = app.register("alice", "other").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Username already registered");
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let too_short = app.register("al", "longenoughpw").await;
    assert_eq!(too_short.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let too_long = app.register(&"a".repeat(51), "longenoughpw").await;
    assert_eq!(too_long.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_short_password() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "short").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["detail"].as_str().unwrap().contains("Password too short"));
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_register_unparseable_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_token_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/token")
        .json(&json!({ "username": "bob" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("bob", "secret123").await;

    let response = app.login("bob", "secret123").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = app.authenticator.validate_token(token).unwrap();
    assert_eq!(claims.sub, "bob");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("bob", "secret123").await;

    let wrong_password = app.login("bob", "wrongpw").await;
    let unknown_user = app.login("nouser", "x").await;

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["detail"], "Incorrect username or password");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["users_table_exists"], true);
}

#[tokio::test]
async fn test_current_user_with_valid_token() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("carol", "longenoughpw").await;

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "carol");
    assert!(body["id"].is_i64());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_current_user_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_current_user_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/users/me", "not-a-token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["detail"], "Could not validate credentials");
}

#[tokio::test]
async fn test_current_user_with_expired_token() {
    let app = TestApp::spawn().await;
    app.register("dave", "longenoughpw").await;

    let token = app
        .authenticator
        .issue_token_with_ttl("dave", chrono::Duration::seconds(-1))
        .unwrap();

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_foreign_secret() {
    let app = TestApp::spawn().await;
    app.register("erin", "longenoughpw").await;

    let foreign = Authenticator::new(
        b"some-other-secret-nobody-configured",
        Algorithm::HS256,
        chrono::Duration::minutes(30),
    )
    .unwrap();
    let token = foreign.issue_token("erin").unwrap();

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_for_unknown_subject() {
    let app = TestApp::spawn().await;

    let token = app.authenticator.issue_token("ghost").unwrap();

    let response = app
        .get_authenticated("/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let app = TestApp::spawn().await;

    let (first, second) = tokio::join!(
        app.register("frank", "longenoughpw"),
        app.register("frank", "longenoughpw"),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort_by_key(|status| status.as_u16());

    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::BAD_REQUEST]);
}
