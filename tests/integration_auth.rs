mod common;

use axum::http::StatusCode;
use common::{
    DEMO_TOKEN, STORE_TOKEN, insert_store_user, setup_connected_app, setup_memory_app,
};
use serde_json::json;

#[tokio::test]
async fn test_login_with_fallback_account() {
    let app = setup_memory_app();

    let (status, body) = app.login("admin", "admin123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "token": DEMO_TOKEN,
            "user": { "username": "admin", "role": "admin" },
            "source": "memory"
        })
    );
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = setup_memory_app();

    let (status, body) = app.login("admin", "wrongpass").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid credentials" }));
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = setup_memory_app();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "admin" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "password");
    assert_eq!(body["details"][0]["message"], "\"password\" is required");
}

#[tokio::test]
async fn test_login_rejects_short_password() {
    let app = setup_memory_app();

    let (status, body) = app.login("admin", "abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "\"password\" length must be at least 6 characters long"
    );
}

#[tokio::test]
async fn test_login_trims_username() {
    let app = setup_memory_app();

    let (status, body) = app.login("  admin ", "admin123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
async fn test_login_against_document_store_user() {
    let app = setup_connected_app();
    insert_store_user(app.primary(), "principal", "s3cret!", "admin").await;

    let (status, body) = app.login("principal", "s3cret!").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], STORE_TOKEN);
    assert_eq!(body["source"], "mongodb");
    assert_eq!(body["user"]["username"], "principal");
}

#[tokio::test]
async fn test_fallback_account_works_while_connected() {
    let app = setup_connected_app();

    let (status, body) = app.login("admin", "admin123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], DEMO_TOKEN);
    assert_eq!(body["source"], "memory");
}

#[tokio::test]
async fn test_logout_needs_no_token() {
    let app = setup_memory_app();

    let (status, body) = app.send("POST", "/api/v1/auth/logout", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Successfully logged out" })
    );
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = setup_memory_app();

    let (status, body) = app.send("GET", "/api/v1/students", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "No token provided" }));
}

#[tokio::test]
async fn test_protected_route_with_unknown_token() {
    let app = setup_memory_app();

    let (status, body) = app
        .send("GET", "/api/v1/schools", Some("not-a-real-token"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid token" }));
}

#[tokio::test]
async fn test_both_tokens_open_protected_routes() {
    let app = setup_memory_app();

    for token in [DEMO_TOKEN, STORE_TOKEN] {
        let (status, _) = app
            .send("GET", "/api/v1/stats", Some(token), None)
            .await;
        assert_eq!(status, StatusCode::OK, "{token}");
    }
}

#[tokio::test]
async fn test_login_token_opens_protected_routes() {
    let app = setup_memory_app();
    let (_, body) = app.login("admin", "admin123").await;
    let token = body["token"].as_str().unwrap();

    let (status, body) = app.send("GET", "/api/v1/schools", Some(token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
