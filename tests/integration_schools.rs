mod common;

use axum::http::StatusCode;
use common::{setup_connected_app, setup_memory_app};
use serde_json::json;

#[tokio::test]
async fn test_create_school_then_list() {
    let app = setup_memory_app();

    let (status, body) = app
        .post(
            "/api/v1/schools",
            json!({ "name": "Lincoln High", "address": "1 Main St" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lincoln High");
    let id = body["_id"].as_str().unwrap();
    assert!(!id.is_empty());

    let (status, body) = app.get("/api/v1/schools").await;
    assert_eq!(status, StatusCode::OK);
    let schools = body.as_array().unwrap();
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0]["_id"], id);
}

#[tokio::test]
async fn test_create_school_trims_fields() {
    let app = setup_memory_app();

    let (status, body) = app
        .post(
            "/api/v1/schools",
            json!({ "name": "  Lincoln High ", "address": " 1 Main St", "principalName": " Ada " }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lincoln High");
    assert_eq!(body["principalName"], "Ada");
}

#[tokio::test]
async fn test_create_school_reports_every_invalid_field() {
    let app = setup_memory_app();

    let (status, body) = app
        .post(
            "/api/v1/schools",
            json!({ "email": "not-an-email", "establishedYear": 1800 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["address", "email", "establishedYear", "name"]);
}

#[tokio::test]
async fn test_create_school_rejects_unknown_fields() {
    let app = setup_memory_app();

    let (status, body) = app
        .post(
            "/api/v1/schools",
            json!({ "name": "Lincoln High", "address": "1 Main St", "motto": "x" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["message"], "\"motto\" is not allowed");
}

#[tokio::test]
async fn test_update_school_changes_only_sent_fields() {
    let app = setup_memory_app();
    let id = app.create_school("Lincoln High").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/schools/{}", id),
            json!({ "phone": "555-0100" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "555-0100");
    assert_eq!(body["name"], "Lincoln High");
    assert_eq!(body["address"], "1 Main St");
}

#[tokio::test]
async fn test_get_unknown_school() {
    let app = setup_memory_app();

    let (status, body) = app.get("/api/v1/schools/mem-0-0").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "School not found" }));
}

#[tokio::test]
async fn test_delete_school_then_get_is_not_found() {
    let app = setup_memory_app();
    let id = app.create_school("Lincoln High").await;
    let uri = format!("/api/v1/schools/{}", id);

    let (status, body) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "School deleted successfully" })
    );

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schools_persist_in_document_store_when_connected() {
    let app = setup_connected_app();

    app.create_school("Lincoln High").await;

    assert_eq!(app.primary().inner.len(schoolmis_db::Collection::Schools), 1);
    assert!(app.memory().is_empty(schoolmis_db::Collection::Schools));
}
