use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, AppState};

const SERVICE: &str = "rust-api-server";

fn app() -> Router {
    routes::build_router(AppState::seeded(SERVICE), server::startup::build_cors())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn health_reports_healthy_service() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], SERVICE);
    assert!(body["timestamp"].as_i64().unwrap_or_default() > 0);
    Ok(())
}

#[tokio::test]
async fn list_returns_seed_users() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["users"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["users"][0], json!({"id": 1, "name": "John Doe", "email": "john@example.com"}));
    assert_eq!(body["users"][1]["name"], "Jane Smith");
    Ok(())
}

#[tokio::test]
async fn get_user_by_id() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/users/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "John Doe");

    let (status, body) = send(&app, "GET", "/users/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));
    Ok(())
}

#[tokio::test]
async fn non_integer_ids_are_bad_requests() -> anyhow::Result<()> {
    let app = app();
    let invalid = json!({"error": "Invalid user ID"});

    let (status, body) = send(&app, "GET", "/users/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, invalid);

    let (status, body) = send(&app, "PUT", "/users/abc", Some(json!({"name": "X"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, invalid);

    let (status, body) = send(&app, "DELETE", "/users/1.5", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, invalid);
    Ok(())
}

#[tokio::test]
async fn create_user_appends_with_next_id() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": "Test User", "email": "test@example.com"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 3, "name": "Test User", "email": "test@example.com"}));

    let (_, list) = send(&app, "GET", "/users", None).await?;
    assert_eq!(list["total"], 3);
    assert_eq!(list["users"][2]["id"], 3);
    Ok(())
}

#[tokio::test]
async fn create_user_validation_leaves_store_unchanged() -> anyhow::Result<()> {
    let app = app();

    let (status, body) = send(&app, "POST", "/users", Some(json!({"name": "Test User"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Email is required"}));

    let (status, body) = send(&app, "POST", "/users", Some(json!({"email": "test@example.com"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Name is required"}));

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"name": "Test User", "email": "not-an-email"})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Valid email is required"}));

    let (_, list) = send(&app, "GET", "/users", None).await?;
    assert_eq!(list["total"], 2);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> anyhow::Result<()> {
    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"].is_string());

    // no content type at all
    let req = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from("{}"))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn update_changes_only_provided_fields() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "PUT", "/users/1", Some(json!({"name": "Updated Name"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Updated Name");
    assert_eq!(body["email"], "john@example.com");

    // empty values are treated as absent
    let (status, body) = send(&app, "PUT", "/users/1", Some(json!({"name": "", "email": ""}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Updated Name", "email": "john@example.com"}));

    let (_, fetched) = send(&app, "GET", "/users/1", None).await?;
    assert_eq!(fetched["name"], "Updated Name");
    Ok(())
}

#[tokio::test]
async fn update_rejects_missing_user_and_bad_email() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "PUT", "/users/999", Some(json!({"name": "Ghost"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));

    let (status, body) = send(&app, "PUT", "/users/2", Some(json!({"email": "broken"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Valid email is required"}));

    let (_, jane) = send(&app, "GET", "/users/2", None).await?;
    assert_eq!(jane["email"], "jane@example.com");
    Ok(())
}

#[tokio::test]
async fn delete_then_get_and_delete_again() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "DELETE", "/users/2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User deleted successfully"}));

    let (status, _) = send(&app, "GET", "/users/2", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/users/2", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));

    let (_, list) = send(&app, "GET", "/users", None).await?;
    assert_eq!(list["total"], 1);
    assert_eq!(list["users"][0]["id"], 1);
    Ok(())
}

#[tokio::test]
async fn routers_do_not_share_state() -> anyhow::Result<()> {
    let first = app();
    let second = app();
    send(&first, "DELETE", "/users/1", None).await?;
    let (_, list) = send(&second, "GET", "/users", None).await?;
    assert_eq!(list["total"], 2);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Route not found"}));
    Ok(())
}

#[tokio::test]
async fn metrics_and_openapi_are_served() -> anyhow::Result<()> {
    let app = app();
    send(&app, "GET", "/users/1", None).await?;

    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let text = String::from_utf8(bytes.to_vec())?;
    assert!(text.contains("user_directory_requests_total"));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn whitespace_name_follows_one_rule_on_create_and_update() -> anyhow::Result<()> {
    let app = app();

    let (status, body) = send(&app, "POST", "/users", Some(json!({"name": "   ", "email": "a@b.com"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "   ");

    let (status, body) = send(&app, "PUT", "/users/1", Some(json!({"name": "   "}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "   ");

    let (status, body) = send(&app, "POST", "/users", Some(json!({"name": "", "email": "a@b.com"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Name is required"}));

    let (status, body) = send(&app, "PUT", "/users/2", Some(json!({"name": ""}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jane Smith");
    Ok(())
}

#[tokio::test]
async fn update_with_malformed_json_is_a_bad_request() -> anyhow::Result<()> {
    let app = app();
    let req = Request::builder()
        .method("PUT")
        .uri("/users/1")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"].is_string());

    let (_, john) = send(&app, "GET", "/users/1", None).await?;
    assert_eq!(john["name"], "John Doe");
    Ok(())
}

#[tokio::test]
async fn zero_and_negative_ids_are_bad_requests() -> anyhow::Result<()> {
    let app = app();
    let invalid = json!({"error": "Invalid user ID"});
    for id in ["0", "-1"] {
        let uri = format!("/users/{id}");

        let (status, body) = send(&app, "GET", &uri, None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {uri}");
        assert_eq!(body, invalid);

        let (status, body) = send(&app, "PUT", &uri, Some(json!({"name": "X"}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "PUT {uri}");
        assert_eq!(body, invalid);

        let (status, body) = send(&app, "DELETE", &uri, None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "DELETE {uri}");
        assert_eq!(body, invalid);
    }

    let (_, list) = send(&app, "GET", "/users", None).await?;
    assert_eq!(list["total"], 2);
    Ok(())
}
