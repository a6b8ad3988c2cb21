use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::auth::ServerState;
use server::startup::build_app;
use service::security::{Argon2Hasher, TokenConfig};
use service::uow::memory::MemoryStore;

fn build_test_app() -> Router {
    let tokens = TokenConfig {
        secret: "integration-test-secret-key".into(),
        issuer: "news-management".into(),
        audience: "news-management-clients".into(),
        expire_minutes: 30,
    };
    let hasher = Argon2Hasher::with_params(8, 1, 1).expect("argon2 params");
    let state = ServerState::new(Arc::new(MemoryStore::new()), Arc::new(hasher), tokens);
    build_app(state)
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

/// Registers a fresh account with the given role and returns `(token, account_id)`.
async fn register(app: &Router, name: &str, role: i32) -> (String, String) {
    let email = format!("{}_{}@example.com", name, Uuid::new_v4().simple());
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "account_name": name, "account_email": email, "account_password": "secret123", "account_role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    (body["token"].as_str().unwrap().to_string(), body["account_id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn health_is_public() {
    let app = build_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_login_and_profile() {
    let app = build_test_app();
    let payload = json!({
        "account_name": "Alice",
        "account_email": "alice@example.com",
        "account_password": "secret123",
        "account_role": 1
    });
    let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account_role"], 1);

    let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account_email"], "alice@example.com");
    assert_eq!(body["role_name"], "Staff");
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = build_test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "account_name": "Bob", "account_email": "bob@example.com", "account_password": "123", "account_role": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn guards_reject_missing_bad_and_wrong_role_tokens() {
    let app = build_test_app();
    let (status, _) = send(&app, Method::GET, "/api/tags", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/tags", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (lecturer, _) = register(&app, "lecturer", 2).await;
    let (status, _) = send(&app, Method::GET, "/api/tags", Some(&lecturer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::GET, "/api/account", Some(&lecturer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (staff, _) = register(&app, "staff", 1).await;
    let (status, _) = send(&app, Method::GET, "/api/account", Some(&staff), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // admins manage accounts only
    let (admin, _) = register(&app, "admin", 3).await;
    let (status, _) = send(&app, Method::GET, "/api/category", Some(&admin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_manages_accounts() {
    let app = build_test_app();
    let (admin, admin_id) = register(&app, "admin", 3).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/account",
        Some(&admin),
        Some(json!({ "account_name": "Carol", "account_email": "carol@example.com", "account_password": "secret123", "account_role": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let carol_id = created["account_id"].as_str().unwrap().to_string();
    assert_eq!(created["can_delete"], true);

    let (status, list) = send(&app, Method::GET, "/api/account", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, lecturers) = send(&app, Method::GET, "/api/account/role/2", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lecturers.as_array().unwrap().len(), 1);
    assert_eq!(lecturers[0]["account_id"], carol_id.as_str());

    let (status, _) = send(&app, Method::GET, "/api/account/role/4", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/account/{carol_id}"),
        Some(&admin),
        Some(json!({ "account_id": admin_id, "account_name": "Carol", "account_email": "carol@example.com", "account_role": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID mismatch");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/account/{carol_id}"),
        Some(&admin),
        Some(json!({ "account_id": carol_id, "account_name": "Carol B", "account_email": "carol@example.com", "account_role": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["account_name"], "Carol B");
    assert_eq!(updated["account_role"], 1);

    // password untouched by the update above
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "carol@example.com", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, &format!("/api/account/{carol_id}/can-delete"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["can_delete"], true);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/account/{carol_id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account deleted successfully");

    let (status, _) = send(&app, Method::GET, &format!("/api/account/{carol_id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/account/{carol_id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn staff_manages_categories_tags_and_articles() {
    let app = build_test_app();
    let (staff, staff_id) = register(&app, "writer", 1).await;

    let (status, news) = send(
        &app,
        Method::POST,
        "/api/category",
        Some(&staff),
        Some(json!({ "category_name": "News", "category_description": "All news" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let news_id = news["category_id"].as_str().unwrap().to_string();

    let (status, sports) = send(
        &app,
        Method::POST,
        "/api/category",
        Some(&staff),
        Some(json!({ "category_name": "Sports", "parent_category_id": news_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sports["parent_category_name"], "News");
    let sports_id = sports["category_id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/category",
        Some(&staff),
        Some(json!({ "category_name": "Orphan", "parent_category_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, detail) = send(&app, Method::GET, &format!("/api/category/{news_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["sub_categories"].as_array().unwrap().len(), 1);

    let (status, roots) = send(&app, Method::GET, "/api/category/subcategories", Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roots.as_array().unwrap().len(), 1);

    let (status, tag) = send(&app, Method::POST, "/api/tags", Some(&staff), Some(json!({ "tag_name": "football" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let tag_id = tag["tag_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::POST, "/api/tags", Some(&staff), Some(json!({ "tag_name": "Football" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Tag name already exists");

    let (status, article) = send(
        &app,
        Method::POST,
        "/api/newsarticle",
        Some(&staff),
        Some(json!({
            "news_title": "Cup final",
            "headline": "Home side wins",
            "news_content": "A long match report.",
            "category_id": sports_id,
            "tag_ids": [tag_id]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(article["created_by_id"], staff_id.as_str());
    assert_eq!(article["category_name"], "Sports");
    assert_eq!(article["tags"][0]["tag_name"], "football");
    let article_id = article["news_article_id"].as_str().unwrap().to_string();

    let (status, tagged) = send(&app, Method::GET, &format!("/api/newsarticle/tag/{tag_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tagged.as_array().unwrap().len(), 1);

    let (status, in_category) =
        send(&app, Method::GET, &format!("/api/newsarticle/category/{sports_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(in_category.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/category/{sports_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/category/{news_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/newsarticle/{article_id}"),
        Some(&staff),
        Some(json!({
            "news_article_id": article_id,
            "news_title": "Cup final",
            "headline": "Home side wins on penalties",
            "news_content": "A longer match report.",
            "category_id": sports_id,
            "news_status": false,
            "tag_ids": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["updated_by_id"], staff_id.as_str());
    assert!(updated["modified_date"].is_string());
    assert_eq!(updated["tags"].as_array().unwrap().len(), 0);

    let (status, active) = send(&app, Method::GET, "/api/newsarticle/active", Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(active.as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, &format!("/api/newsarticle/{article_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/newsarticle/{article_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/category/{sports_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/category/{news_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/tags/{tag_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/tags/{tag_id}"), Some(&staff), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn article_creation_checks_category() {
    let app = build_test_app();
    let (staff, _) = register(&app, "writer", 1).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/newsarticle",
        Some(&staff),
        Some(json!({
            "news_title": "Lost",
            "headline": "No home",
            "news_content": "Body",
            "category_id": Uuid::new_v4()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Category does not exist");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = build_test_app();
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/newsarticle"].is_object());
}
