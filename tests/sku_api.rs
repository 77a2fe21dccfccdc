use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sku_backend::{app::build_app, config::AppState, db::InMemorySkuRepository};

fn test_app() -> Router {
    build_app(AppState::with_repository(Arc::new(InMemorySkuRepository::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, code: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/sku",
        Some(json!({
            "description": "Produto",
            "commercialDescription": "Desc",
            "sku": code,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn set_status(app: &Router, id: &str, status: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::PUT,
        &format!("/api/sku/{id}/status"),
        Some(json!({ "status": status })),
    )
    .await
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let response = test_app()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_lists_sku_paths() {
    let app = test_app();
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/sku").is_some());
    assert!(doc["paths"].get("/api/sku/{id}/status").is_some());
}

#[tokio::test]
async fn create_then_fetch_by_id_and_code() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;

    assert_eq!(created["status"], "PRE_CADASTRO");
    assert_eq!(created["commercialDescription"], "Desc");
    let id = created["id"].as_str().unwrap();

    let (status, by_id) = send(&app, Method::GET, &format!("/api/sku/id/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id, created);

    let (status, by_code) = send(&app, Method::GET, "/api/sku/PROD-001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_code, created);
}

#[tokio::test]
async fn list_returns_all_in_creation_order() {
    let app = test_app();

    let (status, empty) = send(&app, Method::GET, "/api/sku", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));

    create(&app, "SKU-001").await;
    create(&app, "SKU-002").await;

    let (_, list) = send(&app, Method::GET, "/api/sku", None).await;
    let codes: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["sku"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["SKU-001", "SKU-002"]);
}

#[tokio::test]
async fn unknown_id_and_code_are_404() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/sku/id/123e4567-e89b-12d3-a456-426614174000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("123e4567"));

    let (status, _) = send(&app, Method::GET, "/api/sku/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_code_is_409() {
    let app = test_app();
    create(&app, "PROD-001").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sku",
        Some(json!({
            "description": "Outro",
            "commercialDescription": "Outra",
            "sku": "PROD-001",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("PROD-001"));
}

#[tokio::test]
async fn invalid_create_payload_reports_field_details() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sku",
        Some(json!({
            "description": "",
            "sku": "x".repeat(101),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // description vazia, descrição comercial ausente, sku longo demais
    let details = body["details"].as_object().unwrap();
    assert_eq!(details.len(), 3);
    assert!(details.contains_key("description"));
    assert!(details.contains_key("sku"));
}

#[tokio::test]
async fn update_in_draft_changes_fields() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/sku/{id}"),
        Some(json!({ "description": "Novo", "sku": "PROD-002" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["description"], "Novo");
    assert_eq!(updated["sku"], "PROD-002");
    assert_eq!(updated["status"], "PRE_CADASTRO");
}

#[tokio::test]
async fn identical_update_returns_record_unchanged() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/sku/{id}"),
        Some(json!({
            "description": "Produto",
            "commercialDescription": "Desc",
            "sku": "PROD-001",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn commercial_description_edit_resets_status() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = set_status(&app, id, "CADASTRO_COMPLETO").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/sku/{id}"),
        Some(json!({ "commercialDescription": "Y" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["commercialDescription"], "Y");
    assert_eq!(body["status"], "PRE_CADASTRO");
}

#[tokio::test]
async fn field_not_editable_is_400_with_field_name() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;
    let id = created["id"].as_str().unwrap();
    set_status(&app, id, "CADASTRO_COMPLETO").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/sku/{id}"),
        Some(json!({ "sku": "PROD-999" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("sku"));
    assert!(message.contains("CADASTRO_COMPLETO"));
}

#[tokio::test]
async fn unknown_status_token_is_rejected() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = set_status(&app, id, "ARQUIVADO").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("ARQUIVADO"));

    let (status, _) = send(&app, Method::PUT, &format!("/api/sku/{id}/status"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // O registro continua como estava
    let (_, stored) = send(&app, Method::GET, &format!("/api/sku/id/{id}"), None).await;
    assert_eq!(stored["status"], "PRE_CADASTRO");
}

#[tokio::test]
async fn lifecycle_scenario_over_http() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["status"], "PRE_CADASTRO");

    let (status, body) = set_status(&app, id, "CADASTRO_COMPLETO").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CADASTRO_COMPLETO");

    let (status, body) = set_status(&app, id, "DESATIVADO").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("DESATIVADO"));

    let (status, body) = set_status(&app, id, "ATIVO").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ATIVO");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/sku/{id}"),
        Some(json!({ "description": "New" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("ATIVO"));
}

#[tokio::test]
async fn cancelled_sku_accepts_no_transition() {
    let app = test_app();
    let created = create(&app, "PROD-001").await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = set_status(&app, id, "CANCELADO").await;
    assert_eq!(status, StatusCode::OK);

    for next in ["PRE_CADASTRO", "CADASTRO_COMPLETO", "ATIVO", "DESATIVADO", "CANCELADO"] {
        let (status, _) = set_status(&app, id, next).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "CANCELADO -> {next}");
    }
}
