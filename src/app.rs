// src/app.rs

use axum::{
    routing::{get, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_app(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route(
            "/api/sku",
            get(handlers::sku::list_skus).post(handlers::sku::create_sku),
        )
        // O mesmo segmento é o código no GET e o id no PUT; o nome do
        // parâmetro tem que ser único nessa posição.
        .route(
            "/api/sku/{sku}",
            get(handlers::sku::get_sku_by_code).put(handlers::sku::update_sku),
        )
        .route("/api/sku/{sku}/status", put(handlers::sku::update_sku_status))
        .route("/api/sku/id/{id}", get(handlers::sku::get_sku_by_id))
        .with_state(app_state)
}
