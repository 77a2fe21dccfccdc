// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SKU Management API",
        description = "API para gerenciamento de SKU",
        version = "1.0"
    ),
    paths(
        handlers::sku::create_sku,
        handlers::sku::list_skus,
        handlers::sku::get_sku_by_code,
        handlers::sku::get_sku_by_id,
        handlers::sku::update_sku,
        handlers::sku::update_sku_status,
    ),
    components(
        schemas(
            models::sku::SkuStatus,
            models::sku::Sku,

            // --- Payloads ---
            handlers::sku::CreateSkuPayload,
            handlers::sku::UpdateSkuPayload,
            handlers::sku::UpdateStatusPayload,
        )
    ),
    tags(
        (name = "SKU", description = "Operações relacionadas a SKU")
    )
)]
pub struct ApiDoc;
