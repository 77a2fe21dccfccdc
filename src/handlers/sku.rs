// src/handlers/sku.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::sku::{NewSku, Sku, SkuInput, SkuStatus},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkuPayload {
    #[validate(
        required(message = "O campo 'description' é obrigatório."),
        length(min = 1, max = 100, message = "A descrição deve ter entre 1 e 100 caracteres.")
    )]
    #[schema(example = "Produto de exemplo")]
    pub description: Option<String>,

    #[validate(
        required(message = "O campo 'commercialDescription' é obrigatório."),
        length(min = 1, max = 100, message = "A descrição comercial deve ter entre 1 e 100 caracteres.")
    )]
    #[schema(example = "Descrição comercial do produto")]
    pub commercial_description: Option<String>,

    #[validate(
        required(message = "O campo 'sku' é obrigatório."),
        length(min = 1, max = 100, message = "O SKU deve ter entre 1 e 100 caracteres.")
    )]
    #[schema(example = "PROD-001")]
    pub sku: Option<String>,
}

impl From<CreateSkuPayload> for NewSku {
    // Só é chamado depois de `validate()`, então os campos estão presentes.
    fn from(payload: CreateSkuPayload) -> Self {
        NewSku {
            description: payload.description.unwrap_or_default(),
            commercial_description: payload.commercial_description.unwrap_or_default(),
            sku: payload.sku.unwrap_or_default(),
        }
    }
}

/// Todos os campos são opcionais; quais podem mudar depende do status atual.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkuPayload {
    #[validate(length(min = 1, max = 100, message = "A descrição deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "Produto de exemplo")]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "A descrição comercial deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "Descrição comercial detalhada")]
    pub commercial_description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "O SKU deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "PROD-001")]
    pub sku: Option<String>,
}

impl From<UpdateSkuPayload> for SkuInput {
    fn from(payload: UpdateSkuPayload) -> Self {
        SkuInput {
            description: payload.description,
            commercial_description: payload.commercial_description,
            sku: payload.sku,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusPayload {
    // String crua: tokens desconhecidos viram UnknownStatus, não erro de JSON
    #[validate(required(message = "O campo 'status' é obrigatório."))]
    #[schema(example = "ATIVO")]
    pub status: Option<String>,
}

// ---
// Handlers
// ---

// POST /api/sku
#[utoipa::path(
    post,
    path = "/api/sku",
    tag = "SKU",
    request_body = CreateSkuPayload,
    responses(
        (status = 201, description = "SKU criado com status PRE_CADASTRO", body = Sku),
        (status = 400, description = "Dados inválidos fornecidos"),
        (status = 409, description = "Já existe um SKU com este código")
    )
)]
pub async fn create_sku(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSkuPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sku = app_state.sku_service.create(payload.into()).await?;
    tracing::info!(id = %sku.id, sku = %sku.sku, "SKU criado");

    Ok((StatusCode::CREATED, Json(sku)))
}

// GET /api/sku
#[utoipa::path(
    get,
    path = "/api/sku",
    tag = "SKU",
    responses(
        (status = 200, description = "Lista de SKUs em ordem de criação", body = [Sku])
    )
)]
pub async fn list_skus(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let skus = app_state.sku_service.find_all().await?;
    Ok((StatusCode::OK, Json(skus)))
}

// GET /api/sku/{sku}
#[utoipa::path(
    get,
    path = "/api/sku/{sku}",
    tag = "SKU",
    params(("sku" = String, Path, description = "Código único do SKU")),
    responses(
        (status = 200, description = "SKU encontrado", body = Sku),
        (status = 404, description = "SKU não encontrado")
    )
)]
pub async fn get_sku_by_code(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sku = app_state.sku_service.find_by_code(&code).await?;
    Ok((StatusCode::OK, Json(sku)))
}

// GET /api/sku/id/{id}
#[utoipa::path(
    get,
    path = "/api/sku/id/{id}",
    tag = "SKU",
    params(("id" = Uuid, Path, description = "ID único do SKU (UUID)")),
    responses(
        (status = 200, description = "SKU encontrado", body = Sku),
        (status = 404, description = "SKU não encontrado")
    )
)]
pub async fn get_sku_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sku = app_state.sku_service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(sku)))
}

// PUT /api/sku/{id}
#[utoipa::path(
    put,
    path = "/api/sku/{id}",
    tag = "SKU",
    request_body = UpdateSkuPayload,
    params(("id" = Uuid, Path, description = "ID único do SKU (UUID)")),
    responses(
        (status = 200, description = "SKU atualizado (ou inalterado, se nada mudou)", body = Sku),
        (status = 400, description = "Dados inválidos ou campo não editável para o status atual"),
        (status = 404, description = "SKU não encontrado"),
        (status = 409, description = "Já existe um SKU com este código")
    )
)]
pub async fn update_sku(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSkuPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sku = app_state.sku_service.update(id, payload.into()).await?;
    tracing::info!(id = %sku.id, status = %sku.status, "SKU atualizado");

    Ok((StatusCode::OK, Json(sku)))
}

// PUT /api/sku/{id}/status
#[utoipa::path(
    put,
    path = "/api/sku/{id}/status",
    tag = "SKU",
    request_body = UpdateStatusPayload,
    params(("id" = Uuid, Path, description = "ID único do SKU (UUID)")),
    responses(
        (status = 200, description = "Status do SKU atualizado", body = Sku),
        (status = 400, description = "Status desconhecido ou transição não permitida"),
        (status = 404, description = "SKU não encontrado")
    )
)]
pub async fn update_sku_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let new_status: SkuStatus = payload.status.unwrap_or_default().parse()?;

    let sku = app_state.sku_service.update_status(id, new_status).await?;
    tracing::info!(id = %sku.id, status = %sku.status, "Status do SKU alterado");

    Ok((StatusCode::OK, Json(sku)))
}
