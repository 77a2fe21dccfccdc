use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::sku::{SkuField, SkuStatus};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("SKU não encontrado: {0}")]
    SkuNotFound(String),

    #[error("Já existe um SKU com o código {0}")]
    SkuCodeAlreadyExists(String),

    #[error("SKU com status {0} não é editável")]
    SkuNotEditable(SkuStatus),

    #[error("Campo {field} não é editável no status {status}")]
    FieldNotEditable { field: SkuField, status: SkuStatus },

    #[error("Transição de {from} para {to} não é permitida")]
    IllegalTransition { from: SkuStatus, to: SkuStatus },

    #[error("Status desconhecido: {0}")]
    UnknownStatus(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::SkuNotEditable(_)
            | AppError::FieldNotEditable { .. }
            | AppError::IllegalTransition { .. }
            | AppError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
            AppError::SkuNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SkuCodeAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(ref errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(message) => message.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            // O detalhe interno vai para o log, não para o cliente.
            ref e if status.is_server_error() => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                json!({ "error": "Ocorreu um erro inesperado." })
            }
            ref e => json!({ "error": e.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
