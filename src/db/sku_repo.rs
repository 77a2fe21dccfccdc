// src/db/sku_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sku::{NewSku, Sku, SkuInput, SkuStatus},
};

/// Contrato de persistência usado pelo `SkuService`.
///
/// O serviço nunca executa queries diretamente: tudo passa por aqui, e
/// qualquer motor de armazenamento pode implementar o trait.
#[async_trait]
pub trait SkuRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sku>, AppError>;

    async fn find_by_code(&self, sku: &str) -> Result<Option<Sku>, AppError>;

    /// Todos os registros, em ordem de criação.
    async fn find_all(&self) -> Result<Vec<Sku>, AppError>;

    /// Insere com status PRE_CADASTRO; id e datas são gerados aqui.
    async fn insert(&self, new_sku: &NewSku) -> Result<Sku, AppError>;

    /// Aplica apenas os campos presentes em `changes` e renova `updated_at`.
    async fn apply_partial_update(&self, id: Uuid, changes: &SkuInput) -> Result<(), AppError>;

    async fn apply_status_change(&self, id: Uuid, status: SkuStatus) -> Result<(), AppError>;
}

const SKU_COLUMNS: &str =
    "id, description, commercial_description, sku, status, created_at, updated_at";

#[derive(Clone)]
pub struct PgSkuRepository {
    pool: PgPool,
}

impl PgSkuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Converte violação de chave única em um erro de domínio mais amigável
fn map_unique_violation(e: sqlx::Error, sku: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::SkuCodeAlreadyExists(sku.to_string());
        }
    }
    e.into()
}

#[async_trait]
impl SkuRepository for PgSkuRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sku>, AppError> {
        let sku = sqlx::query_as::<_, Sku>(&format!("SELECT {SKU_COLUMNS} FROM skus WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sku)
    }

    async fn find_by_code(&self, sku: &str) -> Result<Option<Sku>, AppError> {
        let found = sqlx::query_as::<_, Sku>(&format!("SELECT {SKU_COLUMNS} FROM skus WHERE sku = $1"))
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found)
    }

    async fn find_all(&self) -> Result<Vec<Sku>, AppError> {
        let skus = sqlx::query_as::<_, Sku>(&format!(
            "SELECT {SKU_COLUMNS} FROM skus ORDER BY created_at ASC, id ASC"
        ))
            .fetch_all(&self.pool)
            .await?;
        Ok(skus)
    }

    async fn insert(&self, new_sku: &NewSku) -> Result<Sku, AppError> {
        sqlx::query_as::<_, Sku>(&format!(
            r#"
            INSERT INTO skus (description, commercial_description, sku, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {SKU_COLUMNS}
            "#
        ))
            .bind(&new_sku.description)
            .bind(&new_sku.commercial_description)
            .bind(&new_sku.sku)
            .bind(SkuStatus::PreCadastro)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &new_sku.sku))
    }

    async fn apply_partial_update(&self, id: Uuid, changes: &SkuInput) -> Result<(), AppError> {
        // COALESCE mantém o valor atual quando o campo não foi enviado ($n = NULL).
        let result = sqlx::query(
            r#"
            UPDATE skus SET
                description = COALESCE($2, description),
                commercial_description = COALESCE($3, commercial_description),
                sku = COALESCE($4, sku),
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            "#,
        )
            .bind(id)
            .bind(changes.description.as_deref())
            .bind(changes.commercial_description.as_deref())
            .bind(changes.sku.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, changes.sku.as_deref().unwrap_or_default()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::SkuNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn apply_status_change(&self, id: Uuid, status: SkuStatus) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE skus SET status = $2, updated_at = GREATEST(NOW(), created_at) WHERE id = $1",
        )
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::SkuNotFound(id.to_string()));
        }
        tracing::debug!(%id, %status, "status do SKU persistido");
        Ok(())
    }
}
