// src/db/memory.rs

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SkuRepository,
    models::sku::{NewSku, Sku, SkuInput, SkuStatus},
};

/// Repositório em memória, na ordem de inserção.
///
/// Usado nos testes e para rodar a API sem Postgres. Aplica a mesma
/// regra de unicidade do índice `skus_sku_key`.
#[derive(Debug, Default)]
pub struct InMemorySkuRepository {
    skus: RwLock<Vec<Sku>>,
}

impl InMemorySkuRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned() -> AppError {
    AppError::InternalServerError(anyhow::anyhow!("lock do repositório em memória envenenado"))
}

#[async_trait]
impl SkuRepository for InMemorySkuRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sku>, AppError> {
        let skus = self.skus.read().map_err(|_| lock_poisoned())?;
        Ok(skus.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_code(&self, sku: &str) -> Result<Option<Sku>, AppError> {
        let skus = self.skus.read().map_err(|_| lock_poisoned())?;
        Ok(skus.iter().find(|s| s.sku == sku).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Sku>, AppError> {
        let skus = self.skus.read().map_err(|_| lock_poisoned())?;
        Ok(skus.clone())
    }

    async fn insert(&self, new_sku: &NewSku) -> Result<Sku, AppError> {
        let mut skus = self.skus.write().map_err(|_| lock_poisoned())?;

        if skus.iter().any(|s| s.sku == new_sku.sku) {
            return Err(AppError::SkuCodeAlreadyExists(new_sku.sku.clone()));
        }

        let now = Utc::now();
        let sku = Sku {
            id: Uuid::new_v4(),
            description: new_sku.description.clone(),
            commercial_description: new_sku.commercial_description.clone(),
            sku: new_sku.sku.clone(),
            status: SkuStatus::PreCadastro,
            created_at: now,
            updated_at: now,
        };
        skus.push(sku.clone());
        Ok(sku)
    }

    async fn apply_partial_update(&self, id: Uuid, changes: &SkuInput) -> Result<(), AppError> {
        let mut skus = self.skus.write().map_err(|_| lock_poisoned())?;

        if let Some(code) = &changes.sku {
            if skus.iter().any(|s| s.id != id && &s.sku == code) {
                return Err(AppError::SkuCodeAlreadyExists(code.clone()));
            }
        }

        let sku = skus
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::SkuNotFound(id.to_string()))?;

        if let Some(description) = &changes.description {
            sku.description = description.clone();
        }
        if let Some(commercial_description) = &changes.commercial_description {
            sku.commercial_description = commercial_description.clone();
        }
        if let Some(code) = &changes.sku {
            sku.sku = code.clone();
        }
        sku.updated_at = Utc::now().max(sku.created_at);
        Ok(())
    }

    async fn apply_status_change(&self, id: Uuid, status: SkuStatus) -> Result<(), AppError> {
        let mut skus = self.skus.write().map_err(|_| lock_poisoned())?;

        let sku = skus
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::SkuNotFound(id.to_string()))?;

        sku.status = status;
        sku.updated_at = Utc::now().max(sku.created_at);
        Ok(())
    }
}
