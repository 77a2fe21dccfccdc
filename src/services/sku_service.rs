// src/services/sku_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SkuRepository,
    models::sku::{NewSku, Sku, SkuField, SkuInput, SkuStatus},
};

/// Casos de uso do SKU: cadastro, edição, mudança de status e consultas.
///
/// As regras de transição e de editabilidade vêm de `SkuStatus`; aqui elas
/// são aplicadas contra o estado atual do registro. Cada operação faz no
/// máximo uma leitura seguida de escrita, sem trava (último a escrever vence).
#[derive(Clone)]
pub struct SkuService {
    repo: Arc<dyn SkuRepository>,
}

impl SkuService {
    pub fn new(repo: Arc<dyn SkuRepository>) -> Self {
        Self { repo }
    }

    fn validate_transition(from: SkuStatus, to: SkuStatus) -> Result<(), AppError> {
        if !from.can_transition_to(to) {
            return Err(AppError::IllegalTransition { from, to });
        }
        Ok(())
    }

    fn validate_editable(status: SkuStatus, changed: &[SkuField]) -> Result<(), AppError> {
        if status.editable_fields().is_empty() {
            return Err(AppError::SkuNotEditable(status));
        }

        match changed.iter().find(|&&field| !status.is_editable(field)) {
            Some(&field) => Err(AppError::FieldNotEditable { field, status }),
            None => Ok(()),
        }
    }

    // --- CREATE ---
    pub async fn create(&self, new_sku: NewSku) -> Result<Sku, AppError> {
        if self.repo.find_by_code(&new_sku.sku).await?.is_some() {
            return Err(AppError::SkuCodeAlreadyExists(new_sku.sku));
        }

        // O repositório força PRE_CADASTRO e gera id/datas
        self.repo.insert(&new_sku).await
    }

    // --- UPDATE ---
    pub async fn update(&self, id: Uuid, input: SkuInput) -> Result<Sku, AppError> {
        let current = self.find_by_id(id).await?;

        // 1. Nada mudou de fato: devolve o registro sem tocar em updated_at
        let changed = input.changed_fields(&current);
        if changed.is_empty() {
            return Ok(current);
        }

        // 2. Unicidade do código
        if let Some(code) = input.sku.as_deref().filter(|_| changed.contains(&SkuField::Sku)) {
            if let Some(other) = self.repo.find_by_code(code).await? {
                if other.id != id {
                    return Err(AppError::SkuCodeAlreadyExists(code.to_string()));
                }
            }
        }

        // 3. Regras de editabilidade do status atual
        Self::validate_editable(current.status, &changed)?;

        // 4. Persiste só o que mudou
        self.repo.apply_partial_update(id, &input.only(&changed)).await?;

        // 5. Alterar a descrição comercial fora do rascunho volta o SKU para PRE_CADASTRO
        let touches_commercial = input
            .commercial_description
            .as_deref()
            .is_some_and(|value| !value.is_empty());
        if touches_commercial && current.status != SkuStatus::PreCadastro {
            return self.update_status(id, SkuStatus::PreCadastro).await;
        }

        self.find_by_id(id).await
    }

    // --- TRANSIÇÃO ---
    pub async fn update_status(&self, id: Uuid, new_status: SkuStatus) -> Result<Sku, AppError> {
        let current = self.find_by_id(id).await?;

        Self::validate_transition(current.status, new_status)?;

        self.repo.apply_status_change(id, new_status).await?;
        self.find_by_id(id).await
    }

    // --- CONSULTAS ---
    pub async fn find_by_id(&self, id: Uuid) -> Result<Sku, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::SkuNotFound(id.to_string()))
    }

    pub async fn find_by_code(&self, sku: &str) -> Result<Sku, AppError> {
        self.repo
            .find_by_code(sku)
            .await?
            .ok_or_else(|| AppError::SkuNotFound(sku.to_string()))
    }

    pub async fn find_all(&self) -> Result<Vec<Sku>, AppError> {
        self.repo.find_all().await
    }
}
