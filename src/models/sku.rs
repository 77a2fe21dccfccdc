// src/models/sku.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// --- Enums ---

/// Estados do ciclo de vida de um SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sku_status", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum SkuStatus {
    PreCadastro,      // Vira "PRE_CADASTRO"
    CadastroCompleto, // Vira "CADASTRO_COMPLETO"
    Ativo,
    Desativado,
    Cancelado,
}

impl SkuStatus {
    pub const ALL: [SkuStatus; 5] = [
        SkuStatus::PreCadastro,
        SkuStatus::CadastroCompleto,
        SkuStatus::Ativo,
        SkuStatus::Desativado,
        SkuStatus::Cancelado,
    ];

    /// Tabela de transições: para quais status este pode avançar.
    pub fn allowed_next(self) -> &'static [SkuStatus] {
        match self {
            SkuStatus::PreCadastro => &[SkuStatus::CadastroCompleto, SkuStatus::Cancelado],
            SkuStatus::CadastroCompleto => &[
                SkuStatus::PreCadastro,
                SkuStatus::Ativo,
                SkuStatus::Cancelado,
            ],
            SkuStatus::Ativo => &[SkuStatus::Desativado],
            SkuStatus::Desativado => &[SkuStatus::Ativo, SkuStatus::PreCadastro],
            SkuStatus::Cancelado => &[],
        }
    }

    /// Tabela de editabilidade: campos que um update simples pode alterar.
    pub fn editable_fields(self) -> &'static [SkuField] {
        match self {
            SkuStatus::PreCadastro => &[
                SkuField::Description,
                SkuField::CommercialDescription,
                SkuField::Sku,
            ],
            SkuStatus::CadastroCompleto => &[SkuField::CommercialDescription],
            SkuStatus::Ativo | SkuStatus::Desativado | SkuStatus::Cancelado => &[],
        }
    }

    pub fn can_transition_to(self, next: SkuStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_editable(self, field: SkuField) -> bool {
        self.editable_fields().contains(&field)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkuStatus::PreCadastro => "PRE_CADASTRO",
            SkuStatus::CadastroCompleto => "CADASTRO_COMPLETO",
            SkuStatus::Ativo => "ATIVO",
            SkuStatus::Desativado => "DESATIVADO",
            SkuStatus::Cancelado => "CANCELADO",
        }
    }
}

impl fmt::Display for SkuStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Tokens desconhecidos são rejeitados, nunca repassados adiante.
impl FromStr for SkuStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkuStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::UnknownStatus(s.to_string()))
    }
}

/// Campos mutáveis de um SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkuField {
    Description,
    CommercialDescription,
    Sku,
}

impl SkuField {
    pub const ALL: [SkuField; 3] = [
        SkuField::Description,
        SkuField::CommercialDescription,
        SkuField::Sku,
    ];

    // Nome do campo como aparece no JSON
    pub fn as_str(self) -> &'static str {
        match self {
            SkuField::Description => "description",
            SkuField::CommercialDescription => "commercialDescription",
            SkuField::Sku => "sku",
        }
    }
}

impl fmt::Display for SkuField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: Uuid,
    #[schema(example = "Produto de exemplo")]
    pub description: String,
    #[schema(example = "Descrição comercial detalhada")]
    pub commercial_description: String,
    #[schema(example = "PROD-001")]
    pub sku: String,
    pub status: SkuStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sku {
    pub fn field(&self, field: SkuField) -> &str {
        match field {
            SkuField::Description => &self.description,
            SkuField::CommercialDescription => &self.commercial_description,
            SkuField::Sku => &self.sku,
        }
    }
}

/// Dados para cadastrar um SKU novo (o status é sempre PRE_CADASTRO).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSku {
    pub description: String,
    pub commercial_description: String,
    pub sku: String,
}

/// Alteração parcial: `None` deixa o campo como está.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkuInput {
    pub description: Option<String>,
    pub commercial_description: Option<String>,
    pub sku: Option<String>,
}

impl SkuInput {
    pub fn field(&self, field: SkuField) -> Option<&str> {
        match field {
            SkuField::Description => self.description.as_deref(),
            SkuField::CommercialDescription => self.commercial_description.as_deref(),
            SkuField::Sku => self.sku.as_deref(),
        }
    }

    /// Campos presentes cujo valor difere do registro atual.
    pub fn changed_fields(&self, current: &Sku) -> Vec<SkuField> {
        SkuField::ALL
            .into_iter()
            .filter(|&field| {
                self.field(field)
                    .is_some_and(|value| value != current.field(field))
            })
            .collect()
    }

    /// Mantém apenas os campos indicados.
    pub fn only(&self, fields: &[SkuField]) -> SkuInput {
        let pick = |field: SkuField, value: &Option<String>| {
            if fields.contains(&field) { value.clone() } else { None }
        };

        SkuInput {
            description: pick(SkuField::Description, &self.description),
            commercial_description: pick(
                SkuField::CommercialDescription,
                &self.commercial_description,
            ),
            sku: pick(SkuField::Sku, &self.sku),
        }
    }
}
