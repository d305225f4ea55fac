// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Produto do catálogo com o saldo materializado.
//
// `current_stock` é derivado-mas-persistido: enquanto o razão está
// consistente, vale `initial_stock + Σentradas - Σsaídas`. Só o
// LedgerService escreve nesse campo (fora a inicialização no cadastro
// e o deslocamento em bloco quando `initial_stock` é editado).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub barcode_id: Option<String>,
    pub initial_stock: i32,
    pub current_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
