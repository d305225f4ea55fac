// src/models/goods.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Lançamento de entrada no razão de estoque.
// `product_code` referencia products.code por valor (sem FK); os campos
// descritivos são um snapshot do produto no momento do lançamento.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomingGood {
    pub id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub quantity: i32,
    pub date: NaiveDate,
    pub resi_number: Option<String>,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Lançamento de saída. Mesmo formato da entrada, mais os valores
// usados pela contabilidade (margem).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingGood {
    pub id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub category: String,
    pub brand: String,
    pub quantity: i32,
    pub date: NaiveDate,
    pub resi_number: Option<String>,
    pub platform: Option<String>,
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub discount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
