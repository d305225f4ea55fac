// src/models/order.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum OrderStatus {
    Pending,
    Converted,
}

// Pedido de compra. Não afeta o estoque diretamente: a conversão em
// lote é que cria os produtos correspondentes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub quantity: i32,
    pub platform: Option<String>,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resultado da conversão em lote de pedidos em produtos.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkConvertResult {
    pub converted: usize,
    // Códigos de pedido pulados por já existirem no catálogo.
    pub skipped: Vec<String>,
}
