// src/models/bookkeeping.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Resumo contábil derivado das saídas:
// receita = Σ(qtd · preço de venda - desconto), custo = Σ(qtd · preço de compra).
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookkeepingSummary {
    pub entries: i64,
    pub items_sold: i64,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

// Uma linha do fechamento mensal.
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBookkeepingEntry {
    pub month: Option<String>, // O SQL retorna o mês como string (YYYY-MM)
    pub entries: Option<i64>,
    pub revenue: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub profit: Option<Decimal>,
}
