// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::error::AppError;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // (quantidade de produtos, soma dos saldos)
    pub async fn product_totals(&self) -> Result<(i64, i64), AppError> {
        let totals = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COALESCE(SUM(current_stock), 0) FROM products",
        )
            .fetch_one(&self.pool)
            .await?;
        Ok(totals)
    }

    // (lançamentos, soma das quantidades) de entradas na janela.
    pub async fn incoming_totals(
        &self,
        start: Option<NaiveDate>,
    ) -> Result<(i64, i64), AppError> {
        let totals = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(quantity), 0)
            FROM incoming_goods
            WHERE ($1::date IS NULL OR date >= $1)
            "#,
        )
            .bind(start)
            .fetch_one(&self.pool)
            .await?;
        Ok(totals)
    }

    // (lançamentos, soma das quantidades) de saídas na janela.
    pub async fn outgoing_totals(
        &self,
        start: Option<NaiveDate>,
    ) -> Result<(i64, i64), AppError> {
        let totals = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(quantity), 0)
            FROM outgoing_goods
            WHERE ($1::date IS NULL OR date >= $1)
            "#,
        )
            .bind(start)
            .fetch_one(&self.pool)
            .await?;
        Ok(totals)
    }

    // (receita, custo) das saídas na janela. Desconto abatido uma vez
    // por lançamento.
    pub async fn sales_totals(
        &self,
        start: Option<NaiveDate>,
    ) -> Result<(Decimal, Decimal), AppError> {
        let totals = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT
                COALESCE(SUM(quantity * selling_price - discount), 0),
                COALESCE(SUM(quantity * purchase_price), 0)
            FROM outgoing_goods
            WHERE ($1::date IS NULL OR date >= $1)
            "#,
        )
            .bind(start)
            .fetch_one(&self.pool)
            .await?;
        Ok(totals)
    }
}
