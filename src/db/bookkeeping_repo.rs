// src/db/bookkeeping_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::bookkeeping::{BookkeepingSummary, MonthlyBookkeepingEntry},
};

#[derive(Clone)]
pub struct BookkeepingRepository {
    pool: PgPool,
}

impl BookkeepingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(
        &self,
        start: Option<NaiveDate>,
    ) -> Result<BookkeepingSummary, AppError> {
        let summary = sqlx::query_as::<_, BookkeepingSummary>(
            r#"
            SELECT
                COUNT(*) AS entries,
                COALESCE(SUM(quantity), 0) AS items_sold,
                COALESCE(SUM(quantity * selling_price - discount), 0) AS revenue,
                COALESCE(SUM(quantity * purchase_price), 0) AS cost,
                COALESCE(SUM(quantity * (selling_price - purchase_price) - discount), 0) AS profit
            FROM outgoing_goods
            WHERE ($1::date IS NULL OR date >= $1)
            "#,
        )
            .bind(start)
            .fetch_one(&self.pool)
            .await?;
        Ok(summary)
    }

    // Fechamento dos últimos 12 meses com movimento.
    pub async fn monthly(&self) -> Result<Vec<MonthlyBookkeepingEntry>, AppError> {
        let entries = sqlx::query_as::<_, MonthlyBookkeepingEntry>(
            r#"
            SELECT
                to_char(date, 'YYYY-MM') AS month,
                COUNT(*) AS entries,
                SUM(quantity * selling_price - discount) AS revenue,
                SUM(quantity * purchase_price) AS cost,
                SUM(quantity * (selling_price - purchase_price) - discount) AS profit
            FROM outgoing_goods
            GROUP BY 1
            ORDER BY 1 DESC
            LIMIT 12
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }
}
