// src/db/order_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::order::Order};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE ($1 = ''
                OR code ILIKE '%' || $1 || '%'
                OR name ILIKE '%' || $1 || '%')
            ORDER BY order_date DESC, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        platform: Option<&str>,
        order_date: NaiveDate,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (code, name, category, brand, quantity, platform, order_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
            .bind(code)
            .bind(name)
            .bind(category)
            .bind(brand)
            .bind(quantity)
            .bind(platform)
            .bind(order_date)
            .fetch_one(executor)
            .await?;
        Ok(order)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        platform: Option<&str>,
        order_date: NaiveDate,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET code = $2, name = $3, category = $4, brand = $5,
                quantity = $6, platform = $7, order_date = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(code)
            .bind(name)
            .bind(category)
            .bind(brand)
            .bind(quantity)
            .bind(platform)
            .bind(order_date)
            .fetch_optional(executor)
            .await?;
        Ok(maybe_order)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Busca apenas os pedidos ainda pendentes dentre os ids informados.
    pub async fn find_pending<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE id = ANY($1) AND status = 'PENDING'
            ORDER BY created_at ASC
            "#,
        )
            .bind(ids)
            .fetch_all(executor)
            .await?;
        Ok(orders)
    }

    pub async fn mark_converted<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE orders SET status = 'CONVERTED', updated_at = NOW() WHERE id = ANY($1)",
        )
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
