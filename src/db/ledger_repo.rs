// src/db/ledger_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{ConsistencyTotals, ProductDrift},
        goods::{IncomingGood, OutgoingGood},
    },
};

#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Ajustes de saldo
    // ---
    // Os três comandos abaixo são a única porta de escrita em
    // products.current_stock. Cada um é uma instrução SQL única.

    /// Ajuste incondicional (entradas, compensações que só creditam).
    /// Retorna 0 linhas quando o código não corresponde a produto algum.
    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        product_code: &str,
        delta: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET current_stock = current_stock + $2, updated_at = NOW()
            WHERE code = $1
            "#,
        )
            .bind(product_code)
            .bind(delta)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Débito condicional: checagem e decremento na MESMA instrução.
    /// Duas saídas concorrentes nunca conseguem ambas passar do saldo;
    /// a que chegar depois vê 0 linhas afetadas.
    pub async fn deduct_stock_guarded<'e, E>(
        &self,
        executor: E,
        product_code: &str,
        quantity: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET current_stock = current_stock - $2, updated_at = NOW()
            WHERE code = $1 AND current_stock >= $2
            "#,
        )
            .bind(product_code)
            .bind(quantity)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Recomputa o saldo de todos os produtos a partir do histórico,
    /// numa única instrução (leitores concorrentes nunca veem varredura
    /// pela metade). Idempotente.
    pub async fn recompute_all<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products p
            SET current_stock = p.initial_stock
                + COALESCE((SELECT SUM(i.quantity) FROM incoming_goods i WHERE i.product_code = p.code), 0)
                - COALESCE((SELECT SUM(o.quantity) FROM outgoing_goods o WHERE o.product_code = p.code), 0),
                updated_at = NOW()
            "#,
        )
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn product_exists<'e, E>(
        &self,
        executor: E,
        product_code: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE code = $1)",
        )
            .bind(product_code)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    // ---
    // Reconciliação
    // ---

    /// Somatórios integrais para o confronto global (nunca por período).
    pub async fn consistency_totals(&self) -> Result<ConsistencyTotals, AppError> {
        let totals = sqlx::query_as::<_, ConsistencyTotals>(
            r#"
            SELECT
                (SELECT COALESCE(SUM(current_stock), 0) FROM products)  AS total_stock,
                (SELECT COALESCE(SUM(initial_stock), 0) FROM products)  AS total_initial,
                (SELECT COALESCE(SUM(quantity), 0) FROM incoming_goods) AS total_incoming,
                (SELECT COALESCE(SUM(quantity), 0) FROM outgoing_goods) AS total_outgoing
            "#,
        )
            .fetch_one(&self.pool)
            .await?;
        Ok(totals)
    }

    /// Produtos cujo saldo gravado difere do derivado. O confronto global
    /// pode se anular entre produtos; este não.
    pub async fn per_product_drift(&self) -> Result<Vec<ProductDrift>, AppError> {
        let drifts = sqlx::query_as::<_, ProductDrift>(
            r#"
            SELECT
                p.code,
                p.name,
                p.current_stock,
                p.initial_stock + COALESCE(i.total, 0) - COALESCE(o.total, 0) AS calculated_stock,
                p.current_stock - (p.initial_stock + COALESCE(i.total, 0) - COALESCE(o.total, 0)) AS difference
            FROM products p
            LEFT JOIN (
                SELECT product_code, SUM(quantity) AS total
                FROM incoming_goods GROUP BY product_code
            ) i ON i.product_code = p.code
            LEFT JOIN (
                SELECT product_code, SUM(quantity) AS total
                FROM outgoing_goods GROUP BY product_code
            ) o ON o.product_code = p.code
            WHERE p.current_stock <> p.initial_stock + COALESCE(i.total, 0) - COALESCE(o.total, 0)
            ORDER BY p.code ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(drifts)
    }

    // ---
    // Entradas
    // ---

    pub async fn insert_incoming<'e, E>(
        &self,
        executor: E,
        product_code: &str,
        product_name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        date: NaiveDate,
        resi_number: Option<&str>,
        platform: Option<&str>,
    ) -> Result<IncomingGood, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, IncomingGood>(
            r#"
            INSERT INTO incoming_goods
                (product_code, product_name, category, brand, quantity, date, resi_number, platform)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
            .bind(product_code)
            .bind(product_name)
            .bind(category)
            .bind(brand)
            .bind(quantity)
            .bind(date)
            .bind(resi_number)
            .bind(platform)
            .fetch_one(executor)
            .await?;
        Ok(entry)
    }

    pub async fn find_incoming<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<IncomingGood>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_entry = sqlx::query_as::<_, IncomingGood>(
            "SELECT * FROM incoming_goods WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(maybe_entry)
    }

    pub async fn update_incoming<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        product_code: &str,
        product_name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        date: NaiveDate,
        resi_number: Option<&str>,
        platform: Option<&str>,
    ) -> Result<IncomingGood, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, IncomingGood>(
            r#"
            UPDATE incoming_goods
            SET product_code = $2, product_name = $3, category = $4, brand = $5,
                quantity = $6, date = $7, resi_number = $8, platform = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(product_code)
            .bind(product_name)
            .bind(category)
            .bind(brand)
            .bind(quantity)
            .bind(date)
            .bind(resi_number)
            .bind(platform)
            .fetch_one(executor)
            .await?;
        Ok(entry)
    }

    pub async fn delete_incoming<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM incoming_goods WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_incoming(
        &self,
        search: &str,
        start: Option<NaiveDate>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<IncomingGood>, AppError> {
        let entries = sqlx::query_as::<_, IncomingGood>(
            r#"
            SELECT * FROM incoming_goods
            WHERE ($1 = ''
                OR product_code ILIKE '%' || $1 || '%'
                OR product_name ILIKE '%' || $1 || '%'
                OR resi_number ILIKE '%' || $1 || '%')
              AND ($2::date IS NULL OR date >= $2)
            ORDER BY date DESC, created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
            .bind(search)
            .bind(start)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    // ---
    // Saídas
    // ---

    pub async fn insert_outgoing<'e, E>(
        &self,
        executor: E,
        product_code: &str,
        product_name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        date: NaiveDate,
        resi_number: Option<&str>,
        platform: Option<&str>,
        purchase_price: Decimal,
        selling_price: Decimal,
        discount: Decimal,
    ) -> Result<OutgoingGood, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, OutgoingGood>(
            r#"
            INSERT INTO outgoing_goods
                (product_code, product_name, category, brand, quantity, date,
                 resi_number, platform, purchase_price, selling_price, discount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
            .bind(product_code)
            .bind(product_name)
            .bind(category)
            .bind(brand)
            .bind(quantity)
            .bind(date)
            .bind(resi_number)
            .bind(platform)
            .bind(purchase_price)
            .bind(selling_price)
            .bind(discount)
            .fetch_one(executor)
            .await?;
        Ok(entry)
    }

    pub async fn find_outgoing<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<OutgoingGood>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_entry = sqlx::query_as::<_, OutgoingGood>(
            "SELECT * FROM outgoing_goods WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(maybe_entry)
    }

    pub async fn update_outgoing<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        product_code: &str,
        product_name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        date: NaiveDate,
        resi_number: Option<&str>,
        platform: Option<&str>,
        purchase_price: Decimal,
        selling_price: Decimal,
        discount: Decimal,
    ) -> Result<OutgoingGood, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, OutgoingGood>(
            r#"
            UPDATE outgoing_goods
            SET product_code = $2, product_name = $3, category = $4, brand = $5,
                quantity = $6, date = $7, resi_number = $8, platform = $9,
                purchase_price = $10, selling_price = $11, discount = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(product_code)
            .bind(product_name)
            .bind(category)
            .bind(brand)
            .bind(quantity)
            .bind(date)
            .bind(resi_number)
            .bind(platform)
            .bind(purchase_price)
            .bind(selling_price)
            .bind(discount)
            .fetch_one(executor)
            .await?;
        Ok(entry)
    }

    pub async fn delete_outgoing<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM outgoing_goods WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_outgoing(
        &self,
        search: &str,
        start: Option<NaiveDate>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OutgoingGood>, AppError> {
        let entries = sqlx::query_as::<_, OutgoingGood>(
            r#"
            SELECT * FROM outgoing_goods
            WHERE ($1 = ''
                OR product_code ILIKE '%' || $1 || '%'
                OR product_name ILIKE '%' || $1 || '%'
                OR resi_number ILIKE '%' || $1 || '%')
              AND ($2::date IS NULL OR date >= $2)
            ORDER BY date DESC, created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
            .bind(search)
            .bind(start)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }
}
