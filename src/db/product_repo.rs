// src/db/product_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::product::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Funções de leitura são simples e usam a pool principal.

    pub async fn list(
        &self,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1 = ''
                OR code ILIKE '%' || $1 || '%'
                OR name ILIKE '%' || $1 || '%'
                OR brand ILIKE '%' || $1 || '%')
            ORDER BY name ASC
            LIMIT $2 OFFSET $3
            "#,
        )
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let maybe_product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_product)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---
    // Usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    pub async fn exists_by_code<'e, E>(
        &self,
        executor: E,
        code: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE code = $1)",
        )
            .bind(code)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    /// Cadastra um produto; o saldo nasce igual ao estoque inicial.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        barcode_id: Option<&str>,
        initial_stock: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (code, name, category, brand, barcode_id, initial_stock, current_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
            .bind(code)
            .bind(name)
            .bind(category)
            .bind(brand)
            .bind(barcode_id)
            .bind(initial_stock)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::ProductCodeAlreadyExists(code.to_string());
                    }
                }
                e.into()
            })
    }

    /// Atualiza o cadastro. Se o estoque inicial mudar, o saldo é
    /// deslocado pelo mesmo delta na mesma instrução, preservando
    /// `current_stock == initial_stock + Σentradas - Σsaídas`.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        barcode_id: Option<&str>,
        initial_stock: i32,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET code = $2,
                name = $3,
                category = $4,
                brand = $5,
                barcode_id = $6,
                current_stock = current_stock + ($7 - initial_stock),
                initial_stock = $7,
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
            .bind(barcode_id)
            .bind(initial_stock)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::ProductCodeAlreadyExists(code.to_string());
                    }
                }
                e.into()
            })
    }

    // A exclusão não mexe no histórico do razão: lançamentos do produto
    // apagado ficam órfãos (referência por valor).
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
