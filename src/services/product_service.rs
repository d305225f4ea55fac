// src/services/product_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, ProductRepository},
    models::product::Product,
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl ProductService {
    pub fn new(
        product_repo: ProductRepository,
        activity_repo: ActivityRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            product_repo,
            activity_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        search: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, AppError> {
        self.product_repo.list(search, limit, offset).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::RecordNotFound)
    }

    pub async fn create(
        &self,
        actor_id: Uuid,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        barcode_id: Option<&str>,
        initial_stock: i32,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .create(&mut *tx, code, name, category, brand, barcode_id, initial_stock)
            .await?;

        self.activity_repo
            .record(&mut *tx, actor_id, "products.create", code)
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn update(
        &self,
        actor_id: Uuid,
        id: Uuid,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        barcode_id: Option<&str>,
        initial_stock: i32,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .update(&mut *tx, id, code, name, category, brand, barcode_id, initial_stock)
            .await?
            .ok_or(AppError::RecordNotFound)?;

        self.activity_repo
            .record(&mut *tx, actor_id, "products.update", code)
            .await?;

        tx.commit().await?;
        Ok(product)
    }

    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let rows = self.product_repo.delete(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::RecordNotFound);
        }

        self.activity_repo
            .record(&mut *tx, actor_id, "products.delete", &id.to_string())
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
