// src/services/order_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ActivityRepository, OrderRepository, ProductRepository},
    models::order::{BulkConvertResult, Order},
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    product_repo: ProductRepository,
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        product_repo: ProductRepository,
        activity_repo: ActivityRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            order_repo,
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
    ) -> Result<Vec<Order>, AppError> {
        self.order_repo.list(search, limit, offset).await
    }

    pub async fn create(
        &self,
        actor_id: Uuid,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        platform: Option<&str>,
        order_date: NaiveDate,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = self
            .order_repo
            .create(&mut *tx, code, name, category, brand, quantity, platform, order_date)
            .await?;

        self.activity_repo
            .record(&mut *tx, actor_id, "orders.create", code)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn update(
        &self,
        actor_id: Uuid,
        id: Uuid,
        code: &str,
        name: &str,
        category: &str,
        brand: &str,
        quantity: i32,
        platform: Option<&str>,
        order_date: NaiveDate,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = self
            .order_repo
            .update(&mut *tx, id, code, name, category, brand, quantity, platform, order_date)
            .await?
            .ok_or(AppError::RecordNotFound)?;

        self.activity_repo
            .record(&mut *tx, actor_id, "orders.update", code)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let rows = self.order_repo.delete(&mut *tx, id).await?;
        if rows == 0 {
            return Err(AppError::RecordNotFound);
        }

        self.activity_repo
            .record(&mut *tx, actor_id, "orders.delete", &id.to_string())
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Converte pedidos pendentes em produtos novos, tudo numa
    /// transação só. Cada produto nasce com
    /// `initial_stock = current_stock = quantidade do pedido`.
    /// Pedidos cujo código já existe no catálogo são pulados e
    /// devolvidos na resposta.
    pub async fn bulk_convert(
        &self,
        actor_id: Uuid,
        order_ids: &[Uuid],
    ) -> Result<BulkConvertResult, AppError> {
        let mut tx = self.pool.begin().await?;

        let orders = self.order_repo.find_pending(&mut *tx, order_ids).await?;

        let mut converted_ids = Vec::new();
        let mut skipped = Vec::new();

        for order in &orders {
            if self.product_repo.exists_by_code(&mut *tx, &order.code).await? {
                skipped.push(order.code.clone());
                continue;
            }

            self.product_repo
                .create(
                    &mut *tx,
                    &order.code,
                    &order.name,
                    &order.category,
                    &order.brand,
                    None,
                    order.quantity,
                )
                .await?;
            converted_ids.push(order.id);
        }

        if !converted_ids.is_empty() {
            self.order_repo.mark_converted(&mut *tx, &converted_ids).await?;
        }

        self.activity_repo
            .record(
                &mut *tx,
                actor_id,
                "orders.bulk_convert",
                &format!("{} convertidos, {} pulados", converted_ids.len(), skipped.len()),
            )
            .await?;

        tx.commit().await?;
        Ok(BulkConvertResult {
            converted: converted_ids.len(),
            skipped,
        })
    }
}
