// src/db/activity_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::activity::ActivityLog};

// Trilha de auditoria. Só escreve e lista; ninguém atualiza nem apaga.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava um registro de auditoria. Chamado com `&mut *tx` quando a
    /// ação faz parte de uma transação (o registro entra ou sai junto
    /// com a mutação que o descreve).
    pub async fn record<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        action: &str,
        details: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO activity_logs (user_id, action, details) VALUES ($1, $2, $3)",
        )
            .bind(user_id)
            .bind(action)
            .bind(details)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ActivityLog>, AppError> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(logs)
    }
}
