//! Lubrication history repository (read side; inserts happen in plans::register_execution)

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::history::HistoryEntry};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Postgres>,
}

impl HistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Latest executions, newest first, optionally for one plan
    pub async fn list(&self, plan_id: Option<i32>, limit: i64) -> AppResult<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT * FROM lubrication_history
            WHERE ($1::int IS NULL OR plan_id = $1)
            ORDER BY executed_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(plan_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Latest executions across all plans of one equipment unit
    pub async fn list_for_equipment(&self, equipment_id: i32, limit: i64) -> AppResult<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT h.* FROM lubrication_history h
            JOIN lubrication_plans p ON p.id = h.plan_id
            WHERE p.equipment_id = $1
            ORDER BY h.executed_at DESC, h.id DESC
            LIMIT $2
            "#,
        )
        .bind(equipment_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
