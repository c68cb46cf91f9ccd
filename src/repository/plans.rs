//! Lubrication plans repository, including the execution write path

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        history::{HistoryEntry, RegisterExecution},
        plan::{LubricationPlan, PlanDetails, UpdatePlan},
    },
};

const PLAN_DETAILS_SELECT: &str = r#"
    SELECT p.id, p.equipment_id, e.name AS equipment_name, e.criticality,
           e.status AS equipment_status, p.lubricant_type, p.quantity_grams,
           p.interval_days, p.last_service_date, p.next_due_date
    FROM lubrication_plans p
    JOIN equipment e ON e.id = p.equipment_id
"#;

#[derive(Clone)]
pub struct PlansRepository {
    pool: Pool<Postgres>,
}

impl PlansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get plan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<LubricationPlan> {
        sqlx::query_as::<_, LubricationPlan>("SELECT * FROM lubrication_plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Plan {} not found", id)))
    }

    /// Get the current plan of an equipment unit
    pub async fn get_by_equipment(&self, equipment_id: i32) -> AppResult<LubricationPlan> {
        sqlx::query_as::<_, LubricationPlan>(
            "SELECT * FROM lubrication_plans WHERE equipment_id = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No plan for equipment {}", equipment_id)))
    }

    /// All plans with their equipment attributes
    pub async fn list_details(&self) -> AppResult<Vec<PlanDetails>> {
        let query = format!("{} ORDER BY p.next_due_date, p.id", PLAN_DETAILS_SELECT);
        let rows = sqlx::query_as::<_, PlanDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Plans of active equipment falling due on or before `until`
    pub async fn list_due_candidates(&self, until: DateTime<Utc>) -> AppResult<Vec<PlanDetails>> {
        let query = format!(
            "{} WHERE p.next_due_date <= $1 AND e.status = 'active' ORDER BY p.next_due_date, p.id",
            PLAN_DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, PlanDetails>(&query)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Edit interval, quantity or lubricant.
    ///
    /// `last_service_date` is kept; `next_due_date` is recomputed from it in
    /// the same statement. Hours rather than days keep the offset independent
    /// of the session time zone.
    pub async fn update(&self, id: i32, data: &UpdatePlan) -> AppResult<LubricationPlan> {
        sqlx::query_as::<_, LubricationPlan>(
            r#"
            UPDATE lubrication_plans SET
                lubricant_type = COALESCE($2, lubricant_type),
                quantity_grams = COALESCE($3, quantity_grams),
                interval_days = COALESCE($4, interval_days),
                next_due_date = last_service_date
                    + make_interval(hours => COALESCE($4, interval_days) * 24),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.lubricant_type)
        .bind(data.quantity_grams)
        .bind(data.interval_days)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Plan {} not found", id)))
    }

    /// Append a history entry and advance the plan, as one transaction.
    ///
    /// The plan row is locked for the duration; a competing registration on
    /// the same plan waits up to `lock_timeout_ms` and then fails with a
    /// lock error the caller may retry.
    pub async fn register_execution(
        &self,
        plan_id: i32,
        executed_at: DateTime<Utc>,
        data: &RegisterExecution,
        lock_timeout_ms: u64,
    ) -> AppResult<(HistoryEntry, LubricationPlan)> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("SET LOCAL lock_timeout = '{}ms'", lock_timeout_ms))
            .execute(&mut *tx)
            .await?;

        let plan = sqlx::query_as::<_, LubricationPlan>(
            "SELECT * FROM lubrication_plans WHERE id = $1 FOR UPDATE",
        )
        .bind(plan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Plan {} not found", plan_id)))?;

        let entry = sqlx::query_as::<_, HistoryEntry>(
            r#"
            INSERT INTO lubrication_history (plan_id, executed_at, quantity_applied, technician, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(executed_at)
        .bind(data.quantity_applied)
        .bind(data.technician.trim())
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, LubricationPlan>(
            r#"
            UPDATE lubrication_plans
            SET last_service_date = $1, next_due_date = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(executed_at)
        .bind(plan.due_after(executed_at)?)
        .bind(plan.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((entry, updated))
    }
}
