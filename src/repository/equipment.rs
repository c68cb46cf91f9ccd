//! Equipment repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use super::map_unique;
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, CriticalityCount, Equipment, UpdateEquipment},
        plan::{self, LubricationPlan},
        EquipmentStatus,
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with the given status, ordered by name
    pub async fn list(&self, status: EquipmentStatus, skip: i64, limit: i64) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE status = $1 ORDER BY name OFFSET $2 LIMIT $3",
        )
        .bind(status)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment and its lubrication plan in one transaction.
    ///
    /// The plan starts served at `now` and falls due `interval_days` later.
    pub async fn create(
        &self,
        data: &CreateEquipment,
        quantity_grams: Option<f64>,
        now: DateTime<Utc>,
    ) -> AppResult<(Equipment, LubricationPlan)> {
        let next_due_date = plan::due_date(now, data.interval_days)?;
        let mut tx = self.pool.begin().await?;

        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, component, criticality, location, bearing_model,
                lubricant_type, quantity_grams, interval_days, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.component)
        .bind(data.criticality)
        .bind(&data.location)
        .bind(&data.bearing_model)
        .bind(&data.lubricant_type)
        .bind(quantity_grams)
        .bind(data.interval_days)
        .bind(EquipmentStatus::Active)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique(e, || format!("Equipment '{}' already exists", data.name)))?;

        let plan = sqlx::query_as::<_, LubricationPlan>(
            r#"
            INSERT INTO lubrication_plans (
                equipment_id, lubricant_type, quantity_grams, interval_days,
                last_service_date, next_due_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $5, $5)
            RETURNING *
            "#,
        )
        .bind(equipment.id)
        .bind(&data.lubricant_type)
        .bind(quantity_grams)
        .bind(data.interval_days)
        .bind(now)
        .bind(next_due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((equipment, plan))
    }

    /// Update equipment attributes. Plans are edited separately.
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.component, "component");
        add_field!(data.criticality, "criticality");
        add_field!(data.location, "location");
        add_field!(data.bearing_model, "bearing_model");
        add_field!(data.lubricant_type, "lubricant_type");
        add_field!(data.quantity_grams, "quantity_grams");
        add_field!(data.interval_days, "interval_days");
        add_field!(data.status, "status");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.component);
        bind_field!(data.criticality);
        bind_field!(data.location);
        bind_field!(data.bearing_model);
        bind_field!(data.lubricant_type);
        bind_field!(data.quantity_grams);
        bind_field!(data.interval_days);
        bind_field!(data.status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique(e, || "Equipment name already exists".to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Change the operational state (soft delete uses `Inactive`)
    pub async fn set_status(&self, id: i32, status: EquipmentStatus) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Active equipment per criticality class
    pub async fn count_active_by_criticality(&self) -> AppResult<Vec<CriticalityCount>> {
        let rows = sqlx::query_as::<_, CriticalityCount>(
            r#"
            SELECT criticality, COUNT(*)::bigint AS count
            FROM equipment
            WHERE status = 'active'
            GROUP BY criticality
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
