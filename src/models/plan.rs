//! Lubrication plan models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{Criticality, EquipmentStatus, Urgency};
use crate::error::{AppError, AppResult};

/// Longest accepted recurrence interval, in days
pub const MAX_INTERVAL_DAYS: i32 = 3650;

/// `served_at + interval_days`, or a validation error when the date is out of range
pub fn due_date(served_at: DateTime<Utc>, interval_days: i32) -> AppResult<DateTime<Utc>> {
    served_at
        .checked_add_signed(Duration::days(i64::from(interval_days)))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Due date out of range: {} + {} days",
                served_at, interval_days
            ))
        })
}

/// Lubrication plan record.
///
/// `next_due_date` always equals `last_service_date + interval_days`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LubricationPlan {
    pub id: i32,
    pub equipment_id: i32,
    pub lubricant_type: Option<String>,
    /// Grease quantity per service, in grams
    pub quantity_grams: Option<f64>,
    /// Recurrence interval, in days
    pub interval_days: i32,
    pub last_service_date: DateTime<Utc>,
    pub next_due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LubricationPlan {
    /// Due date implied by a service at `served_at`
    pub fn due_after(&self, served_at: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        due_date(served_at, self.interval_days)
    }
}

/// Plan joined with the owning equipment's scheduling attributes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlanDetails {
    pub id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub criticality: Criticality,
    pub equipment_status: EquipmentStatus,
    pub lubricant_type: Option<String>,
    pub quantity_grams: Option<f64>,
    pub interval_days: i32,
    pub last_service_date: DateTime<Utc>,
    pub next_due_date: DateTime<Utc>,
}

/// Direct plan edit. Changing the interval keeps `last_service_date`
/// and moves `next_due_date` accordingly.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePlan {
    #[validate(length(max = 100))]
    pub lubricant_type: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be positive"))]
    pub quantity_grams: Option<f64>,
    #[validate(range(min = 1, max = 3650, message = "Interval must be 1 to 3650 days"))]
    pub interval_days: Option<i32>,
}

/// A plan inside the lookahead window, with its read-time classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpcomingPlan {
    pub plan_id: i32,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub criticality: Criticality,
    pub lubricant_type: Option<String>,
    pub quantity_grams: Option<f64>,
    pub next_due_date: DateTime<Utc>,
    /// Whole days until due, floored; negative when overdue
    pub days_remaining: i64,
    pub urgency: Urgency,
}

/// Upcoming plans query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpcomingQuery {
    /// Lookahead window in days
    pub days: Option<i64>,
}

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ScheduleSummary {
    pub horizon_days: i64,
    pub overdue: usize,
    pub due_now: usize,
    pub upcoming: usize,
    pub active_equipment: i64,
    pub critical: i64,
    pub medium: i64,
    pub low: i64,
}
