//! Lubrication history (execution log) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// One completed lubrication service. Never updated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HistoryEntry {
    pub id: i32,
    pub plan_id: i32,
    pub executed_at: DateTime<Utc>,
    /// Grease actually applied, in grams
    pub quantity_applied: f64,
    pub technician: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Register execution request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterExecution {
    /// Defaults to the current time
    pub executed_at: Option<DateTime<Utc>>,
    #[validate(range(exclusive_min = 0.0, message = "Quantity applied must be positive"))]
    pub quantity_applied: f64,
    #[validate(length(min = 1, max = 100, message = "Technician must be 1 to 100 characters"))]
    pub technician: String,
    pub notes: Option<String>,
}

/// History query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HistoryQuery {
    /// Restrict to one plan
    pub plan_id: Option<i32>,
    pub limit: Option<i64>,
}
