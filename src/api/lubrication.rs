//! Lubrication scheduling endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::{
        history::{HistoryEntry, HistoryQuery, RegisterExecution},
        plan::{ScheduleSummary, UpcomingPlan, UpcomingQuery},
    },
    scheduling::{self, skf},
};

/// SKF calculator query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SkfQuery {
    /// Bearing outer diameter D, in mm
    pub diameter_mm: Option<f64>,
    /// Bearing width B, in mm
    pub width_mm: Option<f64>,
}

/// SKF calculator result
#[derive(Debug, Serialize, ToSchema)]
pub struct SkfResponse {
    pub diameter_mm: f64,
    pub width_mm: f64,
    /// Suggested grease quantity, rounded to 0.01 g
    pub quantity_grams: f64,
    pub formula: String,
}

/// Plans due within the lookahead window
#[utoipa::path(
    get,
    path = "/lubrication/upcoming",
    tag = "lubrication",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Due plans, earliest first", body = Vec<UpcomingPlan>),
        (status = 400, description = "Horizon out of range")
    )
)]
pub async fn list_upcoming(
    State(state): State<crate::AppState>,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<Vec<UpcomingPlan>>> {
    let lubrication = &state.services.lubrication;
    let horizon = lubrication.horizon(query.days)?;
    let upcoming = lubrication.list_upcoming(horizon, Utc::now()).await?;
    Ok(Json(upcoming))
}

/// Register a completed lubrication on a plan
#[utoipa::path(
    post,
    path = "/lubrication/plans/{id}/executions",
    tag = "lubrication",
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = RegisterExecution,
    responses(
        (status = 201, description = "Execution recorded, plan advanced", body = HistoryEntry),
        (status = 400, description = "Invalid quantity or technician"),
        (status = 404, description = "Plan not found"),
        (status = 409, description = "Plan busy with a concurrent registration")
    )
)]
pub async fn register_execution(
    State(state): State<crate::AppState>,
    Path(plan_id): Path<i32>,
    Json(data): Json<RegisterExecution>,
) -> AppResult<(StatusCode, Json<HistoryEntry>)> {
    let entry = state.services.lubrication.register_execution(plan_id, &data).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Lubrication history, newest first
#[utoipa::path(
    get,
    path = "/lubrication/history",
    tag = "lubrication",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Executions", body = Vec<HistoryEntry>),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn list_history(
    State(state): State<crate::AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let lubrication = &state.services.lubrication;
    let limit = lubrication.history_limit(query.limit)?;
    let history = lubrication.list_history(query.plan_id, limit).await?;
    Ok(Json(history))
}

/// SKF grease quantity estimate
#[utoipa::path(
    get,
    path = "/lubrication/skf",
    tag = "lubrication",
    params(SkfQuery),
    responses(
        (status = 200, description = "Suggested quantity", body = SkfResponse),
        (status = 400, description = "Missing or non-positive dimension")
    )
)]
pub async fn calculate_skf(Query(query): Query<SkfQuery>) -> AppResult<Json<SkfResponse>> {
    let (diameter_mm, width_mm) = match (query.diameter_mm, query.width_mm) {
        (Some(d), Some(b)) => (d, b),
        _ => {
            return Err(AppError::Validation(
                "diameter_mm and width_mm are required".to_string(),
            ))
        }
    };
    let grams = scheduling::grease_grams(diameter_mm, width_mm)?;

    Ok(Json(SkfResponse {
        diameter_mm,
        width_mm,
        quantity_grams: skf::round_grams(grams),
        formula: "G = 0.005 × D × B".to_string(),
    }))
}

/// Dashboard counters: urgency buckets and active equipment per criticality
#[utoipa::path(
    get,
    path = "/lubrication/summary",
    tag = "lubrication",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Schedule summary", body = ScheduleSummary)
    )
)]
pub async fn get_summary(
    State(state): State<crate::AppState>,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<ScheduleSummary>> {
    let lubrication = &state.services.lubrication;
    let horizon = lubrication.horizon(query.days)?;
    let summary = lubrication.summary(horizon, Utc::now()).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_skf_endpoint() {
        let Json(body) = calculate_skf(Query(SkfQuery {
            diameter_mm: Some(20.0),
            width_mm: Some(10.0),
        }))
        .await
        .unwrap();
        assert_eq!(body.quantity_grams, 1.0);
        assert_eq!(body.formula, "G = 0.005 × D × B");
    }

    #[tokio::test]
    async fn test_skf_endpoint_rejects_missing_or_zero() {
        let missing = calculate_skf(Query(SkfQuery { diameter_mm: Some(20.0), width_mm: None })).await;
        assert!(matches!(missing, Err(AppError::Validation(_))));

        let zero = calculate_skf(Query(SkfQuery { diameter_mm: Some(0.0), width_mm: Some(10.0) })).await;
        assert!(matches!(zero, Err(AppError::Validation(_))));
    }
}
