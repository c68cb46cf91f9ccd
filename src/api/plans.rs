//! Lubrication plan endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::plan::{LubricationPlan, PlanDetails, UpdatePlan},
};

/// List all plans with equipment attributes
#[utoipa::path(
    get,
    path = "/plans",
    tag = "plans",
    responses(
        (status = 200, description = "Plans ordered by next due date", body = Vec<PlanDetails>)
    )
)]
pub async fn list_plans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<PlanDetails>>> {
    let plans = state.services.lubrication.list_plans().await?;
    Ok(Json(plans))
}

/// Get plan by ID
#[utoipa::path(
    get,
    path = "/plans/{id}",
    tag = "plans",
    params(("id" = i32, Path, description = "Plan ID")),
    responses(
        (status = 200, description = "Plan details", body = LubricationPlan),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn get_plan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LubricationPlan>> {
    let plan = state.services.lubrication.get_plan(id).await?;
    Ok(Json(plan))
}

/// Edit interval, quantity or lubricant of a plan
#[utoipa::path(
    put,
    path = "/plans/{id}",
    tag = "plans",
    params(("id" = i32, Path, description = "Plan ID")),
    request_body = UpdatePlan,
    responses(
        (status = 200, description = "Plan updated", body = LubricationPlan),
        (status = 400, description = "Invalid values"),
        (status = 404, description = "Plan not found")
    )
)]
pub async fn update_plan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePlan>,
) -> AppResult<Json<LubricationPlan>> {
    let plan = state.services.lubrication.update_plan(id, &data).await?;
    Ok(Json(plan))
}
